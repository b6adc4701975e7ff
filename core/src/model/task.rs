use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::DayKey;

/// A single to-do item, always owned by the day it was created on.
///
/// The id is assigned once and never changes; edits and completion toggles
/// mutate in place. `created_day` is stamped from the clock at insertion
/// time and is not rewritten afterwards, so a session spanning midnight
/// leaves earlier tasks on their original day.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub is_completed: bool,
    pub created_day: DayKey,
}

impl Task {
    pub fn new(name: String, created_day: DayKey) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            is_completed: false,
            created_day,
        }
    }
}
