//! Change notification for the presentation layer.
//!
//! Events carry owned snapshots taken after the commit, so a subscriber can
//! hold on to them without observing later mutations.

use serde::Serialize;

use crate::model::stats::DailyStats;
use crate::model::task::Task;
use crate::time::DayKey;

/// What changed in the store, published after each commit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum StoreEvent {
    /// Today's task list changed (add/edit/delete/toggle).
    TodayChanged {
        day: DayKey,
        tasks: Vec<Task>,
        total_coins: u32,
    },
    /// A report month was selected; `month` is its first day.
    ReportChanged {
        month: DayKey,
        days: Vec<DailyStats>,
    },
}

/// Boxed observer callback registered with [`crate::store::DayTaskStore::subscribe`].
pub type Subscriber = Box<dyn FnMut(&StoreEvent)>;
