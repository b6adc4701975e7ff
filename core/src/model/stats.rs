use serde::{Deserialize, Serialize};

use crate::model::task::Task;
use crate::reward::coins_for;
use crate::time::DayKey;

/// Derived statistics for one calendar day, kept consistent with `tasks`
/// by construction: the only way to build one is [`DailyStats::compute`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyStats {
    pub day: DayKey,
    /// Insertion-ordered task list for the day.
    pub tasks: Vec<Task>,
    /// Percent of tasks completed, in [0, 100]. 0 for an empty day.
    pub completion_rate: f64,
    pub coins_earned: u32,
}

impl DailyStats {
    /// Aggregate a day's task list into its stats entry.
    pub fn compute(day: DayKey, tasks: Vec<Task>) -> Self {
        let completed = tasks.iter().filter(|t| t.is_completed).count();
        let total = tasks.len();
        let completion_rate = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        let coins_earned = coins_for(completion_rate, completed);
        Self {
            day,
            tasks,
            completion_rate,
            coins_earned,
        }
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed).count()
    }

    pub fn total_count(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> DayKey {
        DayKey::from_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    }

    fn task(name: &str, done: bool) -> Task {
        let mut t = Task::new(name.to_string(), day());
        t.is_completed = done;
        t
    }

    #[test]
    fn empty_day_has_zero_rate_and_coins() {
        let stats = DailyStats::compute(day(), vec![]);
        assert_eq!(stats.completion_rate, 0.0);
        assert_eq!(stats.coins_earned, 0);
    }

    #[test]
    fn one_of_three_done_lands_in_second_tier() {
        let tasks = vec![task("a", true), task("b", false), task("c", false)];
        let stats = DailyStats::compute(day(), tasks);
        assert!((stats.completion_rate - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.coins_earned, 2);
    }

    #[test]
    fn compute_is_idempotent() {
        let tasks = vec![task("a", true), task("b", false)];
        let first = DailyStats::compute(day(), tasks.clone());
        let second = DailyStats::compute(day(), tasks);
        assert_eq!(first, second);
    }

    #[test]
    fn stats_stay_consistent_with_tasks() {
        let tasks = vec![task("a", true), task("b", true), task("c", false)];
        let stats = DailyStats::compute(day(), tasks);
        assert_eq!(
            stats.coins_earned,
            coins_for(stats.completion_rate, stats.completed_count())
        );
    }
}
