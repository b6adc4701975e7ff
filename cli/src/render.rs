use tabled::settings::Style;
use tabled::{Table, Tabled};
use taskcoin_core::{DailyStats, Task};

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Done")]
    done: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Coins")]
    coins: u32,
}

/// Monthly report as a table, one row per day that has data.
pub fn report_table(days: &[DailyStats]) -> String {
    let rows: Vec<ReportRow> = days
        .iter()
        .map(|d| ReportRow {
            day: d.day.to_string(),
            done: format!("{}/{}", d.completed_count(), d.total_count()),
            rate: format!("{:.1}%", d.completion_rate),
            coins: d.coins_earned,
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Numbered today-list, `done N` / `rm N` address these numbers.
pub fn task_list(tasks: &[Task]) -> String {
    tasks
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let mark = if t.is_completed { "x" } else { " " };
            format!("{:>3}. [{}] {}", i + 1, mark, t.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use taskcoin_core::DayKey;

    #[test]
    fn report_table_shows_day_and_coins() {
        let day = DayKey::from_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        let mut task = Task::new("a".to_string(), day);
        task.is_completed = true;
        let stats = DailyStats::compute(day, vec![task]);

        let table = report_table(&[stats]);
        assert!(table.contains("2024-03-15"));
        assert!(table.contains("1/1"));
        assert!(table.contains('4'));
    }

    #[test]
    fn task_list_numbers_from_one() {
        let day = DayKey::from_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        let mut first = Task::new("first".to_string(), day);
        first.is_completed = true;
        let second = Task::new("second".to_string(), day);

        let listed = task_list(&[first, second]);
        assert!(listed.contains("1. [x] first"));
        assert!(listed.contains("2. [ ] second"));
    }
}
