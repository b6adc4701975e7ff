use std::collections::BTreeMap;

use anyhow::{bail, Result};
use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::event::{StoreEvent, Subscriber};
use crate::model::stats::DailyStats;
use crate::model::task::Task;
use crate::time::{month_bounds, Clock, DayKey, SystemClock};

/// In-memory owner of all task and coin state.
///
/// Mutations go through `&mut self`, so exclusive access is
/// compiler-enforced; an embedder that shares the store across threads
/// wraps it in a `Mutex`. Each mutation replaces the day's task list and
/// its derived stats as one step, then notifies subscribers, so observers
/// never see the two out of sync.
///
/// "Today" is `DayKey::of(clock.now())` evaluated per call. Tasks keep the
/// day key stamped at creation, so crossing midnight mid-session routes
/// new adds to the new day without moving existing tasks.
pub struct DayTaskStore<C: Clock = SystemClock> {
    clock: C,
    days: BTreeMap<DayKey, DailyStats>,
    total_coins: u32,
    selected_report: Option<(DayKey, Vec<DailyStats>)>,
    subscribers: Vec<Subscriber>,
}

impl DayTaskStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for DayTaskStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> DayTaskStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            days: BTreeMap::new(),
            total_coins: 0,
            selected_report: None,
            subscribers: Vec::new(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Register an observer called after every commit.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&StoreEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    // --- mutation surface -------------------------------------------------

    /// Append a new task to today's list.
    ///
    /// Rejects blank names instead of trusting the caller to have filtered
    /// them. Returns a snapshot of the created task.
    pub fn add_task(&mut self, name: &str) -> Result<Task> {
        if name.trim().is_empty() {
            bail!("task name must not be blank");
        }
        let today = self.today();
        let task = Task::new(name.to_string(), today);
        let mut tasks = self.tasks_for(today);
        tasks.push(task.clone());
        self.commit_day(today, tasks);
        Ok(task)
    }

    /// Rename a task in today's list. A missing id is a silent no-op.
    pub fn edit_task(&mut self, id: Uuid, new_name: &str) -> Result<()> {
        if new_name.trim().is_empty() {
            bail!("task name must not be blank");
        }
        let today = self.today();
        let mut tasks = self.tasks_for(today);
        if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
            task.name = new_name.to_string();
            self.commit_day(today, tasks);
        }
        Ok(())
    }

    /// Remove a task from today's list. A missing id is a silent no-op.
    pub fn delete_task(&mut self, id: Uuid) {
        let today = self.today();
        let mut tasks = self.tasks_for(today);
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() != before {
            self.commit_day(today, tasks);
        }
    }

    /// Flip a task's completion flag. A missing id is a silent no-op.
    pub fn toggle_task_completion(&mut self, id: Uuid) {
        let today = self.today();
        let mut tasks = self.tasks_for(today);
        if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
            task.is_completed = !task.is_completed;
            self.commit_day(today, tasks);
        }
    }

    // --- queries ----------------------------------------------------------

    /// Snapshot of today's task list, in insertion order.
    pub fn today_tasks(&self) -> Vec<Task> {
        self.tasks_for(self.today())
    }

    /// Lifetime coin total across all days.
    pub fn total_coins(&self) -> u32 {
        self.total_coins
    }

    /// Stats for every stored day in the month containing `reference`,
    /// ascending by day. Days that never saw a task are absent.
    pub fn report_for_month(&self, reference: DateTime<Local>) -> Vec<DailyStats> {
        let (first, last) = month_bounds(reference);
        self.days
            .range(first..=last)
            .map(|(_, stats)| stats.clone())
            .collect()
    }

    /// Select the report month and publish its data to subscribers.
    ///
    /// The report is computed at selection time and not refreshed by later
    /// mutations, matching the reference behavior.
    pub fn select_report_month(&mut self, reference: DateTime<Local>) {
        let (first, _) = month_bounds(reference);
        let days = self.report_for_month(reference);
        log::debug!("report month selected: {} ({} days)", first, days.len());
        self.selected_report = Some((first, days.clone()));
        let event = StoreEvent::ReportChanged { month: first, days };
        self.notify(&event);
    }

    /// Data for the currently selected report month; empty when no month
    /// has been selected yet.
    pub fn report_data(&self) -> Vec<DailyStats> {
        self.selected_report
            .as_ref()
            .map(|(_, days)| days.clone())
            .unwrap_or_default()
    }

    // --- internals --------------------------------------------------------

    fn today(&self) -> DayKey {
        DayKey::of(self.clock.now())
    }

    fn tasks_for(&self, day: DayKey) -> Vec<Task> {
        self.days
            .get(&day)
            .map(|stats| stats.tasks.clone())
            .unwrap_or_default()
    }

    /// Replace a day's task list, recompute its stats and the lifetime
    /// total, then notify. The one write path every mutation funnels into.
    fn commit_day(&mut self, day: DayKey, tasks: Vec<Task>) {
        let stats = DailyStats::compute(day, tasks);
        log::debug!(
            "{}: {}/{} done, {} coins",
            day,
            stats.completed_count(),
            stats.total_count(),
            stats.coins_earned
        );
        self.days.insert(day, stats);
        // Recomputed wholesale; a day emptied by deletes keeps its entry
        // and contributes 0.
        self.total_coins = self.days.values().map(|s| s.coins_earned).sum();
        let event = StoreEvent::TodayChanged {
            day,
            tasks: self.tasks_for(day),
            total_coins: self.total_coins,
        };
        self.notify(&event);
    }

    fn notify(&mut self, event: &StoreEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }
}
