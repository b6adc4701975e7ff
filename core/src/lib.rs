pub mod event;
pub mod model;
pub mod reward;
pub mod store;
pub mod time;

pub use event::StoreEvent;
pub use model::stats::DailyStats;
pub use model::task::Task;
pub use reward::coins_for;
pub use store::DayTaskStore;
pub use time::{month_bounds, Clock, DayKey, FixedClock, SystemClock};
