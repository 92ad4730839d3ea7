//! Fetch rounds, diffing and refresh scheduling

mod diff;
mod fetch;
mod scheduler;
mod timing;

pub use diff::new_notifications;
pub use fetch::{fetch_account, fetch_round};
pub use scheduler::RefreshScheduler;
pub use timing::clamp_fetch_interval;
