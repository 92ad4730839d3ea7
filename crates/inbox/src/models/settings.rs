//! Engine settings controlling fetch cadence and mutation behavior

use serde::{Deserialize, Serialize};

/// Default and minimum interval between notification fetch rounds
pub const DEFAULT_FETCH_INTERVAL_MS: u64 = 60_000;

/// Minimum interval between notification fetch rounds
pub const MIN_FETCH_INTERVAL_MS: u64 = 60_000;

/// Maximum interval between notification fetch rounds
pub const MAX_FETCH_INTERVAL_MS: u64 = 3_600_000;

/// Granularity the fetch interval is rounded to
pub const FETCH_INTERVAL_STEP_MS: u64 = 60_000;

/// Interval between background account user detail refreshes
pub const ACCOUNT_REFRESH_INTERVAL_MS: u64 = 3_600_000;

/// How the notification list is grouped for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupBy {
    Repository,
    Date,
}

/// User-tunable engine settings.
///
/// Unknown fields in persisted JSON are ignored and missing fields fall
/// back to defaults, so settings survive upgrades in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Grouping mode for the notification list
    pub group_by: GroupBy,
    /// Interval between fetch rounds, clamped to the supported range
    pub fetch_interval_ms: u64,
    /// Fetch all notifications rather than only unread ones
    pub fetch_all_notifications: bool,
    /// Enrich notifications with subject details (state, user, reviews)
    pub detailed_notifications: bool,
    /// Only fetch notifications the user is directly participating in
    pub participating: bool,
    /// Hide notifications triggered by non-human accounts
    pub hide_bots: bool,
    /// Keep read notifications visible until the next fetch round
    pub delay_notification_state: bool,
    /// Mark a notification as done when it is opened in the browser
    pub mark_as_done_on_open: bool,
    /// Mark a notification as done when unsubscribing from its thread
    pub mark_as_done_on_unsubscribe: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            group_by: GroupBy::Repository,
            fetch_interval_ms: DEFAULT_FETCH_INTERVAL_MS,
            fetch_all_notifications: false,
            detailed_notifications: true,
            participating: false,
            hide_bots: false,
            delay_notification_state: false,
            mark_as_done_on_open: false,
            mark_as_done_on_unsubscribe: false,
        }
    }
}
