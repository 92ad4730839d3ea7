//! Domain models for notification entities

mod account;
mod filter_settings;
mod notification;
mod settings;

pub use account::{Account, AccountUser, AuthMethod, Credential, Platform};
pub use filter_settings::{
    FilterSettings, FilterState, InvalidSearchToken, SearchPrefix, SearchToken,
};
pub use notification::{
    AccountNotifications, Milestone, Notification, NotificationId, Reason, Repository, Review,
    Subject, SubjectState, SubjectType, SubjectUser, UserType,
};
pub use settings::{
    ACCOUNT_REFRESH_INTERVAL_MS, DEFAULT_FETCH_INTERVAL_MS, FETCH_INTERVAL_STEP_MS, GroupBy,
    MAX_FETCH_INTERVAL_MS, MIN_FETCH_INTERVAL_MS, Settings,
};
