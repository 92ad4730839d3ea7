//! Inbox crate - GitHub notification aggregation engine
//!
//! This crate provides platform-independent notification functionality
//! including:
//! - Domain models (Account, Notification, Settings, FilterSettings)
//! - GitHub API client and response normalization
//! - Composable filter pipeline (reason, user type, subject type, state,
//!   organization, search tokens)
//! - Snapshot store with atomic per-round replacement
//! - Action handlers for mutations (read, done, unsubscribe, repository bulk)
//! - Grouping and count projections for UI consumption
//!
//! This crate has zero UI dependencies. Rendering layers consume the
//! [`Engine`] facade, the query functions and the filter registry.

pub mod actions;
pub mod alerts;
pub mod engine;
pub mod filters;
pub mod github;
pub mod links;
pub mod models;
pub mod persist;
pub mod query;
pub mod store;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

pub use actions::ActionHandler;
pub use alerts::{AlertSink, LogAlertSink};
pub use engine::Engine;
pub use filters::{
    Dimension, FilterDimension, TypeDetails, apply_filters, all_dimensions, passes_filters,
};
pub use github::{ApiError, FetchOptions, GithubClient, NotificationClient, normalize};
pub use models::{
    Account, AccountNotifications, AccountUser, AuthMethod, Credential, FilterSettings,
    FilterState, GroupBy, Notification, NotificationId, Platform, Reason, Repository, Review,
    SearchPrefix, SearchToken, Settings, Subject, SubjectState, SubjectType, SubjectUser,
    UserType,
};
pub use persist::{PersistedState, load_state, save_state};
pub use query::{
    DateGroup, NotificationGroups, RepositoryGroup, group_by_date, group_by_repository,
    group_notifications, total_notification_count, total_unread_count,
};
pub use store::{NotificationStore, RemovalStrategy, Status};
pub use sync::{RefreshScheduler, clamp_fetch_interval, fetch_round, new_notifications};
