//! Snapshot store for fetched notifications
//!
//! Holds the current per-account snapshot behind an RwLock. Fetch
//! rounds replace the snapshot atomically; readers never observe a
//! partially applied round. Each round carries a generation number so
//! a slow round can never overwrite a newer one.

use std::sync::RwLock;

use log::debug;

use crate::github::ApiError;
use crate::models::{Account, AccountNotifications, Notification, NotificationId, Settings};

/// Lifecycle of the store relative to fetch and mutation activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// How notifications leave the snapshot after a successful mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalStrategy {
    /// Drop the notification from the snapshot immediately
    Remove,
    /// Keep it visible but flip it to read; the next fetch round
    /// reconciles
    MarkRead,
}

impl RemovalStrategy {
    pub fn for_settings(settings: &Settings) -> Self {
        if settings.delay_notification_state {
            RemovalStrategy::MarkRead
        } else {
            RemovalStrategy::Remove
        }
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    snapshot: Vec<AccountNotifications>,
    status: Status,
    global_error: Option<ApiError>,
    round_started: u64,
    round_applied: u64,
    account_uuids: Vec<String>,
}

/// Thread-safe holder of the current notification snapshot
#[derive(Debug, Default)]
pub struct NotificationStore {
    inner: RwLock<StoreInner>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the configured account set.
    ///
    /// Snapshot entries for removed accounts are purged immediately;
    /// in-flight rounds learn about the change when they apply.
    pub fn set_accounts(&self, accounts: &[Account]) {
        let uuids: Vec<String> = accounts.iter().map(|a| a.uuid()).collect();
        let mut inner = self.inner.write().unwrap();
        inner
            .snapshot
            .retain(|entry| uuids.contains(&entry.account.uuid()));
        inner.account_uuids = uuids;
    }

    /// Purge one account and everything fetched for it
    pub fn remove_account(&self, account: &Account) {
        let mut inner = self.inner.write().unwrap();
        let uuid = account.uuid();
        inner.account_uuids.retain(|u| *u != uuid);
        inner.snapshot.retain(|entry| !entry.account.is_same(account));
    }

    /// Start a new fetch round and return its generation number
    pub fn begin_round(&self) -> u64 {
        let mut inner = self.inner.write().unwrap();
        inner.round_started += 1;
        inner.status = Status::Loading;
        inner.round_started
    }

    /// Apply a completed fetch round.
    ///
    /// Returns false when the round was stale (a newer round already
    /// applied) and was discarded. Results for accounts that were
    /// removed while the round was in flight are dropped. The global
    /// error is set only when every account failed with the identical
    /// error.
    pub fn apply_round(&self, round_id: u64, results: Vec<AccountNotifications>) -> bool {
        let mut inner = self.inner.write().unwrap();
        if round_id <= inner.round_applied {
            debug!(
                "Discarding stale fetch round {} (round {} already applied)",
                round_id, inner.round_applied
            );
            return false;
        }

        let results: Vec<AccountNotifications> = results
            .into_iter()
            .filter(|entry| inner.account_uuids.contains(&entry.account.uuid()))
            .collect();

        let all_failed_identically = !results.is_empty()
            && results.iter().all(|entry| entry.error.is_some())
            && results
                .windows(2)
                .all(|pair| pair[0].error == pair[1].error);

        if all_failed_identically {
            inner.global_error = results[0].error.clone();
            inner.status = Status::Error;
        } else {
            inner.global_error = None;
            inner.status = Status::Success;
        }
        inner.snapshot = results;
        inner.round_applied = round_id;
        true
    }

    /// Remove (or flag as read) a set of notifications in one account.
    ///
    /// IDs no longer present in the snapshot are ignored, so a removal
    /// racing a fetch round is a no-op rather than an error.
    pub fn remove_notifications(
        &self,
        account: &Account,
        ids: &[NotificationId],
        strategy: RemovalStrategy,
    ) {
        let mut inner = self.inner.write().unwrap();
        let Some(entry) = inner
            .snapshot
            .iter_mut()
            .find(|entry| entry.account.is_same(account))
        else {
            return;
        };
        match strategy {
            RemovalStrategy::Remove => {
                entry.notifications.retain(|n| !ids.contains(&n.id));
            }
            RemovalStrategy::MarkRead => {
                for notification in entry
                    .notifications
                    .iter_mut()
                    .filter(|n| ids.contains(&n.id))
                {
                    notification.unread = false;
                }
            }
        }
    }

    pub fn set_status(&self, status: Status) {
        self.inner.write().unwrap().status = status;
    }

    /// Clone of the current snapshot
    pub fn snapshot(&self) -> Vec<AccountNotifications> {
        self.inner.read().unwrap().snapshot.clone()
    }

    /// Notifications for one account, empty when the account has no
    /// snapshot entry
    pub fn notifications_for(&self, account: &Account) -> Vec<Notification> {
        self.inner
            .read()
            .unwrap()
            .snapshot
            .iter()
            .find(|entry| entry.account.is_same(account))
            .map(|entry| entry.notifications.clone())
            .unwrap_or_default()
    }

    pub fn status(&self) -> Status {
        self.inner.read().unwrap().status
    }

    pub fn global_error(&self) -> Option<ApiError> {
        self.inner.read().unwrap().global_error.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{make_account, make_account_notifications, make_notification};

    fn store_with_accounts(accounts: &[Account]) -> NotificationStore {
        let store = NotificationStore::new();
        store.set_accounts(accounts);
        store
    }

    #[test]
    fn test_apply_round_replaces_snapshot() {
        let account = make_account("github.com", "octocat");
        let store = store_with_accounts(std::slice::from_ref(&account));

        let round = store.begin_round();
        assert_eq!(store.status(), Status::Loading);

        let applied = store.apply_round(
            round,
            vec![make_account_notifications(
                account.clone(),
                vec![make_notification("1", "acme/widgets")],
            )],
        );
        assert!(applied);
        assert_eq!(store.status(), Status::Success);
        assert_eq!(store.snapshot()[0].notifications.len(), 1);
    }

    #[test]
    fn test_stale_round_is_discarded() {
        let account = make_account("github.com", "octocat");
        let store = store_with_accounts(std::slice::from_ref(&account));

        let slow = store.begin_round();
        let fast = store.begin_round();

        assert!(store.apply_round(
            fast,
            vec![make_account_notifications(
                account.clone(),
                vec![make_notification("2", "acme/widgets")],
            )],
        ));
        // The slow round finishes after the fast one applied
        assert!(!store.apply_round(
            slow,
            vec![make_account_notifications(
                account.clone(),
                vec![make_notification("1", "acme/widgets")],
            )],
        ));
        let snapshot = store.snapshot();
        assert_eq!(snapshot[0].notifications[0].id.as_str(), "2");
    }

    #[test]
    fn test_removed_account_results_are_dropped() {
        let kept = make_account("github.com", "octocat");
        let removed = make_account("github.com", "hubot");
        let store = store_with_accounts(&[kept.clone(), removed.clone()]);

        let round = store.begin_round();
        store.set_accounts(std::slice::from_ref(&kept));

        store.apply_round(
            round,
            vec![
                make_account_notifications(kept.clone(), vec![]),
                make_account_notifications(removed, vec![make_notification("9", "x/y")]),
            ],
        );
        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot[0].account.is_same(&kept));
    }

    #[test]
    fn test_global_error_requires_identical_failures() {
        use crate::github::ApiError;

        let a = make_account("github.com", "octocat");
        let b = make_account("github.example.com", "hubot");
        let store = store_with_accounts(&[a.clone(), b.clone()]);

        // Identical failures produce a global error
        let round = store.begin_round();
        store.apply_round(
            round,
            vec![
                AccountNotifications {
                    account: a.clone(),
                    notifications: vec![],
                    error: Some(ApiError::BadCredentials),
                },
                AccountNotifications {
                    account: b.clone(),
                    notifications: vec![],
                    error: Some(ApiError::BadCredentials),
                },
            ],
        );
        assert_eq!(store.global_error(), Some(ApiError::BadCredentials));
        assert_eq!(store.status(), Status::Error);

        // Mixed failures stay per-account
        let round = store.begin_round();
        store.apply_round(
            round,
            vec![
                AccountNotifications {
                    account: a.clone(),
                    notifications: vec![],
                    error: Some(ApiError::BadCredentials),
                },
                AccountNotifications {
                    account: b.clone(),
                    notifications: vec![],
                    error: Some(ApiError::RateLimited),
                },
            ],
        );
        assert_eq!(store.global_error(), None);
        assert_eq!(store.status(), Status::Success);
    }

    #[test]
    fn test_partial_failure_keeps_other_accounts() {
        use crate::github::ApiError;

        let a = make_account("github.com", "octocat");
        let b = make_account("github.example.com", "hubot");
        let store = store_with_accounts(&[a.clone(), b.clone()]);

        let round = store.begin_round();
        store.apply_round(
            round,
            vec![
                make_account_notifications(a.clone(), vec![make_notification("1", "x/y")]),
                AccountNotifications {
                    account: b.clone(),
                    notifications: vec![],
                    error: Some(ApiError::Network),
                },
            ],
        );
        assert_eq!(store.global_error(), None);
        let snapshot = store.snapshot();
        assert_eq!(snapshot[0].notifications.len(), 1);
        assert_eq!(snapshot[1].error, Some(ApiError::Network));
    }

    #[test]
    fn test_remove_notifications_structural() {
        let account = make_account("github.com", "octocat");
        let store = store_with_accounts(std::slice::from_ref(&account));
        let round = store.begin_round();
        store.apply_round(
            round,
            vec![make_account_notifications(
                account.clone(),
                vec![
                    make_notification("1", "acme/widgets"),
                    make_notification("2", "acme/widgets"),
                ],
            )],
        );

        store.remove_notifications(
            &account,
            &[NotificationId::new("1"), NotificationId::new("404")],
            RemovalStrategy::Remove,
        );
        let snapshot = store.snapshot();
        assert_eq!(snapshot[0].notifications.len(), 1);
        assert_eq!(snapshot[0].notifications[0].id.as_str(), "2");
    }

    #[test]
    fn test_remove_notifications_mark_read_keeps_entry() {
        let account = make_account("github.com", "octocat");
        let store = store_with_accounts(std::slice::from_ref(&account));
        let round = store.begin_round();
        store.apply_round(
            round,
            vec![make_account_notifications(
                account.clone(),
                vec![make_notification("1", "acme/widgets")],
            )],
        );

        store.remove_notifications(
            &account,
            &[NotificationId::new("1")],
            RemovalStrategy::MarkRead,
        );
        let snapshot = store.snapshot();
        assert_eq!(snapshot[0].notifications.len(), 1);
        assert!(snapshot[0].notifications[0].is_read());
    }

    #[test]
    fn test_remove_account_purges_and_blocks_inflight_results() {
        let kept = make_account("github.com", "octocat");
        let removed = make_account("github.com", "hubot");
        let store = store_with_accounts(&[kept.clone(), removed.clone()]);

        let round = store.begin_round();
        store.remove_account(&removed);
        store.apply_round(
            round,
            vec![
                make_account_notifications(kept.clone(), vec![]),
                make_account_notifications(removed, vec![make_notification("9", "x/y")]),
            ],
        );
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_set_accounts_purges_removed() {
        let kept = make_account("github.com", "octocat");
        let removed = make_account("github.com", "hubot");
        let store = store_with_accounts(&[kept.clone(), removed.clone()]);
        let round = store.begin_round();
        store.apply_round(
            round,
            vec![
                make_account_notifications(kept.clone(), vec![]),
                make_account_notifications(removed.clone(), vec![]),
            ],
        );

        store.set_accounts(std::slice::from_ref(&kept));
        assert_eq!(store.snapshot().len(), 1);
    }
}
