//! Mutation handlers for notification threads
//!
//! Mutations are optimistic: a successful remote call removes the
//! notification from the snapshot immediately instead of waiting for
//! the next fetch round. Remote failures are logged and swallowed; the
//! notification simply stays until the next round reconciles.

use std::sync::Arc;

use log::warn;

use crate::github::NotificationClient;
use crate::models::{Account, Notification, NotificationId, Settings};
use crate::store::{NotificationStore, RemovalStrategy, Status};

/// Executes mutations against the remote API and reconciles the
/// snapshot with the outcome
pub struct ActionHandler<C> {
    client: Arc<C>,
    store: Arc<NotificationStore>,
}

impl<C: NotificationClient> ActionHandler<C> {
    pub fn new(client: Arc<C>, store: Arc<NotificationStore>) -> Self {
        Self { client, store }
    }

    /// Mark a set of notifications as read
    pub fn mark_read(&self, notifications: &[Notification], settings: &Settings) {
        self.mutate(notifications, settings, "mark read", |client, n| {
            client.mark_thread_read(&n.account, &n.id)
        });
    }

    /// Mark a set of notifications as done
    pub fn mark_done(&self, notifications: &[Notification], settings: &Settings) {
        self.mutate(notifications, settings, "mark done", |client, n| {
            client.mark_thread_done(&n.account, &n.id)
        });
    }

    /// Unsubscribe from a notification's thread.
    ///
    /// On success the thread is also marked read (or done, per
    /// settings) so it leaves the snapshot. If the unsubscribe call
    /// itself fails nothing else happens.
    pub fn unsubscribe(&self, notification: &Notification, settings: &Settings) {
        self.store.set_status(Status::Loading);
        if let Err(error) = self
            .client
            .unsubscribe_thread(&notification.account, &notification.id)
        {
            warn!(
                "Unsubscribe failed for thread {}: {}",
                notification.id.as_str(),
                error
            );
            self.store.set_status(Status::Success);
            return;
        }
        let notifications = std::slice::from_ref(notification);
        if settings.mark_as_done_on_unsubscribe {
            self.mark_done(notifications, settings);
        } else {
            self.mark_read(notifications, settings);
        }
    }

    /// Mark every notification in a repository group as read with one
    /// repository-level call.
    ///
    /// The group must belong to a single account and repository; the
    /// first notification determines both.
    pub fn mark_repository_read(&self, group: &[Notification], settings: &Settings) {
        let Some(first) = group.first() else { return };
        self.store.set_status(Status::Loading);
        match self
            .client
            .mark_repository_read(&first.account, &first.repository.full_name)
        {
            Ok(()) => {
                let ids: Vec<NotificationId> = group.iter().map(|n| n.id.clone()).collect();
                self.store.remove_notifications(
                    &first.account,
                    &ids,
                    RemovalStrategy::for_settings(settings),
                );
            }
            Err(error) => {
                warn!(
                    "Repository mark read failed for {}: {}",
                    first.repository.full_name, error
                );
            }
        }
        self.store.set_status(Status::Success);
    }

    /// Mark every notification in a repository group as done.
    ///
    /// There is no repository-level done endpoint, so this fans out one
    /// call per thread without short-circuiting, then removes the whole
    /// group.
    pub fn mark_repository_done(&self, group: &[Notification], settings: &Settings) {
        let Some(first) = group.first() else { return };
        self.store.set_status(Status::Loading);
        for notification in group {
            if let Err(error) = self
                .client
                .mark_thread_done(&notification.account, &notification.id)
            {
                warn!(
                    "Mark done failed for thread {}: {}",
                    notification.id.as_str(),
                    error
                );
            }
        }
        let ids: Vec<NotificationId> = group.iter().map(|n| n.id.clone()).collect();
        self.store
            .remove_notifications(&first.account, &ids, RemovalStrategy::for_settings(settings));
        self.store.set_status(Status::Success);
    }

    /// Run one mutation per notification, then remove the successes
    /// from the snapshot grouped by account
    fn mutate<F>(&self, notifications: &[Notification], settings: &Settings, what: &str, op: F)
    where
        F: Fn(&C, &Notification) -> Result<(), crate::github::ApiError>,
    {
        self.store.set_status(Status::Loading);
        let strategy = RemovalStrategy::for_settings(settings);

        let mut removed: Vec<(Account, Vec<NotificationId>)> = Vec::new();
        for notification in notifications {
            match op(self.client.as_ref(), notification) {
                Ok(()) => {
                    if let Some(entry) = removed
                        .iter_mut()
                        .find(|(account, _)| account.is_same(&notification.account))
                    {
                        entry.1.push(notification.id.clone());
                    } else {
                        removed.push((notification.account.clone(), vec![notification.id.clone()]));
                    }
                }
                Err(error) => {
                    warn!(
                        "Failed to {} thread {}: {}",
                        what,
                        notification.id.as_str(),
                        error
                    );
                }
            }
        }

        for (account, ids) in removed {
            self.store.remove_notifications(&account, &ids, strategy);
        }
        self.store.set_status(Status::Success);
    }
}
