//! Detection of notifications that are new since the previous round

use crate::models::{AccountNotifications, Notification};

/// Unread notifications present in `current` but absent from the same
/// account's entry in `previous`.
///
/// Accounts are matched by identity, so reordering entries between
/// rounds produces no false positives. An account absent from
/// `previous` contributes all of its unread notifications.
pub fn new_notifications(
    previous: &[AccountNotifications],
    current: &[AccountNotifications],
) -> Vec<Notification> {
    let mut fresh = Vec::new();
    for entry in current {
        let old_ids: Vec<_> = previous
            .iter()
            .find(|prev| prev.account.is_same(&entry.account))
            .map(|prev| prev.notifications.iter().map(|n| &n.id).collect())
            .unwrap_or_default();
        fresh.extend(
            entry
                .notifications
                .iter()
                .filter(|n| n.unread && !old_ids.contains(&&n.id))
                .cloned(),
        );
    }
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{make_account, make_account_notifications, make_notification};

    #[test]
    fn test_only_unseen_unread_count_as_new() {
        let account = make_account("github.com", "octocat");
        let previous = vec![make_account_notifications(
            account.clone(),
            vec![make_notification("1", "acme/widgets")],
        )];

        let mut read = make_notification("3", "acme/widgets");
        read.unread = false;
        let current = vec![make_account_notifications(
            account.clone(),
            vec![
                make_notification("1", "acme/widgets"),
                make_notification("2", "acme/widgets"),
                read,
            ],
        )];

        let fresh = new_notifications(&previous, &current);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].id.as_str(), "2");
    }

    #[test]
    fn test_account_order_does_not_matter() {
        let a = make_account("github.com", "octocat");
        let b = make_account("github.example.com", "hubot");

        let previous = vec![
            make_account_notifications(a.clone(), vec![make_notification("1", "x/y")]),
            make_account_notifications(b.clone(), vec![make_notification("2", "x/y")]),
        ];
        // Same content, entries swapped
        let current = vec![
            make_account_notifications(b.clone(), vec![make_notification("2", "x/y")]),
            make_account_notifications(a.clone(), vec![make_notification("1", "x/y")]),
        ];

        assert!(new_notifications(&previous, &current).is_empty());
    }

    #[test]
    fn test_new_account_contributes_everything_unread() {
        let account = make_account("github.com", "octocat");
        let current = vec![make_account_notifications(
            account.clone(),
            vec![
                make_notification("1", "x/y"),
                make_notification("2", "x/y"),
            ],
        )];
        assert_eq!(new_notifications(&[], &current).len(), 2);
    }
}
