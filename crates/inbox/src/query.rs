//! Count and grouping projections over the snapshot
//!
//! Pure functions consumed by rendering layers; the store itself never
//! groups or counts.

use chrono::NaiveDate;

use crate::models::{AccountNotifications, GroupBy, Notification};

/// Notifications of one repository, in snapshot order
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryGroup {
    pub full_name: String,
    pub notifications: Vec<Notification>,
}

/// Notifications of one calendar day, in snapshot order
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub notifications: Vec<Notification>,
}

/// Result of grouping a notification list
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationGroups {
    ByRepository(Vec<RepositoryGroup>),
    ByDate(Vec<DateGroup>),
}

/// Partition notifications by repository, preserving first-appearance
/// order of repositories and snapshot order within each group
pub fn group_by_repository(notifications: &[Notification]) -> Vec<RepositoryGroup> {
    let mut groups: Vec<RepositoryGroup> = Vec::new();
    for notification in notifications {
        let full_name = &notification.repository.full_name;
        if let Some(group) = groups.iter_mut().find(|g| g.full_name == *full_name) {
            group.notifications.push(notification.clone());
        } else {
            groups.push(RepositoryGroup {
                full_name: full_name.clone(),
                notifications: vec![notification.clone()],
            });
        }
    }
    groups
}

/// Partition notifications by calendar day of their last update,
/// preserving first-appearance order of days and snapshot order within
/// each group. The fetch already returns reverse-chronological input,
/// so the projector never re-sorts.
pub fn group_by_date(notifications: &[Notification]) -> Vec<DateGroup> {
    let mut groups: Vec<DateGroup> = Vec::new();
    for notification in notifications {
        let date = notification.updated_at.date_naive();
        if let Some(group) = groups.iter_mut().find(|g| g.date == date) {
            group.notifications.push(notification.clone());
        } else {
            groups.push(DateGroup {
                date,
                notifications: vec![notification.clone()],
            });
        }
    }
    groups
}

/// Group a notification list according to the configured mode
pub fn group_notifications(
    notifications: &[Notification],
    group_by: GroupBy,
) -> NotificationGroups {
    match group_by {
        GroupBy::Repository => NotificationGroups::ByRepository(group_by_repository(notifications)),
        GroupBy::Date => NotificationGroups::ByDate(group_by_date(notifications)),
    }
}

/// Total notifications across all accounts, failed accounts counting
/// as zero
pub fn total_notification_count(accounts: &[AccountNotifications]) -> usize {
    accounts.iter().map(|entry| entry.notifications.len()).sum()
}

/// Total unread notifications across all accounts
pub fn total_unread_count(accounts: &[AccountNotifications]) -> usize {
    accounts
        .iter()
        .flat_map(|entry| entry.notifications.iter())
        .filter(|n| n.unread)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::github::ApiError;
    use crate::testing::{make_account, make_account_notifications, make_notification};

    #[test]
    fn test_group_by_repository_first_appearance_order() {
        let notifications = vec![
            make_notification("1", "acme/widgets"),
            make_notification("2", "globex/gears"),
            make_notification("3", "acme/widgets"),
        ];
        let groups = group_by_repository(&notifications);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].full_name, "acme/widgets");
        assert_eq!(groups[0].notifications.len(), 2);
        assert_eq!(groups[1].full_name, "globex/gears");
    }

    #[test]
    fn test_group_by_date_first_appearance_order() {
        let recent = make_notification("1", "acme/widgets");
        let mut old = make_notification("2", "acme/widgets");
        old.updated_at = Utc.with_ymd_and_hms(2024, 5, 30, 8, 0, 0).unwrap();
        let mut recent_again = make_notification("3", "acme/widgets");
        recent_again.updated_at = recent.updated_at;

        let groups = group_by_date(&[recent.clone(), old, recent_again]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, recent.updated_at.date_naive());
        assert_eq!(groups[0].notifications.len(), 2);
        assert_eq!(groups[1].notifications.len(), 1);
    }

    #[test]
    fn test_counts_ignore_failed_accounts() {
        let good = make_account_notifications(
            make_account("github.com", "octocat"),
            vec![make_notification("1", "x/y")],
        );
        let mut read = make_notification("2", "x/y");
        read.unread = false;
        let with_read = make_account_notifications(
            make_account("github.example.com", "hubot"),
            vec![read],
        );
        let failed = AccountNotifications {
            account: make_account("github.example.com", "bender"),
            notifications: vec![],
            error: Some(ApiError::RateLimited),
        };

        let accounts = vec![good, with_read, failed];
        assert_eq!(total_notification_count(&accounts), 2);
        assert_eq!(total_unread_count(&accounts), 1);
    }
}
