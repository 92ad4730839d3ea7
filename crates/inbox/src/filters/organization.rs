//! Organization include/exclude filtering
//!
//! Organizations are an open set (whatever owners appear in the
//! snapshot), so this dimension is set-based rather than enumerable.
//! The include list takes priority: when it is non-empty the exclude
//! list is ignored.

use crate::models::{AccountNotifications, FilterSettings, Notification};

/// Whether a notification survives the organization lists.
///
/// Owner logins are compared case-insensitively.
pub fn passes_organization_filters(filters: &FilterSettings, notification: &Notification) -> bool {
    let owner = notification.organization();
    if !filters.include_organizations.is_empty() {
        return filters
            .include_organizations
            .iter()
            .any(|org| org.eq_ignore_ascii_case(owner));
    }
    if !filters.exclude_organizations.is_empty() {
        return !filters
            .exclude_organizations
            .iter()
            .any(|org| org.eq_ignore_ascii_case(owner));
    }
    true
}

/// Distinct repository owners present in the snapshot, in first-seen
/// order, for populating the organization picker
pub fn recent_organizations(accounts: &[AccountNotifications]) -> Vec<String> {
    let mut organizations: Vec<String> = Vec::new();
    for notification in accounts.iter().flat_map(|a| a.notifications.iter()) {
        let owner = notification.organization();
        if !organizations.iter().any(|o| o.eq_ignore_ascii_case(owner)) {
            organizations.push(owner.to_string());
        }
    }
    organizations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{make_account, make_account_notifications, make_notification};

    #[test]
    fn test_include_is_case_insensitive() {
        let mut filters = FilterSettings::default();
        filters.add_include_organization("Acme");

        assert!(passes_organization_filters(
            &filters,
            &make_notification("1", "acme/widgets")
        ));
        assert!(!passes_organization_filters(
            &filters,
            &make_notification("2", "globex/gears")
        ));
    }

    #[test]
    fn test_exclude_drops_matches() {
        let mut filters = FilterSettings::default();
        filters.add_exclude_organization("acme");

        assert!(!passes_organization_filters(
            &filters,
            &make_notification("1", "acme/widgets")
        ));
        assert!(passes_organization_filters(
            &filters,
            &make_notification("2", "globex/gears")
        ));
    }

    #[test]
    fn test_include_wins_over_exclude() {
        // Structurally the mutators keep the lists exclusive, but a
        // hand-edited persisted state could carry both.
        let mut filters = FilterSettings::default();
        filters.include_organizations = vec!["acme".to_string()];
        filters.exclude_organizations = vec!["acme".to_string()];

        assert!(passes_organization_filters(
            &filters,
            &make_notification("1", "acme/widgets")
        ));
    }

    #[test]
    fn test_recent_organizations_dedupes() {
        let accounts = vec![make_account_notifications(
            make_account("github.com", "octocat"),
            vec![
                make_notification("1", "acme/widgets"),
                make_notification("2", "Acme/gears"),
                make_notification("3", "globex/gears"),
            ],
        )];
        assert_eq!(
            recent_organizations(&accounts),
            vec!["acme".to_string(), "globex".to_string()]
        );
    }
}
