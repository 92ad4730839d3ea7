//! User type filter dimension
//!
//! Matches on the account type of the user who triggered the subject.
//! Needs detailed notifications, since the base fetch does not carry
//! subject users.

use super::{FilterDimension, TypeDetails};
use crate::models::{FilterSettings, Notification, UserType};

pub struct UserTypeDimension;

impl FilterDimension for UserTypeDimension {
    type Value = UserType;

    fn name(&self) -> &'static str {
        "user_type"
    }

    fn requires_detailed(&self) -> bool {
        true
    }

    fn values(&self) -> Vec<UserType> {
        vec![UserType::User, UserType::Bot, UserType::Organization]
    }

    fn details(&self, value: &UserType) -> TypeDetails {
        match value {
            UserType::User => TypeDetails::new("User"),
            UserType::Bot => TypeDetails::new("Bot").with_description("Bot accounts such as @dependabot"),
            UserType::Organization => TypeDetails::new("Organization"),
            other => TypeDetails::new(other.as_str()),
        }
    }

    fn selected(&self, filters: &FilterSettings) -> Vec<UserType> {
        filters.user_types.clone()
    }

    fn matches(&self, value: &UserType, notification: &Notification) -> bool {
        let Some(user) = &notification.subject.user else {
            return false;
        };
        match value {
            // Enterprise user accounts are users to the filter
            UserType::User => {
                user.user_type == UserType::User
                    || user.user_type == UserType::EnterpriseUserAccount
            }
            other => user.user_type == *other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{make_notification, with_subject_user};

    #[test]
    fn test_user_matches_enterprise_accounts() {
        let mut filters = FilterSettings::default();
        filters.toggle_user_type(UserType::User);

        let cloud = with_subject_user(
            make_notification("1", "acme/widgets"),
            "alice",
            UserType::User,
        );
        let enterprise = with_subject_user(
            make_notification("2", "acme/widgets"),
            "bob",
            UserType::EnterpriseUserAccount,
        );
        let bot = with_subject_user(
            make_notification("3", "acme/widgets"),
            "dependabot",
            UserType::Bot,
        );

        assert!(UserTypeDimension.passes(&filters, &cloud));
        assert!(UserTypeDimension.passes(&filters, &enterprise));
        assert!(!UserTypeDimension.passes(&filters, &bot));
    }

    #[test]
    fn test_missing_subject_user_never_matches_active_filter() {
        let mut filters = FilterSettings::default();
        filters.toggle_user_type(UserType::Bot);
        let notification = make_notification("1", "acme/widgets");
        assert!(!UserTypeDimension.passes(&filters, &notification));
    }
}
