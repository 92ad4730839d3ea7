//! Shared fixture constructors for unit tests

use chrono::{TimeZone, Utc};

use crate::models::{
    Account, AccountNotifications, AccountUser, AuthMethod, Credential, Notification,
    NotificationId, Reason, Repository, Subject, SubjectType, SubjectUser, UserType,
};

pub fn make_account(hostname: &str, login: &str) -> Account {
    Account::new(hostname, AuthMethod::Token, Credential::new("token")).with_user(AccountUser {
        login: login.to_string(),
        name: None,
        avatar_url: None,
    })
}

pub fn make_notification(id: &str, repo_full_name: &str) -> Notification {
    let owner_login = repo_full_name.split('/').next().unwrap_or("").to_string();
    Notification {
        id: NotificationId::new(id),
        account: make_account("github.com", "octocat"),
        reason: Reason::Subscribed,
        unread: true,
        updated_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        repository: Repository {
            full_name: repo_full_name.to_string(),
            owner_login,
            owner_avatar_url: None,
            owner_type: UserType::Organization,
            html_url: format!("https://github.com/{repo_full_name}"),
        },
        subject: Subject::new("A notification", SubjectType::Issue),
        url: format!("https://api.github.com/notifications/threads/{id}"),
        subscription_url: format!(
            "https://api.github.com/notifications/threads/{id}/subscription"
        ),
    }
}

pub fn with_subject_user(mut notification: Notification, login: &str, user_type: UserType) -> Notification {
    notification.subject.user = Some(SubjectUser {
        login: login.to_string(),
        user_type,
    });
    notification
}

pub fn make_account_notifications(
    account: Account,
    notifications: Vec<Notification>,
) -> AccountNotifications {
    AccountNotifications {
        account,
        notifications,
        error: None,
    }
}
