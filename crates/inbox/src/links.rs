//! Web URL resolution for notifications

use anyhow::{Context, Result};

use crate::models::{Notification, SubjectType};

/// Resolve the best web URL for a notification.
///
/// Subjects enriched with an html_url use it directly; otherwise the
/// repository URL with a subject-type-specific path is the closest the
/// browser can get.
pub fn notification_url(notification: &Notification) -> String {
    if let Some(html_url) = &notification.subject.html_url {
        return html_url.clone();
    }
    let repo_url = &notification.repository.html_url;
    let suffix = match notification.subject.subject_type {
        SubjectType::CheckSuite | SubjectType::WorkflowRun => "/actions",
        SubjectType::Discussion => "/discussions",
        SubjectType::Issue => "/issues",
        SubjectType::PullRequest => "/pulls",
        SubjectType::Release => "/releases",
        SubjectType::RepositoryInvitation => "/invitations",
        _ => "",
    };
    format!("{repo_url}{suffix}")
}

/// Open a notification in the default browser
pub fn open_notification(notification: &Notification) -> Result<()> {
    let url = notification_url(notification);
    open::that(&url).with_context(|| format!("Failed to open {url}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::make_notification;

    #[test]
    fn test_enriched_url_wins() {
        let mut notification = make_notification("1", "acme/widgets");
        notification.subject.html_url =
            Some("https://github.com/acme/widgets/issues/7".to_string());
        assert_eq!(
            notification_url(&notification),
            "https://github.com/acme/widgets/issues/7"
        );
    }

    #[test]
    fn test_fallback_appends_subject_path() {
        let mut notification = make_notification("1", "acme/widgets");
        notification.subject.subject_type = SubjectType::PullRequest;
        assert_eq!(
            notification_url(&notification),
            "https://github.com/acme/widgets/pulls"
        );

        notification.subject.subject_type = SubjectType::Unknown("Mystery".to_string());
        assert_eq!(
            notification_url(&notification),
            "https://github.com/acme/widgets"
        );
    }
}
