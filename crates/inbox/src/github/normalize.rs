//! Conversion from GitHub API responses to domain models
//!
//! Normalization is total: unknown reasons, subject types, user types
//! and states all pass through as `Unknown` values instead of failing
//! the fetch round.

use chrono::{DateTime, Utc};

use super::api::{RawNotification, RawReview, RawSubjectDetails};
use crate::models::{
    Account, FilterState, Milestone, Notification, NotificationId, Reason, Repository, Review,
    Subject, SubjectState, SubjectType, SubjectUser, UserType,
};

/// Convert one raw notification thread into the domain model.
///
/// Produces a base notification with title and type only; derived
/// subject attributes are filled in by [`enrich`] when detailed
/// notifications are enabled.
pub fn normalize(raw: &RawNotification, account: &Account) -> Notification {
    let subject_type = SubjectType::from(raw.subject.subject_type.clone());
    let mut subject = Subject::new(raw.subject.title.clone(), subject_type.clone());

    // Check suites carry no subject API URL; their outcome is only
    // present in the notification title.
    if subject_type == SubjectType::CheckSuite {
        subject.state = check_suite_state_from_title(&raw.subject.title);
    }

    // A fixed fallback keeps normalization deterministic when the
    // timestamp cannot be parsed.
    let updated_at = raw
        .updated_at
        .parse::<DateTime<Utc>>()
        .unwrap_or(DateTime::UNIX_EPOCH);

    Notification {
        id: NotificationId::new(raw.id.clone()),
        account: account.clone(),
        reason: Reason::from(raw.reason.clone()),
        unread: raw.unread,
        updated_at,
        repository: Repository {
            full_name: raw.repository.full_name.clone(),
            owner_login: raw.repository.owner.login.clone(),
            owner_avatar_url: raw.repository.owner.avatar_url.clone(),
            owner_type: raw
                .repository
                .owner
                .user_type
                .clone()
                .map(UserType::from)
                .unwrap_or(UserType::Unknown(String::new())),
            html_url: raw.repository.html_url.clone(),
        },
        subject,
        url: raw.url.clone(),
        subscription_url: raw.subscription_url.clone(),
    }
}

/// Fill in derived subject attributes from a detail fetch
pub fn enrich(notification: &mut Notification, details: &RawSubjectDetails) {
    let subject = &mut notification.subject;

    if let Some(pr) = &details.pull_request {
        subject.number = Some(pr.number);
        // Draft and merged are flags on the API object, not states, but
        // they take precedence over the open/closed state.
        subject.state = Some(if pr.merged {
            SubjectState::Merged
        } else if pr.draft {
            SubjectState::Draft
        } else {
            SubjectState::from(pr.state.clone())
        });
        subject.comment_count = pr.comments;
        subject.labels = pr.labels.iter().map(|l| l.name.clone()).collect();
        subject.milestone = pr.milestone.as_ref().map(|m| Milestone {
            title: m.title.clone(),
            state: m.state.clone(),
        });
        subject.reaction_count = pr.reactions.as_ref().map(|r| r.total_count);
        subject.html_url = pr.html_url.clone();
        subject.reviews = collapse_reviews(&details.reviews);
        subject.user = subject_user(details, pr.user.as_ref());
    }

    if let Some(issue) = &details.issue {
        subject.number = Some(issue.number);
        // state_reason refines a plain "closed" into completed,
        // not_planned or duplicate.
        let state = issue.state_reason.clone().unwrap_or_else(|| issue.state.clone());
        subject.state = Some(SubjectState::from(state));
        subject.comment_count = issue.comments;
        subject.labels = issue.labels.iter().map(|l| l.name.clone()).collect();
        subject.milestone = issue.milestone.as_ref().map(|m| Milestone {
            title: m.title.clone(),
            state: m.state.clone(),
        });
        subject.reaction_count = issue.reactions.as_ref().map(|r| r.total_count);
        subject.html_url = issue.html_url.clone();
        subject.user = subject_user(details, issue.user.as_ref());
    }

    if let Some(discussion) = &details.discussion {
        subject.number = discussion.number;
        subject.state = Some(match discussion.state_reason.as_deref() {
            Some(reason) => SubjectState::from(reason.to_string()),
            None if discussion.answer_chosen_at.is_some() => SubjectState::Answered,
            None => SubjectState::Open,
        });
        subject.comment_count = discussion.comments;
        subject.labels = discussion.labels.iter().map(|l| l.name.clone()).collect();
        subject.reaction_count = discussion.reactions.as_ref().map(|r| r.total_count);
        subject.html_url = discussion.html_url.clone();
        subject.user = subject_user(details, discussion.user.as_ref());
    }
}

/// Prefer the latest commenter over the subject author
fn subject_user(
    details: &RawSubjectDetails,
    author: Option<&super::api::RawUser>,
) -> Option<SubjectUser> {
    details
        .latest_comment_user
        .as_ref()
        .or(author)
        .map(|user| SubjectUser {
            login: user.login.clone(),
            user_type: user
                .user_type
                .clone()
                .map(UserType::from)
                .unwrap_or(UserType::Unknown(String::new())),
        })
}

/// Collapse raw reviews into one entry per review state.
///
/// A reviewer who reviewed multiple times only counts with their latest
/// state. Entries are sorted by state so output is stable across
/// fetches.
pub fn collapse_reviews(reviews: &[RawReview]) -> Vec<Review> {
    let mut latest_by_reviewer: Vec<(String, String)> = Vec::new();
    for review in reviews {
        let Some(user) = &review.user else { continue };
        if let Some(entry) = latest_by_reviewer.iter_mut().find(|(l, _)| *l == user.login) {
            entry.1 = review.state.clone();
        } else {
            latest_by_reviewer.push((user.login.clone(), review.state.clone()));
        }
    }

    let mut grouped: Vec<Review> = Vec::new();
    for (login, state) in latest_by_reviewer {
        if let Some(group) = grouped.iter_mut().find(|g| g.state == state) {
            group.users.push(login);
        } else {
            grouped.push(Review {
                state,
                users: vec![login],
            });
        }
    }
    grouped.sort_by(|a, b| a.state.cmp(&b.state));
    grouped
}

/// Derive the outcome of a check suite run from its notification title
fn check_suite_state_from_title(title: &str) -> Option<SubjectState> {
    let lowered = title.to_lowercase();
    if lowered.contains("cancelled") {
        Some(SubjectState::Cancelled)
    } else if lowered.contains("failed") {
        Some(SubjectState::Failure)
    } else if lowered.contains("skipped") {
        Some(SubjectState::Skipped)
    } else if lowered.contains("succeeded") {
        Some(SubjectState::Success)
    } else {
        None
    }
}

/// Collapse a subject state into the coarse bucket the state filter uses
pub fn map_filter_state(state: Option<&SubjectState>) -> FilterState {
    match state {
        Some(SubjectState::Open) | Some(SubjectState::Reopened) => FilterState::Open,
        Some(SubjectState::Closed)
        | Some(SubjectState::Completed)
        | Some(SubjectState::Duplicate)
        | Some(SubjectState::NotPlanned)
        | Some(SubjectState::Resolved) => FilterState::Closed,
        Some(SubjectState::Merged) | Some(SubjectState::MergeQueue) => FilterState::Merged,
        Some(SubjectState::Draft) => FilterState::Draft,
        _ => FilterState::Other,
    }
}
