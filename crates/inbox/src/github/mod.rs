//! GitHub API integration
//!
//! This module provides:
//! - REST client for the notifications and threads endpoints
//! - Error classification into the account error taxonomy
//! - Response normalization to domain models

mod client;
mod error;
mod normalize;

pub use client::{FetchOptions, GithubClient, NotificationClient};
pub use error::ApiError;
pub use normalize::{enrich, map_filter_state, normalize};

/// GitHub REST API response types
pub mod api {
    use serde::Deserialize;

    /// A notification thread as returned by GET /notifications
    #[derive(Debug, Clone, Deserialize)]
    pub struct RawNotification {
        pub id: String,
        pub unread: bool,
        pub reason: String,
        pub updated_at: String,
        pub subject: RawSubject,
        pub repository: RawRepository,
        pub url: String,
        pub subscription_url: String,
    }

    /// Subject of a notification thread
    #[derive(Debug, Clone, Deserialize)]
    pub struct RawSubject {
        pub title: String,
        #[serde(rename = "type")]
        pub subject_type: String,
        /// API URL of the subject, absent for some subject types
        pub url: Option<String>,
        pub latest_comment_url: Option<String>,
    }

    /// Repository a notification belongs to
    #[derive(Debug, Clone, Deserialize)]
    pub struct RawRepository {
        pub full_name: String,
        pub html_url: String,
        pub owner: RawUser,
    }

    /// A user or organization account
    #[derive(Debug, Clone, Deserialize)]
    pub struct RawUser {
        pub login: String,
        pub name: Option<String>,
        pub avatar_url: Option<String>,
        #[serde(rename = "type")]
        pub user_type: Option<String>,
    }

    /// Pull request details used for subject enrichment
    #[derive(Debug, Clone, Deserialize)]
    pub struct RawPullRequest {
        pub number: u64,
        pub state: String,
        #[serde(default)]
        pub draft: bool,
        #[serde(default)]
        pub merged: bool,
        pub user: Option<RawUser>,
        pub comments: Option<u64>,
        #[serde(default)]
        pub labels: Vec<RawLabel>,
        pub milestone: Option<RawMilestone>,
        pub reactions: Option<RawReactions>,
        pub html_url: Option<String>,
    }

    /// Issue details used for subject enrichment
    #[derive(Debug, Clone, Deserialize)]
    pub struct RawIssue {
        pub number: u64,
        pub state: String,
        /// Refined closed reason ("completed", "not_planned", "duplicate")
        pub state_reason: Option<String>,
        pub user: Option<RawUser>,
        pub comments: Option<u64>,
        #[serde(default)]
        pub labels: Vec<RawLabel>,
        pub milestone: Option<RawMilestone>,
        pub reactions: Option<RawReactions>,
        pub html_url: Option<String>,
    }

    /// Discussion details used for subject enrichment
    #[derive(Debug, Clone, Deserialize)]
    pub struct RawDiscussion {
        pub number: Option<u64>,
        pub state_reason: Option<String>,
        #[serde(default)]
        pub answer_chosen_at: Option<String>,
        pub user: Option<RawUser>,
        pub comments: Option<u64>,
        #[serde(default)]
        pub labels: Vec<RawLabel>,
        pub reactions: Option<RawReactions>,
        pub html_url: Option<String>,
    }

    /// One review on a pull request
    #[derive(Debug, Clone, Deserialize)]
    pub struct RawReview {
        pub state: String,
        pub user: Option<RawUser>,
    }

    /// Issue or pull request label
    #[derive(Debug, Clone, Deserialize)]
    pub struct RawLabel {
        pub name: String,
    }

    /// Milestone attached to an issue or pull request
    #[derive(Debug, Clone, Deserialize)]
    pub struct RawMilestone {
        pub title: String,
        pub state: String,
    }

    /// Reaction rollup on a subject
    #[derive(Debug, Clone, Deserialize)]
    pub struct RawReactions {
        pub total_count: u64,
    }

    /// Combined detail payload fetched for one notification subject
    #[derive(Debug, Clone, Default)]
    pub struct RawSubjectDetails {
        pub pull_request: Option<RawPullRequest>,
        pub issue: Option<RawIssue>,
        pub discussion: Option<RawDiscussion>,
        pub reviews: Vec<RawReview>,
        /// Login of the user behind the latest comment, if fetched
        pub latest_comment_user: Option<RawUser>,
    }
}
