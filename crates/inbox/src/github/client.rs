//! GitHub REST client for the notifications endpoints
//!
//! Uses synchronous HTTP (ureq) to be executor-agnostic. Error statuses
//! are surfaced as regular responses so their bodies can be classified
//! into [`ApiError`] categories.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::api::{RawNotification, RawReview, RawSubjectDetails, RawUser};
use super::error::ApiError;
use crate::models::{Account, AccountUser, NotificationId, Settings};

/// Notifications returned per page by the list endpoint
const PER_PAGE: usize = 50;

/// Request timeout for every API call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Options controlling a notification list fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchOptions {
    /// Only fetch threads the user is directly participating in
    pub participating: bool,
    /// Include read notifications and follow every page
    pub fetch_all: bool,
}

impl FetchOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            participating: settings.participating,
            fetch_all: settings.fetch_all_notifications,
        }
    }
}

/// Remote operations the engine needs from GitHub.
///
/// Abstracted behind a trait so the fetch and mutation paths can be
/// exercised against an in-memory fake.
pub trait NotificationClient: Send + Sync {
    /// List notification threads for one account
    fn list_notifications(
        &self,
        account: &Account,
        options: &FetchOptions,
    ) -> Result<Vec<RawNotification>, ApiError>;

    /// Fetch subject details (state, author, reviews) for one thread
    fn fetch_subject_details(
        &self,
        account: &Account,
        notification: &RawNotification,
    ) -> Result<RawSubjectDetails, ApiError>;

    /// Mark one thread as read
    fn mark_thread_read(&self, account: &Account, id: &NotificationId) -> Result<(), ApiError>;

    /// Mark one thread as done (removes it from the remote inbox)
    fn mark_thread_done(&self, account: &Account, id: &NotificationId) -> Result<(), ApiError>;

    /// Unsubscribe from one thread's future updates
    fn unsubscribe_thread(&self, account: &Account, id: &NotificationId) -> Result<(), ApiError>;

    /// Mark every thread in a repository as read
    fn mark_repository_read(&self, account: &Account, full_name: &str) -> Result<(), ApiError>;

    /// Fetch the authenticated user behind a credential
    fn fetch_authenticated_user(&self, account: &Account) -> Result<AccountUser, ApiError>;
}

/// Error body shape returned by the GitHub REST API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Production client talking to github.com or an Enterprise Server host
pub struct GithubClient {
    agent: ureq::Agent,
}

impl Default for GithubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GithubClient {
    pub fn new() -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .into();
        Self { agent }
    }

    fn auth_header(account: &Account) -> String {
        format!("token {}", account.credential.expose())
    }

    /// Read the response body and classify non-2xx statuses
    fn check_status(
        mut response: ureq::http::Response<ureq::Body>,
    ) -> Result<ureq::http::Response<ureq::Body>, ApiError> {
        let status = response.status().as_u16();
        if status < 400 {
            return Ok(response);
        }
        let message = response
            .body_mut()
            .read_json::<ErrorBody>()
            .map(|body| body.message)
            .unwrap_or_default();
        Err(ApiError::from_response(status, &message))
    }

    fn get_json<T: DeserializeOwned>(&self, account: &Account, url: &str) -> Result<T, ApiError> {
        let response = self
            .agent
            .get(url)
            .header("Authorization", &Self::auth_header(account))
            .header("Accept", "application/json")
            .call()
            .map_err(|e| ApiError::from_transport(&e))?;
        let mut response = Self::check_status(response)?;
        response
            .body_mut()
            .read_json()
            .map_err(|e| ApiError::Unknown(e.to_string()))
    }

    fn list_page(
        &self,
        account: &Account,
        options: &FetchOptions,
        page: usize,
    ) -> Result<Vec<RawNotification>, ApiError> {
        let mut url = Url::parse(&format!("{}/notifications", account.api_root()))
            .map_err(|e| ApiError::Unknown(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("participating", if options.participating { "true" } else { "false" })
            .append_pair("all", if options.fetch_all { "true" } else { "false" })
            .append_pair("per_page", &PER_PAGE.to_string())
            .append_pair("page", &page.to_string());
        self.get_json(account, url.as_str())
    }
}

impl NotificationClient for GithubClient {
    fn list_notifications(
        &self,
        account: &Account,
        options: &FetchOptions,
    ) -> Result<Vec<RawNotification>, ApiError> {
        let mut all = self.list_page(account, options, 1)?;
        if options.fetch_all {
            let mut page = 2;
            while all.len() == (page - 1) * PER_PAGE {
                let next = self.list_page(account, options, page)?;
                if next.is_empty() {
                    break;
                }
                all.extend(next);
                page += 1;
            }
        }
        Ok(all)
    }

    fn fetch_subject_details(
        &self,
        account: &Account,
        notification: &RawNotification,
    ) -> Result<RawSubjectDetails, ApiError> {
        let mut details = RawSubjectDetails::default();
        let Some(subject_url) = notification.subject.url.as_deref() else {
            return Ok(details);
        };
        match notification.subject.subject_type.as_str() {
            "PullRequest" => {
                details.pull_request = Some(self.get_json(account, subject_url)?);
                let reviews_url = format!("{subject_url}/reviews");
                details.reviews = self
                    .get_json::<Vec<RawReview>>(account, &reviews_url)
                    .unwrap_or_default();
            }
            "Issue" => {
                details.issue = Some(self.get_json(account, subject_url)?);
            }
            _ => return Ok(details),
        }
        if let Some(comment_url) = notification.subject.latest_comment_url.as_deref()
            && let Ok(comment) = self.get_json::<CommentBody>(account, comment_url)
        {
            details.latest_comment_user = comment.user;
        }
        Ok(details)
    }

    fn mark_thread_read(&self, account: &Account, id: &NotificationId) -> Result<(), ApiError> {
        let url = format!("{}/notifications/threads/{}", account.api_root(), id.as_str());
        let response = self
            .agent
            .patch(&url)
            .header("Authorization", &Self::auth_header(account))
            .send_empty()
            .map_err(|e| ApiError::from_transport(&e))?;
        Self::check_status(response).map(|_| ())
    }

    fn mark_thread_done(&self, account: &Account, id: &NotificationId) -> Result<(), ApiError> {
        let url = format!("{}/notifications/threads/{}", account.api_root(), id.as_str());
        let response = self
            .agent
            .delete(&url)
            .header("Authorization", &Self::auth_header(account))
            .call()
            .map_err(|e| ApiError::from_transport(&e))?;
        Self::check_status(response).map(|_| ())
    }

    fn unsubscribe_thread(&self, account: &Account, id: &NotificationId) -> Result<(), ApiError> {
        let url = format!(
            "{}/notifications/threads/{}/subscription",
            account.api_root(),
            id.as_str()
        );
        let response = self
            .agent
            .delete(&url)
            .header("Authorization", &Self::auth_header(account))
            .call()
            .map_err(|e| ApiError::from_transport(&e))?;
        Self::check_status(response).map(|_| ())
    }

    fn mark_repository_read(&self, account: &Account, full_name: &str) -> Result<(), ApiError> {
        let url = format!("{}/repos/{}/notifications", account.api_root(), full_name);
        let response = self
            .agent
            .put(&url)
            .header("Authorization", &Self::auth_header(account))
            .send_empty()
            .map_err(|e| ApiError::from_transport(&e))?;
        Self::check_status(response).map(|_| ())
    }

    fn fetch_authenticated_user(&self, account: &Account) -> Result<AccountUser, ApiError> {
        let url = format!("{}/user", account.api_root());
        let user: RawUser = self.get_json(account, &url)?;
        Ok(AccountUser {
            login: user.login,
            name: user.name,
            avatar_url: user.avatar_url,
        })
    }
}

/// Comment body shape, only the author is of interest
#[derive(Debug, Deserialize)]
struct CommentBody {
    user: Option<RawUser>,
}
