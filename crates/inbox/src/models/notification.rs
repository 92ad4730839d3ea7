//! Notification model - one normalized unit of remote activity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::Account;
use crate::github::ApiError;

/// Unique identifier for a notification thread (unique within its account)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub String);

impl NotificationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for NotificationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NotificationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Why a notification was delivered.
///
/// Unknown values from the API are carried through as `Unknown` so the
/// filter pipeline can still count them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Reason {
    ApprovalRequested,
    Assign,
    Author,
    CiActivity,
    Comment,
    Invitation,
    Manual,
    MemberFeatureRequested,
    Mention,
    ReviewRequested,
    SecurityAdvisoryCredit,
    SecurityAlert,
    StateChange,
    Subscribed,
    TeamMention,
    Unknown(String),
}

impl Reason {
    /// All well-known reasons, in display order
    pub fn all() -> &'static [Reason] {
        use Reason::*;
        &[
            ApprovalRequested,
            Assign,
            Author,
            CiActivity,
            Comment,
            Invitation,
            Manual,
            MemberFeatureRequested,
            Mention,
            ReviewRequested,
            SecurityAdvisoryCredit,
            SecurityAlert,
            StateChange,
            Subscribed,
            TeamMention,
        ]
    }

    pub fn as_str(&self) -> &str {
        use Reason::*;
        match self {
            ApprovalRequested => "approval_requested",
            Assign => "assign",
            Author => "author",
            CiActivity => "ci_activity",
            Comment => "comment",
            Invitation => "invitation",
            Manual => "manual",
            MemberFeatureRequested => "member_feature_requested",
            Mention => "mention",
            ReviewRequested => "review_requested",
            SecurityAdvisoryCredit => "security_advisory_credit",
            SecurityAlert => "security_alert",
            StateChange => "state_change",
            Subscribed => "subscribed",
            TeamMention => "team_mention",
            Unknown(s) => s,
        }
    }
}

impl From<String> for Reason {
    fn from(s: String) -> Self {
        use Reason::*;
        match s.as_str() {
            "approval_requested" => ApprovalRequested,
            "assign" => Assign,
            "author" => Author,
            "ci_activity" => CiActivity,
            "comment" => Comment,
            "invitation" => Invitation,
            "manual" => Manual,
            "member_feature_requested" => MemberFeatureRequested,
            "mention" => Mention,
            "review_requested" => ReviewRequested,
            "security_advisory_credit" => SecurityAdvisoryCredit,
            "security_alert" => SecurityAlert,
            "state_change" => StateChange,
            "subscribed" => Subscribed,
            "team_mention" => TeamMention,
            _ => Unknown(s),
        }
    }
}

impl From<Reason> for String {
    fn from(reason: Reason) -> Self {
        reason.as_str().to_string()
    }
}

/// What kind of thread a notification points at
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubjectType {
    CheckSuite,
    Commit,
    Discussion,
    Issue,
    PullRequest,
    Release,
    RepositoryDependabotAlertsThread,
    RepositoryInvitation,
    RepositoryVulnerabilityAlert,
    WorkflowRun,
    Unknown(String),
}

impl SubjectType {
    /// All well-known subject types, in display order
    pub fn all() -> &'static [SubjectType] {
        use SubjectType::*;
        &[
            CheckSuite,
            Commit,
            Discussion,
            Issue,
            PullRequest,
            Release,
            RepositoryDependabotAlertsThread,
            RepositoryInvitation,
            RepositoryVulnerabilityAlert,
            WorkflowRun,
        ]
    }

    pub fn as_str(&self) -> &str {
        use SubjectType::*;
        match self {
            CheckSuite => "CheckSuite",
            Commit => "Commit",
            Discussion => "Discussion",
            Issue => "Issue",
            PullRequest => "PullRequest",
            Release => "Release",
            RepositoryDependabotAlertsThread => "RepositoryDependabotAlertsThread",
            RepositoryInvitation => "RepositoryInvitation",
            RepositoryVulnerabilityAlert => "RepositoryVulnerabilityAlert",
            WorkflowRun => "WorkflowRun",
            Unknown(s) => s,
        }
    }
}

impl From<String> for SubjectType {
    fn from(s: String) -> Self {
        use SubjectType::*;
        match s.as_str() {
            "CheckSuite" => CheckSuite,
            "Commit" => Commit,
            "Discussion" => Discussion,
            "Issue" => Issue,
            "PullRequest" => PullRequest,
            "Release" => Release,
            "RepositoryDependabotAlertsThread" => RepositoryDependabotAlertsThread,
            "RepositoryInvitation" => RepositoryInvitation,
            "RepositoryVulnerabilityAlert" => RepositoryVulnerabilityAlert,
            "WorkflowRun" => WorkflowRun,
            _ => Unknown(s),
        }
    }
}

impl From<SubjectType> for String {
    fn from(subject_type: SubjectType) -> Self {
        subject_type.as_str().to_string()
    }
}

/// Account type of the user who triggered a notification
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserType {
    Bot,
    EnterpriseUserAccount,
    Mannequin,
    Organization,
    User,
    Unknown(String),
}

impl UserType {
    pub fn as_str(&self) -> &str {
        use UserType::*;
        match self {
            Bot => "Bot",
            EnterpriseUserAccount => "EnterpriseUserAccount",
            Mannequin => "Mannequin",
            Organization => "Organization",
            User => "User",
            Unknown(s) => s,
        }
    }

    /// Whether this account type is operated by a human.
    ///
    /// Unknown types are considered human so the bot filter never hides
    /// something it cannot classify.
    pub fn is_human(&self) -> bool {
        !matches!(
            self,
            UserType::Bot | UserType::Organization | UserType::Mannequin
        )
    }
}

impl From<String> for UserType {
    fn from(s: String) -> Self {
        use UserType::*;
        match s.as_str() {
            "Bot" => Bot,
            "EnterpriseUserAccount" => EnterpriseUserAccount,
            "Mannequin" => Mannequin,
            "Organization" => Organization,
            "User" => User,
            _ => Unknown(s),
        }
    }
}

impl From<UserType> for String {
    fn from(user_type: UserType) -> Self {
        user_type.as_str().to_string()
    }
}

/// Subject state, including the synthesized `Draft` and `Merged` states
/// for pull requests which are not native API states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubjectState {
    // Issue / pull request / discussion states
    Open,
    Closed,
    Merged,
    Draft,
    MergeQueue,
    Completed,
    NotPlanned,
    Reopened,
    Answered,
    Duplicate,
    Outdated,
    Resolved,
    // Check suite / workflow run statuses
    ActionRequired,
    Cancelled,
    Failure,
    InProgress,
    Pending,
    Queued,
    Requested,
    Skipped,
    Stale,
    Success,
    TimedOut,
    Waiting,
    Unknown(String),
}

impl SubjectState {
    pub fn as_str(&self) -> &str {
        use SubjectState::*;
        match self {
            Open => "open",
            Closed => "closed",
            Merged => "merged",
            Draft => "draft",
            MergeQueue => "merge_queue",
            Completed => "completed",
            NotPlanned => "not_planned",
            Reopened => "reopened",
            Answered => "answered",
            Duplicate => "duplicate",
            Outdated => "outdated",
            Resolved => "resolved",
            ActionRequired => "action_required",
            Cancelled => "cancelled",
            Failure => "failure",
            InProgress => "in_progress",
            Pending => "pending",
            Queued => "queued",
            Requested => "requested",
            Skipped => "skipped",
            Stale => "stale",
            Success => "success",
            TimedOut => "timed_out",
            Waiting => "waiting",
            Unknown(s) => s,
        }
    }
}

impl From<String> for SubjectState {
    fn from(s: String) -> Self {
        use SubjectState::*;
        match s.as_str() {
            "open" => Open,
            "closed" => Closed,
            "merged" => Merged,
            "draft" => Draft,
            "merge_queue" => MergeQueue,
            "completed" => Completed,
            "not_planned" => NotPlanned,
            "reopened" => Reopened,
            "answered" => Answered,
            "duplicate" => Duplicate,
            "outdated" => Outdated,
            "resolved" => Resolved,
            "action_required" => ActionRequired,
            "cancelled" => Cancelled,
            "failure" => Failure,
            "in_progress" => InProgress,
            "pending" => Pending,
            "queued" => Queued,
            "requested" => Requested,
            "skipped" => Skipped,
            "stale" => Stale,
            "success" => Success,
            "timed_out" => TimedOut,
            "waiting" => Waiting,
            _ => Unknown(s),
        }
    }
}

impl From<SubjectState> for String {
    fn from(state: SubjectState) -> Self {
        state.as_str().to_string()
    }
}

/// The user who triggered a subject, with their account type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectUser {
    pub login: String,
    pub user_type: UserType,
}

/// Latest reviews on a pull request, one entry per distinct review state.
///
/// `users` is the deduplicated ordered list of reviewers who currently
/// hold that state; a reviewer who re-reviewed keeps only their latest
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Review state (e.g. "APPROVED", "CHANGES_REQUESTED")
    pub state: String,
    /// Logins of the reviewers holding this state
    pub users: Vec<String>,
}

/// Milestone attached to an issue or pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
    pub state: String,
}

/// Repository a notification belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Full name in "owner/name" form
    pub full_name: String,
    /// Owner login, used for organization filtering
    pub owner_login: String,
    /// Owner avatar URL
    pub owner_avatar_url: Option<String>,
    /// Owner account type
    pub owner_type: UserType,
    /// Web URL of the repository
    pub html_url: String,
}

/// Subject of a notification, discriminated by `subject_type`.
///
/// The derived attributes (`state`, `user`, `reviews`, ...) are only
/// populated when detailed notifications are enabled; the base fetch
/// carries title and type only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub title: String,
    pub subject_type: SubjectType,
    pub state: Option<SubjectState>,
    pub number: Option<u64>,
    pub user: Option<SubjectUser>,
    pub linked_issues: Vec<String>,
    pub comment_count: Option<u64>,
    pub labels: Vec<String>,
    pub milestone: Option<Milestone>,
    pub reviews: Vec<Review>,
    pub reaction_count: Option<u64>,
    /// Web URL for opening the subject in a browser
    pub html_url: Option<String>,
}

impl Subject {
    /// Create a bare subject with title and type only
    pub fn new(title: impl Into<String>, subject_type: SubjectType) -> Self {
        Self {
            title: title.into(),
            subject_type,
            state: None,
            number: None,
            user: None,
            linked_issues: Vec::new(),
            comment_count: None,
            labels: Vec::new(),
            milestone: None,
            reviews: Vec::new(),
            reaction_count: None,
            html_url: None,
        }
    }
}

/// One normalized unit of remote activity, scoped to an account.
///
/// `id` + account identity is globally unique within a snapshot. A
/// notification never outlives the fetch round that produced it except
/// as held by in-flight mutation calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    /// Owning account identity (clone, compared by `Account::uuid`)
    pub account: Account,
    pub reason: Reason,
    pub unread: bool,
    pub updated_at: DateTime<Utc>,
    pub repository: Repository,
    pub subject: Subject,
    /// API URL of the notification thread
    pub url: String,
    /// API URL of the thread subscription
    pub subscription_url: String,
}

impl Notification {
    /// Organization (repository owner login) for organization filtering
    pub fn organization(&self) -> &str {
        &self.repository.owner_login
    }

    /// Whether the notification has been read, either remotely or via the
    /// delayed (flag-only) removal strategy
    pub fn is_read(&self) -> bool {
        !self.unread
    }
}

/// Per-account fetch result: the account, its notifications in source
/// order, and the error if the fetch failed.
///
/// Created fresh on every fetch round; never partially merged across
/// rounds.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountNotifications {
    pub account: Account,
    pub notifications: Vec<Notification>,
    pub error: Option<ApiError>,
}
