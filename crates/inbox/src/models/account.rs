//! Account model representing one configured GitHub identity

use serde::{Deserialize, Serialize};

/// Hostname of the public GitHub cloud
pub const CLOUD_HOSTNAME: &str = "github.com";

/// How an account was authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Personal access token pasted by the user
    Token,
    /// User-supplied OAuth application
    OAuthApp,
    /// Interactive sign-in through the bundled application
    App,
}

/// Which GitHub platform an account lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// github.com
    Cloud,
    /// GitHub Enterprise Server under a custom hostname
    Enterprise,
}

/// Opaque credential handle supplied by the credential store.
///
/// The engine never inspects the token; Debug output is redacted so the
/// secret cannot leak through logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Expose the raw token for Authorization headers only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// The authenticated user behind an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUser {
    /// Login handle (e.g. "octocat")
    pub login: String,
    /// Display name, if set on the profile
    pub name: Option<String>,
    /// Avatar image URL
    pub avatar_url: Option<String>,
}

/// A configured remote identity (hostname + credential + user)
///
/// Accounts are ordered by the owning context; index 0 is the primary
/// account used for quick-link actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Hostname the account authenticates against
    pub hostname: String,
    /// How the credential was obtained
    pub auth_method: AuthMethod,
    /// Opaque credential handle
    pub credential: Credential,
    /// Authenticated user details, refreshed in the background
    pub user: Option<AccountUser>,
}

impl Account {
    /// Create a new account for a hostname and credential
    pub fn new(
        hostname: impl Into<String>,
        auth_method: AuthMethod,
        credential: Credential,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            auth_method,
            credential,
            user: None,
        }
    }

    /// Set the authenticated user details
    pub fn with_user(mut self, user: AccountUser) -> Self {
        self.user = Some(user);
        self
    }

    /// Which platform this account lives on, derived from the hostname
    pub fn platform(&self) -> Platform {
        if self.hostname.eq_ignore_ascii_case(CLOUD_HOSTNAME) {
            Platform::Cloud
        } else {
            Platform::Enterprise
        }
    }

    /// Stable identity for this account within a snapshot.
    ///
    /// Two accounts are the same iff they share a hostname and login.
    pub fn uuid(&self) -> String {
        let login = self.user.as_ref().map(|u| u.login.as_str()).unwrap_or("");
        format!("{}#{}", self.hostname.to_lowercase(), login.to_lowercase())
    }

    /// Check whether two accounts refer to the same identity
    pub fn is_same(&self, other: &Account) -> bool {
        self.uuid() == other.uuid()
    }

    /// REST API root for this account's hostname.
    ///
    /// github.com uses the dedicated api subdomain; Enterprise Server
    /// exposes the API under /api/v3 on the instance hostname.
    pub fn api_root(&self) -> String {
        match self.platform() {
            Platform::Cloud => "https://api.github.com".to_string(),
            Platform::Enterprise => format!("https://{}/api/v3", self.hostname),
        }
    }

    /// Web root for this account's hostname
    pub fn web_root(&self) -> String {
        format!("https://{}", self.hostname)
    }
}
