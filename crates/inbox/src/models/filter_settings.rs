//! Filter selections persisted across sessions

use std::fmt;

use serde::{Deserialize, Serialize};

use super::notification::{Reason, SubjectType, UserType};

/// Coarse state bucket used by the state filter.
///
/// Raw subject states collapse into these buckets so the filter stays
/// usable; `Other` absorbs everything without a dedicated bucket,
/// including subjects whose state is unknown or was never fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterState {
    Draft,
    Open,
    Merged,
    Closed,
    Other,
}

impl FilterState {
    pub fn all() -> &'static [FilterState] {
        use FilterState::*;
        &[Draft, Open, Merged, Closed, Other]
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilterState::Draft => "draft",
            FilterState::Open => "open",
            FilterState::Merged => "merged",
            FilterState::Closed => "closed",
            FilterState::Other => "other",
        }
    }
}

/// Recognized search token prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPrefix {
    Author,
    Org,
    Repo,
}

impl SearchPrefix {
    pub fn as_str(&self) -> &str {
        match self {
            SearchPrefix::Author => "author",
            SearchPrefix::Org => "org",
            SearchPrefix::Repo => "repo",
        }
    }
}

/// Error returned when a search token string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSearchToken {
    #[error("unrecognized search prefix: {0}")]
    UnknownPrefix(String),
    #[error("search token has no value")]
    EmptyValue,
    #[error("search token has no prefix")]
    MissingPrefix,
}

/// A validated search token such as `author:octocat` or `repo:owner/name`.
///
/// Tokens are validated when added, so filter evaluation never sees a
/// malformed token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchToken {
    pub prefix: SearchPrefix,
    pub value: String,
}

impl SearchToken {
    pub fn new(prefix: SearchPrefix, value: impl Into<String>) -> Self {
        Self {
            prefix,
            value: value.into(),
        }
    }

    /// Parse a raw "prefix:value" string into a token
    pub fn parse(raw: &str) -> Result<Self, InvalidSearchToken> {
        let Some((prefix, value)) = raw.split_once(':') else {
            return Err(InvalidSearchToken::MissingPrefix);
        };
        let prefix = match prefix.trim().to_ascii_lowercase().as_str() {
            "author" => SearchPrefix::Author,
            "org" => SearchPrefix::Org,
            "repo" => SearchPrefix::Repo,
            other => return Err(InvalidSearchToken::UnknownPrefix(other.to_string())),
        };
        let value = value.trim();
        if value.is_empty() {
            return Err(InvalidSearchToken::EmptyValue);
        }
        Ok(Self::new(prefix, value))
    }
}

impl fmt::Display for SearchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix.as_str(), self.value)
    }
}

/// The complete filter selection across every dimension.
///
/// An empty selection on a dimension means that dimension passes
/// everything. For organizations and search tokens the include and
/// exclude sides are mutually exclusive: adding to one side clears the
/// other.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub reasons: Vec<Reason>,
    pub user_types: Vec<UserType>,
    pub subject_types: Vec<SubjectType>,
    pub states: Vec<FilterState>,
    pub include_organizations: Vec<String>,
    pub exclude_organizations: Vec<String>,
    pub include_search_tokens: Vec<SearchToken>,
    pub exclude_search_tokens: Vec<SearchToken>,
}

impl FilterSettings {
    /// Whether any dimension has an active selection
    pub fn has_any_filters(&self) -> bool {
        !self.reasons.is_empty()
            || !self.user_types.is_empty()
            || !self.subject_types.is_empty()
            || !self.states.is_empty()
            || !self.include_organizations.is_empty()
            || !self.exclude_organizations.is_empty()
            || !self.include_search_tokens.is_empty()
            || !self.exclude_search_tokens.is_empty()
    }

    /// Clear every dimension back to pass-everything
    pub fn clear(&mut self) {
        *self = FilterSettings::default();
    }

    pub fn toggle_reason(&mut self, reason: Reason) {
        toggle(&mut self.reasons, reason);
    }

    pub fn toggle_user_type(&mut self, user_type: UserType) {
        toggle(&mut self.user_types, user_type);
    }

    pub fn toggle_subject_type(&mut self, subject_type: SubjectType) {
        toggle(&mut self.subject_types, subject_type);
    }

    pub fn toggle_state(&mut self, state: FilterState) {
        toggle(&mut self.states, state);
    }

    /// Add an organization to the include list, clearing the exclude list
    pub fn add_include_organization(&mut self, login: impl Into<String>) {
        self.exclude_organizations.clear();
        push_unique(&mut self.include_organizations, login.into());
    }

    /// Add an organization to the exclude list, clearing the include list
    pub fn add_exclude_organization(&mut self, login: impl Into<String>) {
        self.include_organizations.clear();
        push_unique(&mut self.exclude_organizations, login.into());
    }

    pub fn remove_include_organization(&mut self, login: &str) {
        self.include_organizations.retain(|o| o != login);
    }

    pub fn remove_exclude_organization(&mut self, login: &str) {
        self.exclude_organizations.retain(|o| o != login);
    }

    /// Add a search token to the include list, clearing the exclude list
    pub fn add_include_search_token(&mut self, token: SearchToken) {
        self.exclude_search_tokens.clear();
        push_unique(&mut self.include_search_tokens, token);
    }

    /// Add a search token to the exclude list, clearing the include list
    pub fn add_exclude_search_token(&mut self, token: SearchToken) {
        self.include_search_tokens.clear();
        push_unique(&mut self.exclude_search_tokens, token);
    }

    pub fn remove_include_search_token(&mut self, token: &SearchToken) {
        self.include_search_tokens.retain(|t| t != token);
    }

    pub fn remove_exclude_search_token(&mut self, token: &SearchToken) {
        self.exclude_search_tokens.retain(|t| t != token);
    }
}

fn toggle<T: PartialEq>(selection: &mut Vec<T>, value: T) {
    if let Some(pos) = selection.iter().position(|v| *v == value) {
        selection.remove(pos);
    } else {
        selection.push(value);
    }
}

fn push_unique<T: PartialEq>(selection: &mut Vec<T>, value: T) {
    if !selection.contains(&value) {
        selection.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_token() {
        let token = SearchToken::parse("author:octocat").unwrap();
        assert_eq!(token.prefix, SearchPrefix::Author);
        assert_eq!(token.value, "octocat");
        assert_eq!(token.to_string(), "author:octocat");
    }

    #[test]
    fn test_parse_repo_token_keeps_slash() {
        let token = SearchToken::parse("repo:owner/name").unwrap();
        assert_eq!(token.prefix, SearchPrefix::Repo);
        assert_eq!(token.value, "owner/name");
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        assert_eq!(
            SearchToken::parse("octocat"),
            Err(InvalidSearchToken::MissingPrefix)
        );
        assert_eq!(
            SearchToken::parse("author:"),
            Err(InvalidSearchToken::EmptyValue)
        );
        assert_eq!(
            SearchToken::parse("label:bug"),
            Err(InvalidSearchToken::UnknownPrefix("label".to_string()))
        );
    }

    #[test]
    fn test_toggle_reason() {
        let mut filters = FilterSettings::default();
        filters.toggle_reason(Reason::Mention);
        assert_eq!(filters.reasons, vec![Reason::Mention]);
        filters.toggle_reason(Reason::Mention);
        assert!(filters.reasons.is_empty());
    }

    #[test]
    fn test_include_clears_exclude_organizations() {
        let mut filters = FilterSettings::default();
        filters.add_exclude_organization("acme");
        filters.add_include_organization("globex");
        assert!(filters.exclude_organizations.is_empty());
        assert_eq!(filters.include_organizations, vec!["globex".to_string()]);
    }

    #[test]
    fn test_exclude_clears_include_search_tokens() {
        let mut filters = FilterSettings::default();
        filters.add_include_search_token(SearchToken::parse("org:acme").unwrap());
        filters.add_exclude_search_token(SearchToken::parse("author:bot").unwrap());
        assert!(filters.include_search_tokens.is_empty());
        assert_eq!(filters.exclude_search_tokens.len(), 1);
    }

    #[test]
    fn test_has_any_filters() {
        let mut filters = FilterSettings::default();
        assert!(!filters.has_any_filters());
        filters.toggle_state(FilterState::Open);
        assert!(filters.has_any_filters());
        filters.clear();
        assert!(!filters.has_any_filters());
    }
}
