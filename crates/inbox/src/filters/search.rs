//! Search token filtering
//!
//! Tokens are validated at add time, so evaluation only deals with
//! well-formed `prefix:value` pairs. Include tokens of the same prefix
//! are OR-ed together; different prefixes AND. The include side takes
//! priority over the exclude side.

use crate::models::{FilterSettings, Notification, SearchPrefix, SearchToken};

/// Whether one notification matches one token
pub fn matches_token(token: &SearchToken, notification: &Notification) -> bool {
    match token.prefix {
        SearchPrefix::Author => notification
            .subject
            .user
            .as_ref()
            .is_some_and(|user| user.login.eq_ignore_ascii_case(&token.value)),
        SearchPrefix::Org => notification
            .organization()
            .eq_ignore_ascii_case(&token.value),
        SearchPrefix::Repo => notification
            .repository
            .full_name
            .eq_ignore_ascii_case(&token.value),
    }
}

/// Whether a notification survives the search token lists.
///
/// Author tokens depend on the subject user from the detailed fetch;
/// when `detailed` is false they are skipped so a stale author
/// selection cannot hide everything.
pub fn passes_search_filters(
    filters: &FilterSettings,
    notification: &Notification,
    detailed: bool,
) -> bool {
    let usable = |token: &&SearchToken| detailed || token.prefix != SearchPrefix::Author;
    let includes: Vec<&SearchToken> = filters.include_search_tokens.iter().filter(usable).collect();
    let excludes: Vec<&SearchToken> = filters.exclude_search_tokens.iter().filter(usable).collect();

    if !includes.is_empty() {
        return passes_includes(&includes, notification);
    }
    if !excludes.is_empty() {
        return !excludes.iter().any(|token| matches_token(token, notification));
    }
    true
}

/// For every prefix with include tokens, at least one must match
fn passes_includes(tokens: &[&SearchToken], notification: &Notification) -> bool {
    for prefix in [SearchPrefix::Author, SearchPrefix::Org, SearchPrefix::Repo] {
        let mut any_for_prefix = false;
        let mut matched = false;
        for token in tokens.iter().filter(|t| t.prefix == prefix) {
            any_for_prefix = true;
            if matches_token(token, notification) {
                matched = true;
                break;
            }
        }
        if any_for_prefix && !matched {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserType;
    use crate::testing::{make_notification, with_subject_user};

    #[test]
    fn test_author_token_matches_subject_user() {
        let token = SearchToken::parse("author:Alice").unwrap();
        let notification = with_subject_user(
            make_notification("1", "acme/widgets"),
            "alice",
            UserType::User,
        );
        assert!(matches_token(&token, &notification));
        assert!(!matches_token(&token, &make_notification("2", "acme/widgets")));
    }

    #[test]
    fn test_repo_token_matches_full_name() {
        let token = SearchToken::parse("repo:acme/widgets").unwrap();
        assert!(matches_token(&token, &make_notification("1", "acme/widgets")));
        assert!(!matches_token(&token, &make_notification("2", "acme/gears")));
    }

    #[test]
    fn test_same_prefix_includes_are_or_ed() {
        let mut filters = FilterSettings::default();
        filters.add_include_search_token(SearchToken::parse("org:acme").unwrap());
        filters.add_include_search_token(SearchToken::parse("org:globex").unwrap());

        assert!(passes_search_filters(
            &filters,
            &make_notification("1", "acme/widgets"),
            true
        ));
        assert!(passes_search_filters(
            &filters,
            &make_notification("2", "globex/gears"),
            true
        ));
        assert!(!passes_search_filters(
            &filters,
            &make_notification("3", "initech/tps"),
            true
        ));
    }

    #[test]
    fn test_different_prefix_includes_are_and_ed() {
        let mut filters = FilterSettings::default();
        filters.add_include_search_token(SearchToken::parse("org:acme").unwrap());
        filters.add_include_search_token(SearchToken::parse("author:alice").unwrap());

        let both = with_subject_user(
            make_notification("1", "acme/widgets"),
            "alice",
            UserType::User,
        );
        let org_only = make_notification("2", "acme/widgets");

        assert!(passes_search_filters(&filters, &both, true));
        assert!(!passes_search_filters(&filters, &org_only, true));
    }

    #[test]
    fn test_author_tokens_skipped_without_detailed_fetch() {
        let mut filters = FilterSettings::default();
        filters.add_include_search_token(SearchToken::parse("author:alice").unwrap());

        // No subject user was ever fetched; the token must not hide it
        let notification = make_notification("1", "acme/widgets");
        assert!(passes_search_filters(&filters, &notification, false));
        assert!(!passes_search_filters(&filters, &notification, true));
    }

    #[test]
    fn test_exclude_tokens_drop_matches() {
        let mut filters = FilterSettings::default();
        filters.add_exclude_search_token(SearchToken::parse("repo:acme/widgets").unwrap());

        assert!(!passes_search_filters(
            &filters,
            &make_notification("1", "acme/widgets"),
            true
        ));
        assert!(passes_search_filters(
            &filters,
            &make_notification("2", "acme/gears"),
            true
        ));
    }
}
