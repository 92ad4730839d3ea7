//! Composable notification filter pipeline
//!
//! Each dimension answers the same questions: what values it offers,
//! which are selected, and whether a notification matches a value. The
//! pipeline combines all dimensions as a conjunction; an empty selection
//! on a dimension passes everything.

mod organization;
mod pipeline;
mod reason;
mod search;
mod state;
mod subject_type;
mod user_type;

pub use organization::{passes_organization_filters, recent_organizations};
pub use pipeline::{apply_filters, passes_filters};
pub use reason::ReasonDimension;
pub use search::{matches_token, passes_search_filters};
pub use state::StateDimension;
pub use subject_type::SubjectTypeDimension;
pub use user_type::UserTypeDimension;

use crate::models::{AccountNotifications, FilterSettings, Notification};

/// Display metadata for one filterable value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDetails {
    pub title: String,
    pub description: Option<String>,
}

impl TypeDetails {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A filter dimension with an enumerable set of values
pub trait FilterDimension {
    type Value: Clone + PartialEq;

    /// Stable machine name for the dimension
    fn name(&self) -> &'static str;

    /// Whether evaluation needs the detailed notification fetch
    fn requires_detailed(&self) -> bool {
        false
    }

    /// All values the dimension offers for selection
    fn values(&self) -> Vec<Self::Value>;

    /// Display metadata for one value
    fn details(&self, value: &Self::Value) -> TypeDetails;

    /// The currently selected values
    fn selected(&self, filters: &FilterSettings) -> Vec<Self::Value>;

    /// Whether one notification matches one value
    fn matches(&self, value: &Self::Value, notification: &Notification) -> bool;

    /// Whether the dimension constrains the result at all
    fn is_active(&self, filters: &FilterSettings) -> bool {
        !self.selected(filters).is_empty()
    }

    fn is_selected(&self, filters: &FilterSettings, value: &Self::Value) -> bool {
        self.selected(filters).contains(value)
    }

    /// Whether a notification survives this dimension
    fn passes(&self, filters: &FilterSettings, notification: &Notification) -> bool {
        let selected = self.selected(filters);
        selected.is_empty() || selected.iter().any(|v| self.matches(v, notification))
    }

    /// How many notifications across all accounts match one value,
    /// counted over the unfiltered snapshot
    fn count(&self, value: &Self::Value, accounts: &[AccountNotifications]) -> usize {
        accounts
            .iter()
            .flat_map(|account| account.notifications.iter())
            .filter(|notification| self.matches(value, notification))
            .count()
    }
}

/// Identifier for every dimension the pipeline evaluates, including the
/// two set-based ones that are not value-enumerable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Reason,
    UserType,
    SubjectType,
    State,
    Organization,
    Search,
}

impl Dimension {
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Reason => "reason",
            Dimension::UserType => "user_type",
            Dimension::SubjectType => "subject_type",
            Dimension::State => "state",
            Dimension::Organization => "organization",
            Dimension::Search => "search",
        }
    }

    /// Whether evaluation needs the detailed notification fetch.
    ///
    /// Search is listed as independent because only its author tokens
    /// need subject users; org and repo tokens always work.
    pub fn requires_detailed(&self) -> bool {
        matches!(self, Dimension::UserType | Dimension::State)
    }
}

/// Every dimension, in evaluation order (cheapest first)
pub fn all_dimensions() -> &'static [Dimension] {
    &[
        Dimension::Reason,
        Dimension::SubjectType,
        Dimension::UserType,
        Dimension::State,
        Dimension::Organization,
        Dimension::Search,
    ]
}
