//! Subject state filter dimension
//!
//! Raw subject states collapse into coarse buckets before matching, so
//! a "not_planned" issue is caught by the Closed selection. Needs
//! detailed notifications, since the base fetch carries no states.

use super::{FilterDimension, TypeDetails};
use crate::github::map_filter_state;
use crate::models::{FilterSettings, FilterState, Notification};

pub struct StateDimension;

impl FilterDimension for StateDimension {
    type Value = FilterState;

    fn name(&self) -> &'static str {
        "state"
    }

    fn requires_detailed(&self) -> bool {
        true
    }

    fn values(&self) -> Vec<FilterState> {
        FilterState::all().to_vec()
    }

    fn details(&self, value: &FilterState) -> TypeDetails {
        match value {
            FilterState::Draft => TypeDetails::new("Draft"),
            FilterState::Open => TypeDetails::new("Open").with_description("Open or reopened"),
            FilterState::Merged => {
                TypeDetails::new("Merged").with_description("Merged or in the merge queue")
            }
            FilterState::Closed => {
                TypeDetails::new("Closed").with_description("Closed, completed or not planned")
            }
            FilterState::Other => TypeDetails::new("Other"),
        }
    }

    fn selected(&self, filters: &FilterSettings) -> Vec<FilterState> {
        filters.states.clone()
    }

    fn matches(&self, value: &FilterState, notification: &Notification) -> bool {
        map_filter_state(notification.subject.state.as_ref()) == *value
    }
}
