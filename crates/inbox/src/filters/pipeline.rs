//! Filter evaluation pipeline
//!
//! All dimensions combine as a conjunction, evaluated cheapest first.
//! Dimensions that need detailed notifications are skipped when the
//! detailed fetch is disabled, so stale selections never hide
//! everything.

use super::organization::passes_organization_filters;
use super::search::passes_search_filters;
use super::{
    FilterDimension, ReasonDimension, StateDimension, SubjectTypeDimension, UserTypeDimension,
};
use crate::models::{FilterSettings, Notification, Settings};

/// Whether one notification survives every active filter dimension
pub fn passes_filters(
    notification: &Notification,
    filters: &FilterSettings,
    settings: &Settings,
) -> bool {
    if !ReasonDimension.passes(filters, notification) {
        return false;
    }
    if !SubjectTypeDimension.passes(filters, notification) {
        return false;
    }

    if settings.detailed_notifications {
        if settings.hide_bots
            && notification
                .subject
                .user
                .as_ref()
                .is_some_and(|user| !user.user_type.is_human())
        {
            return false;
        }
        if !UserTypeDimension.passes(filters, notification) {
            return false;
        }
        if !StateDimension.passes(filters, notification) {
            return false;
        }
    }

    if !passes_organization_filters(filters, notification) {
        return false;
    }
    passes_search_filters(filters, notification, settings.detailed_notifications)
}

/// Filter a notification list, preserving source order
pub fn apply_filters<'a>(
    notifications: &'a [Notification],
    filters: &FilterSettings,
    settings: &Settings,
) -> Vec<&'a Notification> {
    notifications
        .iter()
        .filter(|notification| passes_filters(notification, filters, settings))
        .collect()
}
