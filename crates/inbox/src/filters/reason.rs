//! Reason filter dimension

use super::{FilterDimension, TypeDetails};
use crate::models::{FilterSettings, Notification, Reason};

pub struct ReasonDimension;

impl FilterDimension for ReasonDimension {
    type Value = Reason;

    fn name(&self) -> &'static str {
        "reason"
    }

    fn values(&self) -> Vec<Reason> {
        Reason::all().to_vec()
    }

    fn details(&self, value: &Reason) -> TypeDetails {
        match value {
            Reason::ApprovalRequested => TypeDetails::new("Approval Requested")
                .with_description("You were requested to review and approve a deployment"),
            Reason::Assign => {
                TypeDetails::new("Assigned").with_description("You were assigned to the issue")
            }
            Reason::Author => TypeDetails::new("Authored")
                .with_description("You created the thread"),
            Reason::CiActivity => TypeDetails::new("Workflow Run Completed")
                .with_description("A workflow run you triggered was completed"),
            Reason::Comment => {
                TypeDetails::new("Commented").with_description("You commented on the thread")
            }
            Reason::Invitation => TypeDetails::new("Invitation Received")
                .with_description("You accepted an invitation to contribute to the repository"),
            Reason::Manual => TypeDetails::new("Updated")
                .with_description("You subscribed to the thread"),
            Reason::MemberFeatureRequested => TypeDetails::new("Member Feature Requested")
                .with_description("Organization members have requested to enable a feature"),
            Reason::Mention => {
                TypeDetails::new("Mentioned").with_description("You were mentioned in the content")
            }
            Reason::ReviewRequested => TypeDetails::new("Review Requested")
                .with_description("You or a team you are a member of were requested to review a pull request"),
            Reason::SecurityAdvisoryCredit => TypeDetails::new("Security Advisory Credit")
                .with_description("You were credited for contributing to a security advisory"),
            Reason::SecurityAlert => TypeDetails::new("Security Alert")
                .with_description("A vulnerability was detected in the repository"),
            Reason::StateChange => TypeDetails::new("State Changed")
                .with_description("The thread was changed in a way you are subscribed to"),
            Reason::Subscribed => TypeDetails::new("Updated")
                .with_description("You are watching the repository"),
            Reason::TeamMention => TypeDetails::new("Team Mentioned")
                .with_description("A team you belong to was mentioned in the content"),
            Reason::Unknown(_) => {
                TypeDetails::new("Unknown").with_description("The reason is unknown")
            }
        }
    }

    fn selected(&self, filters: &FilterSettings) -> Vec<Reason> {
        filters.reasons.clone()
    }

    fn matches(&self, value: &Reason, notification: &Notification) -> bool {
        notification.reason == *value
    }
}
