//! Subject type filter dimension

use super::{FilterDimension, TypeDetails};
use crate::models::{FilterSettings, Notification, SubjectType};

pub struct SubjectTypeDimension;

impl FilterDimension for SubjectTypeDimension {
    type Value = SubjectType;

    fn name(&self) -> &'static str {
        "subject_type"
    }

    fn values(&self) -> Vec<SubjectType> {
        SubjectType::all().to_vec()
    }

    fn details(&self, value: &SubjectType) -> TypeDetails {
        match value {
            SubjectType::CheckSuite => TypeDetails::new("Check Suite"),
            SubjectType::Commit => TypeDetails::new("Commit"),
            SubjectType::Discussion => TypeDetails::new("Discussion"),
            SubjectType::Issue => TypeDetails::new("Issue"),
            SubjectType::PullRequest => TypeDetails::new("Pull Request"),
            SubjectType::Release => TypeDetails::new("Release"),
            SubjectType::RepositoryDependabotAlertsThread => {
                TypeDetails::new("Dependabot Alert")
            }
            SubjectType::RepositoryInvitation => TypeDetails::new("Invitation"),
            SubjectType::RepositoryVulnerabilityAlert => TypeDetails::new("Vulnerability Alert"),
            SubjectType::WorkflowRun => TypeDetails::new("Workflow Run"),
            SubjectType::Unknown(s) => TypeDetails::new(s.clone()),
        }
    }

    fn selected(&self, filters: &FilterSettings) -> Vec<SubjectType> {
        filters.subject_types.clone()
    }

    fn matches(&self, value: &SubjectType, notification: &Notification) -> bool {
        notification.subject.subject_type == *value
    }
}
