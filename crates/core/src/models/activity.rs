use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{CampusError, CampusResult},
    models::{organizer::OrganizerSummary, student::StudentSummary},
    validation::{limit_all, limits, require_all},
};

/// Where an activity request stands in the approval workflow.
///
/// `is_granted` is still stored next to it for readers of the old boolean
/// column; it is true exactly when the state is `Approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityState {
    Pending,
    Approved,
    Declined,
}

impl ActivityState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityState::Pending => "Pending",
            ActivityState::Approved => "Approved",
            ActivityState::Declined => "Declined",
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, ActivityState::Approved)
    }
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityState {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ActivityState::Pending),
            "Approved" => Ok(ActivityState::Approved),
            "Declined" => Ok(ActivityState::Declined),
            other => Err(CampusError::Validation(format!(
                "Unknown activity status: {other}"
            ))),
        }
    }
}

/// An admin's verdict on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Decline,
}

impl Decision {
    pub fn state(&self) -> ActivityState {
        match self {
            Decision::Approve => ActivityState::Approved,
            Decision::Decline => ActivityState::Declined,
        }
    }

    pub fn notify_text(&self) -> &'static str {
        match self {
            Decision::Approve => "Activity request approved",
            Decision::Decline => "Activity request declined",
        }
    }
}

pub const SUBMITTED_NOTIFY: &str = "Activity request submitted and pending approval";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub student_id: String,
    pub organizer_id: Uuid,
    pub name: String,
    pub description: String,
    pub status: ActivityState,
    pub is_granted: bool,
    pub scheduled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewActivity {
    pub student_id: String,
    pub organizer_id: Uuid,
    pub name: String,
    pub description: String,
    pub scheduled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityRequest {
    pub student_id: String,
    pub organizer_id: Option<Uuid>,
    pub activity_name: String,
    pub description: String,
    pub scheduled_date: Option<DateTime<Utc>>,
}

impl ActivityRequest {
    pub fn validate(&self) -> CampusResult<NewActivity> {
        require_all(&[
            ("studentId", self.student_id.as_str()),
            ("activityName", self.activity_name.as_str()),
            ("description", self.description.as_str()),
        ])?;
        limit_all(&[
            ("studentId", self.student_id.as_str(), limits::STUDENT_ID),
            ("activityName", self.activity_name.as_str(), limits::ACTIVITY_NAME),
            ("description", self.description.as_str(), limits::DESCRIPTION),
        ])?;

        let organizer_id = self
            .organizer_id
            .ok_or_else(|| CampusError::Validation("organizerId is required".to_string()))?;
        let scheduled_at = self
            .scheduled_date
            .ok_or_else(|| CampusError::Validation("scheduledDate is required".to_string()))?;

        Ok(NewActivity {
            student_id: self.student_id.trim().to_string(),
            organizer_id,
            name: self.activity_name.trim().to_string(),
            description: self.description.trim().to_string(),
            scheduled_at,
        })
    }
}

/// An activity with the student and organizer it references, as listed
/// on the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityView {
    #[serde(flatten)]
    pub activity: Activity,
    pub student: Option<StudentSummary>,
    pub organizer: Option<OrganizerSummary>,
}
