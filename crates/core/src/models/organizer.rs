use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::CampusResult,
    validation::{limit_all, limits, optional, require_all},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organizer {
    pub id: Uuid,
    pub first_name: String,
    pub middle_initial: Option<String>,
    pub last_name: String,
    pub organization: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrganizer {
    pub first_name: String,
    pub middle_initial: Option<String>,
    pub last_name: String,
    pub organization: String,
}

/// Body of both the create and the update endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganizerRequest {
    pub first_name: String,
    pub middle_initial: Option<String>,
    pub last_name: String,
    pub organization: String,
}

impl OrganizerRequest {
    pub fn validate(&self) -> CampusResult<NewOrganizer> {
        require_all(&[
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
            ("organization", self.organization.as_str()),
        ])?;
        limit_all(&[
            ("firstName", self.first_name.as_str(), limits::PERSON_NAME),
            (
                "middleInitial",
                self.middle_initial.as_deref().unwrap_or_default(),
                limits::MIDDLE_INITIAL,
            ),
            ("lastName", self.last_name.as_str(), limits::PERSON_NAME),
            ("organization", self.organization.as_str(), limits::ORGANIZATION),
        ])?;

        Ok(NewOrganizer {
            first_name: self.first_name.trim().to_string(),
            middle_initial: optional(self.middle_initial.as_deref()),
            last_name: self.last_name.trim().to_string(),
            organization: self.organization.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerSummary {
    pub id: Uuid,
    pub organization: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&Organizer> for OrganizerSummary {
    fn from(organizer: &Organizer) -> Self {
        Self {
            id: organizer.id,
            organization: organizer.organization.clone(),
            first_name: organizer.first_name.clone(),
            last_name: organizer.last_name.clone(),
        }
    }
}
