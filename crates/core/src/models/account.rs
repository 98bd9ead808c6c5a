use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{CampusError, CampusResult},
    validation::{limit_all, limits, require_all},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "admin" => Ok(Role::Admin),
            other => Err(CampusError::Validation(format!("Unknown role: {other}"))),
        }
    }
}

/// A login identity. `password` holds whatever the store keeps: an argon2
/// PHC string for accounts created here, or a legacy plain-text value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub user_id: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub user_id: String,
    pub password: String,
    pub role: Role,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub user_id: String,
    pub password: String,
    pub first_name: String,
    pub middle_initial: Option<String>,
    pub last_name: String,
    pub year_level: i32,
    pub course: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub acc_index: Uuid,
    pub acc_user_id: String,
    pub acc_role: Role,
    pub stud_student_id: String,
    pub stud_first_name: String,
    pub stud_middle_initial: Option<String>,
    pub stud_last_name: String,
    pub stud_year_level: i32,
    pub stud_course: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

/// Student fields are present only for student accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub acc_index: Uuid,
    pub acc_user_id: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stud_student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stud_first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stud_middle_initial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stud_last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stud_year_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stud_course: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAdminRequest {
    pub user_id: String,
    pub name: String,
    pub password: String,
}

impl CreateAdminRequest {
    pub fn validate(&self) -> CampusResult<()> {
        require_all(&[
            ("userId", self.user_id.as_str()),
            ("name", self.name.as_str()),
            ("password", self.password.as_str()),
        ])?;
        limit_all(&[
            ("userId", self.user_id.as_str(), limits::USER_ID),
            ("name", self.name.as_str(), limits::DISPLAY_NAME),
        ])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminListItem {
    pub acc_index: Uuid,
    pub acc_user_id: String,
    pub name: String,
}

impl From<Account> for AdminListItem {
    fn from(account: Account) -> Self {
        Self {
            acc_index: account.id,
            acc_user_id: account.user_id,
            name: account.display_name.unwrap_or_else(|| "Admin".to_string()),
        }
    }
}
