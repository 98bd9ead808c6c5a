use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A student profile, keyed by the visible student id and owned by exactly
/// one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub student_id: String,
    pub account_id: Uuid,
    pub first_name: String,
    pub middle_initial: Option<String>,
    pub last_name: String,
    pub year_level: i32,
    pub course: String,
}

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub student_id: String,
    pub first_name: String,
    pub middle_initial: Option<String>,
    pub last_name: String,
    pub year_level: i32,
    pub course: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentListItem {
    pub student_id: String,
    pub first_name: String,
    pub middle_initial: Option<String>,
    pub last_name: String,
    pub year_level: i32,
    pub course: String,
    pub acc_user_id: String,
}

/// The slice of a student embedded in reservation and activity listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub course: String,
}

impl From<&Student> for StudentSummary {
    fn from(student: &Student) -> Self {
        Self {
            student_id: student.student_id.clone(),
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            course: student.course.clone(),
        }
    }
}
