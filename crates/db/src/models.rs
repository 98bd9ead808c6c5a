use std::str::FromStr;

use campus_core::{
    errors::{CampusError, CampusResult},
    models::{
        account::Account,
        activity::{Activity, ActivityView},
        organizer::{Organizer, OrganizerSummary},
        reservation::{Locker, LockerView, Parking, ParkingView},
        status::{ActivityStatus, LockerStatus, ParkingStatus},
        student::{Student, StudentListItem, StudentSummary},
    },
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Text columns holding enum values are checked by the schema, so a value
/// that fails to parse means the row was written by something else.
fn parse_column<T>(column: &str, value: &str) -> CampusResult<T>
where
    T: FromStr,
{
    value.parse().map_err(|_| {
        CampusError::Database(eyre::eyre!("Unexpected value {value:?} in column {column}"))
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAccount {
    pub id: Uuid,
    pub user_id: String,
    pub password: String,
    pub role: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbAccount> for Account {
    type Error = CampusError;

    fn try_from(row: DbAccount) -> CampusResult<Self> {
        Ok(Account {
            id: row.id,
            role: parse_column("accounts.role", &row.role)?,
            user_id: row.user_id,
            password: row.password,
            display_name: row.display_name,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStudent {
    pub student_id: String,
    pub account_id: Uuid,
    pub first_name: String,
    pub middle_initial: Option<String>,
    pub last_name: String,
    pub year_level: i32,
    pub course: String,
}

impl From<DbStudent> for Student {
    fn from(row: DbStudent) -> Self {
        Student {
            student_id: row.student_id,
            account_id: row.account_id,
            first_name: row.first_name,
            middle_initial: row.middle_initial,
            last_name: row.last_name,
            year_level: row.year_level,
            course: row.course,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStudentListing {
    pub student_id: String,
    pub first_name: String,
    pub middle_initial: Option<String>,
    pub last_name: String,
    pub year_level: i32,
    pub course: String,
    pub user_id: String,
}

impl From<DbStudentListing> for StudentListItem {
    fn from(row: DbStudentListing) -> Self {
        StudentListItem {
            student_id: row.student_id,
            first_name: row.first_name,
            middle_initial: row.middle_initial,
            last_name: row.last_name,
            year_level: row.year_level,
            course: row.course,
            acc_user_id: row.user_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbOrganizer {
    pub id: Uuid,
    pub first_name: String,
    pub middle_initial: Option<String>,
    pub last_name: String,
    pub organization: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbOrganizer> for Organizer {
    fn from(row: DbOrganizer) -> Self {
        Organizer {
            id: row.id,
            first_name: row.first_name,
            middle_initial: row.middle_initial,
            last_name: row.last_name,
            organization: row.organization,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbActivity {
    pub id: Uuid,
    pub student_id: String,
    pub organizer_id: Uuid,
    pub name: String,
    pub description: String,
    pub status: String,
    pub is_granted: bool,
    pub scheduled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbActivity> for Activity {
    type Error = CampusError;

    fn try_from(row: DbActivity) -> CampusResult<Self> {
        Ok(Activity {
            id: row.id,
            status: parse_column("activities.status", &row.status)?,
            student_id: row.student_id,
            organizer_id: row.organizer_id,
            name: row.name,
            description: row.description,
            is_granted: row.is_granted,
            scheduled_at: row.scheduled_at,
            created_at: row.created_at,
        })
    }
}

/// An activity joined with its student and organizer.
#[derive(Debug, Clone, FromRow)]
pub struct DbActivityListing {
    #[sqlx(flatten)]
    pub activity: DbActivity,
    pub stud_first_name: Option<String>,
    pub stud_last_name: Option<String>,
    pub stud_course: Option<String>,
    pub org_organization: Option<String>,
    pub org_first_name: Option<String>,
    pub org_last_name: Option<String>,
}

impl TryFrom<DbActivityListing> for ActivityView {
    type Error = CampusError;

    fn try_from(row: DbActivityListing) -> CampusResult<Self> {
        let student = student_summary(
            &row.activity.student_id,
            row.stud_first_name,
            row.stud_last_name,
            row.stud_course,
        );
        let organizer = match (row.org_organization, row.org_first_name, row.org_last_name) {
            (Some(organization), Some(first_name), Some(last_name)) => Some(OrganizerSummary {
                id: row.activity.organizer_id,
                organization,
                first_name,
                last_name,
            }),
            _ => None,
        };

        Ok(ActivityView {
            activity: row.activity.try_into()?,
            student,
            organizer,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbActivityStatus {
    pub id: Uuid,
    pub activity_id: Uuid,
    pub actor_account_id: Option<Uuid>,
    pub status: String,
    pub is_granted: bool,
    pub notify: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbActivityStatus> for ActivityStatus {
    type Error = CampusError;

    fn try_from(row: DbActivityStatus) -> CampusResult<Self> {
        Ok(ActivityStatus {
            id: row.id,
            status: parse_column("activity_statuses.status", &row.status)?,
            activity_id: row.activity_id,
            actor_account_id: row.actor_account_id,
            is_granted: row.is_granted,
            notify: row.notify,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbParking {
    pub id: Uuid,
    pub student_id: String,
    pub spot: String,
    pub vehicle_type: String,
    pub vehicle_model: String,
    pub schedule: String,
    pub reservation_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub released_at: Option<DateTime<Utc>>,
}

impl TryFrom<DbParking> for Parking {
    type Error = CampusError;

    fn try_from(row: DbParking) -> CampusResult<Self> {
        Ok(Parking {
            id: row.id,
            schedule: parse_column("parkings.schedule", &row.schedule)?,
            student_id: row.student_id,
            spot: row.spot,
            vehicle_type: row.vehicle_type,
            vehicle_model: row.vehicle_model,
            reservation_date: row.reservation_date,
            expiry_date: row.expiry_date,
            is_available: row.is_available,
            created_at: row.created_at,
            released_at: row.released_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbParkingListing {
    #[sqlx(flatten)]
    pub parking: DbParking,
    pub stud_first_name: Option<String>,
    pub stud_last_name: Option<String>,
    pub stud_course: Option<String>,
}

impl TryFrom<DbParkingListing> for ParkingView {
    type Error = CampusError;

    fn try_from(row: DbParkingListing) -> CampusResult<Self> {
        let student = student_summary(
            &row.parking.student_id,
            row.stud_first_name,
            row.stud_last_name,
            row.stud_course,
        );
        Ok(ParkingView {
            parking: row.parking.try_into()?,
            student,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLocker {
    pub id: Uuid,
    pub student_id: String,
    pub spot: String,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub released_at: Option<DateTime<Utc>>,
}

impl From<DbLocker> for Locker {
    fn from(row: DbLocker) -> Self {
        Locker {
            id: row.id,
            student_id: row.student_id,
            spot: row.spot,
            is_available: row.is_available,
            created_at: row.created_at,
            released_at: row.released_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbLockerListing {
    #[sqlx(flatten)]
    pub locker: DbLocker,
    pub stud_first_name: Option<String>,
    pub stud_last_name: Option<String>,
    pub stud_course: Option<String>,
}

impl From<DbLockerListing> for LockerView {
    fn from(row: DbLockerListing) -> Self {
        let student = student_summary(
            &row.locker.student_id,
            row.stud_first_name,
            row.stud_last_name,
            row.stud_course,
        );
        LockerView {
            locker: row.locker.into(),
            student,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReservationStatus {
    pub id: Uuid,
    pub target_id: Uuid,
    pub actor_account_id: Option<Uuid>,
    pub is_available: bool,
    pub notify: String,
    pub created_at: DateTime<Utc>,
}

fn student_summary(
    student_id: &str,
    first_name: Option<String>,
    last_name: Option<String>,
    course: Option<String>,
) -> Option<StudentSummary> {
    match (first_name, last_name, course) {
        (Some(first_name), Some(last_name), Some(course)) => Some(StudentSummary {
            student_id: student_id.to_string(),
            first_name,
            last_name,
            course,
        }),
        _ => None,
    }
}

impl DbReservationStatus {
    pub fn into_parking_status(self) -> ParkingStatus {
        ParkingStatus {
            id: self.id,
            parking_id: self.target_id,
            actor_account_id: self.actor_account_id,
            is_available: self.is_available,
            notify: self.notify,
            created_at: self.created_at,
        }
    }

    pub fn into_locker_status(self) -> LockerStatus {
        LockerStatus {
            id: self.id,
            locker_id: self.target_id,
            actor_account_id: self.actor_account_id,
            is_available: self.is_available,
            notify: self.notify,
            created_at: self.created_at,
        }
    }
}
