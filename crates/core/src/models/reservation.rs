use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors::CampusError, models::student::StudentSummary};

/// Parking shift. Accepted in any case, stored and sent as `AM`/`PM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParkingSchedule {
    Am,
    Pm,
}

impl ParkingSchedule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParkingSchedule::Am => "AM",
            ParkingSchedule::Pm => "PM",
        }
    }
}

impl fmt::Display for ParkingSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParkingSchedule {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AM" => Ok(ParkingSchedule::Am),
            "PM" => Ok(ParkingSchedule::Pm),
            _ => Err(CampusError::Validation(format!(
                "schedule must be \"am\" or \"pm\", got \"{s}\""
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parking {
    pub id: Uuid,
    pub student_id: String,
    pub spot: String,
    pub vehicle_type: String,
    pub vehicle_model: String,
    pub schedule: ParkingSchedule,
    pub reservation_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub released_at: Option<DateTime<Utc>>,
}

impl Parking {
    /// A row holds its spot until it is released.
    pub fn is_active(&self) -> bool {
        !self.is_available
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locker {
    pub id: Uuid,
    pub student_id: String,
    pub spot: String,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub released_at: Option<DateTime<Utc>>,
}

impl Locker {
    pub fn is_active(&self) -> bool {
        !self.is_available
    }
}

/// A validated parking request with normalised spot and schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParking {
    pub student_id: String,
    pub spot: String,
    pub vehicle_type: String,
    pub vehicle_model: String,
    pub schedule: ParkingSchedule,
    pub reservation_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLocker {
    pub student_id: String,
    pub spot: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParkingReservationRequest {
    pub student_id: String,
    pub spot: String,
    pub vehicle_type: String,
    pub vehicle_model: String,
    pub schedule: String,
    pub reservation_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LockerReservationRequest {
    pub student_id: String,
    pub spot: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingStatusResponse {
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingView {
    #[serde(flatten)]
    pub parking: Parking,
    pub student: Option<StudentSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockerView {
    #[serde(flatten)]
    pub locker: Locker,
    pub student: Option<StudentSummary>,
}
