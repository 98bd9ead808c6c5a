//! Append-only audit rows recording who changed a resource and what the
//! requester was told. `actor_account_id` is `None` for changes the
//! student made themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::activity::ActivityState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStatus {
    pub id: Uuid,
    pub activity_id: Uuid,
    pub actor_account_id: Option<Uuid>,
    pub status: ActivityState,
    pub is_granted: bool,
    pub notify: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingStatus {
    pub id: Uuid,
    pub parking_id: Uuid,
    pub actor_account_id: Option<Uuid>,
    pub is_available: bool,
    pub notify: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockerStatus {
    pub id: Uuid,
    pub locker_id: Uuid,
    pub actor_account_id: Option<Uuid>,
    pub is_available: bool,
    pub notify: String,
    pub created_at: DateTime<Utc>,
}

pub const PARKING_RELEASED_NOTIFY: &str = "Parking reservation released";
pub const PARKING_VACATED_NOTIFY: &str = "Parking spot vacated by administrator";
pub const LOCKER_RELEASED_NOTIFY: &str = "Locker released by administrator";
