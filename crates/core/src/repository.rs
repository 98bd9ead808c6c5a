//! Storage seams. `campus-db` implements every trait for PostgreSQL and,
//! under `mock`, for an in-memory store used by tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    errors::CampusResult,
    models::{
        account::{Account, NewAccount, Role},
        activity::{Activity, ActivityState, ActivityView, NewActivity},
        organizer::{NewOrganizer, Organizer},
        reservation::{Locker, LockerView, NewLocker, NewParking, Parking, ParkingView},
        status::{ActivityStatus, LockerStatus, ParkingStatus},
        student::{NewStudent, Student, StudentListItem},
    },
};

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Creates the account and its student profile together. Fails with
    /// `Conflict` if the user id or student id is taken.
    async fn register_student(
        &self,
        account: NewAccount,
        student: NewStudent,
    ) -> CampusResult<(Account, Student)>;

    async fn create_account(&self, account: NewAccount) -> CampusResult<Account>;

    async fn find_account_by_user_id(&self, user_id: &str) -> CampusResult<Option<Account>>;

    async fn find_account_by_id(&self, id: Uuid) -> CampusResult<Option<Account>>;

    async fn list_accounts_by_role(&self, role: Role) -> CampusResult<Vec<Account>>;

    /// Deletes the account only if it has `role`, cascading to everything
    /// the account owns. Returns whether a row was deleted.
    async fn delete_account(&self, id: Uuid, role: Role) -> CampusResult<bool>;
}

#[async_trait]
pub trait StudentDirectory: Send + Sync {
    async fn find_student_by_visible_id(&self, student_id: &str) -> CampusResult<Option<Student>>;

    async fn find_student_by_account(&self, account_id: Uuid) -> CampusResult<Option<Student>>;

    async fn list_students(&self) -> CampusResult<Vec<StudentListItem>>;
}

#[async_trait]
pub trait OrganizerRepository: Send + Sync {
    async fn list_organizers(&self) -> CampusResult<Vec<Organizer>>;

    async fn find_organizer(&self, id: Uuid) -> CampusResult<Option<Organizer>>;

    async fn create_organizer(&self, organizer: NewOrganizer) -> CampusResult<Organizer>;

    async fn update_organizer(
        &self,
        id: Uuid,
        organizer: NewOrganizer,
    ) -> CampusResult<Option<Organizer>>;

    /// Deleting an organizer also deletes its activities.
    async fn delete_organizer(&self, id: Uuid) -> CampusResult<bool>;
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Inserts a pending activity and its first status row atomically.
    async fn create_activity(&self, activity: NewActivity, notify: &str) -> CampusResult<Activity>;

    async fn list_activities(&self) -> CampusResult<Vec<ActivityView>>;

    async fn find_activity(&self, id: Uuid) -> CampusResult<Option<Activity>>;

    /// Moves the activity to `state` and appends a status row naming `actor`.
    async fn decide_activity(
        &self,
        id: Uuid,
        state: ActivityState,
        actor: Uuid,
        notify: &str,
    ) -> CampusResult<Option<Activity>>;

    async fn list_activity_statuses(&self, id: Uuid) -> CampusResult<Vec<ActivityStatus>>;
}

/// Reservation writes. Each method reads the state it needs, applies the
/// rules in [`crate::admission`], and writes, as one atomic unit: no other
/// reservation write for the same student or spot may interleave.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn reserve_parking(&self, parking: &NewParking) -> CampusResult<Parking>;

    async fn reserve_locker(&self, locker: &NewLocker) -> CampusResult<Locker>;

    async fn find_active_parking(&self, student_id: &str) -> CampusResult<Option<Parking>>;

    /// Marks the student's active parking row available. `NotFound` if none.
    async fn release_parking(&self, student_id: &str) -> CampusResult<Parking>;

    /// Marks the active parking row for `spot` available on behalf of
    /// `actor`. `NotFound` if none.
    async fn release_parking_spot(&self, spot: &str, actor: Uuid) -> CampusResult<Parking>;

    /// Marks the active locker row for `spot` available. `NotFound` if none.
    async fn release_locker(&self, spot: &str, actor: Uuid) -> CampusResult<Locker>;

    async fn list_parking(&self) -> CampusResult<Vec<ParkingView>>;

    async fn list_lockers(&self) -> CampusResult<Vec<LockerView>>;

    /// Status rows across every parking row the student has held.
    async fn parking_history(&self, student_id: &str) -> CampusResult<Vec<ParkingStatus>>;

    /// Status rows across every locker row held at `spot`.
    async fn locker_history(&self, spot: &str) -> CampusResult<Vec<LockerStatus>>;
}
