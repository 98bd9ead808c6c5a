//! PostgreSQL implementation of the storage traits in `campus_core`.
//!
//! Reservation writes run in one transaction that locks the student row
//! before reading anything, so writes for the same student serialise.
//! Writes racing for the same spot from different students are settled
//! by the partial unique indexes created in [`crate::schema`].

use async_trait::async_trait;
use campus_core::{
    admission::{
        admit_locker, admit_parking, locker_spot_taken, parking_spot_taken, student_not_found,
        LockerSnapshot, ParkingSnapshot,
    },
    errors::{CampusError, CampusResult},
    models::{
        account::{Account, NewAccount, Role},
        activity::{Activity, ActivityState, ActivityView, NewActivity},
        organizer::{NewOrganizer, Organizer},
        reservation::{Locker, LockerView, NewLocker, NewParking, Parking, ParkingView},
        status::{
            ActivityStatus, LockerStatus, ParkingStatus, LOCKER_RELEASED_NOTIFY,
            PARKING_RELEASED_NOTIFY, PARKING_VACATED_NOTIFY,
        },
        student::{NewStudent, Student, StudentListItem},
    },
    repository::{
        AccountRepository, ActivityRepository, OrganizerRepository, ReservationStore,
        StudentDirectory,
    },
};
use sqlx::{Postgres, Transaction};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    repositories::{account, activity, locker, organizer, parking, status, student},
    DbPool,
};

const PARKING_ACTIVE_STUDENT_INDEX: &str = "parkings_active_student_idx";
const STUDENT_PRIMARY_KEY: &str = "students_pkey";

/// Returns the violated constraint name if `err` is a unique violation.
fn unique_violation(err: &eyre::Report) -> Option<String> {
    let db_err = err.downcast_ref::<sqlx::Error>()?.as_database_error()?;
    if db_err.is_unique_violation() {
        Some(db_err.constraint().unwrap_or_default().to_string())
    } else {
        None
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn begin(&self) -> eyre::Result<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }
}

async fn commit(tx: Transaction<'static, Postgres>) -> eyre::Result<()> {
    tx.commit().await?;
    Ok(())
}

#[async_trait]
impl AccountRepository for PgStore {
    async fn register_student(
        &self,
        new_account: NewAccount,
        new_student: NewStudent,
    ) -> CampusResult<(Account, Student)> {
        let mut tx = self.begin().await?;

        let account_row = match account::create_account(&mut *tx, &new_account).await {
            Ok(row) => row,
            Err(err) if unique_violation(&err).is_some() => {
                return Err(CampusError::Conflict("User ID is already taken".to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        let student_row =
            match student::create_student(&mut *tx, account_row.id, &new_student).await {
                Ok(row) => row,
                Err(err) if unique_violation(&err).as_deref() == Some(STUDENT_PRIMARY_KEY) => {
                    return Err(CampusError::Conflict(format!(
                        "Student ID {} is already taken",
                        new_student.student_id
                    )));
                }
                Err(err) => return Err(err.into()),
            };

        commit(tx).await?;
        Ok((account_row.try_into()?, student_row.into()))
    }

    async fn create_account(&self, new_account: NewAccount) -> CampusResult<Account> {
        match account::create_account(&self.pool, &new_account).await {
            Ok(row) => row.try_into(),
            Err(err) if unique_violation(&err).is_some() => {
                Err(CampusError::Conflict("User ID is already taken".to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn find_account_by_user_id(&self, user_id: &str) -> CampusResult<Option<Account>> {
        account::get_account_by_user_id(&self.pool, user_id)
            .await?
            .map(Account::try_from)
            .transpose()
    }

    async fn find_account_by_id(&self, id: Uuid) -> CampusResult<Option<Account>> {
        account::get_account_by_id(&self.pool, id)
            .await?
            .map(Account::try_from)
            .transpose()
    }

    async fn list_accounts_by_role(&self, role: Role) -> CampusResult<Vec<Account>> {
        account::get_accounts_by_role(&self.pool, role)
            .await?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }

    async fn delete_account(&self, id: Uuid, role: Role) -> CampusResult<bool> {
        Ok(account::delete_account(&self.pool, id, role).await?)
    }
}

#[async_trait]
impl StudentDirectory for PgStore {
    async fn find_student_by_visible_id(&self, student_id: &str) -> CampusResult<Option<Student>> {
        Ok(student::get_student_by_id(&self.pool, student_id)
            .await?
            .map(Student::from))
    }

    async fn find_student_by_account(&self, account_id: Uuid) -> CampusResult<Option<Student>> {
        Ok(student::get_student_by_account(&self.pool, account_id)
            .await?
            .map(Student::from))
    }

    async fn list_students(&self) -> CampusResult<Vec<StudentListItem>> {
        Ok(student::get_students(&self.pool)
            .await?
            .into_iter()
            .map(StudentListItem::from)
            .collect())
    }
}

#[async_trait]
impl OrganizerRepository for PgStore {
    async fn list_organizers(&self) -> CampusResult<Vec<Organizer>> {
        Ok(organizer::get_organizers(&self.pool)
            .await?
            .into_iter()
            .map(Organizer::from)
            .collect())
    }

    async fn find_organizer(&self, id: Uuid) -> CampusResult<Option<Organizer>> {
        Ok(organizer::get_organizer_by_id(&self.pool, id)
            .await?
            .map(Organizer::from))
    }

    async fn create_organizer(&self, new_organizer: NewOrganizer) -> CampusResult<Organizer> {
        Ok(organizer::create_organizer(&self.pool, &new_organizer)
            .await?
            .into())
    }

    async fn update_organizer(
        &self,
        id: Uuid,
        new_organizer: NewOrganizer,
    ) -> CampusResult<Option<Organizer>> {
        Ok(organizer::update_organizer(&self.pool, id, &new_organizer)
            .await?
            .map(Organizer::from))
    }

    async fn delete_organizer(&self, id: Uuid) -> CampusResult<bool> {
        Ok(organizer::delete_organizer(&self.pool, id).await?)
    }
}

#[async_trait]
impl ActivityRepository for PgStore {
    async fn create_activity(&self, new_activity: NewActivity, notify: &str) -> CampusResult<Activity> {
        let mut tx = self.begin().await?;
        let row = activity::create_activity(&mut *tx, &new_activity).await?;
        status::create_activity_status(&mut *tx, row.id, None, ActivityState::Pending, notify)
            .await?;
        commit(tx).await?;
        row.try_into()
    }

    async fn list_activities(&self) -> CampusResult<Vec<ActivityView>> {
        activity::get_activities(&self.pool)
            .await?
            .into_iter()
            .map(ActivityView::try_from)
            .collect()
    }

    async fn find_activity(&self, id: Uuid) -> CampusResult<Option<Activity>> {
        activity::get_activity_by_id(&self.pool, id)
            .await?
            .map(Activity::try_from)
            .transpose()
    }

    async fn decide_activity(
        &self,
        id: Uuid,
        state: ActivityState,
        actor: Uuid,
        notify: &str,
    ) -> CampusResult<Option<Activity>> {
        let mut tx = self.begin().await?;
        let Some(row) = activity::update_activity_state(&mut *tx, id, state).await? else {
            return Ok(None);
        };
        status::create_activity_status(&mut *tx, id, Some(actor), state, notify).await?;
        commit(tx).await?;
        Ok(Some(row.try_into()?))
    }

    async fn list_activity_statuses(&self, id: Uuid) -> CampusResult<Vec<ActivityStatus>> {
        status::get_activity_statuses(&self.pool, id)
            .await?
            .into_iter()
            .map(ActivityStatus::try_from)
            .collect()
    }
}

#[async_trait]
impl ReservationStore for PgStore {
    async fn reserve_parking(&self, new_parking: &NewParking) -> CampusResult<Parking> {
        let mut tx = self.begin().await?;

        let student_row = student::lock_student(&mut tx, &new_parking.student_id).await?;
        let snapshot = ParkingSnapshot {
            student_exists: student_row.is_some(),
            student_has_active_parking: parking::get_active_parking_by_student(
                &mut tx,
                &new_parking.student_id,
            )
            .await?
            .is_some(),
            spot_reserved: parking::is_spot_reserved(&mut tx, &new_parking.spot).await?,
        };
        debug!(?snapshot, spot = %new_parking.spot, "Parking admission snapshot");
        admit_parking(&snapshot, new_parking)?;

        let row = match parking::create_parking(&mut tx, new_parking).await {
            Ok(row) => row,
            Err(err) => {
                return Err(match unique_violation(&err).as_deref() {
                    Some(PARKING_ACTIVE_STUDENT_INDEX) => CampusError::Conflict(format!(
                        "Student {} already has a reservation",
                        new_parking.student_id
                    )),
                    Some(constraint) => {
                        warn!(constraint, spot = %new_parking.spot, "Lost race for parking spot");
                        parking_spot_taken(&new_parking.spot)
                    }
                    None => err.into(),
                });
            }
        };

        commit(tx).await?;
        row.try_into()
    }

    async fn reserve_locker(&self, new_locker: &NewLocker) -> CampusResult<Locker> {
        let mut tx = self.begin().await?;

        let student_row = student::lock_student(&mut tx, &new_locker.student_id).await?;
        let active_parking =
            parking::get_active_parking_by_student(&mut tx, &new_locker.student_id).await?;
        let snapshot = LockerSnapshot {
            student_exists: student_row.is_some(),
            student_has_active_parking: active_parking.is_some(),
            spot_reserved: locker::lock_active_locker_by_spot(&mut tx, &new_locker.spot)
                .await?
                .is_some(),
        };
        debug!(?snapshot, spot = %new_locker.spot, "Locker admission snapshot");
        admit_locker(&snapshot, new_locker)?;

        let row = match locker::create_locker(&mut tx, new_locker).await {
            Ok(row) => row,
            Err(err) if unique_violation(&err).is_some() => {
                warn!(spot = %new_locker.spot, "Lost race for locker spot");
                return Err(locker_spot_taken(&new_locker.spot));
            }
            Err(err) => return Err(err.into()),
        };

        commit(tx).await?;
        Ok(row.into())
    }

    async fn find_active_parking(&self, student_id: &str) -> CampusResult<Option<Parking>> {
        let mut conn = self.pool.acquire().await.map_err(eyre::Report::from)?;
        parking::get_active_parking_by_student(&mut conn, student_id)
            .await?
            .map(Parking::try_from)
            .transpose()
    }

    async fn release_parking(&self, student_id: &str) -> CampusResult<Parking> {
        let mut tx = self.begin().await?;

        if student::lock_student(&mut tx, student_id).await?.is_none() {
            return Err(student_not_found(student_id));
        }
        let Some(active) = parking::get_active_parking_by_student(&mut tx, student_id).await?
        else {
            return Err(CampusError::NotFound(format!(
                "Student {student_id} has no active parking reservation"
            )));
        };

        let row = parking::mark_parking_available(&mut tx, active.id).await?;
        status::create_parking_status(&mut tx, row.id, None, true, PARKING_RELEASED_NOTIFY)
            .await?;

        commit(tx).await?;
        row.try_into()
    }

    async fn release_parking_spot(&self, spot: &str, actor: Uuid) -> CampusResult<Parking> {
        let mut tx = self.begin().await?;
        let vacant =
            || CampusError::NotFound(format!("Parking spot {spot} has no active reservation"));

        let Some(occupant) = parking::get_active_parking_by_spot(&mut tx, spot).await? else {
            return Err(vacant());
        };
        // Lock the occupant like every other reservation write, then re-read:
        // the row may have been released while we waited.
        student::lock_student(&mut tx, &occupant.student_id).await?;
        let Some(active) = parking::get_active_parking_by_student(&mut tx, &occupant.student_id)
            .await?
            .filter(|row| row.spot == spot)
        else {
            return Err(vacant());
        };

        let row = parking::mark_parking_available(&mut tx, active.id).await?;
        status::create_parking_status(&mut tx, row.id, Some(actor), true, PARKING_VACATED_NOTIFY)
            .await?;

        commit(tx).await?;
        row.try_into()
    }

    async fn release_locker(&self, spot: &str, actor: Uuid) -> CampusResult<Locker> {
        let mut tx = self.begin().await?;

        let Some(active) = locker::lock_active_locker_by_spot(&mut tx, spot).await? else {
            return Err(CampusError::NotFound(format!(
                "Locker spot {spot} has no active reservation"
            )));
        };

        let row = locker::mark_locker_available(&mut tx, active.id).await?;
        status::create_locker_status(&mut tx, row.id, Some(actor), true, LOCKER_RELEASED_NOTIFY)
            .await?;

        commit(tx).await?;
        Ok(row.into())
    }

    async fn list_parking(&self) -> CampusResult<Vec<ParkingView>> {
        parking::get_parkings(&self.pool)
            .await?
            .into_iter()
            .map(ParkingView::try_from)
            .collect()
    }

    async fn list_lockers(&self) -> CampusResult<Vec<LockerView>> {
        Ok(locker::get_lockers(&self.pool)
            .await?
            .into_iter()
            .map(LockerView::from)
            .collect())
    }

    async fn parking_history(&self, student_id: &str) -> CampusResult<Vec<ParkingStatus>> {
        if student::get_student_by_id(&self.pool, student_id).await?.is_none() {
            return Err(student_not_found(student_id));
        }
        Ok(status::get_parking_statuses_by_student(&self.pool, student_id)
            .await?
            .into_iter()
            .map(|row| row.into_parking_status())
            .collect())
    }

    async fn locker_history(&self, spot: &str) -> CampusResult<Vec<LockerStatus>> {
        Ok(status::get_locker_statuses_by_spot(&self.pool, spot)
            .await?
            .into_iter()
            .map(|row| row.into_locker_status())
            .collect())
    }
}
