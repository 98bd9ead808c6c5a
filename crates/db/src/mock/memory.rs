//! In-memory implementation of every storage trait.
//!
//! One mutex guards all tables and is held from the first read to the last
//! write of each operation, which gives reservation writes the same
//! all-or-nothing behaviour the Postgres store gets from its transactions.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use campus_core::{
    admission::{
        admit_locker, admit_parking, student_not_found, LockerSnapshot, ParkingSnapshot,
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
        student::{NewStudent, Student, StudentListItem, StudentSummary},
    },
    repository::{
        AccountRepository, ActivityRepository, OrganizerRepository, ReservationStore,
        StudentDirectory,
    },
};
use chrono::Utc;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    accounts: Vec<Account>,
    students: Vec<Student>,
    organizers: Vec<Organizer>,
    activities: Vec<Activity>,
    activity_statuses: Vec<ActivityStatus>,
    parkings: Vec<Parking>,
    parking_statuses: Vec<ParkingStatus>,
    lockers: Vec<Locker>,
    locker_statuses: Vec<LockerStatus>,
}

impl Tables {
    fn student(&self, student_id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.student_id == student_id)
    }

    fn student_summary(&self, student_id: &str) -> Option<StudentSummary> {
        self.student(student_id).map(StudentSummary::from)
    }

    fn active_parking(&self, student_id: &str) -> Option<usize> {
        self.parkings
            .iter()
            .position(|p| p.student_id == student_id && p.is_active())
    }

    fn active_parking_at(&self, spot: &str) -> Option<usize> {
        self.parkings.iter().position(|p| p.spot == spot && p.is_active())
    }

    fn release_parking_at(&mut self, index: usize, actor: Option<Uuid>, notify: &str) -> Parking {
        let now = Utc::now();
        let parking = &mut self.parkings[index];
        parking.is_available = true;
        parking.released_at = Some(now);
        let released = parking.clone();

        self.parking_statuses.push(ParkingStatus {
            id: Uuid::new_v4(),
            parking_id: released.id,
            actor_account_id: actor,
            is_available: true,
            notify: notify.to_string(),
            created_at: now,
        });
        released
    }

    fn parking_spot_reserved(&self, spot: &str) -> bool {
        self.active_parking_at(spot).is_some()
    }

    fn active_locker(&self, spot: &str) -> Option<usize> {
        self.lockers.iter().position(|l| l.spot == spot && l.is_active())
    }

    fn remove_activities(&mut self, doomed: impl Fn(&Activity) -> bool) {
        let ids: Vec<Uuid> = self
            .activities
            .iter()
            .filter(|&a| doomed(a))
            .map(|a| a.id)
            .collect();
        self.activities.retain(|a| !ids.contains(&a.id));
        self.activity_statuses
            .retain(|s| !ids.contains(&s.activity_id));
    }

    /// Removes a student and every row that references it.
    fn remove_student(&mut self, student_id: &str) {
        self.students.retain(|s| s.student_id != student_id);
        self.remove_activities(|a| a.student_id == student_id);

        let parking_ids: Vec<Uuid> = self
            .parkings
            .iter()
            .filter(|p| p.student_id == student_id)
            .map(|p| p.id)
            .collect();
        self.parkings.retain(|p| p.student_id != student_id);
        self.parking_statuses
            .retain(|s| !parking_ids.contains(&s.parking_id));

        let locker_ids: Vec<Uuid> = self
            .lockers
            .iter()
            .filter(|l| l.student_id == student_id)
            .map(|l| l.id)
            .collect();
        self.lockers.retain(|l| l.student_id != student_id);
        self.locker_statuses
            .retain(|s| !locker_ids.contains(&s.locker_id));
    }

    fn forget_actor(&mut self, account_id: Uuid) {
        let actor = Some(account_id);
        for status in &mut self.activity_statuses {
            if status.actor_account_id == actor {
                status.actor_account_id = None;
            }
        }
        for status in &mut self.parking_statuses {
            if status.actor_account_id == actor {
                status.actor_account_id = None;
            }
        }
        for status in &mut self.locker_statuses {
            if status.actor_account_id == actor {
                status.actor_account_id = None;
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> CampusResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| CampusError::Internal("memory store lock poisoned".into()))
    }
}

fn build_account(new_account: NewAccount) -> Account {
    Account {
        id: Uuid::new_v4(),
        user_id: new_account.user_id,
        password: new_account.password,
        role: new_account.role,
        display_name: new_account.display_name,
        created_at: Utc::now(),
    }
}

fn user_id_taken() -> CampusError {
    CampusError::Conflict("User ID is already taken".to_string())
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn register_student(
        &self,
        new_account: NewAccount,
        new_student: NewStudent,
    ) -> CampusResult<(Account, Student)> {
        let mut tables = self.tables()?;

        if tables.accounts.iter().any(|a| a.user_id == new_account.user_id) {
            return Err(user_id_taken());
        }
        if tables.student(&new_student.student_id).is_some() {
            return Err(CampusError::Conflict(format!(
                "Student ID {} is already taken",
                new_student.student_id
            )));
        }

        let account = build_account(new_account);
        let student = Student {
            student_id: new_student.student_id,
            account_id: account.id,
            first_name: new_student.first_name,
            middle_initial: new_student.middle_initial,
            last_name: new_student.last_name,
            year_level: new_student.year_level,
            course: new_student.course,
        };
        tables.accounts.push(account.clone());
        tables.students.push(student.clone());

        Ok((account, student))
    }

    async fn create_account(&self, new_account: NewAccount) -> CampusResult<Account> {
        let mut tables = self.tables()?;

        if tables.accounts.iter().any(|a| a.user_id == new_account.user_id) {
            return Err(user_id_taken());
        }
        let account = build_account(new_account);
        tables.accounts.push(account.clone());
        Ok(account)
    }

    async fn find_account_by_user_id(&self, user_id: &str) -> CampusResult<Option<Account>> {
        let tables = self.tables()?;
        Ok(tables.accounts.iter().find(|a| a.user_id == user_id).cloned())
    }

    async fn find_account_by_id(&self, id: Uuid) -> CampusResult<Option<Account>> {
        let tables = self.tables()?;
        Ok(tables.accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn list_accounts_by_role(&self, role: Role) -> CampusResult<Vec<Account>> {
        let tables = self.tables()?;
        Ok(tables
            .accounts
            .iter()
            .filter(|a| a.role == role)
            .cloned()
            .collect())
    }

    async fn delete_account(&self, id: Uuid, role: Role) -> CampusResult<bool> {
        let mut tables = self.tables()?;

        let Some(index) = tables
            .accounts
            .iter()
            .position(|a| a.id == id && a.role == role)
        else {
            return Ok(false);
        };
        tables.accounts.remove(index);

        let owned: Vec<String> = tables
            .students
            .iter()
            .filter(|s| s.account_id == id)
            .map(|s| s.student_id.clone())
            .collect();
        for student_id in owned {
            tables.remove_student(&student_id);
        }
        tables.forget_actor(id);

        Ok(true)
    }
}

#[async_trait]
impl StudentDirectory for MemoryStore {
    async fn find_student_by_visible_id(&self, student_id: &str) -> CampusResult<Option<Student>> {
        let tables = self.tables()?;
        Ok(tables.student(student_id).cloned())
    }

    async fn find_student_by_account(&self, account_id: Uuid) -> CampusResult<Option<Student>> {
        let tables = self.tables()?;
        Ok(tables
            .students
            .iter()
            .find(|s| s.account_id == account_id)
            .cloned())
    }

    async fn list_students(&self) -> CampusResult<Vec<StudentListItem>> {
        let tables = self.tables()?;

        let mut items: Vec<StudentListItem> = tables
            .students
            .iter()
            .filter_map(|s| {
                let account = tables.accounts.iter().find(|a| a.id == s.account_id)?;
                Some(StudentListItem {
                    student_id: s.student_id.clone(),
                    first_name: s.first_name.clone(),
                    middle_initial: s.middle_initial.clone(),
                    last_name: s.last_name.clone(),
                    year_level: s.year_level,
                    course: s.course.clone(),
                    acc_user_id: account.user_id.clone(),
                })
            })
            .collect();
        items.sort_by(|a, b| {
            (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name))
        });
        Ok(items)
    }
}

#[async_trait]
impl OrganizerRepository for MemoryStore {
    async fn list_organizers(&self) -> CampusResult<Vec<Organizer>> {
        let tables = self.tables()?;
        let mut organizers = tables.organizers.clone();
        organizers.sort_by(|a, b| a.organization.cmp(&b.organization));
        Ok(organizers)
    }

    async fn find_organizer(&self, id: Uuid) -> CampusResult<Option<Organizer>> {
        let tables = self.tables()?;
        Ok(tables.organizers.iter().find(|o| o.id == id).cloned())
    }

    async fn create_organizer(&self, new_organizer: NewOrganizer) -> CampusResult<Organizer> {
        let mut tables = self.tables()?;
        let organizer = Organizer {
            id: Uuid::new_v4(),
            first_name: new_organizer.first_name,
            middle_initial: new_organizer.middle_initial,
            last_name: new_organizer.last_name,
            organization: new_organizer.organization,
            created_at: Utc::now(),
        };
        tables.organizers.push(organizer.clone());
        Ok(organizer)
    }

    async fn update_organizer(
        &self,
        id: Uuid,
        new_organizer: NewOrganizer,
    ) -> CampusResult<Option<Organizer>> {
        let mut tables = self.tables()?;
        let Some(organizer) = tables.organizers.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        organizer.first_name = new_organizer.first_name;
        organizer.middle_initial = new_organizer.middle_initial;
        organizer.last_name = new_organizer.last_name;
        organizer.organization = new_organizer.organization;
        Ok(Some(organizer.clone()))
    }

    async fn delete_organizer(&self, id: Uuid) -> CampusResult<bool> {
        let mut tables = self.tables()?;
        let before = tables.organizers.len();
        tables.organizers.retain(|o| o.id != id);
        if tables.organizers.len() == before {
            return Ok(false);
        }
        tables.remove_activities(|a| a.organizer_id == id);
        Ok(true)
    }
}

#[async_trait]
impl ActivityRepository for MemoryStore {
    async fn create_activity(&self, new_activity: NewActivity, notify: &str) -> CampusResult<Activity> {
        let mut tables = self.tables()?;
        let now = Utc::now();
        let state = ActivityState::Pending;

        let activity = Activity {
            id: Uuid::new_v4(),
            student_id: new_activity.student_id,
            organizer_id: new_activity.organizer_id,
            name: new_activity.name,
            description: new_activity.description,
            status: state,
            is_granted: state.is_granted(),
            scheduled_at: new_activity.scheduled_at,
            created_at: now,
        };
        tables.activity_statuses.push(ActivityStatus {
            id: Uuid::new_v4(),
            activity_id: activity.id,
            actor_account_id: None,
            status: state,
            is_granted: state.is_granted(),
            notify: notify.to_string(),
            created_at: now,
        });
        tables.activities.push(activity.clone());
        Ok(activity)
    }

    async fn list_activities(&self) -> CampusResult<Vec<ActivityView>> {
        let tables = self.tables()?;
        let mut views: Vec<ActivityView> = tables
            .activities
            .iter()
            .map(|activity| ActivityView {
                student: tables.student_summary(&activity.student_id),
                organizer: tables
                    .organizers
                    .iter()
                    .find(|o| o.id == activity.organizer_id)
                    .map(Into::into),
                activity: activity.clone(),
            })
            .collect();
        views.sort_by_key(|view| view.activity.scheduled_at);
        Ok(views)
    }

    async fn find_activity(&self, id: Uuid) -> CampusResult<Option<Activity>> {
        let tables = self.tables()?;
        Ok(tables.activities.iter().find(|a| a.id == id).cloned())
    }

    async fn decide_activity(
        &self,
        id: Uuid,
        state: ActivityState,
        actor: Uuid,
        notify: &str,
    ) -> CampusResult<Option<Activity>> {
        let mut tables = self.tables()?;
        let Some(activity) = tables.activities.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        activity.status = state;
        activity.is_granted = state.is_granted();
        let updated = activity.clone();

        tables.activity_statuses.push(ActivityStatus {
            id: Uuid::new_v4(),
            activity_id: id,
            actor_account_id: Some(actor),
            status: state,
            is_granted: state.is_granted(),
            notify: notify.to_string(),
            created_at: Utc::now(),
        });
        Ok(Some(updated))
    }

    async fn list_activity_statuses(&self, id: Uuid) -> CampusResult<Vec<ActivityStatus>> {
        let tables = self.tables()?;
        Ok(tables
            .activity_statuses
            .iter()
            .filter(|s| s.activity_id == id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn reserve_parking(&self, new_parking: &NewParking) -> CampusResult<Parking> {
        let mut tables = self.tables()?;

        let snapshot = ParkingSnapshot {
            student_exists: tables.student(&new_parking.student_id).is_some(),
            student_has_active_parking: tables.active_parking(&new_parking.student_id).is_some(),
            spot_reserved: tables.parking_spot_reserved(&new_parking.spot),
        };
        admit_parking(&snapshot, new_parking)?;

        let parking = Parking {
            id: Uuid::new_v4(),
            student_id: new_parking.student_id.clone(),
            spot: new_parking.spot.clone(),
            vehicle_type: new_parking.vehicle_type.clone(),
            vehicle_model: new_parking.vehicle_model.clone(),
            schedule: new_parking.schedule,
            reservation_date: new_parking.reservation_date,
            expiry_date: new_parking.expiry_date,
            is_available: false,
            created_at: Utc::now(),
            released_at: None,
        };
        tables.parkings.push(parking.clone());
        Ok(parking)
    }

    async fn reserve_locker(&self, new_locker: &NewLocker) -> CampusResult<Locker> {
        let mut tables = self.tables()?;

        let snapshot = LockerSnapshot {
            student_exists: tables.student(&new_locker.student_id).is_some(),
            student_has_active_parking: tables.active_parking(&new_locker.student_id).is_some(),
            spot_reserved: tables.active_locker(&new_locker.spot).is_some(),
        };
        admit_locker(&snapshot, new_locker)?;

        let locker = Locker {
            id: Uuid::new_v4(),
            student_id: new_locker.student_id.clone(),
            spot: new_locker.spot.clone(),
            is_available: false,
            created_at: Utc::now(),
            released_at: None,
        };
        tables.lockers.push(locker.clone());
        Ok(locker)
    }

    async fn find_active_parking(&self, student_id: &str) -> CampusResult<Option<Parking>> {
        let tables = self.tables()?;
        Ok(tables
            .active_parking(student_id)
            .map(|index| tables.parkings[index].clone()))
    }

    async fn release_parking(&self, student_id: &str) -> CampusResult<Parking> {
        let mut tables = self.tables()?;

        if tables.student(student_id).is_none() {
            return Err(student_not_found(student_id));
        }
        let Some(index) = tables.active_parking(student_id) else {
            return Err(CampusError::NotFound(format!(
                "Student {student_id} has no active parking reservation"
            )));
        };

        Ok(tables.release_parking_at(index, None, PARKING_RELEASED_NOTIFY))
    }

    async fn release_parking_spot(&self, spot: &str, actor: Uuid) -> CampusResult<Parking> {
        let mut tables = self.tables()?;

        let Some(index) = tables.active_parking_at(spot) else {
            return Err(CampusError::NotFound(format!(
                "Parking spot {spot} has no active reservation"
            )));
        };

        Ok(tables.release_parking_at(index, Some(actor), PARKING_VACATED_NOTIFY))
    }

    async fn release_locker(&self, spot: &str, actor: Uuid) -> CampusResult<Locker> {
        let mut tables = self.tables()?;

        let Some(index) = tables.active_locker(spot) else {
            return Err(CampusError::NotFound(format!(
                "Locker spot {spot} has no active reservation"
            )));
        };

        let now = Utc::now();
        let locker = &mut tables.lockers[index];
        locker.is_available = true;
        locker.released_at = Some(now);
        let released = locker.clone();

        tables.locker_statuses.push(LockerStatus {
            id: Uuid::new_v4(),
            locker_id: released.id,
            actor_account_id: Some(actor),
            is_available: true,
            notify: LOCKER_RELEASED_NOTIFY.to_string(),
            created_at: now,
        });
        Ok(released)
    }

    async fn list_parking(&self) -> CampusResult<Vec<ParkingView>> {
        let tables = self.tables()?;
        Ok(tables
            .parkings
            .iter()
            .map(|parking| ParkingView {
                student: tables.student_summary(&parking.student_id),
                parking: parking.clone(),
            })
            .collect())
    }

    async fn list_lockers(&self) -> CampusResult<Vec<LockerView>> {
        let tables = self.tables()?;
        Ok(tables
            .lockers
            .iter()
            .map(|locker| LockerView {
                student: tables.student_summary(&locker.student_id),
                locker: locker.clone(),
            })
            .collect())
    }

    async fn parking_history(&self, student_id: &str) -> CampusResult<Vec<ParkingStatus>> {
        let tables = self.tables()?;
        if tables.student(student_id).is_none() {
            return Err(student_not_found(student_id));
        }
        let parking_ids: Vec<Uuid> = tables
            .parkings
            .iter()
            .filter(|p| p.student_id == student_id)
            .map(|p| p.id)
            .collect();
        Ok(tables
            .parking_statuses
            .iter()
            .filter(|s| parking_ids.contains(&s.parking_id))
            .cloned()
            .collect())
    }

    async fn locker_history(&self, spot: &str) -> CampusResult<Vec<LockerStatus>> {
        let tables = self.tables()?;
        let locker_ids: Vec<Uuid> = tables
            .lockers
            .iter()
            .filter(|l| l.spot == spot)
            .map(|l| l.id)
            .collect();
        Ok(tables
            .locker_statuses
            .iter()
            .filter(|s| locker_ids.contains(&s.locker_id))
            .cloned()
            .collect())
    }
}
