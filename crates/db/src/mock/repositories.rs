use async_trait::async_trait;
use campus_core::{
    errors::CampusResult,
    models::{
        reservation::{Locker, LockerView, NewLocker, NewParking, Parking, ParkingView},
        status::{LockerStatus, ParkingStatus},
        student::{Student, StudentListItem},
    },
    repository::{ReservationStore, StudentDirectory},
};
use mockall::mock;
use uuid::Uuid;

// Mock stores for exercising failure paths the in-memory store never hits
mock! {
    pub ReservationStore {}

    #[async_trait]
    impl ReservationStore for ReservationStore {
        async fn reserve_parking(&self, parking: &NewParking) -> CampusResult<Parking>;

        async fn reserve_locker(&self, locker: &NewLocker) -> CampusResult<Locker>;

        async fn find_active_parking(&self, student_id: &str) -> CampusResult<Option<Parking>>;

        async fn release_parking(&self, student_id: &str) -> CampusResult<Parking>;

        async fn release_parking_spot(&self, spot: &str, actor: Uuid) -> CampusResult<Parking>;

        async fn release_locker(&self, spot: &str, actor: Uuid) -> CampusResult<Locker>;

        async fn list_parking(&self) -> CampusResult<Vec<ParkingView>>;

        async fn list_lockers(&self) -> CampusResult<Vec<LockerView>>;

        async fn parking_history(&self, student_id: &str) -> CampusResult<Vec<ParkingStatus>>;

        async fn locker_history(&self, spot: &str) -> CampusResult<Vec<LockerStatus>>;
    }
}

mock! {
    pub StudentDirectory {}

    #[async_trait]
    impl StudentDirectory for StudentDirectory {
        async fn find_student_by_visible_id(&self, student_id: &str) -> CampusResult<Option<Student>>;

        async fn find_student_by_account(&self, account_id: Uuid) -> CampusResult<Option<Student>>;

        async fn list_students(&self) -> CampusResult<Vec<StudentListItem>>;
    }
}
