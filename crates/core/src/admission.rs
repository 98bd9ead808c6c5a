//! # Reservation Admission
//!
//! Decides whether a parking or locker spot may be granted to a student.
//!
//! The rules are pure functions over a snapshot the store reads inside its
//! write transaction, so the decision and the write that follows see the
//! same state. [`ReservationService`] validates requests and hands them to
//! a [`ReservationStore`].

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    errors::{CampusError, CampusResult},
    models::reservation::{
        Locker, LockerReservationRequest, LockerView, NewLocker, NewParking, Parking,
        ParkingReservationRequest, ParkingSchedule, ParkingView,
    },
    models::status::{LockerStatus, ParkingStatus},
    repository::ReservationStore,
    validation::{limit_all, limits, normalize_spot, require, require_all},
};

/// State read under lock before a parking write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParkingSnapshot {
    pub student_exists: bool,
    pub student_has_active_parking: bool,
    pub spot_reserved: bool,
}

/// State read under lock before a locker write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockerSnapshot {
    pub student_exists: bool,
    pub student_has_active_parking: bool,
    pub spot_reserved: bool,
}

/// Checks, in order: the student exists, holds no active parking, and the
/// spot is free.
pub fn admit_parking(snapshot: &ParkingSnapshot, parking: &NewParking) -> CampusResult<()> {
    if !snapshot.student_exists {
        return Err(student_not_found(&parking.student_id));
    }
    if snapshot.student_has_active_parking {
        return Err(CampusError::Conflict(format!(
            "Student {} already has a reservation",
            parking.student_id
        )));
    }
    if snapshot.spot_reserved {
        return Err(parking_spot_taken(&parking.spot));
    }
    Ok(())
}

/// Checks, in order: the student holds active parking, exists, and the spot
/// is free.
pub fn admit_locker(snapshot: &LockerSnapshot, locker: &NewLocker) -> CampusResult<()> {
    if !snapshot.student_has_active_parking {
        return Err(CampusError::Precondition(format!(
            "Student {} must have an active parking reservation to reserve a locker",
            locker.student_id
        )));
    }
    if !snapshot.student_exists {
        return Err(student_not_found(&locker.student_id));
    }
    if snapshot.spot_reserved {
        return Err(locker_spot_taken(&locker.spot));
    }
    Ok(())
}

pub fn student_not_found(student_id: &str) -> CampusError {
    CampusError::NotFound(format!("Student {student_id} not found"))
}

/// Also used by stores when a racing insert trips the unique index.
pub fn parking_spot_taken(spot: &str) -> CampusError {
    CampusError::Conflict(format!("Parking spot {spot} is already reserved"))
}

pub fn locker_spot_taken(spot: &str) -> CampusError {
    CampusError::Conflict(format!("Locker spot {spot} is already reserved"))
}

/// Request-level validation turning a parking body into a [`NewParking`].
pub fn parse_parking_request(request: &ParkingReservationRequest) -> CampusResult<NewParking> {
    require_all(&[
        ("studentId", request.student_id.as_str()),
        ("spot", request.spot.as_str()),
        ("vehicleType", request.vehicle_type.as_str()),
        ("vehicleModel", request.vehicle_model.as_str()),
        ("schedule", request.schedule.as_str()),
    ])?;
    limit_all(&[
        ("studentId", request.student_id.as_str(), limits::STUDENT_ID),
        ("spot", request.spot.as_str(), limits::SPOT),
        ("vehicleType", request.vehicle_type.as_str(), limits::VEHICLE),
        ("vehicleModel", request.vehicle_model.as_str(), limits::VEHICLE),
    ])?;

    let schedule: ParkingSchedule = request.schedule.parse()?;

    if let (Some(start), Some(end)) = (request.reservation_date, request.expiry_date) {
        if end <= start {
            return Err(CampusError::Validation(
                "expiryDate must be after reservationDate".to_string(),
            ));
        }
    }

    Ok(NewParking {
        student_id: request.student_id.trim().to_string(),
        spot: normalize_spot(&request.spot),
        vehicle_type: request.vehicle_type.trim().to_string(),
        vehicle_model: request.vehicle_model.trim().to_string(),
        schedule,
        reservation_date: request.reservation_date,
        expiry_date: request.expiry_date,
    })
}

pub fn parse_locker_request(request: &LockerReservationRequest) -> CampusResult<NewLocker> {
    require_all(&[
        ("studentId", request.student_id.as_str()),
        ("spot", request.spot.as_str()),
    ])?;
    limit_all(&[
        ("studentId", request.student_id.as_str(), limits::STUDENT_ID),
        ("spot", request.spot.as_str(), limits::SPOT),
    ])?;

    Ok(NewLocker {
        student_id: request.student_id.trim().to_string(),
        spot: normalize_spot(&request.spot),
    })
}

/// Entry point for every reservation operation exposed over HTTP.
#[derive(Clone)]
pub struct ReservationService {
    store: Arc<dyn ReservationStore>,
}

impl ReservationService {
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self { store }
    }

    pub async fn reserve_parking(&self, request: &ParkingReservationRequest) -> CampusResult<Parking> {
        let parking = parse_parking_request(request)?;
        debug!(student_id = %parking.student_id, spot = %parking.spot, "Admitting parking reservation");

        let reserved = self.store.reserve_parking(&parking).await?;
        info!(
            student_id = %reserved.student_id,
            spot = %reserved.spot,
            schedule = %reserved.schedule,
            "Parking reserved"
        );
        Ok(reserved)
    }

    pub async fn reserve_locker(&self, request: &LockerReservationRequest) -> CampusResult<Locker> {
        let locker = parse_locker_request(request)?;
        debug!(student_id = %locker.student_id, spot = %locker.spot, "Admitting locker reservation");

        let reserved = self.store.reserve_locker(&locker).await?;
        info!(student_id = %reserved.student_id, spot = %reserved.spot, "Locker reserved");
        Ok(reserved)
    }

    /// True iff the student currently holds a reserved parking row.
    pub async fn has_active_parking(&self, student_id: &str) -> CampusResult<bool> {
        let student_id = require("studentId", student_id)?;
        Ok(self.store.find_active_parking(student_id).await?.is_some())
    }

    /// Frees the student's parking spot. Existing lockers are kept.
    pub async fn release_parking(&self, student_id: &str) -> CampusResult<Parking> {
        let student_id = require("studentId", student_id)?;
        let released = self.store.release_parking(student_id).await?;
        info!(student_id = %student_id, spot = %released.spot, "Parking released");
        Ok(released)
    }

    /// Removes whoever occupies a parking spot. The occupant's lockers are kept.
    pub async fn release_parking_spot(&self, spot: &str, actor: Uuid) -> CampusResult<Parking> {
        let spot = normalize_spot(require("spot", spot)?);
        let released = self.store.release_parking_spot(&spot, actor).await?;
        info!(
            spot = %spot,
            student_id = %released.student_id,
            actor = %actor,
            "Parking spot vacated"
        );
        Ok(released)
    }

    pub async fn release_locker(&self, spot: &str, actor: Uuid) -> CampusResult<Locker> {
        let spot = normalize_spot(require("spot", spot)?);
        let released = self.store.release_locker(&spot, actor).await?;
        info!(spot = %spot, actor = %actor, "Locker released");
        Ok(released)
    }

    pub async fn list_parking(&self) -> CampusResult<Vec<ParkingView>> {
        self.store.list_parking().await
    }

    pub async fn list_lockers(&self) -> CampusResult<Vec<LockerView>> {
        self.store.list_lockers().await
    }

    /// `NotFound` if the student does not exist.
    pub async fn parking_history(&self, student_id: &str) -> CampusResult<Vec<ParkingStatus>> {
        let student_id = require("studentId", student_id)?;
        self.store.parking_history(student_id).await
    }

    pub async fn locker_history(&self, spot: &str) -> CampusResult<Vec<LockerStatus>> {
        let spot = normalize_spot(require("spot", spot)?);
        self.store.locker_history(&spot).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parking_request() -> ParkingReservationRequest {
        ParkingReservationRequest {
            student_id: "2504225".to_string(),
            spot: "b3".to_string(),
            vehicle_type: "car".to_string(),
            vehicle_model: "Toyota Vios".to_string(),
            schedule: "pm".to_string(),
            reservation_date: None,
            expiry_date: None,
        }
    }

    fn new_parking() -> NewParking {
        parse_parking_request(&parking_request()).unwrap()
    }

    fn new_locker() -> NewLocker {
        NewLocker {
            student_id: "2504225".to_string(),
            spot: "C1".to_string(),
        }
    }

    #[test]
    fn parking_request_is_normalised() {
        let parking = new_parking();
        assert_eq!(parking.spot, "B3");
        assert_eq!(parking.schedule, ParkingSchedule::Pm);
        assert_eq!(parking.vehicle_model, "Toyota Vios");
    }

    #[rstest]
    #[case::student("studentId")]
    #[case::spot("spot")]
    #[case::vehicle_type("vehicleType")]
    #[case::vehicle_model("vehicleModel")]
    #[case::schedule("schedule")]
    fn blank_parking_field_is_rejected(#[case] field: &str) {
        let mut request = parking_request();
        match field {
            "studentId" => request.student_id = "  ".to_string(),
            "spot" => request.spot = String::new(),
            "vehicleType" => request.vehicle_type = String::new(),
            "vehicleModel" => request.vehicle_model = String::new(),
            _ => request.schedule = String::new(),
        }

        let err = parse_parking_request(&request).unwrap_err();
        assert!(matches!(err, CampusError::Validation(ref msg) if msg.contains(field)));
    }

    #[rstest]
    #[case::student("studentId", 21)]
    #[case::spot("spot", 9)]
    #[case::vehicle_type("vehicleType", 31)]
    #[case::vehicle_model("vehicleModel", 31)]
    fn overlong_parking_field_is_rejected(#[case] field: &str, #[case] len: usize) {
        let mut request = parking_request();
        let value = "X".repeat(len);
        match field {
            "studentId" => request.student_id = value,
            "spot" => request.spot = value,
            "vehicleType" => request.vehicle_type = value,
            _ => request.vehicle_model = value,
        }

        let err = parse_parking_request(&request).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Validation error: {field} must be at most {} characters", len - 1)
        );
    }

    #[test]
    fn parking_fields_at_their_limit_are_accepted() {
        let request = ParkingReservationRequest {
            spot: "PARKING1".to_string(),
            vehicle_model: "M".repeat(30),
            ..parking_request()
        };
        assert_eq!(parse_parking_request(&request).unwrap().spot, "PARKING1");
    }

    #[test]
    fn overlong_locker_spot_is_rejected() {
        let request = LockerReservationRequest {
            student_id: "2504225".to_string(),
            spot: "LOCKERSPOT1".to_string(),
        };
        assert!(matches!(
            parse_locker_request(&request),
            Err(CampusError::Validation(msg)) if msg.contains("spot")
        ));
    }

    #[test]
    fn unknown_schedule_is_rejected() {
        let mut request = parking_request();
        request.schedule = "noon".to_string();
        assert!(matches!(
            parse_parking_request(&request),
            Err(CampusError::Validation(_))
        ));
    }

    #[test]
    fn expiry_before_reservation_is_rejected() {
        let now = chrono::Utc::now();
        let mut request = parking_request();
        request.reservation_date = Some(now);
        request.expiry_date = Some(now - chrono::Duration::hours(1));
        assert!(matches!(
            parse_parking_request(&request),
            Err(CampusError::Validation(_))
        ));
    }

    #[test]
    fn parking_admission_checks_in_order() {
        let parking = new_parking();

        let all_bad = ParkingSnapshot {
            student_exists: false,
            student_has_active_parking: true,
            spot_reserved: true,
        };
        assert!(matches!(admit_parking(&all_bad, &parking), Err(CampusError::NotFound(_))));

        let has_parking = ParkingSnapshot {
            student_exists: true,
            ..all_bad
        };
        let err = admit_parking(&has_parking, &parking).unwrap_err();
        assert_eq!(err.to_string(), "Conflict: Student 2504225 already has a reservation");

        let spot_taken = ParkingSnapshot {
            student_has_active_parking: false,
            ..has_parking
        };
        let err = admit_parking(&spot_taken, &parking).unwrap_err();
        assert_eq!(err.to_string(), "Conflict: Parking spot B3 is already reserved");

        let clear = ParkingSnapshot {
            spot_reserved: false,
            ..spot_taken
        };
        assert!(admit_parking(&clear, &parking).is_ok());
    }

    #[test]
    fn locker_admission_requires_active_parking_first() {
        let locker = new_locker();

        let no_parking = LockerSnapshot {
            student_exists: false,
            student_has_active_parking: false,
            spot_reserved: true,
        };
        assert!(matches!(
            admit_locker(&no_parking, &locker),
            Err(CampusError::Precondition(_))
        ));

        let taken = LockerSnapshot {
            student_exists: true,
            student_has_active_parking: true,
            spot_reserved: true,
        };
        let err = admit_locker(&taken, &locker).unwrap_err();
        assert_eq!(err.to_string(), "Conflict: Locker spot C1 is already reserved");

        let clear = LockerSnapshot {
            spot_reserved: false,
            ..taken
        };
        assert!(admit_locker(&clear, &locker).is_ok());
    }

    #[test]
    fn locker_request_requires_both_fields() {
        let request = LockerReservationRequest {
            student_id: "2504225".to_string(),
            spot: " ".to_string(),
        };
        assert!(matches!(
            parse_locker_request(&request),
            Err(CampusError::Validation(_))
        ));
    }
}
