use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/reservations/parking",
            get(handlers::parking::list_parking).post(handlers::parking::reserve_parking),
        )
        .route(
            "/reservations/parking/status/:student_id",
            get(handlers::parking::parking_status),
        )
        .route(
            "/reservations/parking/release/:student_id",
            post(handlers::parking::release_parking),
        )
        .route(
            "/reservations/parking/release-spot/:spot",
            post(handlers::parking::release_parking_spot),
        )
        .route(
            "/reservations/parking/history/:student_id",
            get(handlers::parking::parking_history),
        )
        .route(
            "/reservations/lockers",
            get(handlers::lockers::list_lockers).post(handlers::lockers::reserve_locker),
        )
        .route(
            "/reservations/lockers/release/:spot",
            post(handlers::lockers::release_locker),
        )
        .route(
            "/reservations/lockers/history/:spot",
            get(handlers::lockers::locker_history),
        )
}
