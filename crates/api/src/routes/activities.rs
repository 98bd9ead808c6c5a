use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/activities/request",
            post(handlers::activities::request_activity),
        )
        .route("/api/activities", get(handlers::activities::list_activities))
        .route(
            "/api/activities/:id/approve",
            put(handlers::activities::approve_activity),
        )
        .route(
            "/api/activities/:id/decline",
            put(handlers::activities::decline_activity),
        )
        .route(
            "/api/activities/:id/statuses",
            get(handlers::activities::activity_statuses),
        )
}
