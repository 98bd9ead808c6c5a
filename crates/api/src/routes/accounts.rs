use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/accounts/register", post(handlers::accounts::register))
        .route("/api/accounts/login", post(handlers::accounts::login))
        .route("/api/students", get(handlers::students::list_students))
        .route("/api/students/:id", delete(handlers::students::delete_student))
        .route(
            "/api/admins",
            get(handlers::admins::list_admins).post(handlers::admins::create_admin),
        )
        .route("/api/admins/:id", delete(handlers::admins::delete_admin))
}
