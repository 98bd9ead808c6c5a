use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/organizers",
            get(handlers::organizers::list_organizers).post(handlers::organizers::create_organizer),
        )
        .route(
            "/api/organizers/:id",
            get(handlers::organizers::get_organizer)
                .put(handlers::organizers::update_organizer)
                .delete(handlers::organizers::delete_organizer),
        )
}
