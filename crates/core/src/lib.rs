//! # Campus Core
//!
//! Domain types shared by the storage and HTTP crates: entity models,
//! request/response bodies, the error taxonomy, the repository traits the
//! stores implement, and the reservation admission rules.

pub mod admission;
pub mod errors;
pub mod models;
pub mod registration;
pub mod repository;
pub mod validation;

pub use admission::ReservationService;
pub use errors::{CampusError, CampusResult};
