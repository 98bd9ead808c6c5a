pub mod accounts;
pub mod activities;
pub mod health;
pub mod organizers;
pub mod reservations;
