pub mod accounts;
pub mod activities;
pub mod admins;
pub mod lockers;
pub mod organizers;
pub mod parking;
pub mod students;
