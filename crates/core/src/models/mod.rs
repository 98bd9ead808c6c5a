pub mod account;
pub mod activity;
pub mod organizer;
pub mod reservation;
pub mod status;
pub mod student;
