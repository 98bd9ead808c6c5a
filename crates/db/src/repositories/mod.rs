pub mod account;
pub mod activity;
pub mod locker;
pub mod organizer;
pub mod parking;
pub mod status;
pub mod student;
