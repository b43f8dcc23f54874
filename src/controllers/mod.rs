pub mod auth_controller;
pub mod driver_controller;
