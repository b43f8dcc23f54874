pub mod auth_routes;
pub mod driver_routes;
