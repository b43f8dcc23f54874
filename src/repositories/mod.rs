pub mod driver_repository;
pub mod operator_repository;
