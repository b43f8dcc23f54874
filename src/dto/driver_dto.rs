use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::driver::Driver;

// Request para registrar una visita (el upsert del ledger)
#[derive(Debug, Deserialize, Validate)]
pub struct RecordVisitRequest {
    #[validate(
        custom = "crate::utils::validation::validate_not_empty",
        length(max = 255)
    )]
    pub name: String,

    #[validate(custom = "crate::utils::validation::validate_mobile")]
    pub mobile: String,

    #[validate(custom = "crate::utils::validation::validate_dl_no")]
    pub dl_no: String,

    #[validate(custom = "crate::utils::validation::validate_vehicle_number")]
    pub vehicle_number: String,

    #[validate(custom = "crate::utils::validation::validate_vehicle_type")]
    pub vehicle_type: String,

    #[validate(
        custom = "crate::utils::validation::validate_not_empty",
        length(max = 255)
    )]
    pub last_visited_dhaba: String,
}

// Request para corrección manual de una línea del ledger (bypassa la regla
// de visitas)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(
        custom = "crate::utils::validation::validate_not_empty",
        length(max = 255)
    )]
    pub name: String,

    #[validate(custom = "crate::utils::validation::validate_dl_no")]
    pub dl_no: String,

    #[validate(custom = "crate::utils::validation::validate_vehicle_number")]
    pub vehicle_number: String,

    #[validate(custom = "crate::utils::validation::validate_vehicle_type")]
    pub vehicle_type: String,
}

// Response de driver
#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub id: Uuid,
    pub driver_id: String,
    pub name: String,
    pub mobile: String,
    pub dl_no: String,
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub last_visited_dhaba: String,
    pub visits: i32,
    pub total_visits: i32,
    pub eligible_for_commission: bool,
    pub commission_received: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id,
            driver_id: driver.driver_id,
            name: driver.name,
            mobile: driver.mobile,
            dl_no: driver.dl_no,
            vehicle_number: driver.vehicle_number,
            vehicle_type: driver.vehicle_type,
            last_visited_dhaba: driver.last_visited_dhaba,
            visits: driver.visits,
            total_visits: driver.total_visits,
            eligible_for_commission: driver.eligible_for_commission,
            commission_received: driver.commission_received,
            created_at: driver.created_at,
        }
    }
}

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RecordVisitRequest {
        RecordVisitRequest {
            name: "Ramesh Kumar".to_string(),
            mobile: "9876543210".to_string(),
            dl_no: "DL0123456789012".to_string(),
            vehicle_number: "HR26AB1234".to_string(),
            vehicle_type: "Truck".to_string(),
            last_visited_dhaba: "Amrik Sukhdev Dhaba, Murthal".to_string(),
        }
    }

    #[test]
    fn test_record_visit_request_valid() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_record_visit_request_rejects_bad_fields() {
        let mut request = valid_request();
        request.mobile = "12345".to_string();
        assert!(request.validate().is_err());

        let mut request = valid_request();
        request.dl_no = "XYZ".to_string();
        assert!(request.validate().is_err());

        let mut request = valid_request();
        request.vehicle_type = "Cycle".to_string();
        assert!(request.validate().is_err());

        let mut request = valid_request();
        request.last_visited_dhaba = "  ".to_string();
        assert!(request.validate().is_err());
    }
}
