//! Utilidades de validación
//!
//! Este módulo contiene los validadores de formato de campos que se aplican
//! en la frontera de la API, antes de que un evento llegue al ledger.

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;
use validator::ValidationError;

use crate::models::driver::VEHICLE_TYPES;

lazy_static! {
    // 10 dígitos exactos
    static ref MOBILE_RE: Regex = Regex::new(r"^[0-9]{10}$").unwrap();
    // 2 letras mayúsculas + 13 dígitos, 15 caracteres en total
    static ref DL_NO_RE: Regex = Regex::new(r"^[A-Z]{2}[0-9]{13}$").unwrap();
    // matrícula: XX00XX0000 o XX0X0000
    static ref VEHICLE_NUMBER_RE: Regex =
        Regex::new(r"^[A-Z]{2}[0-9]{1,2}[A-Z]{1,2}[0-9]{4}$").unwrap();
}

/// Validar número de móvil: exactamente 10 dígitos
pub fn validate_mobile(value: &str) -> Result<(), ValidationError> {
    if !MOBILE_RE.is_match(value) {
        let mut error = ValidationError::new("mobile");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"10 digits".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar número de licencia de conducir: 2 letras mayúsculas + 13 dígitos
pub fn validate_dl_no(value: &str) -> Result<(), ValidationError> {
    if !DL_NO_RE.is_match(value) {
        let mut error = ValidationError::new("dl_no");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"XX0000000000000".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar matrícula de vehículo: 2 letras, 1-2 dígitos, 1-2 letras, 4 dígitos
pub fn validate_vehicle_number(value: &str) -> Result<(), ValidationError> {
    if !VEHICLE_NUMBER_RE.is_match(value) {
        let mut error = ValidationError::new("vehicle_number");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"XX00XX0000".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que el tipo de vehículo esté en la lista conocida
pub fn validate_vehicle_type(value: &str) -> Result<(), ValidationError> {
    if !VEHICLE_TYPES.contains(&value) {
        let mut error = ValidationError::new("vehicle_type");
        error.add_param("value".into(), &value.to_string());
        error.add_param("allowed_values".into(), &format!("{:?}", VEHICLE_TYPES));
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío (ignorando espacios)
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar y convertir string a UUID
pub fn validate_uuid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_mobile() {
        assert!(validate_mobile("9876543210").is_ok());
        assert!(validate_mobile("987654321").is_err());
        assert!(validate_mobile("98765432101").is_err());
        assert!(validate_mobile("98765A3210").is_err());
        assert!(validate_mobile("").is_err());
    }

    #[test]
    fn test_validate_dl_no() {
        assert!(validate_dl_no("DL0123456789012").is_ok());
        assert!(validate_dl_no("HR9876543210123").is_ok());
        // minúsculas no pasan: el lookup es case-sensitive
        assert!(validate_dl_no("dl0123456789012").is_err());
        assert!(validate_dl_no("DL012345678901").is_err());
        assert!(validate_dl_no("D10123456789012").is_err());
        assert!(validate_dl_no("DL01234567890123").is_err());
    }

    #[test]
    fn test_validate_vehicle_number() {
        assert!(validate_vehicle_number("HR26AB1234").is_ok());
        assert!(validate_vehicle_number("PB1C4567").is_ok());
        assert!(validate_vehicle_number("DL05CA9999").is_ok());
        assert!(validate_vehicle_number("H26AB1234").is_err());
        assert!(validate_vehicle_number("HR26AB123").is_err());
        assert!(validate_vehicle_number("hr26ab1234").is_err());
    }

    #[test]
    fn test_validate_vehicle_type() {
        assert!(validate_vehicle_type("Truck").is_ok());
        assert!(validate_vehicle_type("SUV").is_ok());
        assert!(validate_vehicle_type("Rickshaw").is_err());
        assert!(validate_vehicle_type("truck").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Amrik Sukhdev Dhaba, Murthal").is_ok());
        assert!(validate_not_empty("").is_err());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_uuid() {
        let valid_uuid = "550e8400-e29b-41d4-a716-446655440000";
        assert!(validate_uuid(valid_uuid).is_ok());

        let invalid_uuid = "invalid-uuid";
        assert!(validate_uuid(invalid_uuid).is_err());
    }
}
