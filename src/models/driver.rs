//! Modelo de Driver
//!
//! Este módulo contiene el struct Driver que mapea exactamente a la tabla
//! drivers del schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tipos de vehículo conocidos por el sistema
pub const VEHICLE_TYPES: &[&str] = &[
    "SUV",
    "Sedan",
    "Hatchback",
    "Bus",
    "Truck",
    "Van",
    "Pickup",
];

/// Driver principal - una línea del ledger por combinación (dl_no, dhaba)
///
/// `visits` cuenta la racha de visitas al dhaba actual; `total_visits` es el
/// acumulado histórico y nunca se reinicia.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
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
