//! Modelo de Operator
//!
//! Operadores del panel que registran visitas y confirman comisiones.
//! Mapea exactamente a la tabla operators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Operator principal - mapea exactamente a la tabla operators
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Operator {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}
