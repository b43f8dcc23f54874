use crate::models::driver::Driver;
use crate::services::visit_ledger::VisitUpdate;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

// Código de PostgreSQL para unique_violation
const UNIQUE_VIOLATION: &str = "23505";

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lookup por la clave de identidad del ledger: (dl_no, last_visited_dhaba),
    /// case-sensitive tal como está persistido
    pub async fn find_by_dl_and_dhaba(
        &self,
        dl_no: &str,
        dhaba: &str,
    ) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            "SELECT * FROM drivers WHERE dl_no = $1 AND last_visited_dhaba = $2",
        )
        .bind(dl_no)
        .bind(dhaba)
        .fetch_optional(&self.pool)
        .await?;

        Ok(driver)
    }

    /// Insertar la primera visita de un par (dl_no, dhaba)
    ///
    /// El índice único sobre (dl_no, last_visited_dhaba) absorbe la carrera
    /// de creación: si otro proceso insertó primero, la violación se reporta
    /// como conflicto de escritura sin reintento interno.
    pub async fn insert(&self, driver: &Driver) -> Result<Driver, AppError> {
        let result = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (
                id, driver_id, name, mobile, dl_no, vehicle_number, vehicle_type,
                last_visited_dhaba, visits, total_visits,
                eligible_for_commission, commission_received, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(driver.id)
        .bind(&driver.driver_id)
        .bind(&driver.name)
        .bind(&driver.mobile)
        .bind(&driver.dl_no)
        .bind(&driver.vehicle_number)
        .bind(&driver.vehicle_type)
        .bind(&driver.last_visited_dhaba)
        .bind(driver.visits)
        .bind(driver.total_visits)
        .bind(driver.eligible_for_commission)
        .bind(driver.commission_received)
        .bind(driver.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                AppError::Conflict(
                    "La visita ya fue registrada por otra operación concurrente".to_string(),
                )
            }
            _ => AppError::Database(e),
        })?;

        Ok(result)
    }

    /// Aplicar un VisitUpdate como una única actualización condicional
    ///
    /// El guard `total_visits = expected_total_visits` convierte el
    /// read-modify-write en un compare-and-swap sobre la fila: dos visitas
    /// concurrentes no pueden perder un incremento. Cero filas afectadas
    /// significa que otro proceso ganó la carrera.
    pub async fn apply_visit(&self, id: Uuid, update: &VisitUpdate) -> Result<Driver, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET name = $2, mobile = $3, vehicle_number = $4, vehicle_type = $5,
                last_visited_dhaba = $6, visits = $7, total_visits = $8,
                eligible_for_commission = $9, commission_received = $10
            WHERE id = $1 AND total_visits = $11
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.mobile)
        .bind(&update.vehicle_number)
        .bind(&update.vehicle_type)
        .bind(&update.last_visited_dhaba)
        .bind(update.visits)
        .bind(update.total_visits)
        .bind(update.eligible_for_commission)
        .bind(update.commission_received)
        .bind(update.expected_total_visits)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::Conflict(
                "La visita fue registrada por otra operación concurrente".to_string(),
            )
        })?;

        Ok(driver)
    }

    pub async fn list_all(&self) -> Result<Vec<Driver>, AppError> {
        let drivers = sqlx::query_as::<_, Driver>("SELECT * FROM drivers ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(drivers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    /// Corrección manual: sobrescribe los campos editables sin pasar por la
    /// regla de visitas
    pub async fn replace_fields(
        &self,
        id: Uuid,
        name: &str,
        dl_no: &str,
        vehicle_number: &str,
        vehicle_type: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE drivers
            SET name = $2, dl_no = $3, vehicle_number = $4, vehicle_type = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(dl_no)
        .bind(vehicle_number)
        .bind(vehicle_type)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Confirmación de pago de comisión por el operador
    pub async fn mark_commission_received(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE drivers SET commission_received = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
