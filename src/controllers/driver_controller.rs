use crate::dto::driver_dto::{ApiResponse, DriverResponse, RecordVisitRequest, UpdateDriverRequest};
use crate::repositories::driver_repository::DriverRepository;
use crate::services::visit_ledger::{self, VisitEvent};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct DriverController {
    repository: DriverRepository,
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DriverRepository::new(pool),
        }
    }

    /// Registrar una visita: crea la línea del ledger o aplica la regla de
    /// transición sobre la existente
    pub async fn record_visit(
        &self,
        request: RecordVisitRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        // Validar formatos antes de que el evento llegue al ledger
        request.validate()?;

        let event = VisitEvent {
            name: request.name,
            mobile: request.mobile,
            dl_no: request.dl_no,
            vehicle_number: request.vehicle_number,
            vehicle_type: request.vehicle_type,
            last_visited_dhaba: request.last_visited_dhaba,
        };

        let existing = self
            .repository
            .find_by_dl_and_dhaba(&event.dl_no, &event.last_visited_dhaba)
            .await?;

        match existing {
            Some(current) => {
                let update = visit_ledger::next_visit(&current, &event);
                let driver = self.repository.apply_visit(current.id, &update).await?;

                log::info!(
                    "🔄 Visita registrada: {} en '{}' (visits: {}, total: {})",
                    driver.dl_no,
                    driver.last_visited_dhaba,
                    driver.visits,
                    driver.total_visits
                );

                Ok(ApiResponse::success_with_message(
                    driver.into(),
                    "Conductor actualizado exitosamente".to_string(),
                ))
            }
            None => {
                let driver = visit_ledger::first_visit(&event, Utc::now());
                let saved = self.repository.insert(&driver).await?;

                log::info!(
                    "🆕 Nueva línea del ledger: {} en '{}'",
                    saved.dl_no,
                    saved.last_visited_dhaba
                );

                Ok(ApiResponse::success_with_message(
                    saved.into(),
                    "Conductor agregado exitosamente".to_string(),
                ))
            }
        }
    }

    pub async fn list_all(&self) -> Result<Vec<DriverResponse>, AppError> {
        let drivers = self.repository.list_all().await?;

        Ok(drivers.into_iter().map(DriverResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<DriverResponse, AppError> {
        let driver = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        Ok(driver.into())
    }

    /// Corrección manual de los campos editables, sin pasar por la regla de
    /// visitas
    pub async fn replace_fields(
        &self,
        id: Uuid,
        request: UpdateDriverRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        request.validate()?;

        let updated = self
            .repository
            .replace_fields(
                id,
                &request.name,
                &request.dl_no,
                &request.vehicle_number,
                &request.vehicle_type,
            )
            .await?;

        if !updated {
            return Err(AppError::NotFound("Conductor no encontrado".to_string()));
        }

        let driver = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        Ok(ApiResponse::success_with_message(
            driver.into(),
            "Conductor actualizado exitosamente".to_string(),
        ))
    }

    /// Confirmar el pago de la comisión de una línea del ledger
    ///
    /// Incondicional: la UI solo expone la acción cuando la línea es
    /// elegible, el backend no re-verifica.
    pub async fn acknowledge_commission(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        let updated = self.repository.mark_commission_received(id).await?;

        if !updated {
            return Err(AppError::NotFound("Conductor no encontrado".to_string()));
        }

        let driver = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        Ok(ApiResponse::success_with_message(
            driver.into(),
            "Estado de comisión actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(AppError::NotFound("Conductor no encontrado".to_string()));
        }

        Ok(())
    }
}
