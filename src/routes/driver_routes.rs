use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, patch, post, put},
    Extension, Json, Router,
};
use tracing::info;
use uuid::Uuid;

use crate::controllers::driver_controller::DriverController;
use crate::dto::driver_dto::{ApiResponse, DriverResponse, RecordVisitRequest, UpdateDriverRequest};
use crate::middleware::auth_middleware::{auth_middleware, AuthenticatedOperator};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Router de drivers: todas las rutas requieren sesión de operador
pub fn create_driver_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(record_visit))
        .route("/", get(list_drivers))
        .route("/:id", get(get_driver))
        .route("/:id", put(update_driver))
        .route("/:id", delete(delete_driver))
        .route("/:id/commission", patch(acknowledge_commission))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn record_visit(
    State(state): State<AppState>,
    Extension(operator): Extension<AuthenticatedOperator>,
    Json(request): Json<RecordVisitRequest>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    info!("Visita registrada por el operador '{}'", operator.username);
    let controller = DriverController::new(state.pool.clone());
    let response = controller.record_visit(request).await?;
    Ok(Json(response))
}

async fn list_drivers(
    State(state): State<AppState>,
) -> Result<Json<Vec<DriverResponse>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.list_all().await?;
    Ok(Json(response))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DriverResponse>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDriverRequest>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.replace_fields(id, request).await?;
    Ok(Json(response))
}

async fn acknowledge_commission(
    State(state): State<AppState>,
    Extension(operator): Extension<AuthenticatedOperator>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    info!(
        "Pago de comisión confirmado por el operador '{}'",
        operator.username
    );
    let controller = DriverController::new(state.pool.clone());
    let response = controller.acknowledge_commission(id).await?;
    Ok(Json(response))
}

async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Conductor eliminado exitosamente"
    })))
}
