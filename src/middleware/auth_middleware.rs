//! Middleware de autenticación JWT
//!
//! Este módulo valida la sesión del operador: extracción del token Bearer,
//! verificación de firma/expiración y chequeo de que el operador sigue
//! existiendo en la base de datos.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::repositories::operator_repository::OperatorRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};

/// Operador autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedOperator {
    pub operator_id: Uuid,
    pub username: String,
}

/// Middleware de autenticación: las rutas del ledger solo son alcanzables
/// con una sesión de operador válida
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;

    let jwt_config = JwtConfig::from(&state.config);
    let claims = verify_token(token, &jwt_config)?;

    let operator_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

    // Verificar que el operador existe en la base de datos
    let repository = OperatorRepository::new(state.pool.clone());
    let operator = repository
        .find_by_id(operator_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Operador no encontrado".to_string()))?;

    request.extensions_mut().insert(AuthenticatedOperator {
        operator_id: operator.id,
        username: operator.username,
    });

    Ok(next.run(request).await)
}
