use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::repositories::operator_repository::OperatorRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};
use bcrypt::verify;
use sqlx::PgPool;

pub struct AuthController {
    repository: OperatorRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            repository: OperatorRepository::new(pool),
            jwt_config,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        // Buscar operador por username
        let operator = self
            .repository
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        // Verificar contraseña
        let valid = verify(&request.password, &operator.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        // Generar JWT token
        let token = generate_token(operator.id, &operator.username, &self.jwt_config)?;

        Ok(LoginResponse::success(
            token,
            operator.id.to_string(),
            operator.username,
        ))
    }
}
