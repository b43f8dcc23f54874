use crate::models::operator::Operator;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct OperatorRepository {
    pool: PgPool,
}

impl OperatorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Operator>, AppError> {
        let operator =
            sqlx::query_as::<_, Operator>("SELECT * FROM operators WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;

        Ok(operator)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Operator>, AppError> {
        let operator = sqlx::query_as::<_, Operator>("SELECT * FROM operators WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(operator)
    }
}
