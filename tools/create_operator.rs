//! Herramienta para crear operadores del panel
//!
//! Uso: create_operator <username> <password>
//!
//! Hashea la contraseña con bcrypt e inserta el operador en la tabla
//! operators. Rechaza usernames duplicados.

use anyhow::Result;
use bcrypt::{hash, DEFAULT_COST};
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let (Some(username), Some(password)) = (args.next(), args.next()) else {
        eprintln!("Uso: create_operator <username> <password>");
        std::process::exit(1);
    };

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set in environment variables"))?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;

    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM operators WHERE username = $1)")
            .bind(&username)
            .fetch_one(&pool)
            .await?;

    if exists.0 {
        println!("El operador '{}' ya existe", username);
        return Ok(());
    }

    let password_hash = hash(&password, DEFAULT_COST)?;

    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO operators (id, username, password_hash, role, created_at)
        VALUES ($1, $2, $3, 'admin', $4)
        "#,
    )
    .bind(id)
    .bind(&username)
    .bind(&password_hash)
    .bind(Utc::now())
    .execute(&pool)
    .await?;

    println!("✅ Operador '{}' creado con id {}", username, id);

    pool.close().await;
    Ok(())
}
