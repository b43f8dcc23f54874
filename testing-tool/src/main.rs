use anyhow::{anyhow, Result};
use colored::*;
use serde_json::json;
use std::io::{self, Write};

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🍛 Dhaba Commission Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url =
        std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let client = reqwest::Client::new();

    // Paso 1: Pedir credenciales de operador
    let (username, password) = get_credentials()?;

    // Paso 2: Autenticarse y obtener token
    let token = authenticate(&client, &base_url, &username, &password).await?;

    // Paso 3: Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🚛 Registrar visita");
        println!("2. 🔍 Listar conductores");
        println!("3. 💰 Confirmar pago de comisión");
        println!("4. 🚪 Salir");
        print!("{}", "Selecciona una opción (1-4): ".bright_yellow());
        io::stdout().flush()?;

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;
        let choice = choice.trim();

        match choice {
            "1" => {
                record_visit(&client, &base_url, &token).await?;
            }
            "2" => {
                list_drivers(&client, &base_url, &token).await?;
            }
            "3" => {
                acknowledge_commission(&client, &base_url, &token).await?;
            }
            "4" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
            }
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

fn get_credentials() -> Result<(String, String)> {
    println!("{}", "🔐 CREDENCIALES DE OPERADOR".bright_cyan().bold());
    println!("{}", "============================".bright_cyan());

    let username = prompt("Username: ")?;
    let password = prompt("Password: ")?;

    Ok((username, password))
}

async fn authenticate(
    client: &reqwest::Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<String> {
    println!();
    println!("{}", "🔐 AUTENTICANDO...".bright_cyan().bold());

    let response = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({
            "username": username,
            "password": password,
        }))
        .send()
        .await?;

    let status = response.status();
    let body: serde_json::Value = response.json().await?;

    if !status.is_success() {
        println!("{}", "❌ Login fallido:".bright_red());
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Err(anyhow!("credenciales inválidas"));
    }

    let token = body["token"]
        .as_str()
        .ok_or_else(|| anyhow!("respuesta de login sin token"))?
        .to_string();

    println!("{}", "✅ Sesión iniciada".bright_green());
    Ok(token)
}

async fn record_visit(client: &reqwest::Client, base_url: &str, token: &str) -> Result<()> {
    println!();
    println!("{}", "🚛 REGISTRAR VISITA".bright_cyan().bold());
    println!("{}", "====================".bright_cyan());

    let name = prompt("Nombre: ")?;
    let mobile = prompt("Móvil (10 dígitos): ")?;
    let dl_no = prompt("DL No (XX0000000000000): ")?;
    let vehicle_number = prompt("Matrícula (XX00XX0000): ")?;
    let vehicle_type = prompt("Tipo de vehículo (SUV/Sedan/Hatchback/Bus/Truck/Van/Pickup): ")?;
    let dhaba = prompt("Dhaba: ")?;

    let response = client
        .post(format!("{}/api/drivers", base_url))
        .bearer_auth(token)
        .json(&json!({
            "name": name,
            "mobile": mobile,
            "dl_no": dl_no,
            "vehicle_number": vehicle_number,
            "vehicle_type": vehicle_type,
            "last_visited_dhaba": dhaba,
        }))
        .send()
        .await?;

    print_response(response).await
}

async fn list_drivers(client: &reqwest::Client, base_url: &str, token: &str) -> Result<()> {
    println!();
    println!("{}", "🔍 CONDUCTORES".bright_cyan().bold());

    let response = client
        .get(format!("{}/api/drivers", base_url))
        .bearer_auth(token)
        .send()
        .await?;

    let status = response.status();
    let body: serde_json::Value = response.json().await?;

    if !status.is_success() {
        println!("{} {}", "❌ Error:".bright_red(), status);
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let empty = vec![];
    let drivers = body.as_array().unwrap_or(&empty);
    println!("Total: {}", drivers.len().to_string().bright_green());
    for driver in drivers {
        println!(
            "  {} | {} | {} | visitas: {} (total {}) | elegible: {} | pagada: {}",
            driver["id"].as_str().unwrap_or("-"),
            driver["dl_no"].as_str().unwrap_or("-"),
            driver["last_visited_dhaba"].as_str().unwrap_or("-"),
            driver["visits"],
            driver["total_visits"],
            driver["eligible_for_commission"],
            driver["commission_received"],
        );
    }

    Ok(())
}

async fn acknowledge_commission(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
) -> Result<()> {
    println!();
    println!("{}", "💰 CONFIRMAR PAGO DE COMISIÓN".bright_cyan().bold());

    let id = prompt("Id del conductor (UUID): ")?;

    let response = client
        .patch(format!("{}/api/drivers/{}/commission", base_url, id))
        .bearer_auth(token)
        .send()
        .await?;

    print_response(response).await
}

async fn print_response(response: reqwest::Response) -> Result<()> {
    let status = response.status();
    let body: serde_json::Value = response.json().await?;

    if status.is_success() {
        println!("{} {}", "✅ Respuesta:".bright_green(), status);
    } else {
        println!("{} {}", "❌ Error:".bright_red(), status);
    }
    println!("{}", serde_json::to_string_pretty(&body)?);

    Ok(())
}
