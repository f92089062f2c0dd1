//! Smoke test contra un servidor Forge Ledger en marcha.
//!
//! Uso: `testing-tool [BASE_URL]` (por defecto `FORGE_URL` o
//! `http://localhost:3000`). Pide credenciales, crea un vehículo con dos
//! repostajes, comprueba odómetros y costes y borra el vehículo.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use colored::*;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct Created<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct Vehicle {
    id: String,
    current_odometer: i64,
}

#[derive(Debug, Deserialize)]
struct Refueling {
    id: String,
    odometer: i64,
    total_cost: Option<String>,
    effective_cost: String,
    month: Option<i32>,
    quarter: Option<i32>,
}

struct Api {
    client: Client,
    base_url: String,
    token: String,
}

impl Api {
    async fn post<T: for<'de> Deserialize<'de>>(&self, path: &str, body: Value) -> Result<T> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        parse(response).await
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
            .send()
            .await?;
        parse(response).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
            .send()
            .await?;
        if !response.status().is_success() {
            bail!("DELETE {} -> {}", path, response.status());
        }
        Ok(())
    }
}

async fn parse<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        bail!("HTTP {}: {}", status, text);
    }
    serde_json::from_str(&text).with_context(|| format!("Unexpected body: {}", text))
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

fn check(label: &str, ok: bool, failures: &mut u32) {
    if ok {
        println!("  {} {}", "✅".green(), label);
    } else {
        println!("  {} {}", "❌".red(), label.bright_red());
        *failures += 1;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "⛽ Forge Ledger Smoke Test".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());

    let base_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("FORGE_URL").ok())
        .unwrap_or_else(|| "http://localhost:3000".to_string())
        .trim_end_matches('/')
        .to_string();
    let client = Client::new();

    let health = client.get(format!("{}/health", base_url)).send().await?;
    if health.status() != StatusCode::OK {
        bail!("Health check failed: {}", health.status());
    }
    println!("{} {}", "🌐 Servidor:".bright_cyan(), base_url);

    let unauthorized = client.get(format!("{}/api/vehicles", base_url)).send().await?;
    let mut failures = 0;
    check(
        "Sin credenciales /api/vehicles responde 401",
        unauthorized.status() == StatusCode::UNAUTHORIZED,
        &mut failures,
    );

    let username = prompt("Username: ")?;
    let password = prompt("Password: ")?;

    let login = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await?;
    let LoginResponse { token } = parse(login).await.context("Login failed")?;
    println!("{}", "🔓 Autenticado".bright_green());

    let api = Api { client, base_url, token };

    let vehicle: Created<Vehicle> = api
        .post(
            "/api/vehicles",
            json!({ "name": "Smoke test", "initial_odometer": 1000 }),
        )
        .await?;
    let vehicle_id = vehicle.data.id;
    println!("{} {}", "🚗 Vehículo creado:".bright_cyan(), vehicle_id);

    let a: Created<Refueling> = api
        .post(
            "/api/refuelings",
            json!({
                "vehicle_id": vehicle_id,
                "date": "2024-05-10",
                "mileage": 200,
                "fuel_quantity": "40",
                "price_per_liter": "50",
                "discount": "200"
            }),
        )
        .await?;
    let b: Created<Refueling> = api
        .post(
            "/api/refuelings",
            json!({
                "vehicle_id": vehicle_id,
                "date": "2024-05-17",
                "mileage": 150,
                "fuel_quantity": "30",
                "price_per_liter": "50"
            }),
        )
        .await?;

    check("Odómetro de A = 1200", a.data.odometer == 1200, &mut failures);
    check("Odómetro de B = 1350", b.data.odometer == 1350, &mut failures);
    check(
        "total_cost derivado = 2000",
        a.data.total_cost.as_deref().map(|v| v.starts_with("2000")).unwrap_or(false),
        &mut failures,
    );
    check(
        "effective_cost = 1800",
        a.data.effective_cost.starts_with("1800"),
        &mut failures,
    );
    check(
        "Mes 5, trimestre 2",
        (a.data.month, a.data.quarter) == (Some(5), Some(2)),
        &mut failures,
    );

    let backdated = api
        .client
        .post(format!("{}/api/refuelings", api.base_url))
        .bearer_auth(&api.token)
        .json(&json!({
            "vehicle_id": vehicle_id,
            "date": "2024-05-01",
            "mileage": 10,
            "fuel_quantity": "5",
            "price_per_liter": "50"
        }))
        .send()
        .await?;
    check(
        "Repostaje con fecha anterior rechazado (400)",
        backdated.status() == StatusCode::BAD_REQUEST,
        &mut failures,
    );

    let refreshed: Vehicle = api.get(&format!("/api/vehicles/{}", vehicle_id)).await?;
    check(
        "current_odometer = 1350",
        refreshed.current_odometer == 1350,
        &mut failures,
    );

    api.delete(&format!("/api/refuelings/{}", a.data.id)).await?;
    let after_delete: Refueling = api.get(&format!("/api/refuelings/{}", b.data.id)).await?;
    check(
        "Tras borrar A, odómetro de B = 1150",
        after_delete.odometer == 1150,
        &mut failures,
    );

    api.delete(&format!("/api/vehicles/{}", vehicle_id)).await?;
    println!("{}", "🧹 Vehículo de prueba eliminado".bright_cyan());

    println!();
    if failures == 0 {
        println!("{}", "🎉 Todas las comprobaciones pasaron".bright_green().bold());
        Ok(())
    } else {
        bail!("{} comprobaciones fallaron", failures)
    }
}
