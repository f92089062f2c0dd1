use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use forge_ledger::{
    build_router,
    config::{DatabaseConfig, EnvironmentConfig},
    database::DatabaseConnection,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("⛽ Forge Ledger - Libro de repostajes");
    info!("================================================");

    let config = EnvironmentConfig::from_env().map_err(anyhow::Error::msg)?;
    let db_config = DatabaseConfig::from_env().map_err(anyhow::Error::msg)?;

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::connect(&db_config).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    db_connection
        .run_migrations()
        .await
        .context("Error aplicando migraciones")?;

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    info!("🌍 Entorno: {}", config.environment);
    if config.allow_registration {
        info!("👤 Registro de usuarios habilitado");
    }

    let app_state = AppState::new(db_connection.into_pool(), config);
    let app = build_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health");
    info!("🔐 Auth: POST /api/auth/register, POST /api/auth/login, GET /api/auth/me");
    info!("🚗 Vehículos: /api/vehicles[/:id][/:id/summary][/:id/refuelings]");
    info!("⛽ Repostajes: /api/refuelings[/:id]");
    info!("🏪 Gasolineras: /api/gas-stations[/:id]");
    info!("💰 Precios: /api/fuel-prices[/:id]");
    info!("📊 Estadísticas: /api/fuel-statistics, POST /api/fuel-statistics/rebuild");
    info!("💡 Servicios: /api/utility-companies[/:id], /api/utility-payments[/summary][/:id]");
    info!("🔁 Regulares: /api/recurring-payments[/:id], POST /api/recurring-payments/generate");
    info!("📋 Plantillas: /api/payment-templates[/:id], POST /api/payment-templates/:id/apply");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
