use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;

use fleet_dashboard::config::EnvironmentConfig;
use fleet_dashboard::create_app;
use fleet_dashboard::repositories::{seed::seed_vehicles, InMemoryVehicleStore};
use fleet_dashboard::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚚 Fleet Dashboard - Monitorización de flota");
    info!("============================================");

    // Inicializar el store con los datos semilla
    let store = InMemoryVehicleStore::new(seed_vehicles()?, config.latency)
        .map_err(|e| anyhow::anyhow!("Error inicializando el store: {}", e))?;
    let latency = store.latency();
    info!(
        "⏱️ Latencia simulada: list={:?} get={:?} update={:?}",
        latency.list, latency.get, latency.update
    );

    let app_state = AppState::new(config.clone(), Arc::new(store));

    // Carga inicial del dashboard (equivale al montaje de la vista)
    let initial_load = app_state.clone();
    tokio::spawn(async move {
        initial_load.load_dashboard().await;
    });

    let app = create_app(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Endpoint de prueba");
    info!("🚗 Endpoints - Store de vehículos:");
    info!("   GET   /api/vehicle - Listar vehículos");
    info!("   GET   /api/vehicle/:id - Obtener vehículo");
    info!("   PATCH /api/vehicle/:id - Actualización parcial");
    info!("📊 Endpoints - Dashboard:");
    info!("   GET  /api/dashboard - Vista actual");
    info!("   POST /api/dashboard/reload - Recargar desde el store");
    info!("   PUT  /api/dashboard/search | /status-filter - Filtros");
    info!("   POST /api/dashboard/sort | /page/next | /page/previous");
    info!("   POST /api/dashboard/select/:id | /close - Panel de detalle");
    info!("   POST /api/dashboard/detail/edit | /detail/cancel | /detail/save");
    info!("   PUT  /api/dashboard/detail/draft - Valores en edición");
    info!("   POST /api/dashboard/add-form/open | /add-form/close | /vehicles - Alta");
    info!("   GET  /api/dashboard/export.csv - Exportar CSV");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

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
            Ok(mut stream) => {
                stream.recv().await;
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
