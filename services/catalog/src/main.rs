use sea_orm::Database;
use tracing::info;

use reelhouse_catalog::config::CatalogConfig;
use reelhouse_catalog::infra::media::CloudinaryGateway;
use reelhouse_catalog::router::build_router;
use reelhouse_catalog::state::AppState;
use reelhouse_catalog::usecase::token::TokenService;

#[tokio::main]
async fn main() {
    reelhouse_core::tracing::init_tracing("reelhouse_catalog");

    let config = CatalogConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let media = CloudinaryGateway::new(&config.media).expect("failed to build media client");

    let state = AppState {
        db,
        media,
        tokens: TokenService::new(config.jwt_secret, config.token_hash_secret),
        frontend_url: config.frontend_url,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.catalog_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("catalog service listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, draining connections");
}
