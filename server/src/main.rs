mod config;
mod routes;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the process environment still applies.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match config::ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    if config.firebase.google_client_id.is_none() {
        tracing::warn!("GOOGLE_OAUTH_CLIENT_ID not set; Google sign-in disabled");
    }

    let app = match routes::app(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "router init failed");
            std::process::exit(1);
        }
    };

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, project = %config.firebase.project_id, "flow360 listening");
    axum::serve(listener, app).await.expect("server failed");
}
