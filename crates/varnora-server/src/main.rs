mod config;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use varnora_api::AppStateInner;
use varnora_api::notifier::{LogNotifier, Notifier, ResendNotifier};
use varnora_store::RecordStore;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "varnora_server=debug,varnora_api=debug,varnora_store=debug,tower_http=debug".into()
            }),
        )
        .init();

    let config = Config::from_env()?;

    let notifier: Arc<dyn Notifier> = match &config.mail {
        Some(mail) => {
            info!("Email relay enabled, delivering contact messages to {}", mail.to);
            Arc::new(ResendNotifier::new(
                mail.api_key.clone(),
                mail.from.clone(),
                mail.to.clone(),
            )?)
        }
        None => {
            warn!("RESEND_API_KEY not set, contact messages will only be logged");
            Arc::new(LogNotifier)
        }
    };

    // Shared state
    let state = AppStateInner::new(RecordStore::new(), notifier);

    let mut app: Router = varnora_api::router(state);

    // SPA build output; unknown paths get index.html so client-side routes load.
    if config.static_dir.is_dir() {
        let index = config.static_dir.join("index.html");
        app = app.fallback_service(ServeDir::new(&config.static_dir).fallback(ServeFile::new(index)));
        info!("Serving static site from {}", config.static_dir.display());
    } else {
        warn!(
            "Static directory {} not found, serving API only",
            config.static_dir.display()
        );
    }

    let app = app
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    info!("Varnora server listening on {}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(sig) => sig,
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {}", e);
                    ctrl_c.await.ok();
                    info!("Received Ctrl+C, shutting down...");
                    return;
                }
            };
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
