use std::net::SocketAddr;
use std::sync::Arc;

use nudge_db::{MemoryNudgeStore, NudgeStore, PgNudgeStore};
use nudge_store::{LocalDiskStore, ObjectStore, S3ObjectStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nudge_api::config::{NudgeStoreKind, ObjectStoreKind, ServerConfig};
use nudge_api::router::build_app_router;
use nudge_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nudge_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Nudge store ---
    // A connection failure here is fatal; the process must not come up
    // without its storage backend.
    let nudges: Arc<dyn NudgeStore> = match config.nudge_store {
        NudgeStoreKind::Postgres => {
            let database_url =
                std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

            let pool = nudge_db::create_pool(&database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            nudge_db::health_check(&pool)
                .await
                .expect("Database health check failed");

            nudge_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgNudgeStore::new(pool))
        }
        NudgeStoreKind::Memory => {
            tracing::warn!("Using the in-memory nudge store; records will not survive restart");
            Arc::new(MemoryNudgeStore::new())
        }
    };

    // --- Object store ---
    let objects: Arc<dyn ObjectStore> = match config.object_store {
        ObjectStoreKind::Local => {
            tracing::info!(dir = %config.upload_dir, "Using local-disk object store");
            Arc::new(LocalDiskStore::new(&config.upload_dir))
        }
        ObjectStoreKind::S3 => {
            let bucket = config
                .s3_bucket
                .clone()
                .expect("S3_BUCKET must be set when OBJECT_STORE=s3");
            let public_base_url = config
                .s3_public_url
                .clone()
                .expect("S3_PUBLIC_URL must be set when OBJECT_STORE=s3");

            tracing::info!(%bucket, "Using S3 object store");
            Arc::new(
                S3ObjectStore::connect(nudge_store::s3::S3Config {
                    bucket,
                    prefix: config.s3_prefix.clone(),
                    public_base_url,
                })
                .await,
            )
        }
    };

    // --- App state & router ---
    let state = AppState { nudges, objects };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
