use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use requestflow_backend::{
    config::{Config, StoreBackend},
    db::connection::create_pool,
    repositories::{
        EmployeeDirectory, InMemoryEmployeeDirectory, InMemoryRequestStore, PgEmployeeDirectory,
        PgRequestStore, RequestStore,
    },
    routes,
    services::RequestLifecycle,
    state::AppState,
};

fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<empty>".into();
    }
    let prefix = s.chars().take(4).collect::<String>();
    format!("{}*** (len={})", prefix, s.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "requestflow_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        database_url = %config.database_url,
        jwt_secret = %mask_secret(&config.jwt_secret),
        bind_addr = %config.bind_addr,
        store_backend = %config.store_backend,
        "Loaded configuration from environment/.env"
    );

    let (store, directory): (Arc<dyn RequestStore>, Arc<dyn EmployeeDirectory>) =
        match config.store_backend {
            StoreBackend::Postgres => {
                let pool = create_pool(&config.database_url).await?;
                (
                    Arc::new(PgRequestStore::new(pool.clone())),
                    Arc::new(PgEmployeeDirectory::new(pool)),
                )
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory request store; data is lost on restart");
                (
                    Arc::new(InMemoryRequestStore::new()),
                    Arc::new(InMemoryEmployeeDirectory::demo()),
                )
            }
        };

    let lifecycle = RequestLifecycle::new(store, directory.clone());
    let bind_addr = config.bind_addr.clone();
    let app = routes::router(AppState::new(lifecycle, directory, config));

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
