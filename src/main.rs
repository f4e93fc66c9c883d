use axum::extract::DefaultBodyLimit;
use hiring_backend::{
    config::{get_config, init_config, LogFormat},
    database::{
        pool::{create_pool, run_migrations},
        seed::seed_demo_jobs,
        InMemoryStore, PgStore,
    },
    middleware::{auth::AuthSettings, cors::cors_layer},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();
    init_tracing(config.log_format);

    let auth = AuthSettings::new(config.jwt_secret.as_str(), config.dev_bypass_auth);
    if auth.bypass {
        warn!("DEV_BYPASS_AUTH is on: every request is treated as an admin");
    }

    let app_state = match config.database_url.as_deref() {
        Some(url) => {
            let pool = create_pool(config, url).await?;
            run_migrations(&pool).await?;
            info!("Connected to Postgres, migrations applied");
            AppState::postgres(PgStore::new(pool), auth)
        }
        None => {
            warn!("DATABASE_URL is not set, running on the in-memory store");
            let store = InMemoryStore::new();
            seed_demo_jobs(&store).await?;
            AppState::in_memory(store, auth)
        }
    };

    let app = routes::router(app_state, config.public_rps, config.app_rps)
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
