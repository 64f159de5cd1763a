//! Gateway server: reads config from the environment, opens the pool, serves the schedule routes.

use schedule_gateway::{app, connect, load_from_env, AppState, PgScheduleStore};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("schedule_gateway=info,tower_http=info")),
        )
        .init();

    let pool = connect(&config).await?;
    let state = AppState::new(PgScheduleStore::new(pool));
    let router = app(state, &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
