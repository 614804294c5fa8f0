use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use premiere_server::config::Config;
use premiere_server::routes::create_routes;
use premiere_server::build_state;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("premiere_server=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let state = build_state(&config);
    let app = create_routes(state, &config.cors_allowed_origins);

    tracing::info!("🚀 Server running at http://{}", config.listen_addr);

    let listener = TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
