use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crop_advisor::config::Config;
use crop_advisor::routes;
use crop_advisor::state::AppState;

fn load_config() -> Result<Config> {
    // Get the executable directory to resolve relative paths correctly
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    let candidates: Vec<String> = vec![
        Some("conf.yaml".to_string()),
        Some("conf.json".to_string()),
        exe_dir.join("conf.yaml").to_str().map(|s| s.to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    Config::locate(std::env::var("CONFIG_PATH").ok().as_deref(), &candidates)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crop_advisor=debug,tower_http=debug")),
        )
        .init();

    let config = load_config()?;

    // Live mode is resolved here, once, before any query is served
    let app_state = AppState::new(config.clone()).await?;
    info!(
        "Agent gateway ready (live mode: {})",
        app_state.gateway.is_live_mode()
    );

    let app = routes::app(app_state);

    let host = config.system_config.host.as_str();
    let port = config.system_config.port;
    info!("Starting server on {}:{}", host, port);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
