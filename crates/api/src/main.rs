mod routes;
mod state;

use crate::state::ApiState;
use common_annotations::{settings, temp_dir};
use ocr::{Dispatcher, Engine, EngineConfig, TempSpool};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let filter = EnvFilter::try_new(&settings().logging.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    start_server().await
}

async fn start_server() -> color_eyre::Result<()> {
    let ocr_settings = &settings().ocr;
    let spool = TempSpool::new(temp_dir().to_path_buf(), ocr_settings.temp_prefix.clone());
    let engine = Engine::new(EngineConfig {
        program: ocr_settings.program.clone(),
        args: ocr_settings.args.clone(),
        timeout: Duration::from_secs(ocr_settings.timeout_s),
    });
    let dispatcher = Dispatcher::new(spool, engine, ocr_settings.write_concurrency);
    let state = ApiState {
        dispatcher: Arc::new(dispatcher),
    };

    let app = routes::create_router(state);
    let address = format!("{}:{}", settings().api.host, settings().api.port);
    info!("annotation backend listening on {address}");
    let listener = tokio::net::TcpListener::bind(&address).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
