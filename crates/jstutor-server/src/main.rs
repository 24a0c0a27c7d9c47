mod api;
mod prompt;
mod service;

use anyhow::{anyhow, Result};
use clap::Parser;
use dotenv::dotenv;
use jstutor_core::{AnthropicClient, Config};
use log::info;

use service::{TutorService, DEFAULT_MODEL};

#[derive(Parser, Debug)]
#[command(name = "jstutor-server")]
#[command(about = "HTTP service generating JavaScript tutoring snippets")]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, env = "JSTUTOR_BIND", default_value = "0.0.0.0:8000")]
    bind: String,

    /// Anthropic model used for completions
    #[arg(long, env = "JSTUTOR_MODEL")]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = Config::load().unwrap_or_else(|_| Config::new());

    // Env var wins over the config file.
    let api_key = std::env::var("ANTHROPIC_API_KEY")
        .ok()
        .or(config.anthropic_api_key)
        .ok_or_else(|| anyhow!("ANTHROPIC_API_KEY not found in environment or config"))?;

    let model = args
        .model
        .or(config.model)
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    info!("--- Tutor Service Configuration ---");
    info!("Bind Address: {}", args.bind);
    info!("Model: {}", model);
    info!("-----------------------------------");

    let service = TutorService::new(AnthropicClient::new(&api_key), model);
    let app = api::router(service);

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!("Starting HTTP API server on: http://{}", args.bind);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
