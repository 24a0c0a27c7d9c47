use anyhow::Result;
use clap::Parser;
use jstutor_core::{ChatController, Config, GenerateClient};

mod app;
mod handler;
mod tui;
mod ui;

use app::App;

#[derive(Parser, Debug)]
#[command(name = "jstutor")]
#[command(about = "Terminal chat for AI-generated JavaScript examples")]
struct Args {
    /// Base URL of the tutor service
    #[arg(long, env = "JSTUTOR_SERVER_URL")]
    server_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().unwrap_or_else(|_| Config::new());
    let server_url = args
        .server_url
        .or(config.server_url)
        .unwrap_or_else(|| "http://localhost:8000".to_string());

    let controller = ChatController::new(GenerateClient::new(&server_url));
    let mut app = App::new(controller);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app).await;
    tui::restore()?;

    result
}

async fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    let mut events = tui::EventHandler::new();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        if let Some(event) = events.next().await {
            handler::handle_event(app, event).await?;
        }
    }

    Ok(())
}
