use std::sync::Arc;

use macrotrack::api::HttpTrackerApi;
use macrotrack::app::App;
use macrotrack::config::Config;
use macrotrack::platform::console::Console;
use macrotrack::platform::picker::TerminalPicker;
use macrotrack::terminal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout is the screen.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "macrotrack=warn".into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        base_url = %config.base_url,
        upload_timeout = ?config.upload_timeout,
        camera = config.camera_command.is_some(),
        "Starting macrotrack"
    );

    let console = Arc::new(Console::stdin());
    let api = Arc::new(HttpTrackerApi::new(&config)?);
    let picker = Arc::new(TerminalPicker::new(
        Arc::clone(&console),
        config.camera_command.clone(),
    ));

    let mut app = App::new(api, picker);
    terminal::run(&mut app, &console).await
}
