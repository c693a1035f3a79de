mod app;
mod cli;
mod event;
mod logging;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use station_sunburst::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = AppConfig::from_env();
    logging::init(&config)?;
    tracing::info!(stations = %config.stations_path.display(), "starting");

    // Check if we're running in a terminal
    if args.headless || args.category.is_some() || !is_terminal() {
        let query = event::HeadlessQuery {
            category: args.category,
            group: args.group,
            json: args.json,
        };
        return event::run_headless(&config, &query).await;
    }

    // Initialize application state; the dataset arrives in the background
    let mut app = App::new(&config);
    app.start_loading(config.stations_path.clone());

    // Setup terminal
    let mut terminal = terminal::setup_terminal()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::cleanup_terminal_state(true, true);

    if let Err(e) = &result {
        tracing::error!("exited with error: {e}");
    }
    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
