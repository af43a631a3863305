use clap::Parser;
use mdxedit::{app::App, cli::Cli, config::Config, logging};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    let log_path = match &args.log_file {
        Some(path) => path.clone(),
        None => logging::default_log_path()?,
    };
    logging::init(&log_path)?;

    let config = Config::load(&args.config);
    tracing::info!("Starting mdxedit {}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = config.get_path() {
        tracing::info!("Loaded config from {}", path);
    }

    let app = App::new(args, config).await;
    let terminal = ratatui::init();
    let result = app.run(terminal).await;

    ratatui::restore();
    result
}
