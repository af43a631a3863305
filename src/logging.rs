use color_eyre::Result;
use color_eyre::eyre::OptionExt;
use std::path::{Path, PathBuf};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default log file location: `<data_local_dir>/mdxedit/mdxedit.log`.
pub fn default_log_path() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir().ok_or_eyre("No data directory available for the log file")?;
    Ok(data_dir.join("mdxedit").join("mdxedit.log"))
}

/// Initialize logging to a file using tracing.
///
/// The terminal is owned by the UI, so nothing is written to stdout.
/// Uses RUST_LOG environment variable for filtering, or defaults to INFO level.
/// Examples:
///   RUST_LOG=mdxedit::history_store=debug  - Only debug the history store
pub fn init(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }
    let log_file = std::fs::File::create(path)?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .try_from_env()
        .or_else(|_| EnvFilter::try_new("info"))?;

    let file_subscriber = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
