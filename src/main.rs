use clap::Parser;
use slotgrid::cli::commands::Cli;
use slotgrid::cli::handlers;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // File logging only; stderr belongs to the terminal UI
    let log_dir = std::env::var("SLOTGRID_LOG_DIR")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir());
    let file_appender = tracing_appender::rolling::never(&log_dir, "slotgrid.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "slotgrid=info".into()))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    let cli = Cli::parse();
    if let Err(e) = handlers::dispatch(cli) {
        tracing::error!(error = %e, "exiting");
        eprintln!("error: {}", e);
        drop(guard);
        std::process::exit(1);
    }
}
