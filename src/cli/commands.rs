use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "slotgrid", about = concat!("slotgrid v", env!("CARGO_PKG_VERSION"), " - paint your week, get a timetable"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this config file instead of searching for slotgrid.toml
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter slotgrid.toml in the current directory
    Init(InitArgs),
    /// Render a recommendation payload as text grids
    Preview(PreviewArgs),
    /// Print the request body built from the saved preferences
    Encode(EncodeArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Use half-hour slots instead of hourly ones
    #[arg(long)]
    pub half_hourly: bool,
    /// Course to start with (repeatable)
    #[arg(long = "course")]
    pub courses: Vec<String>,
    /// Overwrite an existing slotgrid.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct PreviewArgs {
    /// JSON file holding a server response
    pub file: PathBuf,
    /// Print option summaries as JSON instead of grids
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct EncodeArgs {
    /// Print only the sparse preference map
    #[arg(long)]
    pub preferences_only: bool,
}
