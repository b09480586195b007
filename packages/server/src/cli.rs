use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Command-line overrides. Anything left unset falls back to the config file,
/// `INVENTORY__*` environment variables, then built-in defaults.
#[derive(Debug, Default, Parser)]
#[command(
    name = "inventory-server",
    version,
    about = "Inventory registry with photo uploads over HTTP",
    disable_help_flag = true
)]
pub struct Cli {
    /// Host to bind and advertise in photo links
    #[arg(short = 'h', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory photos are stored in
    #[arg(short, long)]
    pub cache: Option<PathBuf>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}
