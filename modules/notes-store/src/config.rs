//! Command-line configuration.
//!
//! `-h` is taken by `--host`, so help is only reachable as `--help`.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "notes-store", version, about = "Serve text notes stored as files")]
#[command(disable_help_flag = true)]
pub struct Args {
    /// Address of the server
    #[arg(short = 'h', long, env = "NOTES_HOST")]
    pub host: String,

    /// Port of the server
    #[arg(short, long, env = "NOTES_PORT")]
    pub port: u16,

    /// Path of the directory holding the note files
    #[arg(short, long, env = "NOTES_CACHE_DIR")]
    pub cache: PathBuf,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

/// Immutable service configuration, resolved once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cache_dir: PathBuf,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            cache_dir: args.cache,
        }
    }
}
