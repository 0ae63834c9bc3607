//! Command-line and environment configuration

use std::path::PathBuf;

use clap::Parser;
use tui_dispatch_debug::DebugCliArgs;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

/// Catalog page size. The catalog cursor is never followed.
pub const PAGE_SIZE: usize = 20;

pub const DEFAULT_TICK_MS: u64 = 90;

/// Searchable creature grid backed by PokeAPI
#[derive(Parser, Debug)]
#[command(name = "pokegrid")]
#[command(about = "Browse and filter PokeAPI creatures in a two-column grid")]
pub struct Args {
    /// Base URL of the REST API
    #[arg(long, env = "POKEGRID_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Directory for the log file (defaults to the platform cache dir)
    #[arg(long, env = "POKEGRID_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Spinner frame interval in milliseconds (minimum 10)
    #[arg(
        long,
        env = "POKEGRID_TICK_MS",
        default_value_t = DEFAULT_TICK_MS,
        value_parser = clap::value_parser!(u64).range(10..)
    )]
    pub tick_ms: u64,

    #[command(flatten)]
    pub debug: DebugCliArgs,
}

impl Args {
    pub fn api_base(&self) -> String {
        normalize_api_base(&self.api_base)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(default_log_dir)
    }
}

pub fn normalize_api_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn default_log_dir() -> PathBuf {
    dirs_next::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("pokegrid")
        .join("logs")
}
