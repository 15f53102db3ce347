#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod utils;

// Re-export commonly used types outside of crate
pub use data::{BinanceSource, FailoverProvider, GlobalRateLimiter, OkxSource};
pub use domain::SymbolPair;
pub use engine::{BatchError, RefreshCoordinator, RefreshCycle};
pub use models::{AnalysisResult, Strength};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pairs to track, canonical Binance form (e.g. BTCUSDT,ETHUSDT)
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "BTCUSDT,ETHUSDT,BNBUSDT,SOLUSDT,XRPUSDT,ADAUSDT,DOGEUSDT,AVAXUSDT"
    )]
    pub symbols: Vec<String>,

    /// Discover live USDT pairs from both exchanges instead of --symbols
    #[arg(long, default_value_t = false)]
    pub discover: bool,

    /// Cap on the number of pairs per cycle
    #[arg(long, default_value_t = config::DEFAULT_MAX_PAIRS)]
    pub max_pairs: usize,

    /// Run a single refresh cycle and exit
    #[arg(long, default_value_t = false)]
    pub once: bool,

    /// Only show pairs at least this close to a key level
    #[arg(long, value_enum)]
    pub min_strength: Option<Strength>,

    /// After a cycle with zero usable results, show clearly-labeled
    /// synthetic data instead of an error state
    #[arg(long, default_value_t = false)]
    pub demo_on_empty: bool,
}
