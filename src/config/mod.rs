//! Configuration module: immutable const blueprints, no runtime parsing.

mod analysis;
mod exchanges;

pub use analysis::{ANALYSIS, AnalysisConfig, REFRESH, RefreshConfig, StrengthThresholds};
pub use exchanges::{
    BINANCE, BINANCE_EXCHANGE_INFO_URL, BinanceConfig, DEFAULT_MAX_PAIRS, OKX, OkxConfig,
    QUOTE_ASSETS,
};
