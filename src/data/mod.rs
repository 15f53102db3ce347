mod binance;
mod failover;
mod listing;
mod okx;
mod rate_limiter;
mod source;

pub use {
    binance::BinanceSource,
    failover::{FailoverProvider, FetchFailure},
    listing::discover_usdt_pairs,
    okx::OkxSource,
    rate_limiter::GlobalRateLimiter,
    source::{MarketData, MarketDataSource, SourceError},
};
