/// REST surface for the primary exchange (Binance spot).
pub struct BinanceConfig {
    pub ticker_url: &'static str,
    pub klines_url: &'static str,
    pub kline_interval: &'static str,
    pub limits: RestLimits,
    pub client: ClientDefaults,
}

/// REST surface for the secondary exchange (OKX v5).
pub struct OkxConfig {
    pub ticker_url: &'static str,
    pub candles_url: &'static str,
    pub candle_bar: &'static str,
    pub instruments_url: &'static str,
    pub limits: RestLimits,
    pub client: ClientDefaults,
}

/// REST constraints: weight budget per minute and per-call costs.
pub struct RestLimits {
    pub weight_limit_minute: u32,
    pub ticker_call_weight: u32,
    pub kline_call_weight: u32,
}

pub struct ClientDefaults {
    pub timeout_ms: u64,
}

pub const BINANCE_EXCHANGE_INFO_URL: &str = "https://api1.binance.com/api/v3/exchangeInfo";

pub const BINANCE: BinanceConfig = BinanceConfig {
    ticker_url: "https://api1.binance.com/api/v3/ticker/24hr",
    klines_url: "https://api1.binance.com/api/v3/klines",
    kline_interval: "1d",
    limits: RestLimits {
        weight_limit_minute: 6000,
        ticker_call_weight: 2,
        kline_call_weight: 2,
    },
    client: ClientDefaults { timeout_ms: 10_000 },
};

pub const OKX: OkxConfig = OkxConfig {
    ticker_url: "https://www.okx.com/api/v5/market/ticker",
    candles_url: "https://www.okx.com/api/v5/market/candles",
    candle_bar: "1D",
    instruments_url: "https://www.okx.com/api/v5/public/instruments?instType=SPOT",
    limits: RestLimits {
        weight_limit_minute: 600,
        ticker_call_weight: 1,
        kline_call_weight: 1,
    },
    client: ClientDefaults { timeout_ms: 10_000 },
};

/// Quote assets we recognise when splitting a pair name like "BTCUSDT".
pub const QUOTE_ASSETS: &[&str] = &["USDT", "USDC", "BUSD", "BTC", "ETH"];

pub const DEFAULT_MAX_PAIRS: usize = 20;
