use {
    crate::{
        config::BINANCE,
        data::{
            rate_limiter::GlobalRateLimiter,
            source::{MarketData, MarketDataSource, SourceError, parse_price},
        },
        domain::{Candle, PriceWindow, SymbolPair, Ticker},
    },
    async_trait::async_trait,
    serde::Deserialize,
    std::time::Duration,
};

/// 24h ticker, the two fields we consume.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceTicker24h {
    last_price: String,
    price_change_percent: String,
}

/// One kline row: `[openTime, open, high, low, close, volume, closeTime,
/// quoteVolume, trades, takerBase, takerQuote, ignore]`. Every position must
/// be declared for serde to accept the row; only time/high/low/close are read.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct BinanceKline(
    i64,    // 0: open time (ms)
    String, // 1: open
    String, // 2: high
    String, // 3: low
    String, // 4: close
    String, // 5: volume
    i64,    // 6: close time (ms)
    String, // 7: quote asset volume
    u64,    // 8: number of trades
    String, // 9: taker buy base volume
    String, // 10: taker buy quote volume
    String, // 11: ignore
);

impl BinanceKline {
    fn into_candle(self) -> Result<Candle, SourceError> {
        Ok(Candle::new(
            self.0,
            parse_price("kline.high", &self.2)?,
            parse_price("kline.low", &self.3)?,
            parse_price("kline.close", &self.4)?,
        ))
    }
}

/// Primary exchange source (Binance spot REST).
pub struct BinanceSource {
    client: reqwest::Client,
    limiter: GlobalRateLimiter,
    window_limit: u32,
}

impl BinanceSource {
    pub fn new(limiter: GlobalRateLimiter, window_limit: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            limiter,
            window_limit,
        }
    }

    async fn fetch_ticker(&self, symbol: &SymbolPair) -> Result<Ticker, SourceError> {
        let url = format!("{}?symbol={}", BINANCE.ticker_url, symbol.bn_name());
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_millis(BINANCE.client.timeout_ms))
            .send()
            .await
            .map_err(SourceError::from)?;

        if !response.status().is_success() {
            return Err(SourceError::Http {
                status: response.status().as_u16(),
            });
        }

        let ticker: BinanceTicker24h = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        Ok(Ticker {
            last_price: parse_price("lastPrice", &ticker.last_price)?,
            price_change_pct: parse_price("priceChangePercent", &ticker.price_change_percent)?,
        })
    }

    async fn fetch_window(&self, symbol: &SymbolPair) -> Result<PriceWindow, SourceError> {
        let url = format!(
            "{}?symbol={}&interval={}&limit={}",
            BINANCE.klines_url,
            symbol.bn_name(),
            BINANCE.kline_interval,
            self.window_limit
        );
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_millis(BINANCE.client.timeout_ms))
            .send()
            .await
            .map_err(SourceError::from)?;

        if !response.status().is_success() {
            return Err(SourceError::Http {
                status: response.status().as_u16(),
            });
        }

        let klines: Vec<BinanceKline> = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        if klines.is_empty() {
            return Err(SourceError::Malformed("empty kline series".into()));
        }

        let candles = klines
            .into_iter()
            .map(BinanceKline::into_candle)
            .collect::<Result<Vec<_>, _>>()?;

        let window = PriceWindow::from_unordered(candles);
        if !window.has_unique_open_times() {
            return Err(SourceError::Malformed("duplicate kline open times".into()));
        }
        Ok(window)
    }
}

#[async_trait]
impl MarketDataSource for BinanceSource {
    fn name(&self) -> &'static str {
        "binance"
    }

    async fn fetch(&self, symbol: &SymbolPair) -> Result<MarketData, SourceError> {
        let cost = BINANCE.limits.ticker_call_weight + BINANCE.limits.kline_call_weight;
        self.limiter.acquire(cost, symbol.bn_name()).await;

        let (ticker, window) =
            tokio::try_join!(self.fetch_ticker(symbol), self.fetch_window(symbol))?;
        Ok(MarketData { ticker, window })
    }
}
