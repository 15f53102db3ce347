use {
    crate::{
        config::OKX,
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

/// OKX v5 envelope: every market endpoint wraps its rows in `data`, and the
/// rows themselves are arrays of strings.
#[derive(Debug, Deserialize)]
struct OkxEnvelope {
    #[serde(default)]
    code: String,
    #[serde(default)]
    data: Vec<Vec<String>>,
}

fn row_field<'a>(row: &'a [String], idx: usize, name: &str) -> Result<&'a str, SourceError> {
    row.get(idx)
        .map(String::as_str)
        .ok_or_else(|| SourceError::Malformed(format!("{}: missing field {}", name, idx)))
}

/// Ticker row: `[instId, last, open24h, ...]` (distilled shape). OKX has no
/// change-percent field, so it is derived from last vs 24h open.
fn ticker_from_row(row: &[String]) -> Result<Ticker, SourceError> {
    let last = parse_price("ticker.last", row_field(row, 1, "ticker")?)?;
    let open_24h = parse_price("ticker.open24h", row_field(row, 2, "ticker")?)?;
    if open_24h == 0.0 {
        return Err(SourceError::Malformed("ticker.open24h is zero".into()));
    }
    Ok(Ticker {
        last_price: last,
        price_change_pct: (last - open_24h) / open_24h * 100.0,
    })
}

/// Candle row: `[ts, open, high, low, close, vol, ...]`, timestamp as a
/// decimal string, rows in DESCENDING time order on the wire.
fn candle_from_row(row: &[String]) -> Result<Candle, SourceError> {
    let ts = row_field(row, 0, "candle")?
        .parse::<i64>()
        .map_err(|_| SourceError::Malformed("candle.ts: not an integer".into()))?;
    Ok(Candle::new(
        ts,
        parse_price("candle.high", row_field(row, 2, "candle")?)?,
        parse_price("candle.low", row_field(row, 3, "candle")?)?,
        parse_price("candle.close", row_field(row, 4, "candle")?)?,
    ))
}

/// Secondary exchange source (OKX v5 REST).
pub struct OkxSource {
    client: reqwest::Client,
    limiter: GlobalRateLimiter,
    window_limit: u32,
}

impl OkxSource {
    pub fn new(limiter: GlobalRateLimiter, window_limit: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            limiter,
            window_limit,
        }
    }

    async fn fetch_envelope(&self, url: &str) -> Result<OkxEnvelope, SourceError> {
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_millis(OKX.client.timeout_ms))
            .send()
            .await
            .map_err(SourceError::from)?;

        if !response.status().is_success() {
            return Err(SourceError::Http {
                status: response.status().as_u16(),
            });
        }

        let envelope: OkxEnvelope = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        // "0" is OKX's success code; anything else is an API-level refusal.
        if !envelope.code.is_empty() && envelope.code != "0" {
            return Err(SourceError::Malformed(format!(
                "okx api code {}",
                envelope.code
            )));
        }
        if envelope.data.is_empty() {
            return Err(SourceError::Malformed("empty data array".into()));
        }
        Ok(envelope)
    }

    async fn fetch_ticker(&self, inst_id: &str) -> Result<Ticker, SourceError> {
        let url = format!("{}?instId={}", OKX.ticker_url, inst_id);
        let envelope = self.fetch_envelope(&url).await?;
        ticker_from_row(&envelope.data[0])
    }

    async fn fetch_window(&self, inst_id: &str) -> Result<PriceWindow, SourceError> {
        let url = format!(
            "{}?instId={}&bar={}&limit={}",
            OKX.candles_url, inst_id, OKX.candle_bar, self.window_limit
        );
        let envelope = self.fetch_envelope(&url).await?;
        let candles = envelope
            .data
            .iter()
            .map(|row| candle_from_row(row))
            .collect::<Result<Vec<_>, _>>()?;

        // from_unordered checks the actual timestamps, so a convention change
        // on the wire degrades to a no-op instead of corrupting the window.
        Ok(PriceWindow::from_unordered(candles))
    }
}

#[async_trait]
impl MarketDataSource for OkxSource {
    fn name(&self) -> &'static str {
        "okx"
    }

    async fn fetch(&self, symbol: &SymbolPair) -> Result<MarketData, SourceError> {
        let inst_id = symbol.okx_inst_id();
        let cost = OKX.limits.ticker_call_weight + OKX.limits.kline_call_weight;
        self.limiter.acquire(cost, &inst_id).await;

        let (ticker, window) =
            tokio::try_join!(self.fetch_ticker(&inst_id), self.fetch_window(&inst_id))?;
        Ok(MarketData { ticker, window })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ticker_derives_change_percent_from_open() {
        let ticker = ticker_from_row(&row(&["BTC-USDT", "105.0", "100.0"])).unwrap();
        assert_eq!(ticker.last_price, 105.0);
        assert!((ticker.price_change_pct - 5.0).abs() < 1e-12);
        assert!(ticker.is_up_trend());
    }

    #[test]
    fn ticker_with_zero_open_is_malformed_not_infinite() {
        assert!(matches!(
            ticker_from_row(&row(&["BTC-USDT", "105.0", "0"])),
            Err(SourceError::Malformed(_))
        ));
    }

    #[test]
    fn descending_candle_rows_become_ascending_window() {
        let rows = vec![
            row(&["3000", "10", "12", "9", "11", "100"]),
            row(&["2000", "9", "11", "8", "10", "100"]),
            row(&["1000", "8", "10", "7", "9", "100"]),
        ];
        let candles: Vec<Candle> = rows.iter().map(|r| candle_from_row(r).unwrap()).collect();
        let window = PriceWindow::from_unordered(candles);
        assert_eq!(window.candles()[0].open_time_ms, 1000);
        assert_eq!(window.latest().unwrap().open_time_ms, 3000);
    }

    #[test]
    fn short_row_is_malformed() {
        assert!(matches!(
            candle_from_row(&row(&["1000", "8"])),
            Err(SourceError::Malformed(_))
        ));
    }

    #[test]
    fn envelope_deserialises() {
        let raw = r#"{"code":"0","msg":"","data":[["1000","8","10","7","9","100","900"]]}"#;
        let envelope: OkxEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.code, "0");
        assert_eq!(envelope.data.len(), 1);
    }
}
