/// Normalised 24h ticker snapshot. Same discipline as [`super::Candle`]:
/// built once by a source, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticker {
    pub last_price: f64,
    pub price_change_pct: f64,
}

impl Ticker {
    /// Trend direction as the tracker defines it: positive 24h change.
    pub fn is_up_trend(&self) -> bool {
        self.price_change_pct > 0.0
    }
}
