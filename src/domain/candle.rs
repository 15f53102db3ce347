use itertools::Itertools;

/// One normalised OHLC candle. Constructed only by source normalisation,
/// immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub open_time_ms: i64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(open_time_ms: i64, high: f64, low: f64, close: f64) -> Self {
        Candle {
            open_time_ms,
            high,
            low,
            close,
        }
    }
}

/// The swing extremes across a window. Invariant: `high >= low`.
/// `high == low` is the flat-market degenerate case (range 0) and is legal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingRange {
    pub high: f64,
    pub low: f64,
}

impl SwingRange {
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// Ordered candle sequence for one symbol, most-recent-last.
#[derive(Debug, Clone, Default)]
pub struct PriceWindow {
    candles: Vec<Candle>,
}

impl PriceWindow {
    /// Builds a window from candles of unknown wire order. The ordering is
    /// verified against timestamps rather than assumed: exchanges disagree on
    /// ascending vs descending conventions.
    pub fn from_unordered(mut candles: Vec<Candle>) -> Self {
        if let (Some(first), Some(last)) = (candles.first(), candles.last()) {
            if first.open_time_ms > last.open_time_ms {
                candles.reverse();
            }
        }
        PriceWindow { candles }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn latest(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Max high / min low over the whole window. `None` when empty.
    pub fn swing_range(&self) -> Option<SwingRange> {
        let high = self
            .candles
            .iter()
            .map(|c| c.high)
            .fold(f64::NEG_INFINITY, f64::max);
        let low = self
            .candles
            .iter()
            .map(|c| c.low)
            .fold(f64::INFINITY, f64::min);
        if high.is_finite() && low.is_finite() {
            Some(SwingRange { high, low })
        } else {
            None
        }
    }

    /// True when every candle timestamp is unique (duplicate open times mean
    /// a broken fetch).
    pub fn has_unique_open_times(&self) -> bool {
        self.candles
            .iter()
            .map(|c| c.open_time_ms)
            .all_unique()
    }
}
