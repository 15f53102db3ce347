use {
    crate::domain::{FibRatio, SwingRange, SymbolPair},
    strum_macros::Display,
};

/// All level prices derived from one swing range, plus the nearest
/// support/resistance around the current price.
#[derive(Debug, Clone, PartialEq)]
pub struct FibLevelSet {
    pub retracements: Vec<(FibRatio, f64)>,
    pub extensions: Vec<(FibRatio, f64)>,
    pub resistance: f64,
    pub next_resistance: f64,
    pub support: f64,
    pub next_support: f64,
}

impl FibLevelSet {
    /// Price of one ratio's level, if present.
    pub fn price_of(&self, ratio: FibRatio) -> Option<f64> {
        self.retracements
            .iter()
            .chain(self.extensions.iter())
            .find(|(r, _)| *r == ratio)
            .map(|(_, price)| *price)
    }
}

/// How close the current price sits to a structurally significant level.
/// Ordered weakest-first so `Ord` means "at least this strong".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, clap::ValueEnum,
)]
pub enum Strength {
    /// Upstream produced no usable key levels (or a non-positive price).
    Undetermined,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StrategyKind {
    /// Price is nearer resistance: a break of it targets the next level up.
    ResistanceBreakout,
    /// Price is nearer support: a break of it targets the next level down.
    SupportBreak,
}

/// Directional recommendation. `ratio_basis` is the golden-ratio figure that
/// justifies the target, purely descriptive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyRecord {
    pub kind: StrategyKind,
    pub from_level: f64,
    pub target_level: f64,
    pub ratio_basis: f64,
}

/// One symbol's full analysis for one refresh cycle. Rebuilt from scratch
/// every cycle and replaced wholesale; never mutated in place.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub symbol: SymbolPair,
    pub current_price: f64,
    pub price_change_pct: f64,
    pub is_up_trend: bool,
    pub swing: SwingRange,
    pub levels: FibLevelSet,
    pub strength: Strength,
    pub strategy: StrategyRecord,
    pub updated_at_ms: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_orders_weakest_first() {
        assert!(Strength::VeryStrong > Strength::Strong);
        assert!(Strength::Strong > Strength::Medium);
        assert!(Strength::Medium > Strength::Weak);
        assert!(Strength::Weak > Strength::Undetermined);
    }
}
