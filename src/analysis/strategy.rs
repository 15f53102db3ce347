use crate::{
    domain::phi,
    models::{FibLevelSet, StrategyKind, StrategyRecord},
};

/// Picks the trade bias from whichever boundary the price sits closer to:
/// nearer resistance means a breakout play towards the next resistance,
/// nearer support means a breakdown play towards the next support.
///
/// Pure function. The ratio carried in the record is descriptive only.
pub fn generate_strategy(
    current_price: f64,
    levels: &FibLevelSet,
    _is_up_trend: bool,
) -> StrategyRecord {
    // Both distances would be normalised by the same price, which cannot
    // change the comparison, so the raw distances are compared directly and
    // a zero price cannot produce NaN.
    let resistance_distance = (current_price - levels.resistance).abs();
    let support_distance = (current_price - levels.support).abs();

    if resistance_distance < support_distance {
        StrategyRecord {
            kind: StrategyKind::ResistanceBreakout,
            from_level: levels.resistance,
            target_level: levels.next_resistance,
            ratio_basis: phi(),
        }
    } else {
        StrategyRecord {
            kind: StrategyKind::SupportBreak,
            from_level: levels.support,
            target_level: levels.next_support,
            ratio_basis: phi().recip(),
        }
    }
}
