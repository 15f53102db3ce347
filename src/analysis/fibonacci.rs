use crate::{
    domain::{FibRatio, SwingRange, phi},
    models::FibLevelSet,
};

/// Computes every retracement/extension level for one swing range and finds
/// the nearest support/resistance around the current price.
///
/// Pure and deterministic: no I/O, no clock, no randomness. A zero range
/// (flat market) collapses every level onto the swing price and is legal.
pub fn compute_levels(swing: &SwingRange, current_price: f64, is_up_trend: bool) -> FibLevelSet {
    let range = swing.range();

    let retracements: Vec<(FibRatio, f64)> = FibRatio::RETRACEMENTS
        .iter()
        .map(|&ratio| {
            let level = if is_up_trend {
                swing.high - range * ratio.value()
            } else {
                swing.low + range * ratio.value()
            };
            (ratio, level)
        })
        .collect();

    let extensions: Vec<(FibRatio, f64)> = FibRatio::EXTENSIONS
        .iter()
        .map(|&ratio| {
            let level = if is_up_trend {
                swing.low + range * ratio.value()
            } else {
                swing.high - range * ratio.value()
            };
            (ratio, level)
        })
        .collect();

    let mut sorted: Vec<f64> = retracements
        .iter()
        .chain(extensions.iter())
        .map(|(_, price)| *price)
        .collect();
    sorted.sort_by(f64::total_cmp);

    // Golden-ratio step used to extrapolate one level past the known set.
    let golden_step = range * phi().recip();

    // Resistance: first level strictly above the price. Ties are excluded on
    // purpose: a level exactly at the price is neither support nor resistance.
    let (resistance, next_resistance) =
        match sorted.iter().position(|&level| level > current_price) {
            Some(idx) => {
                let resistance = sorted[idx];
                let next = sorted
                    .get(idx + 1)
                    .copied()
                    .unwrap_or(resistance + golden_step);
                (resistance, next)
            }
            None => (swing.high, swing.high),
        };

    // Support: symmetric scan downwards.
    let (support, next_support) = match sorted.iter().rposition(|&level| level < current_price) {
        Some(idx) => {
            let support = sorted[idx];
            let next = if idx > 0 {
                sorted[idx - 1]
            } else {
                support - golden_step
            };
            (support, next)
        }
        None => (swing.low, swing.low),
    };

    FibLevelSet {
        retracements,
        extensions,
        resistance,
        next_resistance,
        support,
        next_support,
    }
}
