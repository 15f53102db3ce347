use crate::{
    config::ANALYSIS,
    domain::FibRatio,
    models::{FibLevelSet, Strength},
};

/// Scores how close the current price sits to the nearest key level (the
/// phi-derived retracements 38.2/50/61.8 and extensions 161.8/261.8).
///
/// Pure function. A non-positive or non-finite price, or a level set with no
/// key levels, yields `Undetermined` rather than NaN arithmetic.
pub fn classify_strength(current_price: f64, levels: &FibLevelSet) -> Strength {
    if !current_price.is_finite() || current_price <= 0.0 {
        return Strength::Undetermined;
    }

    let min_distance = FibRatio::KEY_RATIOS
        .iter()
        .filter_map(|&ratio| levels.price_of(ratio))
        .filter(|level| level.is_finite())
        .map(|level| (current_price - level).abs() / current_price)
        .fold(f64::INFINITY, f64::min);

    if !min_distance.is_finite() {
        return Strength::Undetermined;
    }

    let t = &ANALYSIS.thresholds;
    if min_distance < t.very_strong {
        Strength::VeryStrong
    } else if min_distance < t.strong {
        Strength::Strong
    } else if min_distance < t.medium {
        Strength::Medium
    } else {
        Strength::Weak
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analysis::fibonacci::compute_levels, domain::SwingRange};

    fn levels_for(high: f64, low: f64, price: f64) -> FibLevelSet {
        compute_levels(&SwingRange { high, low }, price, true)
    }

    #[test]
    fn price_on_a_key_level_is_very_strong() {
        let levels = levels_for(100.0, 0.0, 50.0);
        // 50% retracement is exactly 50.
        assert_eq!(classify_strength(50.0, &levels), Strength::VeryStrong);
    }

    #[test]
    fn degenerate_range_still_classifies() {
        let levels = levels_for(100.0, 100.0, 100.0);
        assert_eq!(classify_strength(100.0, &levels), Strength::VeryStrong);
    }

    #[test]
    fn zero_price_is_undetermined_not_nan() {
        let levels = levels_for(100.0, 0.0, 50.0);
        assert_eq!(classify_strength(0.0, &levels), Strength::Undetermined);
        assert_eq!(classify_strength(-1.0, &levels), Strength::Undetermined);
        assert_eq!(classify_strength(f64::NAN, &levels), Strength::Undetermined);
    }

    #[test]
    fn empty_level_set_is_undetermined() {
        let levels = FibLevelSet {
            retracements: vec![],
            extensions: vec![],
            resistance: 0.0,
            next_resistance: 0.0,
            support: 0.0,
            next_support: 0.0,
        };
        assert_eq!(classify_strength(50.0, &levels), Strength::Undetermined);
    }

    #[test]
    fn strength_is_monotone_in_distance() {
        let levels = levels_for(100.0, 0.0, 50.0);
        let min_distance = |price: f64| {
            FibRatio::KEY_RATIOS
                .iter()
                .filter_map(|&r| levels.price_of(r))
                .map(|level| (price - level).abs() / price)
                .fold(f64::INFINITY, f64::min)
        };

        // Sample prices, order them by distance to the nearest key level, and
        // check the category never gets stronger as that distance grows.
        let mut samples: Vec<(f64, Strength)> = (1..200)
            .map(|step| {
                let price = 40.0 + step as f64 * 0.2;
                (min_distance(price), classify_strength(price, &levels))
            })
            .collect();
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));

        for pair in samples.windows(2) {
            assert!(
                pair[0].1 >= pair[1].1,
                "strength increased with distance: {:?} -> {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn threshold_boundaries() {
        let levels = levels_for(100.0, 0.0, 50.0);
        // Nearest key level to these prices is the 50% retracement at 50.
        assert_eq!(classify_strength(50.4, &levels), Strength::VeryStrong); // <1%
        assert_eq!(classify_strength(50.8, &levels), Strength::Strong); // <2.5%
        assert_eq!(classify_strength(52.0, &levels), Strength::Medium); // <5%
        assert_eq!(classify_strength(54.0, &levels), Strength::Weak);
    }
}
