// Pure computation: no I/O anywhere in this module tree.
mod fibonacci;
mod pair_analysis;
mod strategy;
mod strength;

pub use {
    fibonacci::compute_levels, pair_analysis::analyze_pair, strategy::generate_strategy,
    strength::classify_strength,
};
