mod analysis_result;

pub use analysis_result::{AnalysisResult, FibLevelSet, StrategyKind, StrategyRecord, Strength};
