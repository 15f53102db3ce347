mod coordinator;
mod demo;

pub use coordinator::{BatchError, RefreshCoordinator, RefreshCycle, SymbolOutcome};
pub use demo::demo_cycle;
