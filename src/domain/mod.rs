// Domain types and value objects
mod candle;
mod ratio;
mod symbol;
mod ticker;

// Re-export commonly used types
pub use candle::{Candle, PriceWindow, SwingRange};
pub use ratio::{FibRatio, phi};
pub use symbol::SymbolPair;
pub use ticker::Ticker;
