pub mod engine;
pub mod error;
pub mod parser;

pub mod momentum;
pub mod structure;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use engine::{IndicatorEngine, PriceSeries, MIN_CANDLES};
pub use error::IndicatorError;
pub use parser::*;
