//! Market data: providers, the ticker universe and the circuit breaker.

pub mod circuit_breaker;
pub mod provider;
pub mod synthetic;
pub mod universe;
pub mod yahoo;

pub use circuit_breaker::CircuitBreaker;
pub use provider::{display_name_or_ticker, DataError, DataProvider, HistoryPeriod};
pub use synthetic::{generate_synthetic_bars, SyntheticProvider};
pub use universe::{Sector, Universe, UniverseError};
pub use yahoo::YahooProvider;
