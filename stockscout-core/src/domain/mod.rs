//! Domain types for StockScout

pub mod bar;
pub mod input;
pub mod series;

pub use bar::PriceBar;
pub use input::{display_ticker, normalize_ticker, parse_budget, InputError, NSE_SUFFIX};
pub use series::{PriceSeries, SeriesError};
