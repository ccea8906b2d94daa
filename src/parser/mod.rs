pub mod base;
pub mod html;
pub mod price;

pub use base::{extract, ExtractStrategy, SignalExtractor};
pub use price::normalize_price;
