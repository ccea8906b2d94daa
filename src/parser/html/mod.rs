mod generic;
mod marketplace;

pub use generic::GenericExtractor;
pub use marketplace::MarketplaceExtractor;
