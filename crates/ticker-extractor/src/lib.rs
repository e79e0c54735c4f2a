pub mod extractor;
pub mod impact;

pub use extractor::TickerExtractor;
pub use impact::{resolve_impacts, TickerImpactBundle};
