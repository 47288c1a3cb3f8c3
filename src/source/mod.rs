pub mod decoder;
pub mod fetcher;
pub mod types;

pub use decoder::PdfDecoder;
pub use fetcher::DocumentFetcher;
pub use types::{LogicalDate, TimeSlot};
