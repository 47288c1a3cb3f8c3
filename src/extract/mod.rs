pub mod aggregator;
pub mod classifier;

pub use aggregator::{PrizeAggregator, PrizeRecord, RECORD_FIELDS};
pub use classifier::{ClassifierState, Classification, LineClassifier, PrizeTier};
