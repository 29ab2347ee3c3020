pub mod aggregate;
pub mod elements;
pub mod stats;

pub use aggregate::{aggregate, zip_by_rank, AggregateResult, RankZipTable};
pub use elements::{describe_edge, describe_node, elements, GraphElement};
pub use stats::{sentiment_histogram, word_frequencies, Histogram, HistogramBin};
