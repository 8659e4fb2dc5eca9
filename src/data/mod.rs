pub mod datasets;
pub mod feed;

pub use datasets::{DatasetStore, FeedWindow};
pub use feed::{parse_feed, parse_row, EarthquakeEvent, FeedParseError, FeedReport, SkippedRow};
