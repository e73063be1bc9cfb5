pub mod grouping;
pub mod outcome;
pub mod thread;
pub mod types;

pub use grouping::{group_threads_by, EntityGroup, GroupBy, KeyExtractor};
pub use outcome::{
    classify_thread, classify_threads, OutcomeHistogram, OutcomeOptions, ThreadOutcome,
    ThreadSummary,
};
pub use thread::{distinct_actors, group_threads, Thread};
pub use types::*;
