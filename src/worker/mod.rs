//! Worker pool and range workers for the parallel salt search.

mod cpu;
mod pool;
mod range;

pub use cpu::{index_entropy, RangeWorker, WorkerStats};
pub use pool::{
    PatternReport, ProgressUpdate, SaltMatch, SearchConfig, SearchError, SearchPool, SearchReport,
};
pub use range::{partition, SearchRange};
