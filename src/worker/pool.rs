//! Search coordinator: partitions the salt space, runs one worker per range,
//! and aggregates matches grouped by pattern.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver};

use crate::crypto::create::CANONICAL_FACTORY;
use crate::crypto::Address;
use crate::matcher::Pattern;
use crate::salt::{Salt, DEFAULT_CHAIN_ID};

use super::cpu::{RangeWorker, WorkerMessage, WorkerStats};
use super::range::{partition, SearchRange};

/// A salt whose derived address matched a pattern.
#[derive(Debug, Clone)]
pub struct SaltMatch {
    /// The raw (unguarded) salt to submit to the factory.
    pub salt: Salt,
    /// The predicted deployment address.
    pub address: Address,
    /// Index into the search's pattern list.
    pub pattern_index: usize,
}

impl SaltMatch {
    /// Salt as 0x-prefixed hex (64 hex chars).
    pub fn salt_hex(&self) -> String {
        self.salt.to_hex_prefixed()
    }

    /// Address as checksummed hex (0x...).
    pub fn address_checksum(&self) -> String {
        self.address.to_checksum()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("at least one pattern is required")]
    NoPatterns,
    #[error("max attempts must be positive")]
    ZeroAttempts,
    #[error("worker count must be positive")]
    ZeroWorkers,
    #[error("worker {worker_id} failed while searching {range}")]
    WorkerFailure {
        worker_id: usize,
        range: SearchRange,
    },
}

/// Inputs to a salt search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Deployer EOA; bound into every candidate salt.
    pub signer: Address,
    /// Factory contract performing the deployment.
    pub factory: Address,
    /// Chain id mixed into the guarded salt.
    pub chain_id: u64,
    /// Compiled patterns, tested against every candidate.
    pub patterns: Vec<Pattern>,
    /// Size of the salt-index space to explore.
    pub max_attempts: u64,
    /// Number of parallel workers.
    pub workers: usize,
}

impl SearchConfig {
    /// Config with documented defaults: canonical factory, local-test chain
    /// id, one million attempts, one worker per CPU core.
    pub fn new(signer: Address, patterns: Vec<Pattern>) -> Self {
        Self {
            signer,
            factory: CANONICAL_FACTORY,
            chain_id: DEFAULT_CHAIN_ID,
            patterns,
            max_attempts: 1_000_000,
            workers: num_cpus::get(),
        }
    }
}

/// Matches for a single pattern.
#[derive(Debug, Clone)]
pub struct PatternReport {
    pub pattern: Pattern,
    pub matches: Vec<SaltMatch>,
}

impl PatternReport {
    pub fn found(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Aggregate result of a search.
#[derive(Debug)]
pub struct SearchReport {
    /// All matches in salt-index order.
    pub matches: Vec<SaltMatch>,
    /// Matches grouped per pattern, in pattern order.
    pub patterns: Vec<PatternReport>,
    /// Total salt indices processed.
    pub attempts: u64,
    pub elapsed: Duration,
}

impl SearchReport {
    pub fn found_any(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn attempts_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.attempts as f64 / secs
        } else {
            0.0
        }
    }
}

/// Periodic progress snapshot passed to the `run_with` callback.
#[derive(Debug, Clone, Copy)]
pub struct ProgressUpdate {
    pub worker_id: usize,
    /// Indices processed by that worker so far.
    pub processed: u64,
    /// Indices processed across all workers.
    pub total_attempts: u64,
    /// Matches recorded across all workers.
    pub total_matches: u64,
}

/// Runs one worker thread per search range and gathers their results.
pub struct SearchPool {
    ranges: Vec<SearchRange>,
    handles: Option<Vec<(usize, SearchRange, JoinHandle<()>)>>,
    msg_rx: Receiver<WorkerMessage>,
    stop_flag: Arc<AtomicBool>,
    stats: Arc<WorkerStats>,
    patterns: Vec<Pattern>,
    start_time: Instant,
}

impl SearchPool {
    /// Validates the config, partitions the index space, and spawns one named
    /// worker thread per range.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        if config.patterns.is_empty() {
            return Err(SearchError::NoPatterns);
        }
        if config.max_attempts == 0 {
            return Err(SearchError::ZeroAttempts);
        }
        if config.workers == 0 {
            return Err(SearchError::ZeroWorkers);
        }

        let ranges = partition(config.max_attempts, config.workers);
        let (msg_tx, msg_rx) = bounded(100);
        let stop_flag = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(WorkerStats::new());
        let shared_patterns = Arc::new(config.patterns.clone());

        let handles = ranges
            .iter()
            .enumerate()
            .map(|(id, &range)| {
                let worker = RangeWorker::new(
                    id,
                    range,
                    config.signer,
                    config.factory,
                    config.chain_id,
                    shared_patterns.clone(),
                    msg_tx.clone(),
                    stop_flag.clone(),
                    stats.clone(),
                );
                let handle = thread::Builder::new()
                    .name(format!("salt-search-worker-{}", id))
                    .spawn(move || worker.run())
                    .expect("spawn worker");
                (id, range, handle)
            })
            .collect();

        drop(msg_tx);

        Ok(Self {
            ranges,
            handles: Some(handles),
            msg_rx,
            stop_flag,
            stats,
            patterns: config.patterns,
            start_time: Instant::now(),
        })
    }

    /// Signals all workers to stop after their current batch.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Returns a clone of the stop flag for external use (e.g., signal
    /// handlers or match budgets).
    pub fn stop_flag_clone(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }

    pub fn num_workers(&self) -> usize {
        self.ranges.len()
    }

    pub fn total_attempts(&self) -> u64 {
        self.stats.total_attempts()
    }

    pub fn total_matches(&self) -> u64 {
        self.stats.total_matches()
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Waits for every worker and aggregates their matches.
    pub fn run(self) -> Result<SearchReport, SearchError> {
        self.run_with(|_| {})
    }

    /// Like [`run`](Self::run), invoking `on_progress` for every worker
    /// progress message.
    ///
    /// A worker that panics, or exits without reporting its result, fails the
    /// whole search with the offending range attached; no partial result is
    /// returned.
    pub fn run_with<F>(mut self, mut on_progress: F) -> Result<SearchReport, SearchError>
    where
        F: FnMut(ProgressUpdate),
    {
        let mut results: Vec<Option<Vec<SaltMatch>>> =
            (0..self.ranges.len()).map(|_| None).collect();

        // The channel closes once every worker has dropped its sender.
        while let Ok(msg) = self.msg_rx.recv() {
            match msg {
                WorkerMessage::Progress {
                    worker_id,
                    processed,
                } => on_progress(ProgressUpdate {
                    worker_id,
                    processed,
                    total_attempts: self.stats.total_attempts(),
                    total_matches: self.stats.total_matches(),
                }),
                WorkerMessage::Finished { worker_id, matches } => {
                    results[worker_id] = Some(matches);
                }
            }
        }

        let handles = self.handles.take().unwrap_or_default();
        for (worker_id, range, handle) in handles {
            let panicked = handle.join().is_err();
            if panicked || results[worker_id].is_none() {
                return Err(SearchError::WorkerFailure { worker_id, range });
            }
        }

        // Ranges are ordered by start index, so concatenating per-worker
        // results yields matches in global salt-index order.
        let matches: Vec<SaltMatch> = results.into_iter().flatten().flatten().collect();

        let patterns = self
            .patterns
            .iter()
            .enumerate()
            .map(|(pattern_index, pattern)| PatternReport {
                pattern: pattern.clone(),
                matches: matches
                    .iter()
                    .filter(|m| m.pattern_index == pattern_index)
                    .cloned()
                    .collect(),
            })
            .collect();

        Ok(SearchReport {
            matches,
            patterns,
            attempts: self.stats.total_attempts(),
            elapsed: self.start_time.elapsed(),
        })
    }
}

impl Drop for SearchPool {
    fn drop(&mut self) {
        self.stop();
        if let Some(handles) = self.handles.take() {
            for (_, _, handle) in handles {
                let _ = handle.join();
            }
        }
    }
}
