//! CPU worker enumerating one salt-index range.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;

use crate::crypto::{create::create3_address, Address};
use crate::matcher::Pattern;
use crate::salt::{guard_salt, Salt, ENTROPY_LEN};

use super::pool::SaltMatch;
use super::SearchRange;

/// Stats update granularity.
const BATCH_SIZE: u64 = 4096;

/// One progress message per this many indices.
const PROGRESS_INTERVAL: u64 = 1_000_000;

#[derive(Debug, Default)]
pub struct WorkerStats {
    pub attempts: AtomicU64,
    pub matches_found: AtomicU64,
}

impl WorkerStats {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn total_attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }
    pub fn total_matches(&self) -> u64 {
        self.matches_found.load(Ordering::Relaxed)
    }
}

/// Messages a worker sends to the coordinator. Every worker must end with
/// exactly one `Finished`; the coordinator treats a worker that exits without
/// one as failed.
#[derive(Debug)]
pub(super) enum WorkerMessage {
    Progress { worker_id: usize, processed: u64 },
    Finished { worker_id: usize, matches: Vec<SaltMatch> },
}

/// Derives the 11-byte big-endian entropy for a global salt index. A pure
/// function of the index, so the candidate at index i is the same no matter
/// which worker visits it.
#[inline]
pub fn index_entropy(index: u64) -> [u8; ENTROPY_LEN] {
    let mut entropy = [0u8; ENTROPY_LEN];
    entropy[ENTROPY_LEN - 8..].copy_from_slice(&index.to_be_bytes());
    entropy
}

pub struct RangeWorker {
    id: usize,
    range: SearchRange,
    signer: Address,
    factory: Address,
    chain_id: u64,
    patterns: Arc<Vec<Pattern>>,
    msg_tx: Sender<WorkerMessage>,
    stop_flag: Arc<AtomicBool>,
    stats: Arc<WorkerStats>,
}

impl RangeWorker {
    pub(super) fn new(
        id: usize,
        range: SearchRange,
        signer: Address,
        factory: Address,
        chain_id: u64,
        patterns: Arc<Vec<Pattern>>,
        msg_tx: Sender<WorkerMessage>,
        stop_flag: Arc<AtomicBool>,
        stats: Arc<WorkerStats>,
    ) -> Self {
        Self {
            id,
            range,
            signer,
            factory,
            chain_id,
            patterns,
            msg_tx,
            stop_flag,
            stats,
        }
    }

    /// Enumerates the assigned range: for each index, builds the candidate
    /// salt (signer-bound, cross-chain protected), guards it, derives the
    /// CREATE3 address, and tests every compiled pattern. Ends by sending a
    /// `Finished` message carrying all matches.
    pub fn run(self) {
        let mut matches = Vec::new();
        let mut processed = 0u64;
        let mut index = self.range.start;

        while index < self.range.end {
            if self.stop_flag.load(Ordering::Relaxed) {
                break;
            }

            let batch_end = (index + BATCH_SIZE).min(self.range.end);
            let batch_len = batch_end - index;

            while index < batch_end {
                let entropy = index_entropy(index);
                let salt = Salt::with_entropy(&self.signer, true, &entropy);
                let guarded = guard_salt(&salt, &self.signer, self.chain_id);
                let address = create3_address(&self.factory, &guarded);

                for (pattern_index, pattern) in self.patterns.iter().enumerate() {
                    if pattern.matches(&address).is_match() {
                        self.stats.matches_found.fetch_add(1, Ordering::Relaxed);
                        matches.push(SaltMatch {
                            salt,
                            address,
                            pattern_index,
                        });
                    }
                }

                index += 1;
                processed += 1;
                if processed % PROGRESS_INTERVAL == 0 {
                    let _ = self.msg_tx.send(WorkerMessage::Progress {
                        worker_id: self.id,
                        processed,
                    });
                }
            }

            self.stats.attempts.fetch_add(batch_len, Ordering::Relaxed);
        }

        let _ = self.msg_tx.send(WorkerMessage::Finished {
            worker_id: self.id,
            matches,
        });
    }

    pub fn id(&self) -> usize {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_entropy_big_endian() {
        assert_eq!(index_entropy(0), [0u8; 11]);
        assert_eq!(
            index_entropy(1),
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]
        );
        assert_eq!(
            index_entropy(0x0102_0304_0506_0708),
            [0, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8]
        );
        assert_eq!(
            index_entropy(u64::MAX),
            [0, 0, 0, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn test_index_entropy_injective_on_samples() {
        let samples = [0u64, 1, 2, 255, 256, 1 << 32, u64::MAX];
        for (i, a) in samples.iter().enumerate() {
            for b in samples.iter().skip(i + 1) {
                assert_ne!(index_entropy(*a), index_entropy(*b));
            }
        }
    }
}
