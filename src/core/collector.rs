//! Builds one memory-ordered index per refresh cycle

use tracing::{debug, error};

use super::index::OrderedIndex;
use super::record::ProcessRecord;
use crate::platform::{ProcessSnapshot, ProcessSource};

/// Per-cycle counters, logged at debug level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectStats {
    /// Entries returned by the enumeration
    pub listed: usize,
    /// Entries stored in the index
    pub indexed: usize,
    /// Entries whose memory could not be read or was zero
    pub unavailable: usize,
}

pub struct SnapshotCollector<'a, S: ProcessSource> {
    source: &'a S,
}

impl<'a, S: ProcessSource> SnapshotCollector<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Enumerate processes and rank the ones with a readable footprint.
    ///
    /// Never fails: enumeration problems are logged and yield an empty index.
    pub fn collect(&self) -> OrderedIndex {
        self.collect_with_stats().0
    }

    pub fn collect_with_stats(&self) -> (OrderedIndex, CollectStats) {
        let mut index = OrderedIndex::new();
        let mut stats = CollectStats::default();

        // Released on drop, whichever return below is taken
        let mut snapshot = match self.source.open_snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Failed to create process snapshot: {}", e);
                return (index, stats);
            }
        };

        let Some(mut entry) = snapshot.first_entry() else {
            error!("Failed to read the first process from the snapshot");
            return (index, stats);
        };

        loop {
            stats.listed += 1;
            match self.source.query_memory(entry.pid) {
                Ok(0) => stats.unavailable += 1,
                Ok(bytes) => {
                    if index.insert(ProcessRecord::new(entry.pid, entry.name, bytes)) {
                        stats.indexed += 1;
                    }
                }
                Err(e) => {
                    debug!("Skipping {} ({}): {}", entry.name, entry.pid, e);
                    stats.unavailable += 1;
                }
            }

            match snapshot.next_entry() {
                Some(next) => entry = next,
                None => break,
            }
        }

        debug!(
            "Collected {} processes ({} listed, {} unavailable)",
            stats.indexed, stats.listed, stats.unavailable
        );
        (index, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockProcessSource;

    #[test]
    fn test_collect_ranks_by_memory() {
        let source = MockProcessSource::with_processes(&[
            (10, "editor", 500),
            (20, "browser", 1000),
            (5, "shell", 500),
        ]);

        let index = SnapshotCollector::new(&source).collect();
        let ranked: Vec<(u32, &str)> = index
            .descending()
            .map(|r| (r.pid, r.name.as_str()))
            .collect();

        assert_eq!(ranked, vec![(20, "browser"), (10, "editor"), (5, "shell")]);
        assert_eq!(source.released(), 1);
    }

    #[test]
    fn test_zero_and_unreadable_memory_are_skipped() {
        let mut source = MockProcessSource::with_processes(&[
            (1, "init", 0),
            (2, "kthreadd", 0),
            (300, "app", 8192),
        ]);
        // No memory entry: query fails
        source.entries.push(crate::platform::SnapshotEntry::new(400, "secret"));

        let (index, stats) = SnapshotCollector::new(&source).collect_with_stats();

        let pids: Vec<u32> = index.descending().map(|r| r.pid).collect();
        assert_eq!(pids, vec![300]);
        assert_eq!(
            stats,
            CollectStats {
                listed: 4,
                indexed: 1,
                unavailable: 3
            }
        );
    }

    #[test]
    fn test_open_failure_yields_empty_index() {
        let source = MockProcessSource {
            fail_open: true,
            ..MockProcessSource::with_processes(&[(1, "init", 4096)])
        };

        let index = SnapshotCollector::new(&source).collect();

        assert!(index.is_empty());
        assert_eq!(source.opened.get(), 0);
        assert_eq!(source.released(), 0);
    }

    #[test]
    fn test_empty_enumeration_releases_handle() {
        let source = MockProcessSource::default();

        let index = SnapshotCollector::new(&source).collect();

        assert!(index.is_empty());
        assert_eq!(source.opened.get(), 1);
        assert_eq!(source.released(), 1);
    }

    #[test]
    fn test_every_cycle_releases_exactly_once() {
        let source = MockProcessSource::with_processes(&[(1, "a", 1), (2, "b", 2)]);
        let collector = SnapshotCollector::new(&source);

        for _ in 0..3 {
            assert_eq!(collector.collect().len(), 2);
        }

        assert_eq!(source.opened.get(), 3);
        assert_eq!(source.released(), 3);
    }

    #[test]
    fn test_duplicate_entries_are_dropped() {
        let source = MockProcessSource::with_processes(&[(9, "first", 4096), (9, "again", 4096)]);

        let (index, stats) = SnapshotCollector::new(&source).collect_with_stats();

        assert_eq!(index.len(), 1);
        assert_eq!(index.descending().next().map(|r| r.name.as_str()), Some("first"));
        assert_eq!(stats.listed, 2);
        assert_eq!(stats.indexed, 1);
    }
}
