//! In-memory process source for tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::traits::{PlatformError, PlatformResult, ProcessSnapshot, ProcessSource, SnapshotEntry};

/// Scripted process table that counts handle traffic.
#[derive(Default)]
pub struct MockProcessSource {
    pub entries: Vec<SnapshotEntry>,
    /// Missing PIDs answer with a permission error
    pub memory: HashMap<u32, u64>,
    pub fail_open: bool,
    /// PIDs whose termination fails
    pub protected: Vec<u32>,
    pub opened: Cell<usize>,
    pub released: Rc<Cell<usize>>,
    pub terminated: RefCell<Vec<u32>>,
}

impl MockProcessSource {
    pub fn with_processes(processes: &[(u32, &str, u64)]) -> Self {
        let mut source = Self::default();
        for &(pid, name, bytes) in processes {
            source.entries.push(SnapshotEntry::new(pid, name));
            source.memory.insert(pid, bytes);
        }
        source
    }

    pub fn released(&self) -> usize {
        self.released.get()
    }
}

pub struct MockSnapshot {
    entries: Vec<SnapshotEntry>,
    cursor: usize,
    released: Rc<Cell<usize>>,
}

impl ProcessSnapshot for MockSnapshot {
    fn first_entry(&mut self) -> Option<SnapshotEntry> {
        self.cursor = 0;
        self.next_entry()
    }

    fn next_entry(&mut self) -> Option<SnapshotEntry> {
        let entry = self.entries.get(self.cursor).cloned();
        if entry.is_some() {
            self.cursor += 1;
        }
        entry
    }
}

impl Drop for MockSnapshot {
    fn drop(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

impl ProcessSource for MockProcessSource {
    type Snapshot = MockSnapshot;

    fn open_snapshot(&self) -> PlatformResult<MockSnapshot> {
        if self.fail_open {
            return Err(PlatformError::PermissionDenied("snapshot refused".into()));
        }
        self.opened.set(self.opened.get() + 1);
        Ok(MockSnapshot {
            entries: self.entries.clone(),
            cursor: 0,
            released: Rc::clone(&self.released),
        })
    }

    fn query_memory(&self, pid: u32) -> PlatformResult<u64> {
        self.memory
            .get(&pid)
            .copied()
            .ok_or_else(|| PlatformError::PermissionDenied(format!("pid {}", pid)))
    }

    fn terminate(&self, pid: u32) -> PlatformResult<()> {
        self.terminated.borrow_mut().push(pid);
        if self.protected.contains(&pid) {
            Err(PlatformError::PermissionDenied(format!("cannot terminate {}", pid)))
        } else {
            Ok(())
        }
    }
}
