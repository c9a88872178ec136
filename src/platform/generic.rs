//! Portable process source built on `sysinfo`
//!
//! Used on platforms without a native backend (macOS, the BSDs). Each call
//! builds its own `System`, so nothing is cached between refresh cycles.

use sysinfo::{Pid, ProcessesToUpdate, System};

use super::traits::{PlatformError, PlatformResult, ProcessSnapshot, ProcessSource, SnapshotEntry};

#[derive(Debug, Default)]
pub struct SysinfoProcessSource;

impl SysinfoProcessSource {
    pub fn new() -> Self {
        Self
    }

    fn refreshed(pid: Pid) -> System {
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        sys
    }
}

/// Entries captured when the snapshot was opened, ordered by PID
pub struct SysinfoSnapshot {
    entries: Vec<SnapshotEntry>,
    cursor: usize,
}

impl ProcessSnapshot for SysinfoSnapshot {
    fn first_entry(&mut self) -> Option<SnapshotEntry> {
        self.cursor = 0;
        self.next_entry()
    }

    fn next_entry(&mut self) -> Option<SnapshotEntry> {
        let entry = self.entries.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(entry)
    }
}

impl ProcessSource for SysinfoProcessSource {
    type Snapshot = SysinfoSnapshot;

    fn open_snapshot(&self) -> PlatformResult<SysinfoSnapshot> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(PlatformError::NotSupported(
                "process enumeration is not available on this OS".into(),
            ));
        }

        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::All, true);

        let mut entries: Vec<SnapshotEntry> = sys
            .processes()
            .iter()
            .map(|(pid, process)| SnapshotEntry::new(pid.as_u32(), process.name().to_string_lossy()))
            .collect();
        entries.sort_by_key(|e| e.pid);

        Ok(SysinfoSnapshot { entries, cursor: 0 })
    }

    fn query_memory(&self, pid: u32) -> PlatformResult<u64> {
        let pid = Pid::from_u32(pid);
        Self::refreshed(pid)
            .process(pid)
            .map(|p| p.memory())
            .ok_or_else(|| PlatformError::NotFound(format!("process {}", pid)))
    }

    fn terminate(&self, pid: u32) -> PlatformResult<()> {
        let sys_pid = Pid::from_u32(pid);
        let sys = Self::refreshed(sys_pid);
        let process = sys
            .process(sys_pid)
            .ok_or_else(|| PlatformError::NotFound(format!("process {}", pid)))?;

        if process.kill() {
            Ok(())
        } else {
            Err(PlatformError::PermissionDenied(format!(
                "kill request for process {} was rejected",
                pid
            )))
        }
    }
}
