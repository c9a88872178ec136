//! Linux process table access
//!
//! Enumeration and memory queries go through the /proc filesystem via the
//! `procfs` crate; termination sends a signal with `nix`.

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use procfs::process::Process;
use procfs::ProcError;
use tracing::debug;

use crate::core::config::MonitorConfig;
use crate::platform::traits::{
    PlatformError, PlatformResult, ProcessSnapshot, ProcessSource, SnapshotEntry,
};

impl From<ProcError> for PlatformError {
    fn from(e: ProcError) -> Self {
        match e {
            ProcError::PermissionDenied(path) => PlatformError::PermissionDenied(format!("{:?}", path)),
            ProcError::NotFound(path) => PlatformError::NotFound(format!("{:?}", path)),
            other => PlatformError::IoError(other.to_string()),
        }
    }
}

impl From<Errno> for PlatformError {
    fn from(errno: Errno) -> Self {
        match errno {
            Errno::ESRCH => PlatformError::NotFound("no such process".into()),
            Errno::EPERM => PlatformError::PermissionDenied(errno.desc().into()),
            other => PlatformError::SystemError {
                code: other as i32,
                message: other.desc().into(),
            },
        }
    }
}

/// Process source backed by /proc
pub struct LinuxProcessSource {
    /// Signal sent by `terminate`
    signal: Signal,
}

impl LinuxProcessSource {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            signal: if config.force_kill { Signal::SIGKILL } else { Signal::SIGTERM },
        }
    }

    pub fn signal(&self) -> Signal {
        self.signal
    }
}

impl Default for LinuxProcessSource {
    fn default() -> Self {
        Self::new(&MonitorConfig::default())
    }
}

/// PIDs listed from /proc at open time.
///
/// Names are read lazily; processes that exit before their turn are skipped.
pub struct ProcSnapshot {
    pids: Vec<i32>,
    cursor: usize,
}

impl ProcSnapshot {
    fn read_entry(pid: i32) -> Option<SnapshotEntry> {
        let stat = Process::new(pid).and_then(|p| p.stat()).ok()?;
        Some(SnapshotEntry::new(pid as u32, stat.comm))
    }
}

impl ProcessSnapshot for ProcSnapshot {
    fn first_entry(&mut self) -> Option<SnapshotEntry> {
        self.cursor = 0;
        self.next_entry()
    }

    fn next_entry(&mut self) -> Option<SnapshotEntry> {
        while let Some(&pid) = self.pids.get(self.cursor) {
            self.cursor += 1;
            if let Some(entry) = Self::read_entry(pid) {
                return Some(entry);
            }
            debug!("Process {} exited during enumeration", pid);
        }
        None
    }
}

impl ProcessSource for LinuxProcessSource {
    type Snapshot = ProcSnapshot;

    fn open_snapshot(&self) -> PlatformResult<ProcSnapshot> {
        // The /proc directory handle is closed when the iterator is dropped
        let pids = procfs::process::all_processes()?
            .filter_map(|p| p.ok())
            .map(|p| p.pid)
            .collect();
        Ok(ProcSnapshot { pids, cursor: 0 })
    }

    fn query_memory(&self, pid: u32) -> PlatformResult<u64> {
        let pid = to_raw_pid(pid)?;
        let statm = Process::new(pid)?.statm()?;
        Ok(statm.resident * procfs::page_size())
    }

    fn terminate(&self, pid: u32) -> PlatformResult<()> {
        let raw = to_raw_pid(pid)?;
        kill(Pid::from_raw(raw), self.signal)?;
        Ok(())
    }
}

/// PID 0 and negative PIDs address process groups, never a single process.
fn to_raw_pid(pid: u32) -> PlatformResult<i32> {
    match i32::try_from(pid) {
        Ok(raw) if raw > 0 => Ok(raw),
        _ => Err(PlatformError::InvalidArgument(format!("invalid PID {}", pid))),
    }
}
