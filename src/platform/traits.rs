//! Platform Abstraction Traits for Process Enumeration and Control
//!
//! This module defines the small set of operations the ranking pipeline needs
//! from the operating system. Each platform (Windows, Linux, everything else
//! via sysinfo) provides one implementation.
//!
//! # Architecture
//!
//! ```text
//! +--------------------+
//! |  SnapshotCollector |  <- core (ranks, never touches the OS)
//! +--------------------+
//!           |
//! +--------------------+
//! |   ProcessSource    |  <- This module (defines interfaces)
//! +--------------------+
//!           |
//!    +------+------+---------+
//!    |             |         |
//! +--v--+      +---v--+  +---v-----+
//! | Win |      | Lin  |  | sysinfo |  <- Platform-specific implementations
//! +-----+      +------+  +---------+
//! ```
//!
//! # Handle lifetime
//!
//! A snapshot is an owned value. Dropping it releases the underlying
//! enumeration handle, so every exit path of a caller releases it exactly once.

use std::fmt;

// ============================================================================
// Error Types
// ============================================================================

/// Platform-agnostic error type for all platform operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Permission denied (requires elevated privileges)
    PermissionDenied(String),
    /// Resource not found (process exited, bad PID, ...)
    NotFound(String),
    /// Operation not supported on this platform
    NotSupported(String),
    /// I/O error occurred
    IoError(String),
    /// Invalid argument provided
    InvalidArgument(String),
    /// System call failed
    SystemError { code: i32, message: String },
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            PlatformError::NotFound(msg) => write!(f, "Not found: {}", msg),
            PlatformError::NotSupported(msg) => write!(f, "Not supported: {}", msg),
            PlatformError::IoError(msg) => write!(f, "I/O error: {}", msg),
            PlatformError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            PlatformError::SystemError { code, message } => {
                write!(f, "System error ({}): {}", code, message)
            }
        }
    }
}

impl std::error::Error for PlatformError {}

impl From<std::io::Error> for PlatformError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::PermissionDenied => PlatformError::PermissionDenied(e.to_string()),
            std::io::ErrorKind::NotFound => PlatformError::NotFound(e.to_string()),
            _ => PlatformError::IoError(e.to_string()),
        }
    }
}

/// Result type alias for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;

// ============================================================================
// Snapshot Types
// ============================================================================

/// One entry of a process enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    /// Process ID
    pub pid: u32,
    /// Executable name, already decoded to UTF-8
    pub name: String,
}

impl SnapshotEntry {
    pub fn new(pid: u32, name: impl Into<String>) -> Self {
        Self {
            pid,
            name: name.into(),
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// A point-in-time listing of running processes, walked entry by entry.
///
/// Implementations release their OS handle in `Drop`.
pub trait ProcessSnapshot {
    /// Rewind to and return the first entry, or `None` if the listing is empty.
    fn first_entry(&mut self) -> Option<SnapshotEntry>;

    /// Advance to the next entry, or `None` once the listing is exhausted.
    ///
    /// Only meaningful after [`ProcessSnapshot::first_entry`].
    fn next_entry(&mut self) -> Option<SnapshotEntry>;
}

/// Access to the operating system's process table.
///
/// # Example
///
/// ```ignore
/// let source = create_source(&config);
/// let mut snapshot = source.open_snapshot()?;
/// let mut entry = snapshot.first_entry();
/// while let Some(e) = entry {
///     let bytes = source.query_memory(e.pid).unwrap_or(0);
///     println!("{} {} {}", e.pid, e.name, bytes);
///     entry = snapshot.next_entry();
/// }
/// ```
pub trait ProcessSource {
    /// Snapshot type handed out by [`ProcessSource::open_snapshot`].
    type Snapshot: ProcessSnapshot;

    /// Acquire a new enumeration handle.
    fn open_snapshot(&self) -> PlatformResult<Self::Snapshot>;

    /// Resident memory footprint of `pid` in bytes.
    ///
    /// `Ok(0)` and `Err(_)` both mean the footprint is unavailable to this
    /// caller, e.g. the process exited or belongs to a more privileged user.
    fn query_memory(&self, pid: u32) -> PlatformResult<u64>;

    /// Terminate the process identified by `pid`.
    fn terminate(&self, pid: u32) -> PlatformResult<()>;
}
