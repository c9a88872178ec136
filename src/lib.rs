//! memrank
//!
//! An interactive console process list ranked by resident memory.
//!
//! ## Features
//!
//! - **Memory Ranking**: processes ordered by working set / RSS, highest first
//! - **Terminate by PID**: any PID, listed or not
//! - **Cross-platform**: Toolhelp32 on Windows, /proc on Linux, sysinfo elsewhere
//!
//! ## Pipeline
//!
//! Every refresh opens a fresh snapshot, queries each process's footprint,
//! and inserts the readable ones into an [`OrderedIndex`]. Processes whose
//! memory cannot be read (other users, already exited) are left out.

pub mod core;
pub mod monitor;
pub mod platform;

#[cfg(target_os = "windows")]
pub mod windows;

// Re-exports
pub use crate::core::collector::SnapshotCollector;
pub use crate::core::commands::{Command, CommandLoop};
pub use crate::core::config::MonitorConfig;
pub use crate::core::index::OrderedIndex;
pub use crate::core::record::ProcessRecord;
pub use platform::{
    create_source, PlatformError, PlatformProcessSource, PlatformResult, ProcessSnapshot,
    ProcessSource, SnapshotEntry,
};
