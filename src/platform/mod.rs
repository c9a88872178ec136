//! Platform Abstraction Layer for memrank
//!
//! This module provides the process-table backends the ranking pipeline runs
//! on, selected at build time.
//!
//! # Architecture
//!
//! ```text
//! src/platform/
//! +-- mod.rs           <- This file (backend selection)
//! +-- traits.rs        <- Platform-agnostic trait definitions
//! +-- linux/           <- /proc + signals (cfg(linux))
//! +-- generic.rs       <- sysinfo fallback for other Unix-likes
//! +-- (windows/)       <- Toolhelp32 backend lives in src/windows/
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use memrank::platform::{create_source, ProcessSource};
//!
//! let source = create_source(&config);
//! source.terminate(4242)?;
//! ```
//!
//! # Platform Support
//!
//! | Operation   | Windows             | Linux           | Other (sysinfo) |
//! |-------------|---------------------|-----------------|-----------------|
//! | Enumeration | Toolhelp32 snapshot | /proc listing   | `System`        |
//! | Memory      | Working set (psapi) | statm resident  | RSS             |
//! | Terminate   | TerminateProcess    | SIGTERM/SIGKILL | `Process::kill` |

pub mod traits;

pub use traits::{PlatformError, PlatformResult, ProcessSnapshot, ProcessSource, SnapshotEntry};

pub mod generic;

pub use generic::SysinfoProcessSource;

#[cfg(test)]
pub(crate) mod mock;

use crate::core::config::MonitorConfig;

// ============================================================================
// Linux Platform Implementation
// ============================================================================

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "linux")]
pub use linux::LinuxProcessSource;

/// Platform-specific process source type alias for Linux.
#[cfg(target_os = "linux")]
pub type PlatformProcessSource = linux::LinuxProcessSource;

// ============================================================================
// Windows Platform Implementation
// ============================================================================

/// Platform-specific process source type alias for Windows.
#[cfg(target_os = "windows")]
pub type PlatformProcessSource = crate::windows::WindowsProcessSource;

// ============================================================================
// Everything else
// ============================================================================

/// Platform-specific process source type alias for other platforms.
#[cfg(not(any(target_os = "linux", target_os = "windows")))]
pub type PlatformProcessSource = generic::SysinfoProcessSource;

/// Build the native process source for this platform.
pub fn create_source(config: &MonitorConfig) -> PlatformProcessSource {
    #[cfg(target_os = "linux")]
    {
        linux::LinuxProcessSource::new(config)
    }

    #[cfg(target_os = "windows")]
    {
        let _ = config;
        crate::windows::WindowsProcessSource::new()
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        let _ = config;
        generic::SysinfoProcessSource::new()
    }
}

/// Prepare the console for UTF-8 output and ANSI redraws.
///
/// Only Windows needs work here; terminals elsewhere already qualify.
pub fn prepare_console() -> PlatformResult<()> {
    #[cfg(target_os = "windows")]
    {
        crate::windows::prepare_console()
    }

    #[cfg(not(target_os = "windows"))]
    {
        Ok(())
    }
}

/// Returns the current platform name
pub fn platform_name() -> &'static str {
    std::env::consts::OS
}
