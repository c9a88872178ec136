//! Linux Platform Support
//!
//! Process enumeration, memory queries and termination using the /proc
//! filesystem and POSIX signals.
//!
//! ## Required Capabilities
//!
//! - Memory of other users' processes is readable from `/proc/<pid>/statm`
//!   unless `hidepid` is set on the /proc mount; hidden processes simply do
//!   not appear.
//! - Signalling another user's process requires root or `CAP_KILL`.

pub mod process;

pub use process::{LinuxProcessSource, ProcSnapshot};
