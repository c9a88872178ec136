//! Windows process table and console APIs

pub mod console;
pub mod process;

pub use console::prepare_console;
pub use process::{ToolhelpSnapshot, WindowsProcessSource};
