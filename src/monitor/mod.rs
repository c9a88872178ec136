//! Console rendering

pub mod table;

pub use table::render_table;
