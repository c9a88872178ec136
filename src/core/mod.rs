//! Core ranking pipeline and command loop

pub mod collector;
pub mod commands;
pub mod config;
pub mod index;
pub mod record;
