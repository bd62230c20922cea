//! Infrastructure layer for Parley.
//!
//! Contains the IO-facing pieces the core stays free of: data directory
//! resolution, `config.toml` loading, and a terminal implementation of the
//! core `Clipboard` port.

pub mod clipboard;
pub mod config;
