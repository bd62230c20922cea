//! Shared domain types for Parley.
//!
//! This crate contains the core domain types used across the workspace:
//! chat sessions and messages, model registry entries, dispatch requests,
//! events, snapshots, configuration and their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod model;
pub mod snapshot;
