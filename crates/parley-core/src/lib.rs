//! Chat state management for Parley.
//!
//! This crate holds the session store, model registry and message pipeline,
//! plus the dispatcher and clipboard ports the presentation layer plugs into.
//! It depends only on `parley-types` -- never on `parley-infra` or any IO
//! crate.

pub mod chat;
pub mod clipboard;
pub mod dispatch;
pub mod model;
