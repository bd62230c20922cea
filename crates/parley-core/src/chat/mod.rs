//! Chat sessions and the message pipeline for Parley.
//!
//! - `store`: the session collection and current-session pointer
//! - `state`: sessions and models held together as one owned state object
//! - `service`: intents, reply dispatch and change notification

pub mod service;
pub mod state;
pub mod store;
