//! Response dispatch abstractions for Parley.
//!
//! - `ResponseDispatcher`: RPITIT trait for concrete reply backends
//! - `BoxDispatcher`: object-safe wrapper for dynamic dispatch
//! - `SimulatedDispatcher`: fixed-latency placeholder backend

pub mod box_dispatcher;
pub mod dispatcher;
pub mod simulated;
