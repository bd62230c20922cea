//! Model catalog for Parley.

pub mod registry;

pub use registry::ModelRegistry;
