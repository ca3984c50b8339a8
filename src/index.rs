//! Index implementations.
//!
//! The in-memory inverted index lives in [`memory`]; it owns the forward
//! document store, the per-field posting lists, and the external-id lookup.

pub mod memory;

pub use memory::{MemoryIndex, MemoryIndexConfig};
