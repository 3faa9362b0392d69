//! In-memory reference backing store
//!
//! A `ContentStore` implementation backed by hash maps behind a single
//! `RwLock`. It exists for tests, demos, and as a template for real
//! store adapters; it is not a persistence layer.

pub mod memory;

pub use memory::MemoryStore;
