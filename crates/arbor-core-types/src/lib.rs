//! Core types shared across Arbor facilities
//!
//! This crate provides foundational types used by the repository core,
//! the backing store, and any protocol binding layered on top:
//!
//! - **Identifiers**: `ItemId`, the stable content-item identifier
//! - **Call context**: `CallContext` with per-call credentials
//! - **Sensitive data**: `Sensitive<T>` marker for automatic redaction
//! - **Schema constants**: Canonical property keys and type identifiers

pub mod context;
pub mod id;
pub mod schema;
pub mod sensitive;

pub use context::CallContext;
pub use id::ItemId;
pub use sensitive::Sensitive;
