//! Python FFI boundary
//!
//! Exposes the allocator to the Python presentation layer. The boundary
//! is minimal: configuration comes in as JSON (the same declarative shape
//! `AllocatorConfig` deserializes anywhere else), results go out as JSON,
//! and all engine state stays on the Rust side.

pub mod allocator;
pub mod types;
