//! Shared utilities for the verman registry crates.
//!
//! This crate provides the cross-cutting concerns used by the other verman
//! crates: the unified error type and its result alias.

pub mod errors;
