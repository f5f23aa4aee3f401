//! Core data types for the verman registry.
//!
//! This crate defines the value types exchanged with the resolver: the
//! packages, versions, and file entries produced by a query, and the query
//! filters used to select them. Everything here is an immutable snapshot
//! with structural equality; nothing holds a handle to the repository.
//!
//! This crate is intentionally free of I/O.

pub mod package;
pub mod query;

pub use package::{FileEntry, Package, Version};
pub use query::{GetQuery, ListQuery, VersionSelector};
