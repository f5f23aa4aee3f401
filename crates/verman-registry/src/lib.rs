//! Query engine for filesystem-organized package repositories.
//!
//! A repository encodes package name and version as directory path segments
//! (`<root>/<package>/<version>/...files`). [`Resolver`] answers discovery
//! queries (`list`) and file enumeration (`get`) over any
//! [`DirectoryStore`], so the same engine runs against the real filesystem
//! or an in-memory fixture.

pub mod constraint;
pub mod resolver;
pub mod store;

pub use constraint::Constraint;
pub use resolver::Resolver;
pub use store::{DirEntry, DirectoryStore, FsStore, MemStore};
