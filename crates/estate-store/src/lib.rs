//! # estate-store
//!
//! Content-store access for estate-search.
//!
//! This crate provides:
//! - The listing query builder (parameterized GROQ listing + count queries)
//! - The [`ContentStore`] trait
//! - A Sanity HTTP client implementing it
//! - An in-memory store for tests and local runs

pub mod memory;
pub mod query_builder;
pub mod sanity;
pub mod store;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod test_fixtures;

pub use memory::InMemoryStore;
pub use query_builder::{CompiledQuery, ListingQueryBuilder, Predicate, QueryParam};
pub use sanity::{SanityConfig, SanityStore};
pub use store::ContentStore;
