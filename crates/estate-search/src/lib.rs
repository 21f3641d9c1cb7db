//! # estate-search
//!
//! Property search for estate-search.
//!
//! This crate provides:
//! - [`SearchService`]: validate, compile and run one search against a
//!   content store, returning a page of results
//! - [`SearchSequencer`]: last-issued-wins tokens for overlapping requests
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use estate_search::{RawSearchParams, SearchService};
//! use estate_store::SanityStore;
//!
//! let service = SearchService::new(Arc::new(SanityStore::from_env()?));
//! let page = service
//!     .search(&RawSearchParams {
//!         location: Some("Kassandra".into()),
//!         min_price: Some("100000".into()),
//!         ..Default::default()
//!     })
//!     .await?;
//! ```

pub mod sequence;
pub mod service;

// Re-export core types
pub use estate_core::{ListingFilter, Pagination, RawSearchParams, SearchResults};

pub use sequence::{SearchSequencer, SearchToken};
pub use service::SearchService;
