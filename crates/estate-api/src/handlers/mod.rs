//! HTTP handlers.

pub mod health;
pub mod rates;
pub mod search;
pub mod translate;
