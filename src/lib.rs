//! lightbox: a local-first photo catalog with a persisted selection basket.
//!
//! The catalog lives in a SQLite database that is seeded exactly once from a
//! comma-separated manifest. A [`gallery::Gallery`] keeps an observable
//! in-memory view (images, basket, search query) converged with the store
//! and carries the whole action surface a presentation layer needs.

pub mod error;
pub mod format;
pub mod gallery;
pub mod store;

pub use error::{CatalogError, Result};
