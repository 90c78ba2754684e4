// SPDX-License-Identifier: GPL-3.0-or-later

//! ISBNdb API client for fetching book metadata.
//!
//! This crate provides a client for interacting with the ISBNdb API,
//! including book lookup/search and author/publisher lookup functionality
//! with built-in per-plan rate limiting and a single `Retry-After`-driven
//! retry when the API throttles a request.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod rate_limiter;

pub use client::{IsbndbClient, IsbndbClientBuilder, Plan};
pub use config::IsbndbConfig;
pub use error::{IsbndbError, Result};
pub use models::{
    Author, Book, Dimension, MerchantLogoOffset, Price, Publisher, SearchQuery, SearchResults,
    StructuredDimensions,
};
