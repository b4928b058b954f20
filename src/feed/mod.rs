//! Client for the third-party financial-data aggregation API.
//!
//! The rest of the app treats this module as an external collaborator with
//! one capability: given credentials and a date range, return a pageable
//! list of raw transaction records plus an account map, or fail with a
//! typed error.

mod client;
mod config;
mod raw;

pub use client::{FeedError, FetchedBatch, HttpFeed, TransactionFeed};
pub use config::{ConfigError, FeedConfig, FeedEnvironment};
pub use raw::{RawAccount, RawTransaction};
