//! Implements a struct that holds the state of the server.
//!
//! Everything a handler needs is constructed once at startup and injected
//! here; there is no global mutable state and no ambient configuration.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

use crate::{
    feed::TransactionFeed,
    reconcile::{CategoryRule, TransferDetector},
};

/// The state of the server.
#[derive(Clone)]
pub struct AppState {
    /// The key used for signing and encrypting private session cookies.
    pub cookie_key: Key,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The transaction source, or `None` when the feed configuration is
    /// missing or invalid. The dashboard still renders without it.
    pub feed: Option<Arc<dyn TransactionFeed>>,

    /// The transfer detector, configured with the pairing date window.
    pub detector: TransferDetector,

    /// The category rules evaluated for per-category sub-totals.
    pub category_rules: Arc<[CategoryRule]>,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Pacific/Auckland". `feed` is `None` when the aggregator is not
    /// configured.
    pub fn new(
        cookie_secret: &str,
        local_timezone: &str,
        feed: Option<Arc<dyn TransactionFeed>>,
        detector: TransferDetector,
        category_rules: Vec<CategoryRule>,
    ) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            local_timezone: local_timezone.to_owned(),
            feed,
            detector,
            category_rules: category_rules.into(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret` string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
