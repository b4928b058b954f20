//! Session-scoped storage for the user's manual exclusions.
//!
//! The only state that outlives a request: a list of transaction IDs the
//! user excluded by hand, kept as JSON in a private (encrypted and signed)
//! session cookie. Auto-detected transfer exclusions are never written
//! here; they are recomputed from the batch on every fetch.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};

pub(crate) const COOKIE_USER_EXCLUSIONS: &str = "excluded_ids";

/// Read the user's manual exclusions from the session.
///
/// An absent cookie means no exclusions. A cookie that fails to parse is
/// treated the same way: losing a stale exclusion list is preferable to
/// failing the page.
pub fn user_exclusions(jar: &PrivateCookieJar) -> Vec<String> {
    let Some(cookie) = jar.get(COOKIE_USER_EXCLUSIONS) else {
        return Vec::new();
    };

    match serde_json::from_str(cookie.value()) {
        Ok(ids) => ids,
        Err(error) => {
            tracing::warn!("discarding unparseable exclusion cookie: {error}");
            Vec::new()
        }
    }
}

/// Add `transaction_id` to the user's exclusions if not already present.
///
/// Returns the jar with the updated cookie.
pub fn add_exclusion(jar: PrivateCookieJar, transaction_id: &str) -> PrivateCookieJar {
    let mut ids = user_exclusions(&jar);

    if ids.iter().any(|id| id == transaction_id) {
        tracing::debug!("transaction {transaction_id} is already excluded");
        return jar;
    }

    ids.push(transaction_id.to_owned());
    save(jar, &ids)
}

/// Remove `transaction_id` from the user's exclusions if present.
///
/// Returns the jar with the updated cookie.
pub fn remove_exclusion(jar: PrivateCookieJar, transaction_id: &str) -> PrivateCookieJar {
    let mut ids = user_exclusions(&jar);
    let before = ids.len();
    ids.retain(|id| id != transaction_id);

    if ids.len() == before {
        tracing::debug!("transaction {transaction_id} was not manually excluded");
        return jar;
    }

    save(jar, &ids)
}

/// Remove all manual exclusions from the session.
pub fn clear_exclusions(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(Cookie::from(COOKIE_USER_EXCLUSIONS))
}

fn save(jar: PrivateCookieJar, ids: &[String]) -> PrivateCookieJar {
    let value = match serde_json::to_string(ids) {
        Ok(value) => value,
        Err(error) => {
            // Serializing a list of strings cannot realistically fail; keep
            // the previous cookie rather than corrupting it.
            tracing::error!("could not serialize exclusion list: {error}");
            return jar;
        }
    };

    jar.add(
        Cookie::build((COOKIE_USER_EXCLUSIONS, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict),
    )
}
