//! The canonical transaction model produced by the normalizer.
//!
//! Everything downstream of normalization (transfer detection, aggregation,
//! rendering) works with [Transaction] and never touches raw feed records.

use time::Date;

/// The category path assigned to transactions the feed left uncategorized.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// The account name assigned when the feed references an account ID that is
/// missing from the account map.
pub const UNKNOWN_ACCOUNT: &str = "Unknown Account";

/// A settled bank transaction in canonical form.
///
/// Sign convention: a positive amount is money leaving the tracked account
/// (an expense), a negative amount is money entering it (income). The
/// normalizer establishes this at ingestion and no later stage re-inverts it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Opaque identifier, stable across fetches. The reconciliation key.
    pub id: String,
    /// The calendar date the transaction settled.
    pub date: Date,
    /// Display name of the account the transaction belongs to.
    pub account_name: String,
    /// Merchant/payee string as provided by the feed.
    pub description: String,
    /// Signed amount under the canonical convention (positive = money out).
    pub amount: f64,
    /// Category labels from coarsest to finest. Never empty.
    pub category_path: Vec<String>,
}

impl Transaction {
    /// The category path joined for display, e.g. "Service > Financial".
    pub fn category_label(&self) -> String {
        self.category_path.join(" > ")
    }
}
