//! Wire types for the aggregation API.
//!
//! Every field the upstream may omit is an `Option` here; defaulting and
//! validation live in the normalizer, not in per-consumer `.get()` calls.

use serde::Deserialize;

/// One raw transaction record as returned by the aggregator.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTransaction {
    /// Opaque unique identifier, stable across fetches.
    pub transaction_id: Option<String>,
    /// Settlement date as "YYYY-MM-DD".
    pub date: Option<String>,
    /// Merchant/payee string.
    pub name: Option<String>,
    /// Signed amount in the feed's own polarity.
    pub amount: Option<f64>,
    /// The ID of the account this transaction belongs to.
    pub account_id: Option<String>,
    /// Category labels from coarsest to finest.
    pub category: Option<Vec<String>>,
    /// Whether the transaction has not yet settled.
    #[serde(default)]
    pub pending: bool,
}

/// One account as returned by the aggregator's accounts endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAccount {
    /// Opaque account identifier referenced by transactions.
    pub account_id: String,
    /// Display name for the account.
    pub name: String,
}

/// The body of a successful transactions page response.
#[derive(Debug, Deserialize)]
pub(super) struct TransactionsResponse {
    #[serde(default)]
    pub transactions: Vec<RawTransaction>,
    pub total_transactions: usize,
}

/// The body of a successful accounts response.
#[derive(Debug, Deserialize)]
pub(super) struct AccountsResponse {
    #[serde(default)]
    pub accounts: Vec<RawAccount>,
}

/// The error body the aggregator returns for failed requests.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ApiErrorBody {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{RawTransaction, TransactionsResponse};

    #[test]
    fn deserializes_a_complete_record() {
        let json = r#"{
            "transaction_id": "txn-1",
            "date": "2024-01-10",
            "name": "Corner Store",
            "amount": 12.34,
            "account_id": "acc-1",
            "category": ["Food and Drink", "Groceries"],
            "pending": false
        }"#;

        let record: RawTransaction = serde_json::from_str(json).unwrap();

        assert_eq!(record.transaction_id.as_deref(), Some("txn-1"));
        assert_eq!(record.amount, Some(12.34));
        assert_eq!(
            record.category,
            Some(vec!["Food and Drink".to_owned(), "Groceries".to_owned()])
        );
        assert!(!record.pending);
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let record: RawTransaction = serde_json::from_str(r#"{"amount": 5.0}"#).unwrap();

        assert!(record.transaction_id.is_none());
        assert!(record.date.is_none());
        assert!(record.name.is_none());
        assert!(record.account_id.is_none());
        assert!(record.category.is_none());
        assert!(!record.pending);
    }

    #[test]
    fn deserializes_a_transactions_page() {
        let json = r#"{
            "transactions": [{"transaction_id": "txn-1"}],
            "total_transactions": 712
        }"#;

        let page: TransactionsResponse = serde_json::from_str(json).unwrap();

        assert_eq!(page.transactions.len(), 1);
        assert_eq!(page.total_transactions, 712);
    }
}
