//! Converts raw feed records into canonical [Transaction]s.
//!
//! This is the single boundary where defaulting, validation, and
//! sign-convention normalization happen. A raw record either becomes a
//! well-formed [Transaction] here or is dropped here; later stages never see
//! a partial record and never need to re-check polarity.

use std::collections::HashMap;

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    feed::RawTransaction,
    reconcile::model::{Transaction, UNCATEGORIZED, UNKNOWN_ACCOUNT},
};

/// The date format used by the aggregation API, e.g. "2024-01-10".
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The polarity a feed uses for its raw amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignConvention {
    /// Positive raw amounts are money leaving the account (the canonical
    /// convention; no adjustment needed).
    DebitPositive,
    /// Positive raw amounts are money entering the account; amounts are
    /// negated during normalization.
    CreditPositive,
}

/// The result of normalizing one fetched batch.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBatch {
    /// Well-formed transactions, sorted by date descending (newest first).
    pub transactions: Vec<Transaction>,
    /// The number of records dropped because they were pending or were
    /// missing a required field.
    pub dropped: usize,
}

/// Normalize a batch of raw feed records.
///
/// Pending records are dropped: they are not final and would double-count
/// once they settle under a new ID. Records missing any of `transaction_id`,
/// `date`, `name`, or `amount` (or with an unparseable date) are dropped and
/// counted; one malformed record never aborts the batch.
///
/// `account_names` maps feed account IDs to display names; IDs that do not
/// resolve fall back to [UNKNOWN_ACCOUNT]. Empty or absent category lists
/// become the single-element [UNCATEGORIZED] path.
///
/// The output order is a display convenience only: descending by date, ties
/// keeping the feed's own order (the sort is stable).
pub fn normalize(
    records: Vec<RawTransaction>,
    account_names: &HashMap<String, String>,
    convention: SignConvention,
) -> NormalizedBatch {
    let total = records.len();
    let mut transactions = Vec::with_capacity(total);

    for record in records {
        if record.pending {
            continue;
        }

        let Some(transaction) = normalize_record(record, account_names, convention) else {
            continue;
        };

        transactions.push(transaction);
    }

    let dropped = total - transactions.len();
    if dropped > 0 {
        tracing::debug!("dropped {dropped} pending or malformed records during normalization");
    }

    transactions.sort_by(|a, b| b.date.cmp(&a.date));

    NormalizedBatch {
        transactions,
        dropped,
    }
}

fn normalize_record(
    record: RawTransaction,
    account_names: &HashMap<String, String>,
    convention: SignConvention,
) -> Option<Transaction> {
    let id = record.transaction_id?;
    let description = record.name?;
    let raw_amount = record.amount?;

    let date_string = record.date?;
    let date = match Date::parse(&date_string, DATE_FORMAT) {
        Ok(date) => date,
        Err(error) => {
            tracing::debug!("dropping record {id}: unparseable date {date_string:?}: {error}");
            return None;
        }
    };

    let amount = match convention {
        SignConvention::DebitPositive => raw_amount,
        SignConvention::CreditPositive => -raw_amount,
    };

    let category_path = match record.category {
        Some(path) if !path.is_empty() => path,
        _ => vec![UNCATEGORIZED.to_owned()],
    };

    let account_name = record
        .account_id
        .and_then(|account_id| account_names.get(&account_id).cloned())
        .unwrap_or_else(|| UNKNOWN_ACCOUNT.to_owned());

    Some(Transaction {
        id,
        date,
        account_name,
        description,
        amount,
        category_path,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use time::macros::date;

    use super::{NormalizedBatch, SignConvention, normalize};
    use crate::{
        feed::RawTransaction,
        reconcile::model::{UNCATEGORIZED, UNKNOWN_ACCOUNT},
    };

    fn raw_transaction(id: &str, date: &str, amount: f64) -> RawTransaction {
        RawTransaction {
            transaction_id: Some(id.to_owned()),
            date: Some(date.to_owned()),
            name: Some(format!("Merchant {id}")),
            amount: Some(amount),
            account_id: Some("acc-1".to_owned()),
            category: Some(vec!["Food and Drink".to_owned()]),
            pending: false,
        }
    }

    fn account_map() -> HashMap<String, String> {
        HashMap::from([("acc-1".to_owned(), "Everyday Checking".to_owned())])
    }

    #[test]
    fn drops_pending_records() {
        let mut pending = raw_transaction("t1", "2024-01-10", 12.0);
        pending.pending = true;
        let records = vec![pending, raw_transaction("t2", "2024-01-11", 34.0)];

        let NormalizedBatch {
            transactions,
            dropped,
        } = normalize(records, &account_map(), SignConvention::DebitPositive);

        assert_eq!(dropped, 1);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].id, "t2");
    }

    #[test]
    fn drops_records_missing_required_fields() {
        let mut missing_id = raw_transaction("t1", "2024-01-10", 12.0);
        missing_id.transaction_id = None;
        let mut missing_amount = raw_transaction("t2", "2024-01-10", 12.0);
        missing_amount.amount = None;
        let mut missing_date = raw_transaction("t3", "2024-01-10", 12.0);
        missing_date.date = None;
        let mut missing_name = raw_transaction("t4", "2024-01-10", 12.0);
        missing_name.name = None;
        let bad_date = raw_transaction("t5", "10/01/2024", 12.0);

        let records = vec![
            missing_id,
            missing_amount,
            missing_date,
            missing_name,
            bad_date,
            raw_transaction("t6", "2024-01-10", 12.0),
        ];

        let batch = normalize(records, &account_map(), SignConvention::DebitPositive);

        assert_eq!(batch.dropped, 5);
        assert_eq!(batch.transactions.len(), 1);
        assert_eq!(batch.transactions[0].id, "t6");
    }

    #[test]
    fn debit_positive_amounts_pass_through() {
        let records = vec![
            raw_transaction("expense", "2024-01-10", 25.0),
            raw_transaction("income", "2024-01-10", -100.0),
        ];

        let batch = normalize(records, &account_map(), SignConvention::DebitPositive);

        assert_eq!(batch.transactions[0].amount, 25.0);
        assert_eq!(batch.transactions[1].amount, -100.0);
    }

    #[test]
    fn credit_positive_amounts_are_negated() {
        // A feed where positive means money in must come out inverted so the
        // canonical convention (positive = money out) holds downstream.
        let records = vec![
            raw_transaction("income", "2024-01-10", 100.0),
            raw_transaction("expense", "2024-01-10", -25.0),
        ];

        let batch = normalize(records, &account_map(), SignConvention::CreditPositive);

        assert_eq!(batch.transactions[0].amount, -100.0);
        assert_eq!(batch.transactions[1].amount, 25.0);
    }

    #[test]
    fn empty_category_becomes_uncategorized() {
        let mut no_category = raw_transaction("t1", "2024-01-10", 5.0);
        no_category.category = None;
        let mut empty_category = raw_transaction("t2", "2024-01-10", 5.0);
        empty_category.category = Some(vec![]);

        let batch = normalize(
            vec![no_category, empty_category],
            &account_map(),
            SignConvention::DebitPositive,
        );

        assert_eq!(batch.transactions[0].category_path, vec![UNCATEGORIZED]);
        assert_eq!(batch.transactions[1].category_path, vec![UNCATEGORIZED]);
    }

    #[test]
    fn unresolved_account_ids_use_the_sentinel_name() {
        let mut unknown = raw_transaction("t1", "2024-01-10", 5.0);
        unknown.account_id = Some("acc-missing".to_owned());
        let mut absent = raw_transaction("t2", "2024-01-10", 5.0);
        absent.account_id = None;

        let batch = normalize(
            vec![unknown, absent],
            &account_map(),
            SignConvention::DebitPositive,
        );

        assert_eq!(batch.transactions[0].account_name, UNKNOWN_ACCOUNT);
        assert_eq!(batch.transactions[1].account_name, UNKNOWN_ACCOUNT);
    }

    #[test]
    fn resolves_account_names_from_the_map() {
        let batch = normalize(
            vec![raw_transaction("t1", "2024-01-10", 5.0)],
            &account_map(),
            SignConvention::DebitPositive,
        );

        assert_eq!(batch.transactions[0].account_name, "Everyday Checking");
    }

    #[test]
    fn sorts_newest_first_with_stable_ties() {
        let records = vec![
            raw_transaction("old", "2024-01-05", 1.0),
            raw_transaction("tie-a", "2024-01-10", 2.0),
            raw_transaction("new", "2024-01-12", 3.0),
            raw_transaction("tie-b", "2024-01-10", 4.0),
        ];

        let batch = normalize(records, &account_map(), SignConvention::DebitPositive);

        let ids: Vec<&str> = batch
            .transactions
            .iter()
            .map(|transaction| transaction.id.as_str())
            .collect();
        assert_eq!(ids, vec!["new", "tie-a", "tie-b", "old"]);
        assert_eq!(batch.transactions[0].date, date!(2024 - 01 - 12));
    }
}
