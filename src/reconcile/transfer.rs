//! Detection of offsetting internal-transfer pairs.
//!
//! A transfer between two of the user's own accounts shows up twice in the
//! feed: once as a debit and once as a credit of the same magnitude. Left
//! alone, the pair inflates both income and expense totals even though the
//! net balance stays correct. The detector finds such pairs so they can be
//! excluded from the money math.

use std::collections::{HashMap, HashSet};

use crate::reconcile::model::Transaction;

/// Description substrings that mark a transaction as a potential transfer,
/// matched case-insensitively.
const TRANSFER_DESCRIPTION_PATTERNS: &[&str] = &["online transfer", "transfer from", "transfer to"];

/// The top-level category label that marks a transaction as a potential
/// transfer, matched case-insensitively.
const TRANSFER_CATEGORY: &str = "transfer";

/// Two legs of a transfer must sum to zero within this many currency units.
const AMOUNT_TOLERANCE: f64 = 0.01;

/// The default maximum number of days between the two legs of a transfer.
pub const DEFAULT_DAYS_WINDOW: i64 = 2;

/// Finds pairs of transactions that are the two legs of one internal
/// transfer.
///
/// Matching is greedy first-fit: within each amount group, each debit pairs
/// with the first unmatched credit that offsets it within the date window,
/// in feed order. With three or more candidates at the same amount the
/// outcome is order-dependent and may leave a legitimate pair unmatched;
/// that approximation is deliberate and callers must not rely on optimal
/// matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferDetector {
    /// Maximum number of days (inclusive) between the two legs of a pair.
    pub days_window: i64,
}

impl Default for TransferDetector {
    fn default() -> Self {
        Self {
            days_window: DEFAULT_DAYS_WINDOW,
        }
    }
}

impl TransferDetector {
    /// Create a detector that pairs legs up to `days_window` days apart.
    pub fn new(days_window: i64) -> Self {
        Self { days_window }
    }

    /// Return the IDs of all transactions that form offsetting transfer
    /// pairs in `transactions`.
    ///
    /// Every ID in the result belongs to exactly one pair; unmatched
    /// candidates are left out. The function is total: it never fails, and
    /// an empty input yields an empty set.
    pub fn detect(&self, transactions: &[Transaction]) -> HashSet<String> {
        let mut amount_groups: HashMap<i64, Vec<&Transaction>> = HashMap::new();

        for transaction in transactions {
            if !is_potential_transfer(transaction) {
                continue;
            }

            // Group at whole-cent granularity. Pairing never crosses groups,
            // so sub-cent noise larger than half a cent splits candidates
            // apart; that is within the documented tolerance policy.
            let cents = (transaction.amount.abs() * 100.0).round() as i64;
            if cents == 0 {
                continue;
            }

            amount_groups.entry(cents).or_default().push(transaction);
        }

        let mut excluded = HashSet::new();

        for group in amount_groups.values() {
            let debits = group.iter().filter(|t| t.amount > 0.0);
            let credits: Vec<&&Transaction> = group.iter().filter(|t| t.amount < 0.0).collect();

            for debit in debits {
                if excluded.contains(&debit.id) {
                    continue;
                }

                for credit in &credits {
                    if excluded.contains(&credit.id) {
                        continue;
                    }

                    if self.is_offsetting_pair(debit, credit) {
                        excluded.insert(debit.id.clone());
                        excluded.insert(credit.id.clone());
                        tracing::debug!(
                            "transfer pair: {} ({} on {}) offsets {} ({} on {})",
                            debit.id,
                            debit.amount,
                            debit.date,
                            credit.id,
                            credit.amount,
                            credit.date,
                        );
                        break;
                    }
                }
            }
        }

        if !excluded.is_empty() {
            tracing::debug!(
                "auto-excluding {} offsetting transfer transactions",
                excluded.len()
            );
        }

        excluded
    }

    fn is_offsetting_pair(&self, debit: &Transaction, credit: &Transaction) -> bool {
        if (debit.amount + credit.amount).abs() >= AMOUNT_TOLERANCE {
            return false;
        }

        let days_apart = (debit.date - credit.date).whole_days().abs();
        days_apart <= self.days_window
    }
}

/// Whether a transaction qualifies as a transfer candidate: its top-level
/// category is "transfer", or its description contains a known transfer
/// phrase. Both checks are case-insensitive.
fn is_potential_transfer(transaction: &Transaction) -> bool {
    if let Some(top_level) = transaction.category_path.first()
        && top_level.eq_ignore_ascii_case(TRANSFER_CATEGORY)
    {
        return true;
    }

    let description = transaction.description.to_lowercase();
    TRANSFER_DESCRIPTION_PATTERNS
        .iter()
        .any(|pattern| description.contains(pattern))
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use super::{TransferDetector, is_potential_transfer};
    use crate::reconcile::model::Transaction;

    fn transfer_transaction(id: &str, amount: f64, date: Date) -> Transaction {
        Transaction {
            id: id.to_owned(),
            date,
            account_name: "Checking".to_owned(),
            description: format!("Online Transfer ref {id}"),
            amount,
            category_path: vec!["Transfer".to_owned()],
        }
    }

    fn plain_transaction(id: &str, amount: f64, date: Date) -> Transaction {
        Transaction {
            id: id.to_owned(),
            date,
            account_name: "Checking".to_owned(),
            description: "Corner Store".to_owned(),
            amount,
            category_path: vec!["Food and Drink".to_owned()],
        }
    }

    #[test]
    fn pairs_offsetting_legs_within_the_date_window() {
        let transactions = vec![
            transfer_transaction("a", 50.0, date!(2024 - 01 - 10)),
            transfer_transaction("b", -50.0, date!(2024 - 01 - 11)),
            plain_transaction("c", 20.0, date!(2024 - 01 - 10)),
        ];

        let excluded = TransferDetector::default().detect(&transactions);

        assert_eq!(excluded.len(), 2);
        assert!(excluded.contains("a"));
        assert!(excluded.contains("b"));
    }

    #[test]
    fn legs_too_far_apart_do_not_pair() {
        let transactions = vec![
            transfer_transaction("a", 50.0, date!(2024 - 01 - 10)),
            transfer_transaction("b", -50.0, date!(2024 - 01 - 14)),
        ];

        let excluded = TransferDetector::default().detect(&transactions);

        assert!(excluded.is_empty());
    }

    #[test]
    fn date_window_is_inclusive() {
        let transactions = vec![
            transfer_transaction("a", 50.0, date!(2024 - 01 - 10)),
            transfer_transaction("b", -50.0, date!(2024 - 01 - 12)),
        ];

        let excluded = TransferDetector::default().detect(&transactions);

        assert_eq!(excluded.len(), 2);
    }

    #[test]
    fn widened_window_pairs_distant_legs() {
        let transactions = vec![
            transfer_transaction("a", 50.0, date!(2024 - 01 - 10)),
            transfer_transaction("b", -50.0, date!(2024 - 01 - 14)),
        ];

        let excluded = TransferDetector::new(4).detect(&transactions);

        assert_eq!(excluded.len(), 2);
    }

    #[test]
    fn amounts_that_do_not_offset_do_not_pair() {
        let transactions = vec![
            transfer_transaction("a", 50.0, date!(2024 - 01 - 10)),
            transfer_transaction("b", -50.02, date!(2024 - 01 - 10)),
        ];

        let excluded = TransferDetector::default().detect(&transactions);

        assert!(excluded.is_empty());
    }

    #[test]
    fn sub_cent_noise_is_within_tolerance() {
        let transactions = vec![
            transfer_transaction("a", 50.001, date!(2024 - 01 - 10)),
            transfer_transaction("b", -50.004, date!(2024 - 01 - 10)),
        ];

        let excluded = TransferDetector::default().detect(&transactions);

        assert_eq!(excluded.len(), 2);
    }

    #[test]
    fn zero_amounts_are_never_candidates() {
        let transactions = vec![
            transfer_transaction("a", 0.0, date!(2024 - 01 - 10)),
            transfer_transaction("b", 0.0, date!(2024 - 01 - 10)),
        ];

        let excluded = TransferDetector::default().detect(&transactions);

        assert!(excluded.is_empty());
    }

    #[test]
    fn a_leg_matches_at_most_once() {
        // Two debits compete for one credit; only one pair forms.
        let transactions = vec![
            transfer_transaction("d1", 75.0, date!(2024 - 01 - 10)),
            transfer_transaction("d2", 75.0, date!(2024 - 01 - 10)),
            transfer_transaction("c1", -75.0, date!(2024 - 01 - 10)),
        ];

        let excluded = TransferDetector::default().detect(&transactions);

        assert_eq!(excluded.len(), 2);
        assert!(excluded.contains("c1"));
        assert!(excluded.contains("d1") ^ excluded.contains("d2"));
    }

    #[test]
    fn first_fit_pairs_the_earliest_credit_in_feed_order() {
        let transactions = vec![
            transfer_transaction("c1", -30.0, date!(2024 - 01 - 09)),
            transfer_transaction("c2", -30.0, date!(2024 - 01 - 10)),
            transfer_transaction("d1", 30.0, date!(2024 - 01 - 10)),
        ];

        let excluded = TransferDetector::default().detect(&transactions);

        // The debit takes c1 because it comes first in feed order, even
        // though c2 is closer in time.
        assert_eq!(excluded.len(), 2);
        assert!(excluded.contains("d1"));
        assert!(excluded.contains("c1"));
    }

    #[test]
    fn matching_never_crosses_amount_groups() {
        let transactions = vec![
            transfer_transaction("a", 50.0, date!(2024 - 01 - 10)),
            transfer_transaction("b", -60.0, date!(2024 - 01 - 10)),
        ];

        let excluded = TransferDetector::default().detect(&transactions);

        assert!(excluded.is_empty());
    }

    #[test]
    fn description_phrases_qualify_without_the_transfer_category() {
        let mut debit = plain_transaction("a", 200.0, date!(2024 - 01 - 10));
        debit.description = "ONLINE TRANSFER TO SAVINGS xxxx1234".to_owned();
        let mut credit = plain_transaction("b", -200.0, date!(2024 - 01 - 10));
        credit.description = "Transfer from Checking xxxx5678".to_owned();

        let excluded = TransferDetector::default().detect(&[debit, credit]);

        assert_eq!(excluded.len(), 2);
    }

    #[test]
    fn ordinary_transactions_are_not_candidates() {
        let groceries = plain_transaction("a", 82.17, date!(2024 - 01 - 10));
        assert!(!is_potential_transfer(&groceries));

        let mut categorized = plain_transaction("b", 82.17, date!(2024 - 01 - 10));
        categorized.category_path = vec!["TRANSFER".to_owned(), "Debit".to_owned()];
        assert!(is_potential_transfer(&categorized));
    }

    #[test]
    fn unmatched_candidates_are_left_untouched() {
        let transactions = vec![transfer_transaction("lonely", 120.0, date!(2024 - 01 - 10))];

        let excluded = TransferDetector::default().detect(&transactions);

        assert!(excluded.is_empty());
    }

    #[test]
    fn transfer_symmetry_holds_for_every_excluded_id() {
        let transactions = vec![
            transfer_transaction("a", 50.0, date!(2024 - 01 - 10)),
            transfer_transaction("b", -50.0, date!(2024 - 01 - 11)),
            transfer_transaction("c", 80.0, date!(2024 - 01 - 12)),
            transfer_transaction("d", -80.0, date!(2024 - 01 - 13)),
            transfer_transaction("unpaired", 30.0, date!(2024 - 01 - 14)),
        ];
        let detector = TransferDetector::default();

        let excluded = detector.detect(&transactions);

        for id in &excluded {
            let leg = transactions.iter().find(|t| &t.id == id).unwrap();
            let has_counterpart = excluded.iter().any(|other_id| {
                let other = transactions.iter().find(|t| &t.id == other_id).unwrap();
                other_id != id
                    && (leg.amount + other.amount).abs() < 0.01
                    && (leg.date - other.date).whole_days().abs() <= detector.days_window
            });
            assert!(has_counterpart, "excluded ID {id} has no offsetting leg");
        }
    }
}
