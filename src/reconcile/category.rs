//! Pure category predicates consumed by the aggregator.
//!
//! A rule is an OR of three checks, all case-insensitive: category path
//! prefixes, display-label keywords, and literal description substrings
//! (e.g. landlord names). New categories are added by constructing a new
//! rule, not by changing control flow.

use crate::reconcile::model::Transaction;

/// A named predicate over transactions, used for per-category sub-totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    /// Display name of the category, e.g. "Rent".
    pub name: String,
    /// Category path prefixes that match, coarsest-first.
    pub path_prefixes: Vec<Vec<String>>,
    /// Substrings of the joined category label that match.
    pub label_keywords: Vec<String>,
    /// Literal description substrings that match, e.g. landlord names.
    pub description_literals: Vec<String>,
}

impl CategoryRule {
    /// The reference rule for rent payments.
    pub fn rent() -> Self {
        Self {
            name: "Rent".to_owned(),
            path_prefixes: vec![
                vec![
                    "service".to_owned(),
                    "financial".to_owned(),
                    "rent and mortgage".to_owned(),
                ],
                vec!["housing".to_owned(), "rent".to_owned()],
            ],
            label_keywords: vec!["rent".to_owned()],
            description_literals: vec![],
        }
    }

    /// Whether `transaction` belongs to this category.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if self
            .path_prefixes
            .iter()
            .any(|prefix| path_starts_with(&transaction.category_path, prefix))
        {
            return true;
        }

        let label = transaction.category_label().to_lowercase();
        if self
            .label_keywords
            .iter()
            .any(|keyword| label.contains(&keyword.to_lowercase()))
        {
            return true;
        }

        let description = transaction.description.to_lowercase();
        self.description_literals
            .iter()
            .any(|literal| description.contains(&literal.to_lowercase()))
    }
}

fn path_starts_with(path: &[String], prefix: &[String]) -> bool {
    if prefix.is_empty() || prefix.len() > path.len() {
        return false;
    }

    path.iter()
        .zip(prefix)
        .all(|(segment, wanted)| segment.eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::CategoryRule;
    use crate::reconcile::model::Transaction;

    fn transaction(description: &str, category_path: &[&str]) -> Transaction {
        Transaction {
            id: "t1".to_owned(),
            date: date!(2024 - 01 - 10),
            account_name: "Checking".to_owned(),
            description: description.to_owned(),
            amount: 1500.0,
            category_path: category_path.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn matches_path_prefix_case_insensitively() {
        let rule = CategoryRule::rent();
        let rent = transaction(
            "ACH Payment",
            &["Service", "Financial", "Rent and Mortgage"],
        );
        let insurance = transaction("ACH Payment", &["Service", "Insurance"]);

        assert!(rule.matches(&rent));
        assert!(!rule.matches(&insurance));
    }

    #[test]
    fn matches_a_longer_path_by_prefix() {
        let rule = CategoryRule::rent();
        let rent = transaction(
            "ACH Payment",
            &["Housing", "Rent", "Monthly"],
        );

        assert!(rule.matches(&rent));
    }

    #[test]
    fn matches_label_keyword() {
        let rule = CategoryRule::rent();
        let labeled = transaction("ACH Payment", &["Payment", "Rent"]);

        assert!(rule.matches(&labeled));
    }

    #[test]
    fn matches_description_literal() {
        let rule = CategoryRule {
            description_literals: vec!["Acme Property".to_owned()],
            ..CategoryRule::rent()
        };
        let by_landlord = transaction("ACME PROPERTY MGMT LLC", &["Uncategorized"]);

        assert!(rule.matches(&by_landlord));
    }

    #[test]
    fn unrelated_transactions_do_not_match() {
        let rule = CategoryRule::rent();
        let groceries = transaction("Corner Store", &["Food and Drink", "Groceries"]);

        assert!(!rule.matches(&groceries));
    }

    #[test]
    fn a_prefix_longer_than_the_path_does_not_match() {
        let rule = CategoryRule::rent();
        let partial = transaction("ACH Payment", &["Service"]);

        assert!(!rule.matches(&partial));
    }
}
