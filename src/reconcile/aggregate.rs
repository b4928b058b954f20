//! Income/expense/balance totals over named date windows.
//!
//! Windows may overlap (the displayed week is a subset of month-to-date);
//! each window is aggregated independently over the full batch, so a
//! transaction in the overlap counts in both windows.

use time::{Date, Duration};

use crate::reconcile::{category::CategoryRule, exclusions::ExclusionSet, model::Transaction};

/// A closed interval of calendar dates, inclusive at both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    /// Display name, e.g. "This Week".
    pub name: String,
    /// First date in the window.
    pub start: Date,
    /// Last date in the window.
    pub end: Date,
}

impl DateWindow {
    /// Create a window covering `[start, end]`.
    pub fn new(name: &str, start: Date, end: Date) -> Self {
        Self {
            name: name.to_owned(),
            start,
            end,
        }
    }

    /// The window from the Monday of the current week through `today`.
    pub fn week_to_date(today: Date) -> Self {
        let days_since_monday = today.weekday().number_days_from_monday() as i64;
        let monday = today - Duration::days(days_since_monday);

        Self::new("This Week", monday, today)
    }

    /// The window from the first of the current month through `today`.
    pub fn month_to_date(today: Date) -> Self {
        let first_of_month = today.replace_day(1).unwrap();

        Self::new("Month to Date", first_of_month, today)
    }

    /// Whether `date` falls inside the window. Both boundaries included.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The aggregated totals for one window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSummary {
    /// The window the totals cover.
    pub window: DateWindow,
    /// Sum of the magnitudes of non-excluded negative amounts in-window.
    pub total_income: f64,
    /// Sum of non-excluded positive amounts in-window.
    pub total_expenses: f64,
    /// `total_income - total_expenses`.
    pub balance: f64,
    /// The number of transactions dated inside the window, excluded or not.
    pub transaction_count: usize,
    /// The number of excluded transactions dated inside the window. These
    /// are still visible in the table; exclusion only affects money totals.
    pub excluded_count: usize,
    /// Per-category expense sub-totals, one entry per requested rule in
    /// rule order. Sub-totals are a breakdown of `total_expenses`, not a
    /// separate bucket.
    pub category_totals: Vec<(String, f64)>,
}

/// Aggregate `transactions` over each window in one pass per window.
///
/// Excluded transactions contribute to `transaction_count` and
/// `excluded_count` but to no money total. Zero amounts count as neither
/// income nor expense. A category sub-total accumulates an expense that
/// matches the rule in addition to the main expense total.
pub fn summarize(
    transactions: &[Transaction],
    exclusions: &ExclusionSet,
    windows: &[DateWindow],
    category_rules: &[CategoryRule],
) -> Vec<WindowSummary> {
    windows
        .iter()
        .map(|window| summarize_window(transactions, exclusions, window, category_rules))
        .collect()
}

fn summarize_window(
    transactions: &[Transaction],
    exclusions: &ExclusionSet,
    window: &DateWindow,
    category_rules: &[CategoryRule],
) -> WindowSummary {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut transaction_count = 0;
    let mut excluded_count = 0;
    let mut category_totals: Vec<(String, f64)> = category_rules
        .iter()
        .map(|rule| (rule.name.clone(), 0.0))
        .collect();

    for transaction in transactions {
        if !window.contains(transaction.date) {
            continue;
        }

        transaction_count += 1;

        if exclusions.is_excluded(&transaction.id) {
            excluded_count += 1;
            continue;
        }

        if transaction.amount < 0.0 {
            total_income += transaction.amount.abs();
        } else if transaction.amount > 0.0 {
            total_expenses += transaction.amount;

            for (rule, (_, subtotal)) in category_rules.iter().zip(category_totals.iter_mut()) {
                if rule.matches(transaction) {
                    *subtotal += transaction.amount;
                }
            }
        }
    }

    WindowSummary {
        window: window.clone(),
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        transaction_count,
        excluded_count,
        category_totals,
    }
}
