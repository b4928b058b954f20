//! HTML view functions for rendering the dashboard UI.

use maud::{Markup, html};

use crate::{
    alert::{Alert, alert_banners},
    endpoints,
    html::{base, format_currency},
    reconcile::{ExclusionSet, Transaction, WindowSummary},
};

/// Renders the dashboard page: alerts, one summary card per window, the
/// exclusion toolbar, and the transaction table.
pub(super) fn dashboard_view(
    alerts: &[Alert],
    summaries: &[WindowSummary],
    transactions: &[Transaction],
    exclusions: &ExclusionSet,
) -> Markup {
    let content = html!(
        main
        {
            h1 { "Pocketwatch" }

            (alert_banners(alerts))

            section class="summaries"
            {
                @for summary in summaries {
                    (summary_card(summary))
                }
            }

            (toolbar(exclusions))

            (transactions_table(transactions, exclusions))
        }
    );

    base("Dashboard", &content)
}

/// Renders the totals for one window as a card.
fn summary_card(summary: &WindowSummary) -> Markup {
    html!(
        div class="summary-card"
        {
            h2 { (summary.window.name) }
            p class="dates" { (summary.window.start) " to " (summary.window.end) }

            dl
            {
                dt { "Income" }
                dd class="income" { (format_currency(summary.total_income)) }

                dt { "Expenses" }
                dd class="expense" { (format_currency(summary.total_expenses)) }

                dt { "Balance" }
                dd { (format_currency(summary.balance)) }

                @for (name, subtotal) in &summary.category_totals {
                    dt { (name) }
                    dd class="expense" { (format_currency(*subtotal)) }
                }
            }

            @if summary.excluded_count > 0 {
                p class="muted"
                {
                    (summary.excluded_count) " of " (summary.transaction_count)
                    " transactions excluded from totals"
                }
            }
        }
    )
}

/// Renders the manual exclusion count with clear and refresh controls.
fn toolbar(exclusions: &ExclusionSet) -> Markup {
    html!(
        div class="toolbar"
        {
            span class="muted"
            {
                @match exclusions.user_count() {
                    0 => { "No manual exclusions" }
                    1 => { "1 manual exclusion" }
                    count => { (count) " manual exclusions" }
                }
            }

            div class="controls"
            {
                @if exclusions.user_count() > 0 {
                    form method="post" action=(endpoints::CLEAR_EXCLUSIONS_API)
                    {
                        button type="submit" { "Clear exclusions" }
                    }
                }

                form method="post" action=(endpoints::REFRESH_API)
                {
                    button type="submit" { "Refresh" }
                }
            }
        }
    )
}

/// Renders the transaction table, newest first.
///
/// Excluded rows stay visible but dimmed; exclusion only removes a
/// transaction from the money totals.
fn transactions_table(transactions: &[Transaction], exclusions: &ExclusionSet) -> Markup {
    if transactions.is_empty() {
        return html!(
            p class="muted" { "No transactions in this period." }
        );
    }

    html!(
        table
        {
            thead
            {
                tr
                {
                    th { "Date" }
                    th { "Description" }
                    th { "Account" }
                    th { "Category" }
                    th { "Amount" }
                    th { "" }
                }
            }

            tbody
            {
                @for transaction in transactions {
                    (transaction_row(transaction, exclusions))
                }
            }
        }
    )
}

fn transaction_row(transaction: &Transaction, exclusions: &ExclusionSet) -> Markup {
    let is_excluded = exclusions.is_excluded(&transaction.id);

    html!(
        tr class=[is_excluded.then_some("excluded")]
        {
            td { (transaction.date) }

            td
            {
                (transaction.description)

                @if exclusions.is_auto_excluded(&transaction.id) {
                    " "
                    span class="badge" { "transfer" }
                }
            }

            td { (transaction.account_name) }
            td { (transaction.category_label()) }
            td class="amount" { (format_currency(transaction.amount)) }
            td class="controls" { (exclusion_control(transaction, exclusions)) }
        }
    )
}

/// Renders the per-row control: "Include" for manually excluded rows,
/// "Exclude" for everything else. Auto-excluded rows still offer "Exclude"
/// so the user can pin the exclusion independently of detection.
fn exclusion_control(transaction: &Transaction, exclusions: &ExclusionSet) -> Markup {
    let (action, label) = if exclusions.is_user_excluded(&transaction.id) {
        (endpoints::INCLUDE_API, "Include")
    } else {
        (endpoints::EXCLUDE_API, "Exclude")
    };

    html!(
        form method="post" action=(action)
        {
            input type="hidden" name="transaction_id" value=(transaction.id);
            button type="submit" { (label) }
        }
    )
}
