//! Route handlers for the dashboard page and its exclusion controls.
//!
//! The page handler is fail-soft: a fetch failure, missing configuration, or
//! even a panic in the summary pass downgrades to an alert banner on an
//! otherwise working page rather than an error response.

use std::{
    collections::HashMap,
    panic::{AssertUnwindSafe, catch_unwind},
};

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar};
use serde::Deserialize;
use time::Date;

use crate::{
    AppState,
    alert::Alert,
    dashboard::view::dashboard_view,
    endpoints,
    feed::{FeedError, FetchedBatch},
    reconcile::{
        DateWindow, ExclusionSet, SignConvention, Transaction, WindowSummary, normalize, summarize,
    },
    session, timezone,
};

/// Form data for adding or removing one manual exclusion.
#[derive(Debug, Deserialize)]
pub struct ExclusionForm {
    /// The ID of the transaction to exclude or re-include.
    pub transaction_id: String,
}

/// Display the dashboard: totals for the current week and month, and the
/// transaction table with exclusion controls.
pub async fn get_dashboard_page(State(state): State<AppState>, jar: PrivateCookieJar) -> Response {
    let today = timezone::today_in(&state.local_timezone);
    let windows = [
        DateWindow::week_to_date(today),
        DateWindow::month_to_date(today),
    ];
    // The displayed week can start before the first of the month, so the
    // fetch range covers both windows.
    let fetch_start = windows[0].start.min(windows[1].start);

    let mut alerts = Vec::new();
    let batch = fetch_batch(&state, fetch_start, today, &mut alerts).await;

    let normalized = normalize(batch.transactions, &batch.account_names, batch.sign_convention);
    if normalized.dropped > 0 {
        tracing::info!(
            "dropped {} pending or malformed records from the fetched batch",
            normalized.dropped
        );
    }

    let user_ids = session::user_exclusions(&jar);
    let (summaries, exclusions, transactions) =
        reconcile_batch(&state, normalized.transactions, user_ids, &windows, &mut alerts);

    dashboard_view(&alerts, &summaries, &transactions, &exclusions).into_response()
}

/// Add a transaction to the user's manual exclusions, then redirect back to
/// the dashboard.
pub async fn exclude_transaction(
    jar: PrivateCookieJar,
    Form(form): Form<ExclusionForm>,
) -> impl IntoResponse {
    let jar = session::add_exclusion(jar, &form.transaction_id);

    (jar, Redirect::to(endpoints::DASHBOARD_VIEW))
}

/// Remove a transaction from the user's manual exclusions, then redirect
/// back to the dashboard.
///
/// Only the manual list is touched: a transaction the transfer detector
/// excluded stays excluded.
pub async fn include_transaction(
    jar: PrivateCookieJar,
    Form(form): Form<ExclusionForm>,
) -> impl IntoResponse {
    let jar = session::remove_exclusion(jar, &form.transaction_id);

    (jar, Redirect::to(endpoints::DASHBOARD_VIEW))
}

/// Remove every manual exclusion, then redirect back to the dashboard.
pub async fn clear_exclusions(jar: PrivateCookieJar) -> impl IntoResponse {
    let jar = session::clear_exclusions(jar);

    (jar, Redirect::to(endpoints::DASHBOARD_VIEW))
}

/// Redirect back to the dashboard, which fetches a fresh batch on every
/// load. The endpoint exists so the refresh button is a POST and the reload
/// is never cached.
pub async fn refresh_dashboard() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

/// Fetch the raw batch, downgrading every failure to an alert plus an empty
/// batch.
async fn fetch_batch(
    state: &AppState,
    start_date: Date,
    end_date: Date,
    alerts: &mut Vec<Alert>,
) -> FetchedBatch {
    let Some(feed) = &state.feed else {
        alerts.push(Alert::warning(
            "The transaction feed is not configured, so no transactions could be loaded.",
        ));
        return empty_batch();
    };

    match feed.fetch_transactions(start_date, end_date).await {
        Ok(batch) => batch,
        Err(error) => {
            tracing::warn!("could not fetch transactions: {error}");
            alerts.push(fetch_alert(&error));
            empty_batch()
        }
    }
}

fn empty_batch() -> FetchedBatch {
    FetchedBatch {
        transactions: Vec::new(),
        account_names: HashMap::new(),
        sign_convention: SignConvention::DebitPositive,
    }
}

/// The user-facing alert for a failed fetch.
///
/// An expired bank login gets its own wording because the fix is on the
/// user's side.
fn fetch_alert(error: &FeedError) -> Alert {
    match error {
        FeedError::AuthExpired(_) => Alert::warning(
            "Re-link account required: the bank connection has expired, \
             so transactions could not be refreshed.",
        ),
        FeedError::RateLimited(_) => Alert::warning(format!(
            "Transactions could not be refreshed: {error}. Try again in a minute."
        )),
        _ => Alert::danger(format!("Could not fetch transactions: {error}")),
    }
}

/// Run transfer detection, exclusion resolution, and aggregation over the
/// normalized batch.
///
/// The pass is pure arithmetic over data the feed controls, so it runs
/// behind a panic guard: if it blows up, the page renders with empty totals
/// and an alert instead of a 500.
fn reconcile_batch(
    state: &AppState,
    transactions: Vec<Transaction>,
    user_ids: Vec<String>,
    windows: &[DateWindow],
    alerts: &mut Vec<Alert>,
) -> (Vec<WindowSummary>, ExclusionSet, Vec<Transaction>) {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let auto = state.detector.detect(&transactions);
        let exclusions = ExclusionSet::resolve(user_ids.clone(), auto);
        let summaries = summarize(&transactions, &exclusions, windows, &state.category_rules);

        (summaries, exclusions)
    }));

    match outcome {
        Ok((summaries, exclusions)) => (summaries, exclusions, transactions),
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|message| message.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_owned());
            tracing::error!("the summary pass panicked: {message}");

            alerts.push(Alert::danger(
                "Something went wrong while summarizing transactions, totals are unavailable.",
            ));

            let exclusions = ExclusionSet::resolve(Vec::new(), Default::default());
            let summaries = summarize(&[], &exclusions, windows, &state.category_rules);

            (summaries, exclusions, Vec::new())
        }
    }
}
