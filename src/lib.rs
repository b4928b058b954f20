//! Pocketwatch is a single-user web dashboard for keeping an eye on recent
//! spending.
//!
//! On every page load it fetches the current month's transactions from a
//! bank aggregation API, cancels out internal transfers between the user's
//! own accounts, applies the user's manual exclusions, and shows income,
//! expense, and balance totals for the current week and month.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod endpoints;
mod feed;
mod html;
mod logging;
mod reconcile;
mod routing;
mod session;
mod timezone;

pub use app_state::AppState;
pub use feed::{ConfigError, FeedConfig, FeedError, HttpFeed, TransactionFeed};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use reconcile::{CategoryRule, DEFAULT_DAYS_WINDOW, TransferDetector};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
