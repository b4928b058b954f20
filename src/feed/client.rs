//! The async client for the aggregation API.
//!
//! [TransactionFeed] is the collaborator seam: the dashboard only knows
//! "given a date range, return raw records and an account map, or fail with
//! a typed error". [HttpFeed] implements it over the aggregator's
//! Plaid-style POST endpoints with sequential pagination.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use time::Date;

use crate::{
    feed::{
        config::FeedConfig,
        raw::{AccountsResponse, ApiErrorBody, RawTransaction, TransactionsResponse},
    },
    reconcile::SignConvention,
};

/// The number of transactions requested per page.
const PAGE_SIZE: usize = 500;

/// The maximum number of pages fetched per request. Guards against an
/// unbounded loop if the aggregator reports an inconsistent total.
const MAX_PAGES: usize = 40;

/// An error from the aggregation API. One failure aborts the whole fetch;
/// the page handler converts the error into a user-facing warning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    /// The bank credentials behind the access token have expired; the user
    /// needs to re-link the account.
    #[error("bank connection needs updating, re-link the account: {0}")]
    AuthExpired(String),

    /// The aggregator rate limited the request. Not retried automatically.
    #[error("the aggregator rate limited the request: {0}")]
    RateLimited(String),

    /// Any other error reported by the aggregator.
    #[error("the aggregator returned an error: {0}")]
    Api(String),

    /// The aggregator could not be reached or returned an unreadable
    /// response.
    #[error("could not reach the aggregator: {0}")]
    Transport(String),

    /// The aggregator kept reporting more transactions than it returned.
    #[error("the aggregator reported an inconsistent transaction total")]
    InconsistentPagination,
}

/// Everything one fetch returns: the raw records, the account-ID-to-name
/// map resolved alongside them, and the polarity the source used.
#[derive(Debug, Clone)]
pub struct FetchedBatch {
    /// Raw transaction records across all pages, in feed order.
    pub transactions: Vec<RawTransaction>,
    /// Maps account IDs to display names.
    pub account_names: HashMap<String, String>,
    /// The polarity of the raw amounts, consumed by the normalizer.
    pub sign_convention: SignConvention,
}

/// The external transaction source.
///
/// Implementations fetch all settledable records in `[start_date, end_date]`
/// or fail with a typed [FeedError]; pagination is the implementation's
/// concern.
#[async_trait]
pub trait TransactionFeed: Send + Sync {
    /// Fetch every transaction dated within the inclusive range, along with
    /// the account map.
    async fn fetch_transactions(
        &self,
        start_date: Date,
        end_date: Date,
    ) -> Result<FetchedBatch, FeedError>;
}

/// [TransactionFeed] implementation over the aggregator's HTTP API.
pub struct HttpFeed {
    config: FeedConfig,
    client: reqwest::Client,
}

impl HttpFeed {
    /// Create a feed client for the environment in `config`.
    pub fn new(config: FeedConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_accounts(&self) -> Result<HashMap<String, String>, FeedError> {
        let url = format!("{}/accounts/get", self.config.environment.base_url());
        let body = json!({
            "client_id": self.config.client_id,
            "secret": self.config.secret,
            "access_token": self.config.access_token,
        });

        let response: AccountsResponse = self.post_json(&url, &body).await?;

        Ok(response
            .accounts
            .into_iter()
            .map(|account| (account.account_id, account.name))
            .collect())
    }

    async fn fetch_transactions_page(
        &self,
        start_date: Date,
        end_date: Date,
        offset: usize,
    ) -> Result<TransactionsResponse, FeedError> {
        let url = format!("{}/transactions/get", self.config.environment.base_url());
        let body = json!({
            "client_id": self.config.client_id,
            "secret": self.config.secret,
            "access_token": self.config.access_token,
            "start_date": start_date.to_string(),
            "end_date": end_date.to_string(),
            "options": {
                "count": PAGE_SIZE,
                "offset": offset,
            },
        });

        self.post_json(&url, &body).await
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<T, FeedError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|error| FeedError::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.json::<ApiErrorBody>().await.unwrap_or_default();
            return Err(classify_api_error(status, &error_body));
        }

        response
            .json()
            .await
            .map_err(|error| FeedError::Transport(error.to_string()))
    }
}

#[async_trait]
impl TransactionFeed for HttpFeed {
    async fn fetch_transactions(
        &self,
        start_date: Date,
        end_date: Date,
    ) -> Result<FetchedBatch, FeedError> {
        let account_names = self.fetch_accounts().await?;

        let first_page = self
            .fetch_transactions_page(start_date, end_date, 0)
            .await?;
        let total = first_page.total_transactions;
        let mut transactions = first_page.transactions;

        let mut pages_fetched = 1;
        while transactions.len() < total {
            if pages_fetched >= MAX_PAGES {
                tracing::error!(
                    "stopping pagination after {pages_fetched} pages with {} of {total} \
                     transactions fetched",
                    transactions.len()
                );
                return Err(FeedError::InconsistentPagination);
            }

            let page = self
                .fetch_transactions_page(start_date, end_date, transactions.len())
                .await?;

            if page.transactions.is_empty() {
                // The reported total can never be reached from here.
                return Err(FeedError::InconsistentPagination);
            }

            transactions.extend(page.transactions);
            pages_fetched += 1;
        }

        tracing::info!(
            "fetched {} transactions from the aggregator for {start_date} to {end_date}",
            transactions.len()
        );

        Ok(FetchedBatch {
            transactions,
            account_names,
            sign_convention: self.config.sign_convention,
        })
    }
}

/// Map an aggregator error response onto the [FeedError] taxonomy.
fn classify_api_error(status: StatusCode, body: &ApiErrorBody) -> FeedError {
    let code = body.error_code.as_deref().unwrap_or("UNKNOWN");
    let message = body
        .error_message
        .as_deref()
        .unwrap_or("no error message provided");
    let detail = format!("{message} ({code})");

    if code == "ITEM_LOGIN_REQUIRED" {
        return FeedError::AuthExpired(detail);
    }

    if code.contains("RATE_LIMIT") || status == StatusCode::TOO_MANY_REQUESTS {
        return FeedError::RateLimited(detail);
    }

    FeedError::Api(detail)
}
