//! The application's route URIs.

/// The root route, which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page with transaction summaries.
pub const DASHBOARD_VIEW: &str = "/dashboard";

/// The route for manually excluding a transaction from the totals.
pub const EXCLUDE_API: &str = "/api/exclude";
/// The route for re-including a manually excluded transaction.
pub const INCLUDE_API: &str = "/api/include";
/// The route for clearing all manual exclusions.
pub const CLEAR_EXCLUSIONS_API: &str = "/api/exclusions/clear";
/// The route for re-fetching transaction data.
pub const REFRESH_API: &str = "/api/refresh";
