//! The dashboard page and its exclusion controls.
//!
//! This module contains:
//! - Route handlers for displaying the dashboard and editing manual
//!   exclusions
//! - HTML view functions for rendering the dashboard UI

mod handlers;
mod view;

pub use handlers::{
    ExclusionForm, clear_exclusions, exclude_transaction, get_dashboard_page, include_transaction,
    refresh_dashboard,
};
