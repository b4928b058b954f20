//! The transaction reconciliation engine.
//!
//! Pure, I/O-free pipeline over one fetched batch: normalize raw records
//! into the canonical model, detect offsetting transfer pairs, merge them
//! with the session's manual exclusions, and aggregate totals over the
//! requested date windows.

mod aggregate;
mod category;
mod exclusions;
mod model;
mod normalize;
mod transfer;

pub use aggregate::{DateWindow, WindowSummary, summarize};
pub use category::CategoryRule;
pub use exclusions::ExclusionSet;
pub use model::{Transaction, UNCATEGORIZED, UNKNOWN_ACCOUNT};
pub use normalize::{NormalizedBatch, SignConvention, normalize};
pub use transfer::{DEFAULT_DAYS_WINDOW, TransferDetector};
