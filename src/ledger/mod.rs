//! Gathering-transaction ledger
//!
//! Append-only time series of each bot's resource-gathering events, plus
//! the aggregation the dashboard renders: totals per month, per-day
//! breakdowns and running averages.

pub mod ledger;
pub mod summary;

pub use ledger::{MonthTotal, Transaction, TransactionLedger};
pub use summary::{compact, BotSummary};
