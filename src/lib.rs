//! # botwatch
//!
//! Monitoring service for a fleet of remote gathering bots.
//!
//! Each bot reports identity and status (name, local IP, temperature,
//! current map), pushes numeric gathering transactions, and publishes
//! still frames of its camera view. The service turns those frames into
//! live feeds and the transactions into aggregate views.
//!
//! ## Components
//!
//! - [`store::FrameStore`]: last-value cache of each bot's most recent
//!   frame (base64 text), one slot per stream id.
//! - [`relay::FrameRelay`]: polls the store at a fixed frequency and
//!   re-publishes frames as an MJPEG stream per bot, or as a combined
//!   newline-joined snapshot of the whole fleet.
//! - [`registry::BotRegistry`]: roster of known bots; supplies the
//!   ordered list of stream ids the relay polls.
//! - [`ledger::TransactionLedger`]: gathering-event time series with
//!   monthly and daily aggregation.
//! - [`server`]: the HTTP API tying the above together.
//!
//! ## Quick start
//!
//! ```no_run
//! use botwatch::{MonitorServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> botwatch::Result<()> {
//!     let config = ServerConfig::default();
//!     let server = MonitorServer::new(config);
//!     server.run().await
//! }
//! ```

pub mod error;
pub mod ledger;
pub mod registry;
pub mod relay;
pub mod server;
pub mod store;

pub use error::{Error, Result};
pub use ledger::TransactionLedger;
pub use registry::BotRegistry;
pub use relay::{FrameRelay, RelayConfig};
pub use server::{MonitorServer, ServerConfig};
pub use store::FrameStore;
