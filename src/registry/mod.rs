//! Bot roster
//!
//! The registry tracks every bot known to the monitor: identity (name,
//! local IP) and last reported status (temperature, current gathering
//! map). Bots announce themselves with a login upsert and keep updating
//! status over the HTTP API.
//!
//! The relay consumes exactly one thing from here: the ordered list of
//! stream ids to poll each mix tick. Listing order is bot-registration
//! order, tracked with a monotonic sequence number so it stays
//! deterministic across status updates.

pub mod bot;
pub mod store;

pub use bot::Bot;
pub use store::BotRegistry;
