//! Shared application state
//!
//! One explicitly constructed bundle of the service's shared components,
//! created at startup and handed to the router. Nothing here is ambient:
//! the state lives exactly as long as the server that owns it.

use std::sync::Arc;

use crate::ledger::TransactionLedger;
use crate::registry::BotRegistry;
use crate::relay::{FrameRelay, RelayConfig};
use crate::store::FrameStore;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Bot roster
    pub registry: Arc<BotRegistry>,

    /// Gathering-transaction ledger
    pub ledger: Arc<TransactionLedger>,

    /// Last-value frame store
    pub frames: Arc<FrameStore>,

    /// Feed relay over the frame store
    pub relay: Arc<FrameRelay>,
}

impl AppState {
    /// Construct the full component graph
    pub fn new(relay_config: RelayConfig) -> Self {
        let frames = Arc::new(FrameStore::new());
        let relay = Arc::new(FrameRelay::with_config(Arc::clone(&frames), relay_config));

        Self {
            registry: Arc::new(BotRegistry::new()),
            ledger: Arc::new(TransactionLedger::new()),
            frames,
            relay,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(RelayConfig::default())
    }
}
