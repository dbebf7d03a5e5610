//! Bot registry implementation
//!
//! The roster shared between the HTTP API and the relay. Status updates
//! are frequent and cheap; full listings are read-heavy, so the registry
//! uses a read-mostly outer map lock with one inner lock per record.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use super::bot::Bot;

/// Roster of known bots
///
/// Thread-safe via `RwLock`. The outer lock is write-acquired only when a
/// bot first registers or is removed; status updates and listings take it
/// for reading.
pub struct BotRegistry {
    /// Map of bot name to its record
    bots: RwLock<HashMap<String, Arc<RwLock<Bot>>>>,

    /// Next registration sequence number
    next_seq: AtomicU64,
}

impl BotRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            bots: RwLock::new(HashMap::new()),
            next_seq: AtomicU64::new(1),
        }
    }

    /// Login upsert: update a known bot in place, register an unknown one
    ///
    /// This is the bot's periodic hello. Returns true if the bot was
    /// newly registered. An update keeps the original registration order.
    pub async fn login(
        &self,
        name: &str,
        local_ip: &str,
        temperature: i32,
        gathering_map: &str,
    ) -> bool {
        // Fast path: known bot, update in place
        {
            let bots = self.bots.read().await;
            if let Some(entry) = bots.get(name) {
                let mut bot = entry.write().await;
                bot.local_ip = local_ip.to_string();
                bot.temperature = temperature;
                bot.gathering_map = gathering_map.to_string();

                tracing::debug!(bot = %name, ip = %local_ip, temp = temperature, "Bot login (update)");
                return false;
            }
        }

        let mut bots = self.bots.write().await;
        match bots.entry(name.to_string()) {
            Entry::Occupied(entry) => {
                // Raced another login for the same name
                let mut bot = entry.get().write().await;
                bot.local_ip = local_ip.to_string();
                bot.temperature = temperature;
                bot.gathering_map = gathering_map.to_string();
                false
            }
            Entry::Vacant(entry) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                entry.insert(Arc::new(RwLock::new(Bot::new(
                    name.to_string(),
                    local_ip.to_string(),
                    temperature,
                    gathering_map.to_string(),
                    seq,
                ))));

                tracing::info!(bot = %name, ip = %local_ip, "Bot registered");
                true
            }
        }
    }

    /// Manually register a bot with zeroed status
    ///
    /// Used by the dashboard's add form; the bot fills in its real status
    /// on its next login.
    pub async fn add(&self, name: &str, local_ip: &str) -> bool {
        self.login(name, local_ip, 0, "Unknown").await
    }

    /// Remove a bot from the roster
    pub async fn remove(&self, name: &str) -> bool {
        let removed = self.bots.write().await.remove(name).is_some();
        if removed {
            tracing::info!(bot = %name, "Bot removed");
        } else {
            tracing::warn!(bot = %name, "Remove for unknown bot");
        }
        removed
    }

    /// Update a bot's reported temperature
    ///
    /// Returns false if the bot is unknown.
    pub async fn update_temperature(&self, name: &str, temperature: i32) -> bool {
        let bots = self.bots.read().await;
        match bots.get(name) {
            Some(entry) => {
                entry.write().await.temperature = temperature;
                true
            }
            None => false,
        }
    }

    /// Update a bot's local IP
    ///
    /// Returns false if the bot is unknown.
    pub async fn update_local_ip(&self, name: &str, local_ip: &str) -> bool {
        let bots = self.bots.read().await;
        match bots.get(name) {
            Some(entry) => {
                entry.write().await.local_ip = local_ip.to_string();
                true
            }
            None => false,
        }
    }

    /// Get a snapshot of one bot's record
    pub async fn get(&self, name: &str) -> Option<Bot> {
        let bots = self.bots.read().await;
        let entry = bots.get(name)?;
        let bot = entry.read().await.clone();
        Some(bot)
    }

    /// Snapshot the full roster in registration order
    pub async fn list(&self) -> Vec<Bot> {
        let bots = self.bots.read().await;

        let mut roster = Vec::with_capacity(bots.len());
        for entry in bots.values() {
            roster.push(entry.read().await.clone());
        }
        roster.sort_by_key(|bot| bot.seq);
        roster
    }

    /// Ordered list of active stream ids
    ///
    /// The collaborator interface the relay's mix feed consumes: one id
    /// per registered bot, registration order.
    pub async fn stream_ids(&self) -> Vec<String> {
        self.list().await.into_iter().map(|bot| bot.name).collect()
    }

    /// Number of registered bots
    pub async fn len(&self) -> usize {
        self.bots.read().await.len()
    }

    /// Whether the roster is empty
    pub async fn is_empty(&self) -> bool {
        self.bots.read().await.is_empty()
    }
}

impl Default for BotRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_registers_then_updates() {
        let registry = BotRegistry::new();

        assert!(registry.login("miner-01", "10.0.0.5", 41, "frostford").await);
        assert!(!registry.login("miner-01", "10.0.0.9", 45, "emberfall").await);

        let bot = registry.get("miner-01").await.expect("known bot");
        assert_eq!(bot.local_ip, "10.0.0.9");
        assert_eq!(bot.temperature, 45);
        assert_eq!(bot.gathering_map, "emberfall");
    }

    #[tokio::test]
    async fn test_list_keeps_registration_order() {
        let registry = BotRegistry::new();

        registry.login("charlie", "10.0.0.3", 40, "m1").await;
        registry.login("alpha", "10.0.0.1", 40, "m1").await;
        registry.login("bravo", "10.0.0.2", 40, "m1").await;

        // A status update must not reorder the roster
        registry.login("charlie", "10.0.0.3", 55, "m2").await;

        let names = registry.stream_ids().await;
        assert_eq!(names, vec!["charlie", "alpha", "bravo"]);
    }

    #[tokio::test]
    async fn test_add_uses_zeroed_status() {
        let registry = BotRegistry::new();

        registry.add("miner-02", "10.0.0.7").await;

        let bot = registry.get("miner-02").await.unwrap();
        assert_eq!(bot.temperature, 0);
        assert_eq!(bot.gathering_map, "Unknown");
    }

    #[tokio::test]
    async fn test_update_temperature() {
        let registry = BotRegistry::new();
        registry.login("miner-01", "10.0.0.5", 41, "frostford").await;

        assert!(registry.update_temperature("miner-01", 63).await);
        assert_eq!(registry.get("miner-01").await.unwrap().temperature, 63);

        assert!(!registry.update_temperature("ghost", 63).await);
    }

    #[tokio::test]
    async fn test_remove() {
        let registry = BotRegistry::new();
        registry.login("miner-01", "10.0.0.5", 41, "frostford").await;

        assert!(registry.remove("miner-01").await);
        assert!(registry.get("miner-01").await.is_none());
        assert!(registry.is_empty().await);

        assert!(!registry.remove("miner-01").await);
    }
}
