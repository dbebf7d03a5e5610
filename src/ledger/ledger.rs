//! Transaction time series

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English month name for a 1-based month number
pub(crate) fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month as usize - 1).min(11)]
}

/// One gathering event
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    /// Reporting bot's name
    pub bot: String,

    /// Gathered quantity
    pub quantity: i64,

    /// When the event was recorded (UTC)
    pub timestamp: DateTime<Utc>,
}

/// Aggregated total for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthTotal {
    /// Month number, 1-12
    pub month: u32,

    /// English month name
    pub name: String,

    /// Sum of quantities recorded that month
    pub total: i64,
}

/// Append-only ledger of gathering events
///
/// Entries are accepted for any bot name; the original system never
/// enforced the roster join and aggregation simply finds nothing for
/// unknown names.
pub struct TransactionLedger {
    entries: RwLock<Vec<Transaction>>,
}

impl TransactionLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Record a gathering event now
    pub async fn record(&self, bot: &str, quantity: i64) {
        self.record_at(bot, quantity, Utc::now()).await;
    }

    /// Record a gathering event with an explicit timestamp
    pub async fn record_at(&self, bot: &str, quantity: i64, timestamp: DateTime<Utc>) {
        tracing::debug!(bot = %bot, quantity = quantity, "Transaction recorded");
        self.entries.write().await.push(Transaction {
            bot: bot.to_string(),
            quantity,
            timestamp,
        });
    }

    /// All events for one bot, oldest first
    pub async fn for_bot(&self, bot: &str) -> Vec<Transaction> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|t| t.bot == bot)
            .cloned()
            .collect()
    }

    /// Per-month totals for one bot and year, calendar order
    ///
    /// Only months with at least one event appear.
    pub async fn monthly_totals(&self, bot: &str, year: i32) -> Vec<MonthTotal> {
        let entries = self.entries.read().await;

        let mut totals: BTreeMap<u32, i64> = BTreeMap::new();
        for t in entries
            .iter()
            .filter(|t| t.bot == bot && t.timestamp.year() == year)
        {
            *totals.entry(t.timestamp.month()).or_insert(0) += t.quantity;
        }

        totals
            .into_iter()
            .map(|(month, total)| MonthTotal {
                month,
                name: month_name(month).to_string(),
                total,
            })
            .collect()
    }

    /// Per-day totals for one bot, year and month, calendar order
    pub async fn daily_totals(&self, bot: &str, year: i32, month: u32) -> Vec<(u32, i64)> {
        let entries = self.entries.read().await;

        let mut totals: BTreeMap<u32, i64> = BTreeMap::new();
        for t in entries.iter().filter(|t| {
            t.bot == bot && t.timestamp.year() == year && t.timestamp.month() == month
        }) {
            *totals.entry(t.timestamp.day()).or_insert(0) += t.quantity;
        }

        totals.into_iter().collect()
    }

    /// Number of recorded events
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the ledger holds no events
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for TransactionLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn ts(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_monthly_totals_group_by_month() {
        let ledger = TransactionLedger::new();

        ledger.record_at("miner-01", 100, ts(2026, 1, 3)).await;
        ledger.record_at("miner-01", 250, ts(2026, 1, 20)).await;
        ledger.record_at("miner-01", 400, ts(2026, 3, 5)).await;

        let totals = ledger.monthly_totals("miner-01", 2026).await;
        assert_eq!(
            totals,
            vec![
                MonthTotal {
                    month: 1,
                    name: "January".to_string(),
                    total: 350
                },
                MonthTotal {
                    month: 3,
                    name: "March".to_string(),
                    total: 400
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_monthly_totals_scoped_to_year_and_bot() {
        let ledger = TransactionLedger::new();

        ledger.record_at("miner-01", 100, ts(2025, 6, 1)).await;
        ledger.record_at("miner-01", 200, ts(2026, 6, 1)).await;
        ledger.record_at("miner-02", 999, ts(2026, 6, 1)).await;

        let totals = ledger.monthly_totals("miner-01", 2026).await;
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].total, 200);
    }

    #[tokio::test]
    async fn test_daily_totals() {
        let ledger = TransactionLedger::new();

        ledger.record_at("miner-01", 10, ts(2026, 7, 2)).await;
        ledger.record_at("miner-01", 15, ts(2026, 7, 2)).await;
        ledger.record_at("miner-01", 30, ts(2026, 7, 9)).await;
        ledger.record_at("miner-01", 99, ts(2026, 8, 1)).await;

        let totals = ledger.daily_totals("miner-01", 2026, 7).await;
        assert_eq!(totals, vec![(2, 25), (9, 30)]);
    }

    #[tokio::test]
    async fn test_for_bot_filters() {
        let ledger = TransactionLedger::new();

        ledger.record_at("miner-01", 10, ts(2026, 7, 2)).await;
        ledger.record_at("miner-02", 20, ts(2026, 7, 2)).await;

        let events = ledger.for_bot("miner-01").await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].quantity, 10);
        assert_eq!(ledger.len().await, 2);
    }

    #[test]
    fn test_month_name_bounds() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
    }
}
