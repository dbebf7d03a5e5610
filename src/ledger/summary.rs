//! Dashboard aggregates
//!
//! The bot-details view: this year's monthly totals, the monthly running
//! average, and the current month's per-day average counted from the
//! month's first active day.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use super::ledger::{MonthTotal, TransactionLedger};

/// Aggregate view of one bot's gathering output
#[derive(Debug, Clone, Serialize)]
pub struct BotSummary {
    /// Year the summary covers
    pub year: i32,

    /// Totals per month with data, calendar order
    pub monthly_totals: Vec<MonthTotal>,

    /// Sum over the whole year
    pub year_total: i64,

    /// Average across months with data
    pub monthly_average: f64,

    /// `monthly_average` in compact display form
    pub monthly_average_compact: String,

    /// Current month's total divided by days elapsed since the month's
    /// first active day; zero when the month has no entries or no
    /// elapsed days
    pub daily_average_this_month: f64,

    /// `daily_average_this_month` in compact display form
    pub daily_average_compact: String,
}

impl TransactionLedger {
    /// Build the bot-details aggregate view as of `now`
    pub async fn summary(&self, bot: &str, now: DateTime<Utc>) -> BotSummary {
        let year = now.year();
        let monthly_totals = self.monthly_totals(bot, year).await;
        let year_total: i64 = monthly_totals.iter().map(|m| m.total).sum();

        let monthly_average = if monthly_totals.is_empty() {
            0.0
        } else {
            year_total as f64 / monthly_totals.len() as f64
        };

        let days = self.daily_totals(bot, year, now.month()).await;
        let daily_average_this_month = match days.first() {
            Some(&(first_day, _)) => {
                let month_total: i64 = days.iter().map(|&(_, total)| total).sum();
                let elapsed = now.day() as i64 - first_day as i64;
                if elapsed > 0 {
                    month_total as f64 / elapsed as f64
                } else {
                    0.0
                }
            }
            None => 0.0,
        };

        BotSummary {
            year,
            monthly_average_compact: compact(monthly_average),
            daily_average_compact: compact(daily_average_this_month),
            monthly_totals,
            year_total,
            monthly_average,
            daily_average_this_month,
        }
    }
}

/// Render a quantity in compact display form: `950`, `1.2K`, `2.45M`, `7.1B`
///
/// Two decimals at most, trailing zeros trimmed.
pub fn compact(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };

    let mut rendered = format!("{:.2}", scaled);
    if rendered.contains('.') {
        while rendered.ends_with('0') {
            rendered.pop();
        }
        if rendered.ends_with('.') {
            rendered.pop();
        }
    }
    format!("{}{}", rendered, suffix)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn ts(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_compact_formatting() {
        assert_eq!(compact(950.0), "950");
        assert_eq!(compact(1_200.0), "1.2K");
        assert_eq!(compact(2_450_000.0), "2.45M");
        assert_eq!(compact(7_100_000_000.0), "7.1B");
        assert_eq!(compact(0.0), "0");
    }

    #[tokio::test]
    async fn test_summary_averages() {
        let ledger = TransactionLedger::new();

        // Two earlier months plus the current one
        ledger.record_at("miner-01", 3_000, ts(2026, 5, 10)).await;
        ledger.record_at("miner-01", 1_000, ts(2026, 6, 2)).await;
        ledger.record_at("miner-01", 200, ts(2026, 7, 1)).await;
        ledger.record_at("miner-01", 400, ts(2026, 7, 3)).await;

        let summary = ledger.summary("miner-01", ts(2026, 7, 5)).await;

        assert_eq!(summary.year, 2026);
        assert_eq!(summary.year_total, 4_600);
        assert_eq!(summary.monthly_totals.len(), 3);
        assert!((summary.monthly_average - 4_600.0 / 3.0).abs() < 1e-9);

        // 600 gathered since day 1, seen on day 5: 4 elapsed days
        assert!((summary.daily_average_this_month - 150.0).abs() < 1e-9);
        assert_eq!(summary.daily_average_compact, "150");
    }

    #[tokio::test]
    async fn test_summary_first_active_day_guard() {
        let ledger = TransactionLedger::new();

        // Only activity is today: zero elapsed days, average stays zero
        ledger.record_at("miner-01", 500, ts(2026, 7, 5)).await;

        let summary = ledger.summary("miner-01", ts(2026, 7, 5)).await;
        assert_eq!(summary.daily_average_this_month, 0.0);
    }

    #[tokio::test]
    async fn test_summary_empty_ledger() {
        let ledger = TransactionLedger::new();

        let summary = ledger.summary("ghost", ts(2026, 7, 5)).await;

        assert_eq!(summary.year_total, 0);
        assert!(summary.monthly_totals.is_empty());
        assert_eq!(summary.monthly_average, 0.0);
        assert_eq!(summary.daily_average_this_month, 0.0);
        assert_eq!(summary.monthly_average_compact, "0");
    }
}
