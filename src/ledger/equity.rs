use crate::models::JournalEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityCurvePoint {
    /// UTC day, YYYY-MM-DD.
    pub date: String,
    pub cumulative_pnl: f64,
    pub daily_pnl: f64,
    pub trade_count: i32,
}

/// Daily cumulative trade pnl for charting. Only closed trades count: a
/// trade needs both an exit timestamp and a recorded pnl to land on the
/// curve. Transfers never appear here. Entries with timestamps chrono cannot
/// represent are skipped rather than failing the chart.
pub fn equity_curve(entries: &[JournalEntry]) -> Vec<EquityCurvePoint> {
    let mut daily_map: HashMap<String, (f64, i32)> = HashMap::new();

    for entry in entries {
        let Some(trade) = entry.trade() else {
            continue;
        };
        let (Some(exited_at), Some(pnl)) = (trade.exited_at, trade.net_pnl) else {
            continue;
        };
        let Some(ts) = chrono::DateTime::from_timestamp(exited_at, 0) else {
            continue;
        };

        let date = ts.format("%Y-%m-%d").to_string();
        let bucket = daily_map.entry(date).or_insert((0.0, 0));
        bucket.0 += pnl;
        bucket.1 += 1;
    }

    let mut sorted_dates: Vec<_> = daily_map.into_iter().collect();
    sorted_dates.sort_by(|a, b| a.0.cmp(&b.0));

    let mut cumulative_pnl = 0.0;
    let mut result: Vec<EquityCurvePoint> = Vec::new();

    for (date, (daily_pnl, trade_count)) in sorted_dates {
        cumulative_pnl += daily_pnl;
        result.push(EquityCurvePoint {
            date,
            cumulative_pnl,
            daily_pnl,
            trade_count,
        });
    }

    result
}
