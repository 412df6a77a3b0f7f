//! Balance reconstruction and account statistics.
//!
//! Balances are never stored: the account keeps its initial balance and the
//! engine rebuilds everything from the entry sequence on every read. One
//! prefix-sum pass derives per-entry views; a second trade-only pass builds
//! the aggregate statistics. Pure functions, no I/O, safe to call from any
//! number of threads.

use crate::ledger::format::weekday_label;
use crate::models::{EntryKind, JournalEntry, TradingAccount};
use serde::{Deserialize, Serialize};

/// Win/loss bands. A trade is a win above +100 and a loss below -100 of
/// account currency; everything between (inclusive) is neutral. Policy
/// constants for now; could become per-user settings.
pub const WIN_THRESHOLD: f64 = 100.0;
pub const LOSS_THRESHOLD: f64 = -100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Neutral,
}

/// Strict inequalities: exactly +100 or -100 is neutral. A trade with no
/// recorded pnl is neutral rather than an error.
pub fn classify_outcome(net_pnl: Option<f64>) -> Outcome {
    match net_pnl {
        Some(pnl) if pnl > WIN_THRESHOLD => Outcome::Win,
        Some(pnl) if pnl < LOSS_THRESHOLD => Outcome::Loss,
        _ => Outcome::Neutral,
    }
}

/// One entry plus everything derived from its position in the sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryView {
    pub entry: JournalEntry,
    /// initial balance + sum of balance effects through this entry.
    pub running_balance: f64,
    pub balance_change_percent: f64,
    /// None for deposits and withdrawals.
    pub outcome: Option<Outcome>,
    pub entry_score: u32,
    pub exit_score: u32,
    pub weekday: String,
    pub exit_weekday: Option<String>,
}

/// Zero-guard shared by per-entry and account-level views: an account opened
/// at 0 reports 0% change, never NaN or infinity.
fn balance_change_percent(initial_balance: f64, balance: f64) -> f64 {
    if initial_balance == 0.0 {
        0.0
    } else {
        (balance - initial_balance) / initial_balance * 100.0
    }
}

/// Derive per-entry views over `entries` in the caller's order (creation
/// order from the store). The running balance at position i depends on all
/// entries 0..=i, so any edit to an earlier pnl means recomputing the lot.
pub fn derive_entry_views(initial_balance: f64, entries: &[JournalEntry]) -> Vec<EntryView> {
    let mut prefix_sum = 0.0;
    let mut views = Vec::with_capacity(entries.len());

    for entry in entries {
        prefix_sum += entry.balance_effect();
        let running_balance = initial_balance + prefix_sum;

        let (outcome, entry_score, exit_score, exit_weekday) = match &entry.kind {
            EntryKind::Trade(t) => (
                Some(classify_outcome(t.net_pnl)),
                t.entry_checklist.as_ref().map(|s| s.score()).unwrap_or(0),
                t.exit_checklist.as_ref().map(|s| s.score()).unwrap_or(0),
                t.exited_at.map(weekday_label),
            ),
            _ => (None, 0, 0, None),
        };

        views.push(EntryView {
            entry: entry.clone(),
            running_balance,
            balance_change_percent: balance_change_percent(initial_balance, running_balance),
            outcome,
            entry_score,
            exit_score,
            weekday: weekday_label(entry.entered_at),
            exit_weekday,
        });
    }

    views
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountStatistics {
    pub total_trades: i32,
    pub winning_trades: i32,
    pub losing_trades: i32,
    pub neutral_trades: i32,
    pub win_rate: f64,
    /// Trade pnl only. Deposits and withdrawals move `current_balance`, not
    /// performance.
    pub total_pnl: f64,
    pub gross_profit: f64,
    /// Positive magnitude of the losing side.
    pub gross_loss: f64,
    /// gross_profit / gross_loss; infinity when there are wins but no
    /// losses, 0 when there is nothing to measure.
    pub profit_factor: f64,
    pub current_balance: f64,
    pub balance_change_percent: f64,
    /// Signed: average_loss and largest_loss are negative numbers.
    pub average_win: f64,
    pub average_loss: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
}

/// Aggregate statistics for one account. Trade entries drive every
/// performance number; the balance figures include transfers.
pub fn compute_account_statistics(
    account: &TradingAccount,
    entries: &[JournalEntry],
) -> AccountStatistics {
    let current_balance =
        account.initial_balance + entries.iter().map(|e| e.balance_effect()).sum::<f64>();

    let trade_pnls: Vec<Option<f64>> = entries
        .iter()
        .filter_map(|e| e.trade())
        .map(|t| t.net_pnl)
        .collect();

    let total_trades = trade_pnls.len() as i32;
    let mut winning_trades = 0;
    let mut losing_trades = 0;
    let mut neutral_trades = 0;
    let mut total_pnl = 0.0;
    let mut gross_profit = 0.0;
    let mut gross_loss = 0.0;
    let mut largest_win = 0.0_f64;
    let mut largest_loss = 0.0_f64;

    for pnl in &trade_pnls {
        total_pnl += pnl.unwrap_or(0.0);
        match classify_outcome(*pnl) {
            Outcome::Win => {
                let v = pnl.unwrap_or(0.0);
                winning_trades += 1;
                gross_profit += v;
                largest_win = largest_win.max(v);
            }
            Outcome::Loss => {
                let v = pnl.unwrap_or(0.0);
                losing_trades += 1;
                gross_loss += v.abs();
                largest_loss = largest_loss.min(v);
            }
            Outcome::Neutral => neutral_trades += 1,
        }
    }

    let win_rate = if total_trades > 0 {
        winning_trades as f64 / total_trades as f64 * 100.0
    } else {
        0.0
    };

    let profit_factor = if gross_loss > 0.0 {
        gross_profit / gross_loss
    } else if gross_profit > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    let average_win = if winning_trades > 0 {
        gross_profit / winning_trades as f64
    } else {
        0.0
    };
    let average_loss = if losing_trades > 0 {
        -(gross_loss / losing_trades as f64)
    } else {
        0.0
    };

    AccountStatistics {
        total_trades,
        winning_trades,
        losing_trades,
        neutral_trades,
        win_rate,
        total_pnl,
        gross_profit,
        gross_loss,
        profit_factor,
        current_balance,
        balance_change_percent: balance_change_percent(account.initial_balance, current_balance),
        average_win,
        average_loss,
        largest_win,
        largest_loss,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TradeDetails;

    fn account(initial_balance: f64) -> TradingAccount {
        TradingAccount {
            id: "ACC-1".to_string(),
            user_id: "user-1".to_string(),
            name: "Main".to_string(),
            initial_balance,
            currency: "USD".to_string(),
            created_at: 0,
            updated_at: 0,
        }
    }

    fn trade_entry(row: i64, net_pnl: Option<f64>) -> JournalEntry {
        JournalEntry {
            id: format!("ENTRY-{}", row),
            account_id: "ACC-1".to_string(),
            row_number: row,
            entered_at: 1_700_000_000 + row * 86_400,
            time_specified: true,
            kind: EntryKind::Trade(TradeDetails {
                net_pnl,
                ..TradeDetails::default()
            }),
            import_fingerprint: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn deposit_entry(row: i64, amount: f64) -> JournalEntry {
        JournalEntry {
            id: format!("ENTRY-{}", row),
            account_id: "ACC-1".to_string(),
            row_number: row,
            entered_at: 1_700_000_000 + row * 86_400,
            time_specified: false,
            kind: if amount >= 0.0 {
                EntryKind::Deposit { amount }
            } else {
                EntryKind::Withdrawal { amount }
            },
            import_fingerprint: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_outcome_thresholds_are_strict() {
        assert_eq!(classify_outcome(Some(150.0)), Outcome::Win);
        assert_eq!(classify_outcome(Some(-150.0)), Outcome::Loss);
        assert_eq!(classify_outcome(Some(100.0)), Outcome::Neutral);
        assert_eq!(classify_outcome(Some(-100.0)), Outcome::Neutral);
        assert_eq!(classify_outcome(Some(0.0)), Outcome::Neutral);
        assert_eq!(classify_outcome(None), Outcome::Neutral);
    }

    #[test]
    fn test_reference_scenario() {
        // 10,000 USD, trades +500 / -200 / +300
        let acc = account(10_000.0);
        let entries = vec![
            trade_entry(1, Some(500.0)),
            trade_entry(2, Some(-200.0)),
            trade_entry(3, Some(300.0)),
        ];

        let views = derive_entry_views(acc.initial_balance, &entries);
        let balances: Vec<f64> = views.iter().map(|v| v.running_balance).collect();
        assert_eq!(balances, vec![10_500.0, 10_300.0, 10_600.0]);

        let stats = compute_account_statistics(&acc, &entries);
        assert_eq!(stats.total_trades, 3);
        assert_eq!(stats.winning_trades, 2);
        assert_eq!(stats.losing_trades, 1);
        assert!((stats.win_rate - 66.6667).abs() < 0.01);
        assert_eq!(stats.total_pnl, 600.0);
        assert_eq!(stats.current_balance, 10_600.0);
        assert!((stats.balance_change_percent - 6.0).abs() < 1e-9);
        assert_eq!(stats.largest_win, 500.0);
        assert_eq!(stats.largest_loss, -200.0);
        assert_eq!(stats.average_win, 400.0);
        assert_eq!(stats.average_loss, -200.0);
        assert_eq!(stats.profit_factor, 800.0 / 200.0);
    }

    #[test]
    fn test_prefix_sum_equals_total() {
        let acc = account(2_500.0);
        let entries = vec![
            deposit_entry(1, 1_000.0),
            trade_entry(2, Some(-320.0)),
            trade_entry(3, None),
            deposit_entry(4, -400.0),
            trade_entry(5, Some(75.5)),
        ];

        let views = derive_entry_views(acc.initial_balance, &entries);
        let total: f64 = entries.iter().map(|e| e.balance_effect()).sum();
        let last = views.last().unwrap();
        assert!((last.running_balance - (acc.initial_balance + total)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_initial_balance_never_divides() {
        let acc = account(0.0);
        let entries = vec![trade_entry(1, Some(500.0)), trade_entry(2, Some(-700.0))];

        for view in derive_entry_views(acc.initial_balance, &entries) {
            assert_eq!(view.balance_change_percent, 0.0);
            assert!(view.balance_change_percent.is_finite());
        }

        let stats = compute_account_statistics(&acc, &entries);
        assert_eq!(stats.balance_change_percent, 0.0);
    }

    #[test]
    fn test_empty_account() {
        let acc = account(5_000.0);
        let stats = compute_account_statistics(&acc, &[]);

        assert_eq!(stats.total_trades, 0);
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.profit_factor, 0.0);
        assert_eq!(stats.current_balance, 5_000.0);
        assert_eq!(stats.total_pnl, 0.0);
        assert!(derive_entry_views(acc.initial_balance, &[]).is_empty());
    }

    #[test]
    fn test_profit_factor_without_losses_is_infinite() {
        let acc = account(1_000.0);
        let entries = vec![trade_entry(1, Some(500.0)), trade_entry(2, Some(200.0))];

        let stats = compute_account_statistics(&acc, &entries);
        assert!(stats.profit_factor.is_infinite());
    }

    #[test]
    fn test_transfers_move_balance_but_not_performance() {
        let acc = account(1_000.0);
        let entries = vec![
            deposit_entry(1, 5_000.0),
            trade_entry(2, Some(300.0)),
            deposit_entry(3, -2_000.0),
        ];

        let stats = compute_account_statistics(&acc, &entries);
        assert_eq!(stats.total_trades, 1);
        assert_eq!(stats.total_pnl, 300.0);
        assert_eq!(stats.current_balance, 4_300.0);

        let views = derive_entry_views(acc.initial_balance, &entries);
        assert_eq!(views[0].outcome, None);
        assert_eq!(views[2].outcome, None);
        assert_eq!(views[1].outcome, Some(Outcome::Win));
    }

    #[test]
    fn test_idempotence() {
        let acc = account(10_000.0);
        let entries = vec![
            trade_entry(1, Some(500.0)),
            deposit_entry(2, 100.0),
            trade_entry(3, Some(-400.0)),
        ];

        let a = compute_account_statistics(&acc, &entries);
        let b = compute_account_statistics(&acc, &entries);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_deletion_recomputes_but_keeps_row_numbers() {
        let acc = account(10_000.0);
        let mut entries = vec![
            trade_entry(1, Some(500.0)),
            trade_entry(2, Some(-200.0)),
            trade_entry(3, Some(300.0)),
        ];

        // Delete the middle entry by id, as the store would
        entries.retain(|e| e.id != "ENTRY-2");

        let views = derive_entry_views(acc.initial_balance, &entries);
        let balances: Vec<f64> = views.iter().map(|v| v.running_balance).collect();
        assert_eq!(balances, vec![10_500.0, 10_800.0]);

        let rows: Vec<i64> = views.iter().map(|v| v.entry.row_number).collect();
        assert_eq!(rows, vec![1, 3], "stored row numbers are untouched");

        let stats = compute_account_statistics(&acc, &entries);
        assert_eq!(stats.current_balance, 10_800.0);
    }

    #[test]
    fn test_checklist_scores_in_views() {
        use crate::models::ChecklistSnapshot;
        use std::collections::HashMap;

        let mut results = HashMap::new();
        for (i, v) in [true, true, false, true, false].iter().enumerate() {
            results.insert(format!("item-{}", i), *v);
        }

        let mut entry = trade_entry(1, Some(10.0));
        if let EntryKind::Trade(t) = &mut entry.kind {
            t.entry_checklist = Some(ChecklistSnapshot {
                checklist_id: "cl-1".to_string(),
                results,
            });
        }

        let views = derive_entry_views(0.0, &[entry, trade_entry(2, None)]);
        assert_eq!(views[0].entry_score, 3);
        assert_eq!(views[0].exit_score, 0);
        assert_eq!(views[1].entry_score, 0, "no checklist attached");
    }
}
