use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Buy => "buy",
            Direction::Sell => "sell",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "buy" => Some(Direction::Buy),
            "sell" => Some(Direction::Sell),
            _ => None,
        }
    }
}

/// Frozen copy of checklist results taken when the trade was recorded.
/// Keyed by item id so later edits to the checklist template never
/// change what was recorded here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecklistSnapshot {
    pub checklist_id: String,
    pub results: HashMap<String, bool>,
}

impl ChecklistSnapshot {
    /// Number of criteria marked done.
    pub fn score(&self) -> u32 {
        self.results.values().filter(|v| **v).count() as u32
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeDetails {
    pub symbol_id: Option<String>,
    pub setup_id: Option<String>,
    pub direction: Option<Direction>,
    pub position_size: Option<f64>,
    pub risk_percent: Option<f64>,

    pub entry_checklist: Option<ChecklistSnapshot>,
    pub exit_checklist: Option<ChecklistSnapshot>,
    pub entry_emotion: Option<String>,
    pub exit_emotion: Option<String>,
    pub entry_screenshot: Option<String>,
    pub exit_screenshot: Option<String>,

    pub exited_at: Option<i64>,

    /// Authoritative signed amount applied to the running balance.
    pub net_pnl: Option<f64>,
    /// Informational decomposition: net = gross - commission + swap.
    pub gross_pnl: Option<f64>,
    /// Positive magnitude.
    pub commission: Option<f64>,
    /// Signed.
    pub swap: Option<f64>,
}

/// What the entry did to the ledger. Deposits and withdrawals carry only a
/// signed amount; trade-only fields live on the trade variant so a deposit
/// with a checklist is unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "operation_type", rename_all = "lowercase")]
pub enum EntryKind {
    Trade(TradeDetails),
    /// `amount` is positive.
    Deposit { amount: f64 },
    /// `amount` is stored negative; see the store boundary.
    Withdrawal { amount: f64 },
}

impl EntryKind {
    pub fn operation_type(&self) -> &'static str {
        match self {
            EntryKind::Trade(_) => "trade",
            EntryKind::Deposit { .. } => "deposit",
            EntryKind::Withdrawal { .. } => "withdrawal",
        }
    }

    pub fn is_trade(&self) -> bool {
        matches!(self, EntryKind::Trade(_))
    }
}

/// One ledger event. `row_number` is assigned once at creation, is unique
/// and ascending within the account, and survives deletion of earlier
/// entries (no renumbering).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub account_id: String,
    pub row_number: i64,
    pub entered_at: i64,
    /// False when the user entered only a date; the time-of-day component
    /// is then hidden in views.
    pub time_specified: bool,
    #[serde(flatten)]
    pub kind: EntryKind,
    pub import_fingerprint: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl JournalEntry {
    /// Signed contribution of this entry to the running balance.
    /// A trade with no recorded pnl yet contributes nothing.
    pub fn balance_effect(&self) -> f64 {
        match &self.kind {
            EntryKind::Trade(t) => t.net_pnl.unwrap_or(0.0),
            EntryKind::Deposit { amount } => *amount,
            EntryKind::Withdrawal { amount } => *amount,
        }
    }

    pub fn trade(&self) -> Option<&TradeDetails> {
        match &self.kind {
            EntryKind::Trade(t) => Some(t),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTradeInput {
    pub entered_at: i64,
    pub time_specified: bool,
    pub symbol_id: Option<String>,
    pub setup_id: Option<String>,
    pub direction: Option<Direction>,
    pub position_size: Option<f64>,
    pub risk_percent: Option<f64>,
    pub entry_checklist: Option<ChecklistSnapshot>,
    pub entry_emotion: Option<String>,
    pub entry_screenshot: Option<String>,
}

/// Deposit or withdrawal; the caller supplies a positive magnitude and the
/// store applies the sign convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransferInput {
    pub entered_at: i64,
    pub time_specified: bool,
    pub amount: f64,
}

/// Fields editable after a trade is recorded (exit data, pnl, notes).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTradeInput {
    pub symbol_id: Option<String>,
    pub setup_id: Option<String>,
    pub direction: Option<Direction>,
    pub position_size: Option<f64>,
    pub risk_percent: Option<f64>,
    pub entry_checklist: Option<ChecklistSnapshot>,
    pub exit_checklist: Option<ChecklistSnapshot>,
    pub entry_emotion: Option<String>,
    pub exit_emotion: Option<String>,
    pub entry_screenshot: Option<String>,
    pub exit_screenshot: Option<String>,
    pub exited_at: Option<i64>,
    pub net_pnl: Option<f64>,
    pub gross_pnl: Option<f64>,
    pub commission: Option<f64>,
    pub swap: Option<f64>,
}
