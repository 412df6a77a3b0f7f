use serde::{Deserialize, Serialize};

/// One ledger. `initial_balance` is fixed at creation; every balance shown
/// to the user is derived from it plus the entry sequence, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingAccount {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub initial_balance: f64,
    pub currency: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountInput {
    pub name: String,
    pub initial_balance: f64,
    pub currency: String,
}

/// Partial update. `initial_balance` is intentionally absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccountInput {
    pub name: Option<String>,
    pub currency: Option<String>,
}
