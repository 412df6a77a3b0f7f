use serde::{Deserialize, Serialize};

/// User-scoped instrument label (e.g. "EURUSD"). Entries hold a weak
/// reference: deleting a symbol leaves entries pointing at a dangling id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingSymbol {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub created_at: i64,
}

/// User-scoped strategy/setup label, same weak-reference rules as symbols.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingSetup {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub created_at: i64,
}
