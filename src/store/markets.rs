use crate::db::Database;
use crate::error::JournalError;
use crate::models::{TradingSetup, TradingSymbol};
use chrono::Utc;

// Symbols and setups are deliberately dumb labels. Entries reference them by
// bare id, so deleting one never touches history.

pub fn create_symbol(db: &Database, user_id: &str, name: &str) -> Result<TradingSymbol, JournalError> {
    if name.trim().is_empty() {
        return Err(JournalError::Validation("symbol name is empty".into()));
    }

    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;

    let id = format!("SYM-{}", uuid::Uuid::new_v4());
    let now = Utc::now().timestamp();

    conn.execute(
        "INSERT INTO trading_symbols (id, user_id, name, created_at) VALUES (?, ?, ?, ?)",
        rusqlite::params![id, user_id, name.trim(), now],
    )?;

    Ok(TradingSymbol {
        id,
        user_id: user_id.to_string(),
        name: name.trim().to_string(),
        created_at: now,
    })
}

pub fn list_symbols(db: &Database, user_id: &str) -> Result<Vec<TradingSymbol>, JournalError> {
    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;

    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, created_at FROM trading_symbols
         WHERE user_id = ? ORDER BY name ASC",
    )?;
    let symbols = stmt
        .query_map([user_id], |row| {
            Ok(TradingSymbol {
                id: row.get(0)?,
                user_id: row.get(1)?,
                name: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(symbols)
}

pub fn delete_symbol(db: &Database, id: &str) -> Result<(), JournalError> {
    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;
    let changed = conn.execute("DELETE FROM trading_symbols WHERE id = ?", [id])?;
    if changed == 0 {
        return Err(JournalError::not_found("symbol", id));
    }
    Ok(())
}

pub fn create_setup(db: &Database, user_id: &str, name: &str) -> Result<TradingSetup, JournalError> {
    if name.trim().is_empty() {
        return Err(JournalError::Validation("setup name is empty".into()));
    }

    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;

    let id = format!("SETUP-{}", uuid::Uuid::new_v4());
    let now = Utc::now().timestamp();

    conn.execute(
        "INSERT INTO trading_setups (id, user_id, name, created_at) VALUES (?, ?, ?, ?)",
        rusqlite::params![id, user_id, name.trim(), now],
    )?;

    Ok(TradingSetup {
        id,
        user_id: user_id.to_string(),
        name: name.trim().to_string(),
        created_at: now,
    })
}

pub fn list_setups(db: &Database, user_id: &str) -> Result<Vec<TradingSetup>, JournalError> {
    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;

    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, created_at FROM trading_setups
         WHERE user_id = ? ORDER BY name ASC",
    )?;
    let setups = stmt
        .query_map([user_id], |row| {
            Ok(TradingSetup {
                id: row.get(0)?,
                user_id: row.get(1)?,
                name: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(setups)
}

pub fn delete_setup(db: &Database, id: &str) -> Result<(), JournalError> {
    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;
    let changed = conn.execute("DELETE FROM trading_setups WHERE id = ?", [id])?;
    if changed == 0 {
        return Err(JournalError::not_found("setup", id));
    }
    Ok(())
}
