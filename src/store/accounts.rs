use crate::db::Database;
use crate::error::JournalError;
use crate::models::{CreateAccountInput, TradingAccount, UpdateAccountInput};
use chrono::Utc;

fn map_row_to_account(row: &rusqlite::Row) -> rusqlite::Result<TradingAccount> {
    Ok(TradingAccount {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        initial_balance: row.get(3)?,
        currency: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

const ACCOUNT_COLUMNS: &str =
    "id, user_id, name, initial_balance, currency, created_at, updated_at";

pub fn create_account(
    db: &Database,
    user_id: &str,
    input: CreateAccountInput,
) -> Result<TradingAccount, JournalError> {
    if input.name.trim().is_empty() {
        return Err(JournalError::Validation("account name is empty".into()));
    }
    if input.currency.trim().is_empty() {
        return Err(JournalError::Validation("currency is empty".into()));
    }

    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;

    let id = format!("ACC-{}-{}", Utc::now().timestamp_millis(), uuid::Uuid::new_v4());
    let now = Utc::now().timestamp();

    conn.execute(
        "INSERT INTO trading_accounts (id, user_id, name, initial_balance, currency, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            id,
            user_id,
            input.name.trim(),
            input.initial_balance,
            input.currency.trim(),
            now,
            now
        ],
    )?;

    let account = conn.query_row(
        &format!("SELECT {} FROM trading_accounts WHERE id = ?", ACCOUNT_COLUMNS),
        [&id],
        map_row_to_account,
    )?;

    Ok(account)
}

pub fn get_account(db: &Database, id: &str) -> Result<TradingAccount, JournalError> {
    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;

    conn.query_row(
        &format!("SELECT {} FROM trading_accounts WHERE id = ?", ACCOUNT_COLUMNS),
        [id],
        map_row_to_account,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => JournalError::not_found("account", id),
        other => other.into(),
    })
}

pub fn list_accounts(db: &Database, user_id: &str) -> Result<Vec<TradingAccount>, JournalError> {
    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM trading_accounts WHERE user_id = ? ORDER BY created_at ASC",
        ACCOUNT_COLUMNS
    ))?;

    let accounts = stmt
        .query_map([user_id], map_row_to_account)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(accounts)
}

/// Ownership predicate used by callers before acting on an account.
pub fn account_belongs_to_user(
    db: &Database,
    account_id: &str,
    user_id: &str,
) -> Result<bool, JournalError> {
    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;

    let count: i32 = conn.query_row(
        "SELECT COUNT(*) FROM trading_accounts WHERE id = ? AND user_id = ?",
        [account_id, user_id],
        |row| row.get(0),
    )?;

    Ok(count > 0)
}

/// Name and currency only. The initial balance is immutable: changing it
/// would silently rewrite every derived balance in the ledger.
pub fn update_account(
    db: &Database,
    id: &str,
    input: UpdateAccountInput,
) -> Result<TradingAccount, JournalError> {
    {
        let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;

        let now = Utc::now().timestamp();

        let mut updates = vec!["updated_at = ?"];
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(now)];

        if let Some(name) = input.name {
            if name.trim().is_empty() {
                return Err(JournalError::Validation("account name is empty".into()));
            }
            updates.push("name = ?");
            values.push(Box::new(name.trim().to_string()));
        }
        if let Some(currency) = input.currency {
            updates.push("currency = ?");
            values.push(Box::new(currency.trim().to_string()));
        }

        let query = format!("UPDATE trading_accounts SET {} WHERE id = ?", updates.join(", "));
        values.push(Box::new(id.to_string()));

        let params: Vec<&dyn rusqlite::ToSql> = values.iter().map(|v| v.as_ref()).collect();
        let changed = conn.execute(&query, params.as_slice())?;
        if changed == 0 {
            return Err(JournalError::not_found("account", id));
        }
    }

    get_account(db, id)
}

/// Deletes the account and, via FK cascade, all of its journal entries.
pub fn delete_account(db: &Database, id: &str) -> Result<(), JournalError> {
    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;
    let changed = conn.execute("DELETE FROM trading_accounts WHERE id = ?", [id])?;
    if changed == 0 {
        return Err(JournalError::not_found("account", id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn input(name: &str) -> CreateAccountInput {
        CreateAccountInput {
            name: name.to_string(),
            initial_balance: 10_000.0,
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn test_create_and_get_account() {
        let db = test_db();
        let created = create_account(&db, "user-1", input("Main")).unwrap();
        assert_eq!(created.name, "Main");
        assert_eq!(created.initial_balance, 10_000.0);

        let fetched = get_account(&db, &created.id).unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.user_id, "user-1");
    }

    #[test]
    fn test_name_unique_per_user() {
        let db = test_db();
        create_account(&db, "user-1", input("Main")).unwrap();
        assert!(create_account(&db, "user-1", input("Main")).is_err());
        // Same name under another user is fine
        assert!(create_account(&db, "user-2", input("Main")).is_ok());
    }

    #[test]
    fn test_ownership_check() {
        let db = test_db();
        let acc = create_account(&db, "user-1", input("Main")).unwrap();
        assert!(account_belongs_to_user(&db, &acc.id, "user-1").unwrap());
        assert!(!account_belongs_to_user(&db, &acc.id, "user-2").unwrap());
    }

    #[test]
    fn test_update_never_touches_initial_balance() {
        let db = test_db();
        let acc = create_account(&db, "user-1", input("Main")).unwrap();

        let updated = update_account(
            &db,
            &acc.id,
            UpdateAccountInput {
                name: Some("Renamed".to_string()),
                currency: Some("EUR".to_string()),
            },
        )
        .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.currency, "EUR");
        assert_eq!(updated.initial_balance, 10_000.0);
    }

    #[test]
    fn test_get_missing_account() {
        let db = test_db();
        match get_account(&db, "nope") {
            Err(JournalError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {:?}", other.map(|a| a.id)),
        }
    }

    #[test]
    fn test_list_accounts_scoped_to_user() {
        let db = test_db();
        create_account(&db, "user-1", input("A")).unwrap();
        create_account(&db, "user-1", input("B")).unwrap();
        create_account(&db, "user-2", input("C")).unwrap();

        let mine = list_accounts(&db, "user-1").unwrap();
        assert_eq!(mine.len(), 2);
    }
}
