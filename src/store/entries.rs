use crate::db::Database;
use crate::error::JournalError;
use crate::models::{
    ChecklistSnapshot, CreateTradeInput, CreateTransferInput, Direction, EntryKind, JournalEntry,
    TradeDetails, UpdateTradeInput,
};
use chrono::Utc;
use rusqlite::Connection;
use std::collections::HashMap;

const ENTRY_COLUMNS: &str = "id, account_id, row_number, operation_type, entered_at, time_specified, \
     amount, symbol_id, setup_id, direction, position_size, risk_percent, \
     entry_checklist_id, entry_checklist_results, exit_checklist_id, exit_checklist_results, \
     entry_emotion, exit_emotion, exited_at, net_pnl, gross_pnl, commission, swap, \
     entry_screenshot, exit_screenshot, import_fingerprint, created_at, updated_at";

fn read_snapshot(
    row: &rusqlite::Row,
    id_idx: usize,
    results_idx: usize,
) -> rusqlite::Result<Option<ChecklistSnapshot>> {
    let checklist_id: Option<String> = row.get(id_idx)?;
    let Some(checklist_id) = checklist_id else {
        return Ok(None);
    };

    let raw: Option<String> = row.get(results_idx)?;
    let results: HashMap<String, bool> = match raw {
        Some(s) => serde_json::from_str(&s).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(results_idx, rusqlite::types::Type::Text, Box::new(e))
        })?,
        None => HashMap::new(),
    };

    Ok(Some(ChecklistSnapshot {
        checklist_id,
        results,
    }))
}

fn map_row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<JournalEntry> {
    let operation_type: String = row.get(3)?;

    let kind = match operation_type.as_str() {
        "deposit" => EntryKind::Deposit {
            amount: row.get::<_, Option<f64>>(6)?.unwrap_or(0.0),
        },
        "withdrawal" => EntryKind::Withdrawal {
            amount: row.get::<_, Option<f64>>(6)?.unwrap_or(0.0),
        },
        // Unknown types degrade to a pnl-less trade rather than failing the
        // whole listing; the engine treats them as neutral.
        _ => EntryKind::Trade(TradeDetails {
            symbol_id: row.get(7)?,
            setup_id: row.get(8)?,
            direction: row
                .get::<_, Option<String>>(9)?
                .as_deref()
                .and_then(Direction::parse),
            position_size: row.get(10)?,
            risk_percent: row.get(11)?,
            entry_checklist: read_snapshot(row, 12, 13)?,
            exit_checklist: read_snapshot(row, 14, 15)?,
            entry_emotion: row.get(16)?,
            exit_emotion: row.get(17)?,
            exited_at: row.get(18)?,
            net_pnl: row.get(19)?,
            gross_pnl: row.get(20)?,
            commission: row.get(21)?,
            swap: row.get(22)?,
            entry_screenshot: row.get(23)?,
            exit_screenshot: row.get(24)?,
        }),
    };

    Ok(JournalEntry {
        id: row.get(0)?,
        account_id: row.get(1)?,
        row_number: row.get(2)?,
        entered_at: row.get(4)?,
        time_specified: row.get::<_, i32>(5)? == 1,
        kind,
        import_fingerprint: row.get(25)?,
        created_at: row.get(26)?,
        updated_at: row.get(27)?,
    })
}

fn snapshot_columns(snap: &Option<ChecklistSnapshot>) -> Result<(Option<String>, Option<String>), JournalError> {
    match snap {
        None => Ok((None, None)),
        Some(s) => Ok((
            Some(s.checklist_id.clone()),
            Some(serde_json::to_string(&s.results)?),
        )),
    }
}

fn fetch_entry(conn: &Connection, id: &str) -> Result<JournalEntry, JournalError> {
    conn.query_row(
        &format!("SELECT {} FROM journal_entries WHERE id = ?", ENTRY_COLUMNS),
        [id],
        map_row_to_entry,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => JournalError::not_found("entry", id),
        other => other.into(),
    })
}

/// Insert one entry, assigning one past the account's current maximum row
/// number. Deleting a middle entry leaves a permanent hole; deleting the
/// tail entry lets its number be reused by the next insert. Order within
/// the account is correct either way.
fn insert_entry(
    conn: &Connection,
    account_id: &str,
    entered_at: i64,
    time_specified: bool,
    kind: &EntryKind,
    fingerprint: Option<&str>,
) -> Result<String, JournalError> {
    let account_exists: i32 = conn.query_row(
        "SELECT COUNT(*) FROM trading_accounts WHERE id = ?",
        [account_id],
        |row| row.get(0),
    )?;
    if account_exists == 0 {
        return Err(JournalError::not_found("account", account_id));
    }

    let row_number: i64 = conn.query_row(
        "SELECT COALESCE(MAX(row_number), 0) + 1 FROM journal_entries WHERE account_id = ?",
        [account_id],
        |row| row.get(0),
    )?;

    let id = format!("ENTRY-{}-{}", Utc::now().timestamp_millis(), uuid::Uuid::new_v4());
    let now = Utc::now().timestamp();

    let (amount, trade): (Option<f64>, Option<&TradeDetails>) = match kind {
        EntryKind::Trade(t) => (None, Some(t)),
        EntryKind::Deposit { amount } => (Some(*amount), None),
        EntryKind::Withdrawal { amount } => (Some(*amount), None),
    };

    let (entry_cl_id, entry_cl_results) =
        snapshot_columns(&trade.and_then(|t| t.entry_checklist.clone()))?;
    let (exit_cl_id, exit_cl_results) =
        snapshot_columns(&trade.and_then(|t| t.exit_checklist.clone()))?;

    conn.execute(
        "INSERT INTO journal_entries (
            id, account_id, row_number, operation_type, entered_at, time_specified,
            amount, symbol_id, setup_id, direction, position_size, risk_percent,
            entry_checklist_id, entry_checklist_results, exit_checklist_id, exit_checklist_results,
            entry_emotion, exit_emotion, exited_at, net_pnl, gross_pnl, commission, swap,
            entry_screenshot, exit_screenshot, import_fingerprint, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            id,
            account_id,
            row_number,
            kind.operation_type(),
            entered_at,
            if time_specified { 1 } else { 0 },
            amount,
            trade.and_then(|t| t.symbol_id.clone()),
            trade.and_then(|t| t.setup_id.clone()),
            trade.and_then(|t| t.direction.map(|d| d.as_str())),
            trade.and_then(|t| t.position_size),
            trade.and_then(|t| t.risk_percent),
            entry_cl_id,
            entry_cl_results,
            exit_cl_id,
            exit_cl_results,
            trade.and_then(|t| t.entry_emotion.clone()),
            trade.and_then(|t| t.exit_emotion.clone()),
            trade.and_then(|t| t.exited_at),
            trade.and_then(|t| t.net_pnl),
            trade.and_then(|t| t.gross_pnl),
            trade.and_then(|t| t.commission),
            trade.and_then(|t| t.swap),
            trade.and_then(|t| t.entry_screenshot.clone()),
            trade.and_then(|t| t.exit_screenshot.clone()),
            fingerprint,
            now,
            now
        ],
    )?;

    Ok(id)
}

pub fn create_trade_entry(
    db: &Database,
    account_id: &str,
    input: CreateTradeInput,
) -> Result<JournalEntry, JournalError> {
    let details = TradeDetails {
        symbol_id: input.symbol_id,
        setup_id: input.setup_id,
        direction: input.direction,
        position_size: input.position_size,
        risk_percent: input.risk_percent,
        entry_checklist: input.entry_checklist,
        entry_emotion: input.entry_emotion,
        entry_screenshot: input.entry_screenshot,
        ..TradeDetails::default()
    };

    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;
    let tx = conn.unchecked_transaction()?;
    let id = insert_entry(
        &tx,
        account_id,
        input.entered_at,
        input.time_specified,
        &EntryKind::Trade(details),
        None,
    )?;
    tx.commit()?;

    fetch_entry(&conn, &id)
}

pub fn create_deposit(
    db: &Database,
    account_id: &str,
    input: CreateTransferInput,
) -> Result<JournalEntry, JournalError> {
    create_transfer(db, account_id, input, false)
}

pub fn create_withdrawal(
    db: &Database,
    account_id: &str,
    input: CreateTransferInput,
) -> Result<JournalEntry, JournalError> {
    create_transfer(db, account_id, input, true)
}

/// Callers pass a positive magnitude; a withdrawal is persisted with a
/// negated amount so every stored amount is a signed balance effect.
fn create_transfer(
    db: &Database,
    account_id: &str,
    input: CreateTransferInput,
    is_withdrawal: bool,
) -> Result<JournalEntry, JournalError> {
    if !input.amount.is_finite() || input.amount <= 0.0 {
        return Err(JournalError::Validation(format!(
            "transfer amount must be a positive number, got {}",
            input.amount
        )));
    }

    let kind = if is_withdrawal {
        EntryKind::Withdrawal {
            amount: -input.amount,
        }
    } else {
        EntryKind::Deposit {
            amount: input.amount,
        }
    };

    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;
    let tx = conn.unchecked_transaction()?;
    let id = insert_entry(&tx, account_id, input.entered_at, input.time_specified, &kind, None)?;
    tx.commit()?;

    fetch_entry(&conn, &id)
}

/// Used by CSV import: any entry kind, with a dedupe fingerprint.
pub(crate) fn create_imported_entry(
    db: &Database,
    account_id: &str,
    entered_at: i64,
    time_specified: bool,
    kind: EntryKind,
    fingerprint: &str,
) -> Result<JournalEntry, JournalError> {
    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;
    let tx = conn.unchecked_transaction()?;
    let id = insert_entry(&tx, account_id, entered_at, time_specified, &kind, Some(fingerprint))?;
    tx.commit()?;

    fetch_entry(&conn, &id)
}

pub(crate) fn fingerprint_exists(
    db: &Database,
    account_id: &str,
    fingerprint: &str,
) -> Result<bool, JournalError> {
    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;
    let count: i32 = conn.query_row(
        "SELECT COUNT(*) FROM journal_entries WHERE account_id = ? AND import_fingerprint = ?",
        [account_id, fingerprint],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub fn get_entry(db: &Database, id: &str) -> Result<JournalEntry, JournalError> {
    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;
    fetch_entry(&conn, id)
}

/// Entries in creation order (ascending row number), the order the ledger
/// engine expects.
pub fn list_entries(db: &Database, account_id: &str) -> Result<Vec<JournalEntry>, JournalError> {
    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM journal_entries WHERE account_id = ? ORDER BY row_number ASC",
        ENTRY_COLUMNS
    ))?;

    let entries = stmt
        .query_map([account_id], map_row_to_entry)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(entries)
}

pub fn entry_belongs_to_user(
    db: &Database,
    entry_id: &str,
    user_id: &str,
) -> Result<bool, JournalError> {
    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;

    let count: i32 = conn.query_row(
        "SELECT COUNT(*) FROM journal_entries e
         JOIN trading_accounts a ON a.id = e.account_id
         WHERE e.id = ? AND a.user_id = ?",
        [entry_id, user_id],
        |row| row.get(0),
    )?;

    Ok(count > 0)
}

pub fn update_trade_entry(
    db: &Database,
    id: &str,
    input: UpdateTradeInput,
) -> Result<JournalEntry, JournalError> {
    if let Some(commission) = input.commission {
        if commission < 0.0 {
            return Err(JournalError::Validation(
                "commission is a positive magnitude".into(),
            ));
        }
    }

    {
        let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;

        let existing = fetch_entry(&conn, id)?;
        let Some(stored) = existing.trade() else {
            return Err(JournalError::Validation(format!(
                "entry {} is a {}, only trades carry trade fields",
                id,
                existing.kind.operation_type()
            )));
        };

        // The decomposition is informational but must agree with the
        // authoritative net. Validate against the merged state (input over
        // stored), so updating one side alone cannot leave the row
        // inconsistent.
        let net = input.net_pnl.or(stored.net_pnl);
        let gross = input.gross_pnl.or(stored.gross_pnl);
        let commission = input.commission.or(stored.commission);
        let swap = input.swap.or(stored.swap);
        if let (Some(net), Some(gross)) = (net, gross) {
            let expected = gross - commission.unwrap_or(0.0) + swap.unwrap_or(0.0);
            if (net - expected).abs() > 0.01 {
                return Err(JournalError::Validation(format!(
                    "net_pnl {} does not match gross {} - commission + swap = {}",
                    net, gross, expected
                )));
            }
        }

        let now = Utc::now().timestamp();

        let mut updates = vec!["updated_at = ?"];
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(now)];

        if let Some(symbol_id) = input.symbol_id {
            updates.push("symbol_id = ?");
            values.push(Box::new(symbol_id));
        }
        if let Some(setup_id) = input.setup_id {
            updates.push("setup_id = ?");
            values.push(Box::new(setup_id));
        }
        if let Some(direction) = input.direction {
            updates.push("direction = ?");
            values.push(Box::new(direction.as_str().to_string()));
        }
        if let Some(position_size) = input.position_size {
            updates.push("position_size = ?");
            values.push(Box::new(position_size));
        }
        if let Some(risk_percent) = input.risk_percent {
            updates.push("risk_percent = ?");
            values.push(Box::new(risk_percent));
        }
        if let Some(snapshot) = &input.entry_checklist {
            updates.push("entry_checklist_id = ?");
            values.push(Box::new(snapshot.checklist_id.clone()));
            updates.push("entry_checklist_results = ?");
            values.push(Box::new(serde_json::to_string(&snapshot.results)?));
        }
        if let Some(snapshot) = &input.exit_checklist {
            updates.push("exit_checklist_id = ?");
            values.push(Box::new(snapshot.checklist_id.clone()));
            updates.push("exit_checklist_results = ?");
            values.push(Box::new(serde_json::to_string(&snapshot.results)?));
        }
        if let Some(entry_emotion) = input.entry_emotion {
            updates.push("entry_emotion = ?");
            values.push(Box::new(entry_emotion));
        }
        if let Some(exit_emotion) = input.exit_emotion {
            updates.push("exit_emotion = ?");
            values.push(Box::new(exit_emotion));
        }
        if let Some(entry_screenshot) = input.entry_screenshot {
            updates.push("entry_screenshot = ?");
            values.push(Box::new(entry_screenshot));
        }
        if let Some(exit_screenshot) = input.exit_screenshot {
            updates.push("exit_screenshot = ?");
            values.push(Box::new(exit_screenshot));
        }
        if let Some(exited_at) = input.exited_at {
            updates.push("exited_at = ?");
            values.push(Box::new(exited_at));
        }
        if let Some(net_pnl) = input.net_pnl {
            updates.push("net_pnl = ?");
            values.push(Box::new(net_pnl));
        }
        if let Some(gross_pnl) = input.gross_pnl {
            updates.push("gross_pnl = ?");
            values.push(Box::new(gross_pnl));
        }
        if let Some(commission) = input.commission {
            updates.push("commission = ?");
            values.push(Box::new(commission));
        }
        if let Some(swap) = input.swap {
            updates.push("swap = ?");
            values.push(Box::new(swap));
        }

        let query = format!("UPDATE journal_entries SET {} WHERE id = ?", updates.join(", "));
        values.push(Box::new(id.to_string()));

        let params: Vec<&dyn rusqlite::ToSql> = values.iter().map(|v| v.as_ref()).collect();
        conn.execute(&query, params.as_slice())?;
    }

    get_entry(db, id)
}

/// Hard delete. Remaining entries keep their row numbers; derived balances
/// shift on the next computation.
pub fn delete_entry(db: &Database, id: &str) -> Result<(), JournalError> {
    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;
    let changed = conn.execute("DELETE FROM journal_entries WHERE id = ?", [id])?;
    if changed == 0 {
        return Err(JournalError::not_found("entry", id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::accounts::{create_account, delete_account};
    use crate::models::CreateAccountInput;

    fn test_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn account(db: &Database) -> String {
        create_account(
            db,
            "user-1",
            CreateAccountInput {
                name: "Main".to_string(),
                initial_balance: 10_000.0,
                currency: "USD".to_string(),
            },
        )
        .unwrap()
        .id
    }

    fn trade(entered_at: i64) -> CreateTradeInput {
        CreateTradeInput {
            entered_at,
            time_specified: true,
            ..CreateTradeInput::default()
        }
    }

    #[test]
    fn test_row_numbers_are_assigned_in_order() {
        let db = test_db();
        let acc = account(&db);

        let e1 = create_trade_entry(&db, &acc, trade(1_000)).unwrap();
        let e2 = create_deposit(
            &db,
            &acc,
            CreateTransferInput {
                entered_at: 2_000,
                time_specified: false,
                amount: 500.0,
            },
        )
        .unwrap();
        let e3 = create_trade_entry(&db, &acc, trade(3_000)).unwrap();

        assert_eq!(e1.row_number, 1);
        assert_eq!(e2.row_number, 2);
        assert_eq!(e3.row_number, 3);
    }

    #[test]
    fn test_row_numbers_survive_deletion() {
        let db = test_db();
        let acc = account(&db);

        let _e1 = create_trade_entry(&db, &acc, trade(1_000)).unwrap();
        let e2 = create_trade_entry(&db, &acc, trade(2_000)).unwrap();
        let e3 = create_trade_entry(&db, &acc, trade(3_000)).unwrap();

        delete_entry(&db, &e2.id).unwrap();

        let remaining = list_entries(&db, &acc).unwrap();
        let numbers: Vec<i64> = remaining.iter().map(|e| e.row_number).collect();
        assert_eq!(numbers, vec![1, 3], "no renumbering after deletion");

        // With the tail entry still present, new entries continue past it
        let e4 = create_trade_entry(&db, &acc, trade(4_000)).unwrap();
        assert_eq!(e4.row_number, 4);
        assert_eq!(e3.row_number, 3);
    }

    #[test]
    fn test_deleting_tail_entry_reuses_its_row_number() {
        let db = test_db();
        let acc = account(&db);

        let _e1 = create_trade_entry(&db, &acc, trade(1_000)).unwrap();
        let e2 = create_trade_entry(&db, &acc, trade(2_000)).unwrap();
        assert_eq!(e2.row_number, 2);

        delete_entry(&db, &e2.id).unwrap();

        // MAX+1 assignment: the freed tail number comes back
        let e3 = create_trade_entry(&db, &acc, trade(3_000)).unwrap();
        assert_eq!(e3.row_number, 2);

        let numbers: Vec<i64> = list_entries(&db, &acc)
            .unwrap()
            .iter()
            .map(|e| e.row_number)
            .collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_withdrawal_amount_is_stored_negative() {
        let db = test_db();
        let acc = account(&db);

        let w = create_withdrawal(
            &db,
            &acc,
            CreateTransferInput {
                entered_at: 1_000,
                time_specified: true,
                amount: 250.0,
            },
        )
        .unwrap();

        match w.kind {
            EntryKind::Withdrawal { amount } => assert_eq!(amount, -250.0),
            other => panic!("expected withdrawal, got {:?}", other),
        }
        assert_eq!(w.balance_effect(), -250.0);
    }

    #[test]
    fn test_transfer_rejects_non_positive_amount() {
        let db = test_db();
        let acc = account(&db);

        let input = CreateTransferInput {
            entered_at: 1_000,
            time_specified: true,
            amount: -10.0,
        };
        assert!(matches!(
            create_deposit(&db, &acc, input),
            Err(JournalError::Validation(_))
        ));
    }

    #[test]
    fn test_update_trade_roundtrips_checklist_snapshot() {
        let db = test_db();
        let acc = account(&db);
        let e = create_trade_entry(&db, &acc, trade(1_000)).unwrap();

        let mut results = HashMap::new();
        results.insert("item-1".to_string(), true);
        results.insert("item-2".to_string(), false);
        results.insert("item-3".to_string(), true);

        let updated = update_trade_entry(
            &db,
            &e.id,
            UpdateTradeInput {
                exit_checklist: Some(ChecklistSnapshot {
                    checklist_id: "cl-1".to_string(),
                    results,
                }),
                net_pnl: Some(320.0),
                exited_at: Some(2_000),
                ..UpdateTradeInput::default()
            },
        )
        .unwrap();

        let t = updated.trade().unwrap();
        let snap = t.exit_checklist.as_ref().unwrap();
        assert_eq!(snap.checklist_id, "cl-1");
        assert_eq!(snap.score(), 2);
        assert_eq!(t.net_pnl, Some(320.0));
    }

    #[test]
    fn test_update_rejects_inconsistent_pnl_breakdown() {
        let db = test_db();
        let acc = account(&db);
        let e = create_trade_entry(&db, &acc, trade(1_000)).unwrap();

        let input = UpdateTradeInput {
            net_pnl: Some(100.0),
            gross_pnl: Some(120.0),
            commission: Some(5.0),
            swap: Some(0.0),
            ..UpdateTradeInput::default()
        };
        assert!(matches!(
            update_trade_entry(&db, &e.id, input),
            Err(JournalError::Validation(_))
        ));

        // 120 - 15 + (-5) = 100, consistent
        let input = UpdateTradeInput {
            net_pnl: Some(100.0),
            gross_pnl: Some(120.0),
            commission: Some(15.0),
            swap: Some(-5.0),
            ..UpdateTradeInput::default()
        };
        assert!(update_trade_entry(&db, &e.id, input).is_ok());
    }

    #[test]
    fn test_partial_update_validates_against_stored_breakdown() {
        let db = test_db();
        let acc = account(&db);
        let e = create_trade_entry(&db, &acc, trade(1_000)).unwrap();

        // Store a consistent breakdown: 120 - 15 + (-5) = 100
        update_trade_entry(
            &db,
            &e.id,
            UpdateTradeInput {
                net_pnl: Some(100.0),
                gross_pnl: Some(120.0),
                commission: Some(15.0),
                swap: Some(-5.0),
                ..UpdateTradeInput::default()
            },
        )
        .unwrap();

        // Changing gross alone must be checked against the stored net
        let input = UpdateTradeInput {
            gross_pnl: Some(200.0),
            ..UpdateTradeInput::default()
        };
        assert!(matches!(
            update_trade_entry(&db, &e.id, input),
            Err(JournalError::Validation(_))
        ));

        // Changing both sides together stays allowed: 200 - 15 + (-5) = 180
        let input = UpdateTradeInput {
            net_pnl: Some(180.0),
            gross_pnl: Some(200.0),
            ..UpdateTradeInput::default()
        };
        let updated = update_trade_entry(&db, &e.id, input).unwrap();
        assert_eq!(updated.trade().unwrap().net_pnl, Some(180.0));
    }

    #[test]
    fn test_update_rejects_trade_fields_on_deposit() {
        let db = test_db();
        let acc = account(&db);
        let d = create_deposit(
            &db,
            &acc,
            CreateTransferInput {
                entered_at: 1_000,
                time_specified: true,
                amount: 100.0,
            },
        )
        .unwrap();

        let input = UpdateTradeInput {
            net_pnl: Some(50.0),
            ..UpdateTradeInput::default()
        };
        assert!(matches!(
            update_trade_entry(&db, &d.id, input),
            Err(JournalError::Validation(_))
        ));
    }

    #[test]
    fn test_deleting_account_cascades_to_entries() {
        let db = test_db();
        let acc = account(&db);
        let e = create_trade_entry(&db, &acc, trade(1_000)).unwrap();

        delete_account(&db, &acc).unwrap();

        assert!(matches!(
            get_entry(&db, &e.id),
            Err(JournalError::NotFound(_))
        ));
    }

    #[test]
    fn test_entry_ownership_via_account() {
        let db = test_db();
        let acc = account(&db);
        let e = create_trade_entry(&db, &acc, trade(1_000)).unwrap();

        assert!(entry_belongs_to_user(&db, &e.id, "user-1").unwrap());
        assert!(!entry_belongs_to_user(&db, &e.id, "user-2").unwrap());
    }
}
