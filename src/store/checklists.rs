use crate::db::Database;
use crate::error::JournalError;
use crate::models::{Checklist, ChecklistItem, ChecklistKind, CreateChecklistInput};
use chrono::Utc;
use rusqlite::Connection;

fn fetch_checklist(conn: &Connection, id: &str) -> Result<Checklist, JournalError> {
    let (user_id, kind, name, created_at, updated_at) = conn
        .query_row(
            "SELECT user_id, kind, name, created_at, updated_at FROM checklists WHERE id = ?",
            [id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, i64>(4)?,
                ))
            },
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => JournalError::not_found("checklist", id),
            other => JournalError::from(other),
        })?;

    let kind = ChecklistKind::parse(&kind)
        .ok_or_else(|| JournalError::Validation(format!("unknown checklist kind {}", kind)))?;

    let mut stmt = conn.prepare(
        "SELECT id, item_text, order_index FROM checklist_items
         WHERE checklist_id = ? ORDER BY order_index ASC",
    )?;
    let items = stmt
        .query_map([id], |row| {
            Ok(ChecklistItem {
                id: row.get(0)?,
                text: row.get(1)?,
                order_index: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(Checklist {
        id: id.to_string(),
        user_id,
        kind,
        name,
        items,
        created_at,
        updated_at,
    })
}

fn insert_items(conn: &Connection, checklist_id: &str, texts: &[String]) -> Result<(), JournalError> {
    for (index, text) in texts.iter().enumerate() {
        let item_id = format!("CLI-{}", uuid::Uuid::new_v4());
        conn.execute(
            "INSERT INTO checklist_items (id, checklist_id, item_text, order_index)
             VALUES (?, ?, ?, ?)",
            rusqlite::params![item_id, checklist_id, text, index as i32],
        )?;
    }
    Ok(())
}

pub fn create_checklist(
    db: &Database,
    user_id: &str,
    input: CreateChecklistInput,
) -> Result<Checklist, JournalError> {
    if input.name.trim().is_empty() {
        return Err(JournalError::Validation("checklist name is empty".into()));
    }

    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;
    let tx = conn.unchecked_transaction()?;

    let id = format!("CL-{}-{}", Utc::now().timestamp_millis(), uuid::Uuid::new_v4());
    let now = Utc::now().timestamp();

    tx.execute(
        "INSERT INTO checklists (id, user_id, kind, name, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
        rusqlite::params![id, user_id, input.kind.as_str(), input.name.trim(), now, now],
    )?;

    insert_items(&tx, &id, &input.items)?;
    tx.commit()?;

    fetch_checklist(&conn, &id)
}

pub fn get_checklist(db: &Database, id: &str) -> Result<Checklist, JournalError> {
    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;
    fetch_checklist(&conn, id)
}

pub fn list_checklists(
    db: &Database,
    user_id: &str,
    kind: ChecklistKind,
) -> Result<Vec<Checklist>, JournalError> {
    let ids: Vec<String> = {
        let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;
        let mut stmt = conn.prepare(
            "SELECT id FROM checklists WHERE user_id = ? AND kind = ? ORDER BY name ASC",
        )?;
        let ids = stmt
            .query_map([user_id, kind.as_str()], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        ids
    };

    ids.iter().map(|id| get_checklist(db, id)).collect()
}

pub fn checklist_belongs_to_user(
    db: &Database,
    checklist_id: &str,
    user_id: &str,
) -> Result<bool, JournalError> {
    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;
    let count: i32 = conn.query_row(
        "SELECT COUNT(*) FROM checklists WHERE id = ? AND user_id = ?",
        [checklist_id, user_id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub fn rename_checklist(db: &Database, id: &str, name: &str) -> Result<Checklist, JournalError> {
    if name.trim().is_empty() {
        return Err(JournalError::Validation("checklist name is empty".into()));
    }

    {
        let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;
        let changed = conn.execute(
            "UPDATE checklists SET name = ?, updated_at = ? WHERE id = ?",
            rusqlite::params![name.trim(), Utc::now().timestamp(), id],
        )?;
        if changed == 0 {
            return Err(JournalError::not_found("checklist", id));
        }
    }

    get_checklist(db, id)
}

/// Replace the template's item set. Historical entries are untouched: their
/// snapshots hold value copies keyed by the old item ids.
pub fn replace_checklist_items(
    db: &Database,
    id: &str,
    items: &[String],
) -> Result<Checklist, JournalError> {
    {
        let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;
        let tx = conn.unchecked_transaction()?;

        let exists: i32 = tx.query_row(
            "SELECT COUNT(*) FROM checklists WHERE id = ?",
            [id],
            |row| row.get(0),
        )?;
        if exists == 0 {
            return Err(JournalError::not_found("checklist", id));
        }

        tx.execute("DELETE FROM checklist_items WHERE checklist_id = ?", [id])?;
        insert_items(&tx, id, items)?;
        tx.execute(
            "UPDATE checklists SET updated_at = ? WHERE id = ?",
            rusqlite::params![Utc::now().timestamp(), id],
        )?;

        tx.commit()?;
    }

    get_checklist(db, id)
}

/// Entries referencing this checklist keep their snapshot and the dangling
/// id; nothing blocks the delete.
pub fn delete_checklist(db: &Database, id: &str) -> Result<(), JournalError> {
    let conn = db.conn.lock().map_err(|_| JournalError::LockPoisoned)?;
    let changed = conn.execute("DELETE FROM checklists WHERE id = ?", [id])?;
    if changed == 0 {
        return Err(JournalError::not_found("checklist", id));
    }
    Ok(())
}
