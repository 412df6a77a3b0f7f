//! CSV export/import of journal entries.
//!
//! Import is dedupe-safe: every row gets a fingerprint over its identifying
//! fields, rows already present in the account are skipped, and bad rows are
//! collected as errors without aborting the batch.

use crate::db::Database;
use crate::error::JournalError;
use crate::models::{Direction, EntryKind, JournalEntry, TradeDetails};
use crate::store::entries::{create_imported_entry, fingerprint_exists, list_entries};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct CsvRow {
    row_number: Option<i64>,
    operation_type: String,
    entered_at: i64,
    time_specified: Option<bool>,
    amount: Option<f64>,
    direction: Option<String>,
    position_size: Option<f64>,
    risk_percent: Option<f64>,
    net_pnl: Option<f64>,
    gross_pnl: Option<f64>,
    commission: Option<f64>,
    swap: Option<f64>,
    exited_at: Option<i64>,
    entry_emotion: Option<String>,
    exit_emotion: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResult {
    pub imported: usize,
    pub duplicates: usize,
    pub errors: Vec<String>,
}

fn to_row(entry: &JournalEntry) -> CsvRow {
    let mut row = CsvRow {
        row_number: Some(entry.row_number),
        operation_type: entry.kind.operation_type().to_string(),
        entered_at: entry.entered_at,
        time_specified: Some(entry.time_specified),
        ..CsvRow::default()
    };

    match &entry.kind {
        EntryKind::Trade(t) => {
            row.direction = t.direction.map(|d| d.as_str().to_string());
            row.position_size = t.position_size;
            row.risk_percent = t.risk_percent;
            row.net_pnl = t.net_pnl;
            row.gross_pnl = t.gross_pnl;
            row.commission = t.commission;
            row.swap = t.swap;
            row.exited_at = t.exited_at;
            row.entry_emotion = t.entry_emotion.clone();
            row.exit_emotion = t.exit_emotion.clone();
        }
        EntryKind::Deposit { amount } | EntryKind::Withdrawal { amount } => {
            row.amount = Some(*amount);
        }
    }

    row
}

/// All entries of the account as CSV, in ledger order.
pub fn export_entries(db: &Database, account_id: &str) -> Result<String, JournalError> {
    let entries = list_entries(db, account_id)?;

    let mut wtr = csv::Writer::from_writer(vec![]);
    for entry in &entries {
        wtr.serialize(to_row(entry))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| JournalError::Validation(format!("csv writer: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| JournalError::Validation(format!("csv utf8: {}", e)))
}

fn fingerprint(row: &CsvRow) -> String {
    let mut hasher = Sha256::new();
    hasher.update(
        format!(
            "{}|{}|{}|{}|{}|{}",
            row.operation_type,
            row.entered_at,
            row.net_pnl.map(|v| v.to_string()).unwrap_or_default(),
            row.amount.map(|v| v.to_string()).unwrap_or_default(),
            row.direction.as_deref().unwrap_or(""),
            row.exited_at.map(|v| v.to_string()).unwrap_or_default(),
        )
        .as_bytes(),
    );
    format!("{:x}", hasher.finalize())
}

fn row_to_kind(row: &CsvRow) -> Result<EntryKind, String> {
    match row.operation_type.as_str() {
        "trade" => Ok(EntryKind::Trade(TradeDetails {
            direction: row.direction.as_deref().and_then(Direction::parse),
            position_size: row.position_size,
            risk_percent: row.risk_percent,
            net_pnl: row.net_pnl,
            gross_pnl: row.gross_pnl,
            commission: row.commission,
            swap: row.swap,
            exited_at: row.exited_at,
            entry_emotion: row.entry_emotion.clone(),
            exit_emotion: row.exit_emotion.clone(),
            ..TradeDetails::default()
        })),
        "deposit" => {
            let amount = row.amount.unwrap_or(0.0);
            if amount <= 0.0 {
                return Err(format!("deposit needs a positive amount, got {}", amount));
            }
            Ok(EntryKind::Deposit { amount })
        }
        "withdrawal" => {
            let amount = row.amount.unwrap_or(0.0);
            if amount == 0.0 {
                return Err("withdrawal needs a non-zero amount".to_string());
            }
            // Accept either sign; stored as a negative balance effect.
            Ok(EntryKind::Withdrawal {
                amount: -amount.abs(),
            })
        }
        other => Err(format!("unknown operation_type '{}'", other)),
    }
}

pub fn import_entries(
    db: &Database,
    account_id: &str,
    csv_content: &str,
) -> Result<ImportResult, JournalError> {
    let mut rdr = csv::Reader::from_reader(csv_content.as_bytes());

    let mut imported = 0;
    let mut duplicates = 0;
    let mut errors = Vec::new();

    for (index, record) in rdr.deserialize::<CsvRow>().enumerate() {
        let line = index + 2; // header is line 1

        let row = match record {
            Ok(row) => row,
            Err(e) => {
                errors.push(format!("line {}: {}", line, e));
                continue;
            }
        };

        let kind = match row_to_kind(&row) {
            Ok(kind) => kind,
            Err(e) => {
                errors.push(format!("line {}: {}", line, e));
                continue;
            }
        };

        let fp = fingerprint(&row);
        if fingerprint_exists(db, account_id, &fp)? {
            duplicates += 1;
            continue;
        }

        match create_imported_entry(
            db,
            account_id,
            row.entered_at,
            row.time_specified.unwrap_or(true),
            kind,
            &fp,
        ) {
            Ok(_) => imported += 1,
            Err(e) => errors.push(format!("line {}: {}", line, e)),
        }
    }

    log::info!(
        "CSV import into {}: {} imported, {} duplicates, {} errors",
        account_id,
        imported,
        duplicates,
        errors.len()
    );

    Ok(ImportResult {
        imported,
        duplicates,
        errors,
    })
}
