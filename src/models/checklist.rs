use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::ChecklistSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistKind {
    Entry,
    Exit,
}

impl ChecklistKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistKind::Entry => "entry",
            ChecklistKind::Exit => "exit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "entry" => Some(ChecklistKind::Entry),
            "exit" => Some(ChecklistKind::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    pub order_index: i32,
}

/// Reusable template. Entries never join against the live item list; they
/// keep a frozen results snapshot (see `ChecklistSnapshot`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checklist {
    pub id: String,
    pub user_id: String,
    pub kind: ChecklistKind,
    pub name: String,
    pub items: Vec<ChecklistItem>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Checklist {
    /// Freeze the current item set into a results map for one entry.
    /// `checked` holds the item ids the user ticked; unknown ids are dropped.
    pub fn snapshot(&self, checked: &[String]) -> ChecklistSnapshot {
        let mut results: HashMap<String, bool> = self
            .items
            .iter()
            .map(|item| (item.id.clone(), false))
            .collect();
        for id in checked {
            if let Some(v) = results.get_mut(id) {
                *v = true;
            }
        }
        ChecklistSnapshot {
            checklist_id: self.id.clone(),
            results,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChecklistInput {
    pub kind: ChecklistKind,
    pub name: String,
    /// Item texts in display order.
    pub items: Vec<String>,
}
