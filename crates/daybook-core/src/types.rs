use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Task priority as understood by the assistant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        f.write_str(s)
    }
}

/// Kind of record the assistant can create.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Task,
    Expense,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Task => f.write_str("task"),
            RecordKind::Expense => f.write_str("expense"),
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// Structured task fields pulled out of free text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractedTask {
    /// What needs doing, with lead-in and date phrases removed.
    pub description: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

/// Structured expense fields pulled out of free text.
///
/// Every field except the clarification flag may be absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedExpense {
    pub amount: Option<f64>,
    /// Symbol of the currency the amount was written in, when the text named
    /// one. `None` means the configured default currency.
    pub currency: Option<String>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    /// Set when a required field (the amount) could not be determined.
    pub needs_clarification: bool,
    /// Question to put back to the user when clarification is needed.
    pub clarification_prompt: Option<String>,
}

/// Opaque reference to a record created by the persistence layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordRef {
    pub kind: RecordKind,
    pub id: Uuid,
}

impl RecordRef {
    pub fn task(id: Uuid) -> Self {
        Self {
            kind: RecordKind::Task,
            id,
        }
    }

    pub fn expense(id: Uuid) -> Self {
        Self {
            kind: RecordKind::Expense,
            id,
        }
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
