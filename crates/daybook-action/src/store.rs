//! Record persistence.
//!
//! The router only needs "persist this and give me a reference back"; the
//! [`RecordStore`] trait captures that. [`InMemoryStore`] backs the binary and
//! the tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use daybook_core::{ExtractedExpense, ExtractedTask, RecordRef};

use crate::error::StoreError;

/// Persists records created from chat messages.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create_task(&self, task: &ExtractedTask) -> Result<RecordRef, StoreError>;
    async fn create_expense(&self, expense: &ExtractedExpense) -> Result<RecordRef, StoreError>;
}

/// A task as held by [`InMemoryStore`].
#[derive(Debug, Clone, Serialize)]
pub struct StoredTask {
    pub id: Uuid,
    pub task: ExtractedTask,
    pub created_at: DateTime<Utc>,
}

/// An expense as held by [`InMemoryStore`].
#[derive(Debug, Clone, Serialize)]
pub struct StoredExpense {
    pub id: Uuid,
    pub expense: ExtractedExpense,
    pub created_at: DateTime<Utc>,
}

/// Process-local record store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tasks: Mutex<Vec<StoredTask>>,
    expenses: Mutex<Vec<StoredExpense>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all stored tasks, oldest first.
    pub fn tasks(&self) -> Vec<StoredTask> {
        self.tasks.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// Snapshot of all stored expenses, oldest first.
    pub fn expenses(&self) -> Vec<StoredExpense> {
        self.expenses.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn create_task(&self, task: &ExtractedTask) -> Result<RecordRef, StoreError> {
        if task.description.trim().is_empty() {
            return Err(StoreError::Rejected(
                "task description must not be empty".to_string(),
            ));
        }

        let id = Uuid::new_v4();
        let mut tasks = self
            .tasks
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("task lock poisoned: {}", e)))?;
        tasks.push(StoredTask {
            id,
            task: task.clone(),
            created_at: Utc::now(),
        });

        tracing::debug!(%id, total = tasks.len(), "Task stored");
        Ok(RecordRef::task(id))
    }

    async fn create_expense(&self, expense: &ExtractedExpense) -> Result<RecordRef, StoreError> {
        if expense.amount.is_some_and(|a| !a.is_finite() || a < 0.0) {
            return Err(StoreError::Rejected(
                "expense amount must be a positive number".to_string(),
            ));
        }

        let id = Uuid::new_v4();
        let mut expenses = self
            .expenses
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("expense lock poisoned: {}", e)))?;
        expenses.push(StoredExpense {
            id,
            expense: expense.clone(),
            created_at: Utc::now(),
        });

        tracing::debug!(%id, total = expenses.len(), "Expense stored");
        Ok(RecordRef::expense(id))
    }
}
