//! Capabilities consumed by the Daybook command router.
//!
//! Structured extraction of tasks and expenses from free text, record
//! persistence, and open-ended conversational replies. Each capability is an
//! async trait with a default implementation that works offline.

pub mod error;
pub mod extract;
pub mod responder;
pub mod store;

pub use error::{ExtractionError, ResponderError, StoreError};
pub use extract::{ExpenseExtractor, RuleExpenseExtractor, RuleTaskExtractor, TaskExtractor};
pub use responder::{ConversationalResponder, LlmResponder, OfflineResponder};
pub use store::{InMemoryStore, RecordStore, StoredExpense, StoredTask};
