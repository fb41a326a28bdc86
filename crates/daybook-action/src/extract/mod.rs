//! Structured extraction from free text.
//!
//! Defines the extractor traits the router calls and the rule-based
//! implementations used when no model-backed extractor is configured.

pub mod date_parser;
pub mod expense;
pub mod task;

use async_trait::async_trait;
use daybook_core::{ExtractedExpense, ExtractedTask};

use crate::error::ExtractionError;

pub use expense::RuleExpenseExtractor;
pub use task::RuleTaskExtractor;

/// Turns a free-text request into a task record.
#[async_trait]
pub trait TaskExtractor: Send + Sync {
    /// Extract task fields from the raw user text.
    async fn extract_task(&self, text: &str) -> Result<ExtractedTask, ExtractionError>;
}

/// Turns a free-text spending note into an expense record.
///
/// Missing required fields are reported through
/// [`ExtractedExpense::needs_clarification`], not as an error.
#[async_trait]
pub trait ExpenseExtractor: Send + Sync {
    /// Extract expense fields from the raw user text.
    async fn extract_expense(&self, text: &str) -> Result<ExtractedExpense, ExtractionError>;
}

/// Collapse runs of whitespace and trim separators left behind after phrases
/// are cut out of a sentence.
pub(crate) fn tidy(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | ';' | ':' | '!' | '-'))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tidy_collapses_whitespace() {
        assert_eq!(tidy("  buy   milk  "), "buy milk");
    }

    #[test]
    fn test_tidy_trims_separators() {
        assert_eq!(tidy("call mom, "), "call mom");
        assert_eq!(tidy(": file taxes."), "file taxes");
        assert_eq!(tidy(""), "");
    }
}
