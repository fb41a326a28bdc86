//! Reply text for each routing outcome.

use daybook_core::{ExtractedExpense, ExtractedTask};

/// Sent when the task layer fails to extract or persist.
pub const TASK_FAILURE_REPLY: &str =
    "Sorry, I couldn't create that task. Could you try rephrasing it?";

/// Sent when the expense layer fails to extract or persist.
pub const EXPENSE_FAILURE_REPLY: &str =
    "Sorry, I couldn't record that expense. Could you try rephrasing it?";

/// Sent when the conversational fallback fails.
pub const GENERAL_FAILURE_REPLY: &str =
    "Sorry, I'm having trouble responding right now. Please try again in a moment.";

/// Sent when an expense needs clarification but no prompt was supplied.
pub const DEFAULT_CLARIFICATION_REPLY: &str =
    "Could you give me a few more details? I need at least the amount you spent.";

/// Formats confirmations for created records.
#[derive(Debug, Clone)]
pub struct ReplyFormatter {
    currency_symbol: String,
}

impl Default for ReplyFormatter {
    fn default() -> Self {
        Self::new("$")
    }
}

impl ReplyFormatter {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Confirmation for a created task: description, due date if any, priority.
    pub fn task_created(&self, task: &ExtractedTask) -> String {
        let mut lines = vec![format!("✅ Task created: {}", task.description)];
        if let Some(due) = task.due_date {
            lines.push(format!("📅 Due: {}", due.format("%Y-%m-%d")));
        }
        lines.push(format!("⚡ Priority: {}", task.priority));
        lines.join("\n")
    }

    /// Confirmation for a recorded expense. Absent fields are left out.
    ///
    /// The amount is shown in the currency the user wrote it in, or the
    /// configured symbol when none was named.
    pub fn expense_recorded(&self, expense: &ExtractedExpense) -> String {
        let mut lines = vec!["💰 Expense recorded!".to_string()];
        if let Some(amount) = expense.amount {
            let symbol = expense
                .currency
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(&self.currency_symbol);
            lines.push(format!("• Amount: {}{:.2}", symbol, amount));
        }
        if let Some(category) = expense.category.as_deref().filter(|c| !c.trim().is_empty()) {
            lines.push(format!("• Category: {}", category));
        }
        if let Some(date) = expense.date {
            lines.push(format!("• Date: {}", date.format("%Y-%m-%d")));
        }
        lines.join("\n")
    }

    /// The extractor's question, or the default one.
    pub fn clarification(&self, expense: &ExtractedExpense) -> String {
        expense
            .clarification_prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_CLARIFICATION_REPLY)
            .to_string()
    }
}
