//! Command router: one message in, one reply out.
//!
//! Layers are tried in a fixed order and the first hit wins:
//! 1. canned reply via the fuzzy matcher (no external calls)
//! 2. task intent -> task extraction -> persistence
//! 3. expense intent -> expense extraction -> clarification or persistence
//! 4. open-ended conversational reply
//!
//! At most one external capability chain runs per message. Every failure in
//! that chain is logged and answered with the layer's fixed apology.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use daybook_action::{
    ConversationalResponder, ExpenseExtractor, InMemoryStore, OfflineResponder, RecordStore,
    RuleExpenseExtractor, RuleTaskExtractor, TaskExtractor,
};
use daybook_core::config::ChatConfig;
use daybook_core::RecordRef;

use crate::error::ChatError;
use crate::matcher::{normalize, FuzzyMatcher, MatchResult, TriggerTable};
use crate::response::{
    ReplyFormatter, EXPENSE_FAILURE_REPLY, GENERAL_FAILURE_REPLY, TASK_FAILURE_REPLY,
};

/// Substrings that mark a task or reminder request.
pub const TASK_KEYWORDS: &[&str] = &["task", "todo", "to-do", "remind me to", "reminder"];

/// Substrings that mark a spending note.
pub const EXPENSE_KEYWORDS: &[&str] = &[
    "expense", "spent", "spend", "cost", "paid", "$", "€", "£", "₹",
];

// =============================================================================
// Decisions
// =============================================================================

/// An actionable intent backed by an extraction capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Task,
    Expense,
}

/// One keyword-gated layer of the routing policy.
#[derive(Debug, Clone)]
pub struct IntentLayer {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
}

impl IntentLayer {
    /// Substring test against already lowercased text.
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|k| normalized.contains(k))
    }
}

/// Task before expense: text carrying both keyword sets is a task.
pub fn default_layers() -> Vec<IntentLayer> {
    vec![
        IntentLayer {
            intent: Intent::Task,
            keywords: TASK_KEYWORDS,
        },
        IntentLayer {
            intent: Intent::Expense,
            keywords: EXPENSE_KEYWORDS,
        },
    ]
}

/// The path chosen for a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterDecision {
    CannedReply(String),
    TaskIntent,
    ExpenseIntent,
    GeneralChat,
}

impl RouterDecision {
    pub fn kind(&self) -> DecisionKind {
        match self {
            RouterDecision::CannedReply(_) => DecisionKind::CannedReply,
            RouterDecision::TaskIntent => DecisionKind::TaskIntent,
            RouterDecision::ExpenseIntent => DecisionKind::ExpenseIntent,
            RouterDecision::GeneralChat => DecisionKind::GeneralChat,
        }
    }
}

impl From<Intent> for RouterDecision {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::Task => RouterDecision::TaskIntent,
            Intent::Expense => RouterDecision::ExpenseIntent,
        }
    }
}

/// [`RouterDecision`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    CannedReply,
    TaskIntent,
    ExpenseIntent,
    GeneralChat,
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DecisionKind::CannedReply => "canned_reply",
            DecisionKind::TaskIntent => "task_intent",
            DecisionKind::ExpenseIntent => "expense_intent",
            DecisionKind::GeneralChat => "general_chat",
        };
        f.write_str(s)
    }
}

/// What [`CommandRouter::route`] produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouterReply {
    pub text: String,
    pub decision: DecisionKind,
    /// Reference to the record created while handling the message, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<RecordRef>,
}

impl RouterReply {
    fn new(text: impl Into<String>, decision: DecisionKind) -> Self {
        Self {
            text: text.into(),
            decision,
            created: None,
        }
    }
}

// =============================================================================
// CommandRouter
// =============================================================================

/// External services the router calls.
#[derive(Clone)]
pub struct Capabilities {
    pub tasks: Arc<dyn TaskExtractor>,
    pub expenses: Arc<dyn ExpenseExtractor>,
    pub responder: Arc<dyn ConversationalResponder>,
    pub store: Arc<dyn RecordStore>,
}

impl Capabilities {
    /// Rule-based extractors and the offline responder over `store`.
    pub fn offline(store: Arc<dyn RecordStore>) -> Self {
        Self {
            tasks: Arc::new(RuleTaskExtractor::new()),
            expenses: Arc::new(RuleExpenseExtractor::new()),
            responder: Arc::new(OfflineResponder),
            store,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::offline(Arc::new(InMemoryStore::new()))
    }
}

/// Routes a free-text message to exactly one reply.
///
/// Holds no mutable state; share it behind an `Arc` across requests.
pub struct CommandRouter {
    matcher: FuzzyMatcher,
    layers: Vec<IntentLayer>,
    caps: Capabilities,
    formatter: ReplyFormatter,
    call_timeout: Duration,
}

impl CommandRouter {
    pub fn new(table: Arc<TriggerTable>, config: &ChatConfig, caps: Capabilities) -> Self {
        Self {
            matcher: FuzzyMatcher::new(table, config),
            layers: default_layers(),
            caps,
            formatter: ReplyFormatter::new(config.currency_symbol.clone()),
            call_timeout: Duration::from_secs(config.external_timeout_secs),
        }
    }

    /// Override the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Choose a path for `text` without calling any external service.
    pub fn decide(&self, text: &str) -> RouterDecision {
        let normalized = normalize(text);

        if let MatchResult::Matched { reply, distance } = self.matcher.lookup(&normalized) {
            debug!(distance, "Canned reply matched");
            return RouterDecision::CannedReply(reply);
        }

        self.layers
            .iter()
            .find(|layer| layer.matches(&normalized))
            .map(|layer| RouterDecision::from(layer.intent))
            .unwrap_or(RouterDecision::GeneralChat)
    }

    /// Handle one message, returning the reply text only.
    pub async fn handle(&self, text: &str) -> String {
        self.route(text).await.text
    }

    /// Handle one message. Never fails: every path ends in a reply.
    pub async fn route(&self, text: &str) -> RouterReply {
        let decision = self.decide(text);
        let kind = decision.kind();
        debug!(decision = %kind, "Routing message");

        match decision {
            RouterDecision::CannedReply(reply) => RouterReply::new(reply, kind),
            RouterDecision::TaskIntent => match self.run_task(text).await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(error = %e, "Task layer failed");
                    RouterReply::new(TASK_FAILURE_REPLY, kind)
                }
            },
            RouterDecision::ExpenseIntent => match self.run_expense(text).await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(error = %e, "Expense layer failed");
                    RouterReply::new(EXPENSE_FAILURE_REPLY, kind)
                }
            },
            RouterDecision::GeneralChat => match self.run_general(text).await {
                Ok(reply) => RouterReply::new(reply, kind),
                Err(e) => {
                    warn!(error = %e, "Conversational fallback failed");
                    RouterReply::new(GENERAL_FAILURE_REPLY, kind)
                }
            },
        }
    }

    // -- Private helpers --

    async fn run_task(&self, text: &str) -> Result<RouterReply, ChatError> {
        let task = self.bounded(self.caps.tasks.extract_task(text)).await?;
        let created = self.bounded(self.caps.store.create_task(&task)).await?;
        info!(kind = %created.kind, id = %created.id, "Task created from chat");

        Ok(RouterReply {
            text: self.formatter.task_created(&task),
            decision: DecisionKind::TaskIntent,
            created: Some(created),
        })
    }

    async fn run_expense(&self, text: &str) -> Result<RouterReply, ChatError> {
        let expense = self.bounded(self.caps.expenses.extract_expense(text)).await?;

        if expense.needs_clarification {
            debug!("Expense needs clarification");
            return Ok(RouterReply::new(
                self.formatter.clarification(&expense),
                DecisionKind::ExpenseIntent,
            ));
        }

        let created = self.bounded(self.caps.store.create_expense(&expense)).await?;
        info!(kind = %created.kind, id = %created.id, "Expense recorded from chat");

        Ok(RouterReply {
            text: self.formatter.expense_recorded(&expense),
            decision: DecisionKind::ExpenseIntent,
            created: Some(created),
        })
    }

    async fn run_general(&self, text: &str) -> Result<String, ChatError> {
        self.bounded(self.caps.responder.reply(text)).await
    }

    /// Await an external call under the router's timeout.
    async fn bounded<T, E, F>(&self, call: F) -> Result<T, ChatError>
    where
        F: Future<Output = Result<T, E>>,
        ChatError: From<E>,
    {
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(result) => result.map_err(ChatError::from),
            Err(_) => Err(ChatError::Timeout(self.call_timeout)),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
