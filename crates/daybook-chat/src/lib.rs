//! Chat command routing for Daybook.
//!
//! Resolves a free-text message to exactly one reply: a canned response
//! found by typo-tolerant matching, a task or expense created through the
//! extraction capabilities, or an open-ended conversational answer.

pub mod error;
pub mod matcher;
pub mod response;
pub mod router;

pub use error::ChatError;
pub use matcher::{find_match, levenshtein, normalize, FuzzyMatcher, MatchResult, TriggerTable};
pub use response::ReplyFormatter;
pub use router::{
    Capabilities, CommandRouter, DecisionKind, Intent, IntentLayer, RouterDecision, RouterReply,
};
