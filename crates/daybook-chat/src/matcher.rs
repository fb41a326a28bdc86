//! Typo-tolerant canned-reply matching.
//!
//! A [`TriggerTable`] maps short normalized phrases to literal replies. Input
//! either equals a key, lands within an edit-distance budget of the nearest
//! key, or matches nothing. Matching never touches an external service.

use std::collections::HashMap;
use std::sync::Arc;

use daybook_core::config::{ChatConfig, TriggerEntry};

use crate::error::ChatError;

const HELP_REPLY: &str = "I can create tasks and reminders, log expenses, and chat. \
Try \"remind me to call mom tomorrow\" or \"I spent $12 on lunch\".";

/// Built-in canned replies, in lookup order.
static BUILTIN_TRIGGERS: &[(&str, &str)] = &[
    ("hello", "Hello! How can I help you today? 😊"),
    ("hi", "Hi there! What can I do for you today?"),
    ("hey", "Hey! What would you like to get done?"),
    ("good morning", "Good morning! Ready to plan your day?"),
    ("good afternoon", "Good afternoon! How is your day going?"),
    ("good evening", "Good evening! Anything to wrap up before the day ends?"),
    ("good night", "Good night! Rest well. 🌙"),
    ("how are you", "I'm doing great, thanks for asking! How can I help?"),
    ("thanks", "You're welcome! 😊"),
    ("thank you", "You're welcome! Happy to help."),
    ("bye", "Goodbye! See you soon. 👋"),
    ("goodbye", "Goodbye! See you soon. 👋"),
    ("help", HELP_REPLY),
    ("what can you do", HELP_REPLY),
    ("who are you", "I'm Daybook, your personal productivity assistant."),
];

/// Lowercase and trim, the form every trigger key is stored in.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

// =============================================================================
// TriggerTable
// =============================================================================

/// Immutable-after-construction map from trigger phrase to reply.
///
/// Iteration follows insertion order, which decides ties between keys at the
/// same edit distance.
#[derive(Debug, Clone, Default)]
pub struct TriggerTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl TriggerTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default greeting and courtesy table.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (phrase, reply) in BUILTIN_TRIGGERS {
            table.entries.push((phrase.to_string(), reply.to_string()));
            table.index.insert(phrase.to_string(), table.entries.len() - 1);
        }
        table
    }

    /// Build a table from `(phrase, reply)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ChatError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut table = Self::new();
        for (phrase, reply) in pairs {
            table.insert(phrase.as_ref(), reply)?;
        }
        Ok(table)
    }

    /// The built-in table extended with configured entries.
    pub fn from_config(config: &ChatConfig) -> Result<Self, ChatError> {
        Self::builtin().with_overrides(&config.triggers)
    }

    /// Append configured entries. A phrase that already exists keeps its
    /// position and takes the new reply.
    pub fn with_overrides(mut self, entries: &[TriggerEntry]) -> Result<Self, ChatError> {
        for entry in entries {
            self.insert(&entry.phrase, entry.reply.clone())?;
        }
        Ok(self)
    }

    fn insert(&mut self, phrase: &str, reply: impl Into<String>) -> Result<(), ChatError> {
        let key = normalize(phrase);
        if key.is_empty() {
            return Err(ChatError::EmptyTrigger);
        }
        let reply = reply.into();
        if reply.trim().is_empty() {
            return Err(ChatError::EmptyReply(key));
        }

        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = reply,
            None => {
                self.entries.push((key.clone(), reply));
                self.index.insert(key, self.entries.len() - 1);
            }
        }
        Ok(())
    }

    /// Reply for an exact (already normalized) key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&pos| self.entries[pos].1.as_str())
    }

    /// Entries in lookup order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Matching
// =============================================================================

/// Outcome of a canned-reply lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// The reply of the nearest key, and that key's distance from the input.
    Matched { reply: String, distance: usize },
    NoMatch,
}

impl MatchResult {
    pub fn reply(&self) -> Option<&str> {
        match self {
            MatchResult::Matched { reply, .. } => Some(reply),
            MatchResult::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }
}

/// Levenshtein distance over Unicode scalar values.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, a_ch) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b_ch) in b.iter().enumerate() {
            let cost = usize::from(a_ch != b_ch);
            curr[j + 1] = (curr[j] + 1).min(prev[j + 1] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Find the nearest trigger to `input` within `threshold` edits.
///
/// `input` must already be normalized. Exact keys short-circuit; otherwise
/// every key is scored and the first key seen at the minimum distance wins.
pub fn find_match(input: &str, table: &TriggerTable, threshold: usize) -> MatchResult {
    if input.is_empty() {
        return MatchResult::NoMatch;
    }

    if let Some(reply) = table.get(input) {
        return MatchResult::Matched {
            reply: reply.to_string(),
            distance: 0,
        };
    }

    let mut best: Option<(usize, &str)> = None;
    for (key, reply) in table.iter() {
        let distance = levenshtein(input, key);
        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, reply));
        }
    }

    match best {
        Some((distance, reply)) if distance <= threshold => MatchResult::Matched {
            reply: reply.to_string(),
            distance,
        },
        _ => MatchResult::NoMatch,
    }
}

// =============================================================================
// FuzzyMatcher
// =============================================================================

/// [`find_match`] with a length-aware threshold.
///
/// Inputs shorter than `min_fuzzy_length` characters only match exactly, and
/// with `scale_with_length` the budget never exceeds half the input length,
/// so "ok" or "yes" do not land on "hi" or "hey".
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    table: Arc<TriggerTable>,
    threshold: usize,
    min_fuzzy_length: usize,
    scale_with_length: bool,
}

impl FuzzyMatcher {
    pub fn new(table: Arc<TriggerTable>, config: &ChatConfig) -> Self {
        Self {
            table,
            threshold: config.fuzzy_threshold,
            min_fuzzy_length: config.min_fuzzy_length,
            scale_with_length: config.scale_threshold_with_length,
        }
    }

    pub fn table(&self) -> &TriggerTable {
        &self.table
    }

    /// Edit budget for an input of `len` characters.
    pub fn effective_threshold(&self, len: usize) -> usize {
        if len < self.min_fuzzy_length {
            0
        } else if self.scale_with_length {
            self.threshold.min(len / 2)
        } else {
            self.threshold
        }
    }

    /// Look up an already normalized input.
    pub fn lookup(&self, normalized: &str) -> MatchResult {
        let threshold = self.effective_threshold(normalized.chars().count());
        find_match(normalized, &self.table, threshold)
    }
}
