//! Rule-based task extraction.

use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use regex::Regex;

use daybook_core::{ExtractedTask, Priority};

use super::date_parser::{resolve_date, Direction};
use super::{tidy, TaskExtractor};
use crate::error::ExtractionError;

// =============================================================================
// Compiled regex sets (compiled once, reused across calls)
// =============================================================================

/// "add X to my task list" style phrasing; group 1 is the task.
static LIST_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:please\s+)?(?:add|put)\s+(.+?)\s+(?:to|on|in)\s+(?:my\s+)?(?:task|todo|to-do)s?(?:\s+list)?\s*[.!]?\s*$",
    )
    .expect("Invalid task regex")
});

/// Lead-in phrases stripped from the start of the request.
static LEAD_INS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)^\s*(?:please\s+)?(?:can\s+you\s+|could\s+you\s+)?remind\s+me\s+to\s+",
        r"(?i)^\s*(?:please\s+)?(?:add|create|make|new)\s+(?:a\s+)?(?:new\s+)?(?:task|todo|to-do)\s*(?:to\s+|for\s+|:\s*)?",
        r"(?i)^\s*(?:new\s+)?(?:task|todo|to-do)\s*:\s*",
        r"(?i)^\s*(?:please\s+)?(?:set\s+)?(?:a\s+)?reminder\s*(?:to\s+|for\s+|:\s*)",
        r"(?i)^\s*i\s+(?:need|have)\s+to\s+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid task regex"))
    .collect()
});

/// Priority phrases, most urgent first.
const PRIORITY_PHRASES: &[(Priority, &str)] = &[
    (Priority::High, r"urgent(?:ly)?|asap|important|high\s+priority"),
    (Priority::Low, r"low\s+priority|someday|whenever"),
    (Priority::Medium, r"(?:medium|normal)\s+priority"),
];

/// A priority phrase only counts as a marker where it stands apart from the
/// task itself: as the first word, as the last word, or as its own
/// comma-separated clause. Each pattern comes with its replacement.
static PRIORITY_MARKERS: LazyLock<Vec<(Priority, Vec<(Regex, &'static str)>)>> =
    LazyLock::new(|| {
        PRIORITY_PHRASES
            .iter()
            .map(|(priority, phrase)| {
                let mk = |p: String| Regex::new(&p).expect("Invalid priority regex");
                let markers = vec![
                    (mk(format!(r"(?i),\s*(?:{phrase})\s*,")), ","),
                    (mk(format!(r"(?i)^\s*(?:{phrase})\b\s*[,:\-]?")), " "),
                    (mk(format!(r"(?i)(?:^|[\s,;(\-])\s*(?:{phrase})\s*[.!)]*\s*$")), " "),
                ];
                (*priority, markers)
            })
            .collect()
    });

// =============================================================================
// RuleTaskExtractor
// =============================================================================

/// Regex and keyword based [`TaskExtractor`].
///
/// Due dates are resolved forward from today; priority defaults to medium.
#[derive(Debug, Clone, Default)]
pub struct RuleTaskExtractor {
    /// Fixed reference date; `None` uses the local date at call time.
    today: Option<NaiveDate>,
}

impl RuleTaskExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative dates against a fixed day instead of the clock.
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Synchronous core of [`TaskExtractor::extract_task`].
    pub fn parse(&self, text: &str) -> Result<ExtractedTask, ExtractionError> {
        let mut body = strip_lead_in(text);

        let due_date = match resolve_date(&body, self.today(), Direction::Forward) {
            Some(found) => {
                body = found.strip_from(&body);
                Some(found.date)
            }
            None => None,
        };

        let (priority, body) = take_priority(&body);
        let description = tidy(&body);

        if description.is_empty() {
            return Err(ExtractionError::MissingField("description".to_string()));
        }

        Ok(ExtractedTask {
            description,
            due_date,
            priority,
        })
    }
}

#[async_trait]
impl TaskExtractor for RuleTaskExtractor {
    async fn extract_task(&self, text: &str) -> Result<ExtractedTask, ExtractionError> {
        self.parse(text)
    }
}

fn strip_lead_in(text: &str) -> String {
    if let Some(task) = LIST_PHRASE.captures(text).and_then(|c| c.get(1)) {
        return task.as_str().to_string();
    }
    for re in LEAD_INS.iter() {
        if let Some(m) = re.find(text) {
            return text[m.end()..].to_string();
        }
    }
    text.to_string()
}

fn take_priority(text: &str) -> (Priority, String) {
    for (priority, markers) in PRIORITY_MARKERS.iter() {
        for (re, replacement) in markers {
            if re.is_match(text) {
                return (*priority, re.replacen(text, 1, *replacement).into_owned());
            }
        }
    }
    (Priority::Medium, text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn extractor() -> RuleTaskExtractor {
        RuleTaskExtractor::with_today(today())
    }

    #[test]
    fn test_remind_me_to_with_tomorrow() {
        let task = extractor().parse("remind me to buy milk tomorrow").unwrap();
        assert_eq!(task.description, "buy milk");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 10, 20));
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn test_task_colon_prefix() {
        let task = extractor().parse("task: pay the $50 bill").unwrap();
        assert_eq!(task.description, "pay the $50 bill");
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_add_task_to() {
        let task = extractor()
            .parse("Add a task to call the dentist on friday")
            .unwrap();
        assert_eq!(task.description, "call the dentist");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 10, 23));
    }

    #[test]
    fn test_add_to_my_todo_list() {
        let task = extractor().parse("add water the plants to my todo list").unwrap();
        assert_eq!(task.description, "water the plants");
    }

    #[test]
    fn test_urgent_priority_is_stripped() {
        let task = extractor()
            .parse("todo: urgent fix the leaking tap today")
            .unwrap();
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.description, "fix the leaking tap");
        assert_eq!(task.due_date, Some(today()));
    }

    #[test]
    fn test_low_priority() {
        let task = extractor()
            .parse("new task: reorganize bookshelf, low priority")
            .unwrap();
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.description, "reorganize bookshelf");
    }

    #[test]
    fn test_priority_word_inside_task_is_kept() {
        let task = extractor()
            .parse("remind me to send the important documents")
            .unwrap();
        assert_eq!(task.description, "send the important documents");
        assert_eq!(task.priority, Priority::Medium);

        let task = extractor()
            .parse("todo: read the normal priority queue docs")
            .unwrap();
        assert_eq!(task.description, "read the normal priority queue docs");
        assert_eq!(task.priority, Priority::Medium);

        let task = extractor()
            .parse("add a task to review the urgently needed fixes")
            .unwrap();
        assert_eq!(task.description, "review the urgently needed fixes");
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn test_trailing_priority_marker() {
        let task = extractor().parse("remind me to call the bank asap").unwrap();
        assert_eq!(task.description, "call the bank");
        assert_eq!(task.priority, Priority::High);

        let task = extractor().parse("todo: learn the banjo someday").unwrap();
        assert_eq!(task.description, "learn the banjo");
        assert_eq!(task.priority, Priority::Low);
    }

    #[test]
    fn test_priority_clause_between_commas() {
        let task = extractor()
            .parse("task: book flights, high priority, before the sale ends")
            .unwrap();
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.description, "book flights, before the sale ends");
    }

    #[test]
    fn test_reminder_for() {
        let task = extractor()
            .parse("set a reminder to renew passport in 2 weeks")
            .unwrap();
        assert_eq!(task.description, "renew passport");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 11, 2));
    }

    #[test]
    fn test_no_lead_in_keeps_text() {
        let task = extractor().parse("water plants").unwrap();
        assert_eq!(task.description, "water plants");
    }

    #[test]
    fn test_empty_description_is_missing_field() {
        let err = extractor().parse("remind me to tomorrow").unwrap_err();
        assert!(matches!(err, ExtractionError::MissingField(ref f) if f == "description"));

        let err = extractor().parse("   ").unwrap_err();
        assert!(matches!(err, ExtractionError::MissingField(_)));
    }

    #[tokio::test]
    async fn test_trait_delegates_to_parse() {
        let task = extractor()
            .extract_task("remind me to stretch")
            .await
            .unwrap();
        assert_eq!(task.description, "stretch");
    }
}
