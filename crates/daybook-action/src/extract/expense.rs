//! Rule-based expense extraction.

use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use regex::Regex;

use daybook_core::ExtractedExpense;

use super::date_parser::{resolve_date, Direction};
use super::ExpenseExtractor;
use crate::error::ExtractionError;

/// A number with optional thousands separators and up to two decimals.
const NUMBER: &str = r"(?P<amount>\d{1,3}(?:,\d{3})+(?:\.\d{1,2})?|\d+(?:\.\d{1,2})?)";

static AMOUNT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!(r"(?P<symbol>[$€£₹])\s?{NUMBER}"),
        format!(r"(?i)\b{NUMBER}\s?(?P<word>dollars?|bucks|usd|euros?|eur|pounds?|gbp|rupees?|inr)\b"),
        format!(r"(?i)\b(?:spent|spend|paid|pay|cost|costs)\s+(?:about\s+|around\s+|roughly\s+)?{NUMBER}\b"),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid amount regex"))
    .collect()
});

/// Currency words and the symbol each one stands for.
const CURRENCY_WORDS: &[(&[&str], &str)] = &[
    (&["dollar", "dollars", "buck", "bucks", "usd"], "$"),
    (&["euro", "euros", "eur"], "€"),
    (&["pound", "pounds", "gbp"], "£"),
    (&["rupee", "rupees", "inr"], "₹"),
];

/// Categories in priority order with their trigger words.
static CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Food",
        &[
            "coffee", "lunch", "dinner", "breakfast", "brunch", "groceries", "grocery",
            "restaurant", "food", "pizza", "snack", "snacks", "takeout", "cafe",
        ],
    ),
    (
        "Transport",
        &[
            "uber", "lyft", "taxi", "cab", "bus", "train", "metro", "subway", "gas", "fuel",
            "parking", "toll",
        ],
    ),
    (
        "Bills",
        &[
            "rent", "electricity", "water bill", "internet", "phone bill", "utilities", "bill",
            "insurance", "subscription",
        ],
    ),
    (
        "Health",
        &["doctor", "pharmacy", "medicine", "dentist", "gym", "hospital", "vitamins"],
    ),
    (
        "Entertainment",
        &["movie", "movies", "cinema", "netflix", "concert", "game", "games", "tickets", "spotify"],
    ),
    (
        "Shopping",
        &["clothes", "shoes", "amazon", "shopping", "gift", "gifts", "book", "books"],
    ),
];

static CATEGORY_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    CATEGORY_KEYWORDS
        .iter()
        .map(|(category, words)| {
            let alts: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
            let re = Regex::new(&format!(r"(?i)\b(?:{})\b", alts.join("|")))
                .expect("Invalid category regex");
            (*category, re)
        })
        .collect()
});

// =============================================================================
// RuleExpenseExtractor
// =============================================================================

/// Regex and keyword based [`ExpenseExtractor`].
///
/// Dates are resolved backward from today. A missing amount is reported as
/// needing clarification.
#[derive(Debug, Clone, Default)]
pub struct RuleExpenseExtractor {
    today: Option<NaiveDate>,
}

impl RuleExpenseExtractor {
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

    /// Synchronous core of [`ExpenseExtractor::extract_expense`].
    pub fn parse(&self, text: &str) -> ExtractedExpense {
        let (amount, currency) = match extract_amount(text) {
            Some((value, currency)) => (Some(value), currency),
            None => (None, None),
        };
        let category = categorize(text).map(str::to_string);
        let date = resolve_date(text, self.today(), Direction::Backward).map(|m| m.date);

        let needs_clarification = amount.is_none();
        let clarification_prompt = needs_clarification.then(|| match &category {
            Some(c) => format!("How much did you spend on {}?", c.to_lowercase()),
            None => "How much did you spend? Include the amount, e.g. \"I spent $12 on lunch\"."
                .to_string(),
        });

        ExtractedExpense {
            amount,
            currency,
            category,
            date,
            needs_clarification,
            clarification_prompt,
        }
    }
}

#[async_trait]
impl ExpenseExtractor for RuleExpenseExtractor {
    async fn extract_expense(&self, text: &str) -> Result<ExtractedExpense, ExtractionError> {
        Ok(self.parse(text))
    }
}

/// First well-formed amount, trying symbol, currency word, then verb forms,
/// with the currency symbol it was written in when the text names one.
fn extract_amount(text: &str) -> Option<(f64, Option<String>)> {
    AMOUNT_PATTERNS.iter().find_map(|re| {
        let caps = re.captures(text)?;
        let number = caps.name("amount")?;
        if runs_on(&text[number.end()..]) {
            return None;
        }
        let value = number
            .as_str()
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|v| *v > 0.0)?;

        let currency = match (caps.name("symbol"), caps.name("word")) {
            (Some(symbol), _) => Some(symbol.as_str().to_string()),
            (None, Some(word)) => currency_for_word(word.as_str()).map(str::to_string),
            (None, None) => None,
        };
        Some((value, currency))
    })
}

/// True when the text right after a number continues it ("$12.999",
/// "1,2345"), meaning the number was cut short.
fn runs_on(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') | Some(',') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

fn currency_for_word(word: &str) -> Option<&'static str> {
    let word = word.to_lowercase();
    CURRENCY_WORDS
        .iter()
        .find(|(words, _)| words.contains(&word.as_str()))
        .map(|(_, symbol)| *symbol)
}

fn categorize(text: &str) -> Option<&'static str> {
    CATEGORY_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(category, _)| *category)
}
