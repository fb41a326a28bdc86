//! Relative and absolute date phrases.
//!
//! Resolves expressions such as "tomorrow", "in 3 days", "last friday" or
//! "2026-11-02" against a reference date, and reports where in the text the
//! phrase was found so callers can cut it out of descriptions.

use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;

/// Which way an ambiguous weekday reference points.
///
/// Tasks are due in the future; expenses happened in the past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A resolved date and the byte span of the phrase that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    pub date: NaiveDate,
    pub start: usize,
    pub end: usize,
}

impl DateMatch {
    /// Return `text` with the matched phrase removed.
    pub fn strip_from(&self, text: &str) -> String {
        format!("{} {}", &text[..self.start], &text[self.end..])
    }
}

// =============================================================================
// Compiled patterns
// =============================================================================

struct DatePatterns {
    iso: Regex,
    today: Regex,
    day_after_tomorrow: Regex,
    tomorrow: Regex,
    yesterday: Regex,
    in_span: Regex,
    span_ago: Regex,
    next_week: Regex,
    last_week: Regex,
    weekday: Regex,
}

/// Optional preposition folded into the match so it is stripped with the date.
const LEAD: &str = r"(?:(?:on|by|due|for|before|until)\s+)?";

static DATE_PATTERNS: LazyLock<DatePatterns> = LazyLock::new(|| {
    let mk = |body: &str| Regex::new(&format!(r"(?i)\b{LEAD}{body}\b")).expect("Invalid date regex");
    DatePatterns {
        iso: mk(r"(\d{4})-(\d{2})-(\d{2})"),
        today: mk(r"(?:today|tonight|this\s+(?:morning|afternoon|evening))"),
        day_after_tomorrow: mk(r"(?:the\s+)?day\s+after\s+tomorrow"),
        tomorrow: mk(r"tomorrow"),
        yesterday: Regex::new(r"(?i)\byesterday\b").expect("Invalid date regex"),
        in_span: Regex::new(r"(?i)\bin\s+(\d{1,3}|a|one)\s+(days?|weeks?)\b")
            .expect("Invalid date regex"),
        span_ago: Regex::new(r"(?i)\b(\d{1,3}|a|one)\s+(days?|weeks?)\s+ago\b")
            .expect("Invalid date regex"),
        next_week: mk(r"next\s+week"),
        last_week: Regex::new(r"(?i)\blast\s+week\b").expect("Invalid date regex"),
        weekday: Regex::new(
            r"(?i)\b(?:(on|by|due|for|before|until|next|last|this)\s+)?(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
        )
        .expect("Invalid date regex"),
    }
});

// =============================================================================
// Resolution
// =============================================================================

/// Find the first date phrase in `text` and resolve it against `today`.
///
/// Rules are tried in a fixed order (absolute dates, then day words, then
/// spans, then weekdays); the first rule that matches wins.
pub fn resolve_date(text: &str, today: NaiveDate, direction: Direction) -> Option<DateMatch> {
    let dp = &*DATE_PATTERNS;

    if let Some(caps) = dp.iso.captures(text) {
        let whole = caps.get(0)?;
        let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
        let month = caps.get(2)?.as_str().parse::<u32>().ok()?;
        let day = caps.get(3)?.as_str().parse::<u32>().ok()?;
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(DateMatch {
                date,
                start: whole.start(),
                end: whole.end(),
            });
        }
    }

    let fixed_offsets: [(&Regex, i64); 4] = [
        (&dp.today, 0),
        (&dp.day_after_tomorrow, 2),
        (&dp.tomorrow, 1),
        (&dp.yesterday, -1),
    ];
    for (re, offset) in fixed_offsets {
        if let Some(m) = re.find(text) {
            return Some(DateMatch {
                date: today + Duration::days(offset),
                start: m.start(),
                end: m.end(),
            });
        }
    }

    if let Some(caps) = dp.in_span.captures(text) {
        let whole = caps.get(0)?;
        let days = span_days(caps.get(1)?.as_str(), caps.get(2)?.as_str())?;
        return Some(DateMatch {
            date: today + Duration::days(days),
            start: whole.start(),
            end: whole.end(),
        });
    }

    if let Some(caps) = dp.span_ago.captures(text) {
        let whole = caps.get(0)?;
        let days = span_days(caps.get(1)?.as_str(), caps.get(2)?.as_str())?;
        return Some(DateMatch {
            date: today - Duration::days(days),
            start: whole.start(),
            end: whole.end(),
        });
    }

    if let Some(m) = dp.next_week.find(text) {
        return Some(DateMatch {
            date: today + Duration::days(7),
            start: m.start(),
            end: m.end(),
        });
    }

    if let Some(m) = dp.last_week.find(text) {
        return Some(DateMatch {
            date: today - Duration::days(7),
            start: m.start(),
            end: m.end(),
        });
    }

    if let Some(caps) = dp.weekday.captures(text) {
        let whole = caps.get(0)?;
        let qualifier = caps.get(1).map(|m| m.as_str().to_lowercase());
        let target = parse_weekday(caps.get(2)?.as_str())?;
        let offset = weekday_offset(today, target, qualifier.as_deref(), direction);
        return Some(DateMatch {
            date: today + Duration::days(offset),
            start: whole.start(),
            end: whole.end(),
        });
    }

    None
}

fn span_days(count: &str, unit: &str) -> Option<i64> {
    let n = match count.to_lowercase().as_str() {
        "a" | "one" => 1,
        digits => digits.parse::<i64>().ok()?,
    };
    if unit.to_lowercase().starts_with("week") {
        Some(n * 7)
    } else {
        Some(n)
    }
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    match name.to_lowercase().as_str() {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Day offset from `today` to the referenced weekday.
///
/// "next" always moves forward at least one day and "last" backward at least
/// one day; a bare weekday resolves to today when it names today.
fn weekday_offset(
    today: NaiveDate,
    target: Weekday,
    qualifier: Option<&str>,
    direction: Direction,
) -> i64 {
    let current = today.weekday().num_days_from_monday() as i64;
    let target = target.num_days_from_monday() as i64;
    let ahead = (target - current + 7) % 7;
    let behind = (current - target + 7) % 7;

    match (qualifier, direction) {
        (Some("next"), _) => {
            if ahead == 0 {
                7
            } else {
                ahead
            }
        }
        (Some("last"), _) => {
            if behind == 0 {
                -7
            } else {
                -behind
            }
        }
        (_, Direction::Forward) => ahead,
        (_, Direction::Backward) => -behind,
    }
}
