//! Deterministic value normalizers and single-intent fallback extractors.
//!
//! Applied to model output to polish money and date values into the house
//! formats (`$X,XXX` and `Month D, YYYY`), and to the raw user message when
//! the model returns nothing usable.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{Datelike, Utc};
use regex::Regex;

use crate::models::PlaceholderKind;

use super::PendingPlaceholder;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTH_ABBREVS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const MONEY_SCORE_TOKENS: [&str; 7] = [
    "purchase",
    "price",
    "amount",
    "consideration",
    "principal",
    "cap",
    "valuation",
];

#[allow(clippy::expect_used)] // patterns are compile-time literals
fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static regex pattern"))
}

fn numeric_core_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(\d[\d,\.]*)")
}

fn money_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(\$\s*\d[\d,\.]*|\d[\d,\.]*\s*\$|\b\d[\d,\.]*\b)")
}

fn day_month_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(
        &RE,
        r"(\d{1,2})(?:st|nd|rd|th)?\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\b",
    )
}

fn month_day_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(
        &RE,
        r"\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\s+(\d{1,2})(?:st|nd|rd|th)?\b",
    )
}

fn numeric_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"\b(\d{1,2})[/-](\d{1,2})(?:[/-](\d{2,4}))?\b")
}

fn month_name_for(abbrev: &str) -> &'static str {
    MONTH_ABBREVS
        .iter()
        .position(|a| *a == abbrev)
        .map_or("January", |i| MONTH_NAMES[i])
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a money value as `$X,XXX` (whole) or `$X,XXX.XX` (fractional).
///
/// Extracts the numeric core from forms like `$4000`, `4000 $`, or `4,000`.
/// Returns the input unchanged when no number is present.
#[must_use]
pub fn normalize_money(raw: &str) -> String {
    let Some(caps) = numeric_core_re().captures(raw.trim()) else {
        return raw.to_owned();
    };
    let num = caps[1].replace(',', "");
    let Ok(val) = num.parse::<f64>() else {
        return format!("${}", &caps[1]);
    };
    if val.fract().abs() < f64::EPSILON && val >= 0.0 && val < 1e15 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let whole = val as u64;
        format!("${}", group_thousands(&whole.to_string()))
    } else {
        let fixed = format!("{val:.2}");
        let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        format!("${}.{frac}", group_thousands(whole))
    }
}

/// Normalize a date phrase to `Month D, YYYY`.
///
/// Honors relative year words (`this year`, `last year`, `next year`) and
/// the forms `1 Oct`, `Oct 1st`, `10/01`, and `10-1-25`. Returns the input
/// unchanged when nothing matches.
#[must_use]
pub fn normalize_date_phrase(text: &str) -> String {
    let mut t = text.to_lowercase().trim().to_owned();
    let mut year = i64::from(Utc::now().year());

    if t.contains("last year") {
        year -= 1;
        t = t.replace("last year", "");
    } else if t.contains("next year") {
        year += 1;
        t = t.replace("next year", "");
    } else if t.contains("this year") {
        t = t.replace("this year", "");
    }

    if let Some(caps) = day_month_re().captures(&t) {
        if let Ok(day) = caps[1].parse::<u32>() {
            return format!("{} {day}, {year}", month_name_for(&caps[2]));
        }
    }

    if let Some(caps) = month_day_re().captures(&t) {
        if let Ok(day) = caps[2].parse::<u32>() {
            return format!("{} {day}, {year}", month_name_for(&caps[1]));
        }
    }

    if let Some(caps) = numeric_date_re().captures(&t) {
        let month: usize = caps[1].parse().unwrap_or(0);
        let day: u32 = caps[2].parse().unwrap_or(1);
        let mut y = caps
            .get(3)
            .and_then(|m| m.as_str().parse::<i64>().ok())
            .unwrap_or(year);
        if y < 100 {
            y += 2000;
        }
        let month_name = if (1..=12).contains(&month) {
            MONTH_NAMES[month - 1]
        } else {
            "January"
        };
        return format!("{month_name} {day}, {y}");
    }

    text.to_owned()
}

/// Polish a proposed value according to its placeholder kind.
#[must_use]
pub fn post_format(kind: PlaceholderKind, value: &str) -> String {
    match kind {
        PlaceholderKind::Money => normalize_money(value),
        PlaceholderKind::Date => normalize_date_phrase(value),
        _ => value.to_owned(),
    }
}

/// Extract a money value from a raw user message, if any.
#[must_use]
pub fn fallback_extract_money(message: &str) -> Option<String> {
    money_token_re()
        .captures(message)
        .map(|caps| normalize_money(&caps[1]))
}

/// Extract a date from a raw user message, if it normalizes to one.
#[must_use]
pub fn fallback_extract_date(message: &str) -> Option<String> {
    let out = normalize_date_phrase(message);
    (out != message).then_some(out)
}

fn score_money_key(p: &PendingPlaceholder) -> usize {
    let key = p.key.to_lowercase();
    let hint = p.hint.to_lowercase();
    MONEY_SCORE_TOKENS
        .iter()
        .map(|t| usize::from(key.contains(t)) + usize::from(hint.contains(t)))
        .sum()
}

/// Regex fallbacks for single-intent messages, used when the model returns
/// no usable mapping.
///
/// A detected money value goes to the best-scoring pending MONEY key; a
/// detected date goes to the first pending DATE key.
#[must_use]
pub fn apply_fallbacks(
    message: &str,
    pending: &[PendingPlaceholder],
) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();

    let money_keys: Vec<&PendingPlaceholder> = pending
        .iter()
        .filter(|p| p.kind == PlaceholderKind::Money)
        .collect();
    if !money_keys.is_empty() {
        if let Some(value) = fallback_extract_money(message) {
            // First highest-scoring key wins on ties.
            let mut best: Option<(&PendingPlaceholder, usize)> = None;
            for &p in &money_keys {
                let score = score_money_key(p);
                if best.is_none_or(|(_, s)| score > s) {
                    best = Some((p, score));
                }
            }
            if let Some((p, _)) = best {
                out.insert(p.key.clone(), value);
            }
        }
    }

    if let Some(first_date) = pending.iter().find(|p| p.kind == PlaceholderKind::Date) {
        if let Some(value) = fallback_extract_date(message) {
            out.insert(first_date.key.clone(), value);
        }
    }

    out
}
