//! Placeholder detection for uploaded template text.
//!
//! Recognizes named placeholders like `[Company Name]` and generic blanks
//! like `[_________]`. Generic blanks are renamed using nearby context (a
//! quoted phrase such as “Purchase Amount”, a key-token phrase, or a label
//! just after the blank) so they get stable, meaningful keys; unresolvable
//! blanks become `[Blank]`, de-duplicated with a `#n` suffix.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::PlaceholderKind;

use super::keys::{self, guess_kind};

/// Result of scanning a template: the rewritten text (generic blanks
/// renamed) plus the unique placeholder keys in reading order, each with
/// its guessed kind.
#[derive(Debug, Clone)]
pub struct ParsedTemplate {
    /// Template text with generic blanks renamed to their derived keys.
    pub template: String,
    /// Unique `(key, kind)` pairs in order of first appearance.
    pub placeholders: Vec<(String, PlaceholderKind)>,
}

#[allow(clippy::expect_used)] // patterns are compile-time literals
fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static regex pattern"))
}

fn generic_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"\[\s*_{2,}\s*\]")
}

fn named_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"\[[^\[\]\r\n]{1,60}\]")
}

fn quote_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, "[\u{201c}\"]([^\u{201d}\"]+)[\u{201d}\"]")
}

fn strip_markers(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '[' | ']' | '(' | ')' | '$'))
        .collect()
}

fn tail_chars(s: &str, n: usize) -> &str {
    match s.char_indices().rev().nth(n.saturating_sub(1)) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

fn head_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
    })
}

fn all_hint_tokens() -> impl Iterator<Item = &'static str> {
    keys::MONEY_TOKENS
        .iter()
        .chain(keys::DATE_TOKENS.iter())
        .chain(keys::COMPANY_TOKENS.iter())
        .chain(keys::INVESTOR_TOKENS.iter())
        .copied()
}

fn usable_phrase(phrase: &str) -> bool {
    (2..=60).contains(&phrase.len()) && !phrase.contains('[') && !phrase.contains(']')
}

/// Find a meaningful label near a generic blank.
///
/// Priority: last quoted phrase before, a key-token phrase in the trailing
/// context, a quoted phrase just after, then any money/date token in the
/// surrounding window.
fn label_near(text_before: &str, text_after: &str) -> Option<String> {
    let before = text_before
        .trim()
        .trim_end_matches(|c| matches!(c, '$' | '(' | ')' | '[' | ']'));

    // Last quoted phrase before the blank.
    if let Some(caps) = quote_re().captures_iter(before).last() {
        let phrase = caps[1].trim();
        if usable_phrase(phrase) {
            return Some(phrase.to_owned());
        }
    }

    // Key-token phrase in the trailing 160 characters.
    let tail = strip_markers(tail_chars(before, 160));
    if let Some(chunk) = tail.rsplit(['.', ';', ':', '\n']).next() {
        let cand = chunk.trim();
        let lowered = cand.to_lowercase();
        if !cand.is_empty() && all_hint_tokens().any(|t| lowered.contains(t)) {
            let collapsed = cand.split_whitespace().collect::<Vec<_>>().join(" ");
            let trimmed = collapsed.trim_matches(|c| matches!(c, ' ' | '-' | ':'));
            let label = trimmed
                .split(' ')
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" ");
            if !label.is_empty() {
                return Some(label);
            }
        }
    }

    // Quoted label right after the blank.
    let head = strip_markers(head_chars(text_after, 120));
    for caps in quote_re().captures_iter(&head) {
        let phrase = caps[1].trim();
        if usable_phrase(phrase) {
            return Some(phrase.to_owned());
        }
    }

    // Money/date token anywhere in the surrounding window.
    let combo = format!(
        "{}{}",
        tail_chars(text_before, 200),
        head_chars(text_after, 200)
    )
    .to_lowercase();
    for token in keys::MONEY_TOKENS.iter().chain(keys::DATE_TOKENS.iter()) {
        if combo.contains(token) {
            return Some(
                token
                    .split(' ')
                    .map(capitalize)
                    .collect::<Vec<_>>()
                    .join(" "),
            );
        }
    }

    None
}

/// Scan template text and derive the placeholder list.
///
/// Named placeholders are kept verbatim; generic blanks are renamed in the
/// returned template so later fills can substitute by key. Duplicate named
/// keys collapse to one placeholder controlling every occurrence.
#[must_use]
pub fn parse_template(text: &str) -> ParsedTemplate {
    // Collect generic and named spans; the generic pattern is a subset of
    // the named one, so named matches that are fully generic are dropped.
    let mut spans: Vec<(bool, usize, usize)> = Vec::new();
    for m in generic_re().find_iter(text) {
        spans.push((true, m.start(), m.end()));
    }
    for m in named_re().find_iter(text) {
        let frag = m.as_str();
        let is_generic = generic_re()
            .find(frag)
            .is_some_and(|g| g.start() == 0 && g.end() == frag.len());
        if !is_generic {
            spans.push((false, m.start(), m.end()));
        }
    }
    spans.sort_by_key(|&(_, start, _)| start);

    let mut out = String::with_capacity(text.len());
    let mut found: Vec<String> = Vec::new();
    let mut dup_counts: HashMap<String, usize> = HashMap::new();
    let mut last = 0;

    for (is_generic, start, end) in spans {
        out.push_str(&text[last..start]);
        let frag = &text[start..end];
        last = end;

        if !is_generic {
            out.push_str(frag);
            found.push(frag.to_owned());
            continue;
        }

        let mut key = label_near(&text[..start], &text[end..])
            .map_or_else(|| "[Blank]".to_owned(), |label| format!("[{label}]"));
        let count = dup_counts.entry(key.clone()).or_insert(0);
        *count += 1;
        if *count > 1 {
            key = format!("{key}#{count}");
        }
        out.push_str(&key);
        found.push(key);
    }
    out.push_str(&text[last..]);

    let mut placeholders = Vec::new();
    for key in found {
        if !placeholders.iter().any(|(k, _)| k == &key) {
            let kind = guess_kind(&key);
            placeholders.push((key, kind));
        }
    }

    ParsedTemplate {
        template: out,
        placeholders,
    }
}
