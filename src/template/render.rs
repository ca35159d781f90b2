//! Preview rendering and export substitution.
//!
//! The preview wraps every placeholder occurrence in a `span` carrying a
//! stable `data-key` attribute so the presentation layer can correlate the
//! rendered document with the field list (scroll-linking). Export performs
//! the plain substitution used by download.

use crate::session::PlaceholderStore;

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Placeholder keys ordered longest-first so that a key which is a prefix
/// of another (e.g. `[Blank]` vs `[Blank]#2`) never clobbers it.
fn keys_longest_first(store: &PlaceholderStore) -> Vec<&str> {
    let mut keys: Vec<&str> = store.list().iter().map(|p| p.key.as_str()).collect();
    keys.sort_by_key(|k| std::cmp::Reverse(k.len()));
    keys
}

/// Render the template as HTML, highlighting filled vs unfilled
/// placeholders.
///
/// Filled occurrences show the committed value inside
/// `<span class="ph ph-filled">`; unfilled ones keep the bracketed key
/// inside `<span class="ph">`. Both carry `data-key` for click/scroll sync.
#[must_use]
pub fn render_preview(template: &str, store: &PlaceholderStore) -> String {
    // Two-phase substitution: swap each key occurrence for a control-char
    // sentinel first, escape the document, then expand sentinels into span
    // markup. The sentinel phase keeps generated markup from being matched
    // by later keys.
    let keys = keys_longest_first(store);
    let mut text = template.to_owned();
    for (i, key) in keys.iter().enumerate() {
        text = text.replace(key, &format!("\u{1}{i}\u{2}"));
    }

    let mut html = escape_html(&text);
    for (i, key) in keys.iter().enumerate() {
        let escaped_key = escape_html(key);
        let span = store.get(key).map_or_else(String::new, |placeholder| {
            match &placeholder.value {
                Some(value) if placeholder.is_filled() => format!(
                    "<span class=\"ph ph-filled\" data-key=\"{escaped_key}\">{}</span>",
                    escape_html(value)
                ),
                _ => {
                    format!("<span class=\"ph\" data-key=\"{escaped_key}\">{escaped_key}</span>")
                }
            }
        });
        html = html.replace(&format!("\u{1}{i}\u{2}"), &span);
    }

    let body: String = html
        .lines()
        .map(|line| format!("<p>{line}</p>\n"))
        .collect();
    format!("<div class=\"docx-page\">\n{body}</div>\n")
}

/// Substitute every committed value into the template.
///
/// Unfilled placeholders are left as their bracketed keys.
#[must_use]
pub fn export(template: &str, store: &PlaceholderStore) -> String {
    let mut out = template.to_owned();
    for key in keys_longest_first(store) {
        if let Some(placeholder) = store.get(key) {
            if let Some(value) = placeholder.value.as_ref().filter(|v| !v.is_empty()) {
                out = out.replace(key, value);
            }
        }
    }
    out
}
