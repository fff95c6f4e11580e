//! Plain-text rendering of verse bodies.
//!
//! Verse text carries a small inline markup (`**bold**`, `*{note}*`,
//! `!{red letters}!`, `# heading #`, ...) plus stray HTML and numeric footnote
//! markers from imports. This module strips all of it for terminal output.
use std::sync::LazyLock;

use regex::Regex;

use crate::types::Verse;

/// Stray HTML tags.
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| return Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Numeric footnote markers such as `[1]`; `[text]` is kept.
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
static FOOTNOTE: LazyLock<Regex> = LazyLock::new(|| return Regex::new(r" *\[[0-9\]]*\]").expect("valid footnote regex"));

/// Inline markup rules, applied in order.
#[allow(clippy::expect_used, reason = "hardcoded patterns are a compile-time invariant")]
static MARKUP: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    let rules: [(&str, &'static str); 12] = [
        (r"#\s*(.*?)\s*#", ""),
        (r"\*\{(.*?)\}\*", "$1"),
        (r"!\{(.*?)\}!", "$1"),
        (r"\*\*(.*?)\*\*", "$1"),
        (r"__(.*?)__", "$1"),
        (r"\*(.*?)\*", "$1"),
        (r"_(.*?)_", "$1"),
        (r"\+\+(.*?)\+\+", "$1"),
        (r"~~(.*?)~~", "$1"),
        (r#""([^"]*?)""#, "$1"),
        (r"\n", ""),
        (r"¶", ""),
    ];
    return rules
        .into_iter()
        .map(|(pattern, replacement)| return (Regex::new(pattern).expect("valid markup regex"), replacement))
        .collect();
});

/// Remove HTML tags and numeric footnote markers.
pub fn strip_text(value: &str) -> String {
    let without_tags = HTML_TAG.replace_all(value, "");
    return FOOTNOTE.replace_all(&without_tags, "").into_owned();
}

/// Remove the inline markup, keeping the marked-up words.
pub fn strip_markup(value: &str) -> String {
    let mut out = value.to_string();
    for (pattern, replacement) in MARKUP.iter() {
        out = pattern.replace_all(&out, *replacement).into_owned();
    }
    return out;
}

/// Verse number label: `"3"`, or `"3-5"` for a merged block.
pub fn verse_label(verse: &Verse) -> String {
    let last = verse.last_number();
    if last > verse.number {
        return format!("{}-{last}", verse.number);
    }
    return verse.number.to_string();
}

/// Plain text of a verse, optionally prefixed with its number label.
pub fn verse_text(verse: &Verse, include_number: bool) -> String {
    let text = strip_markup(&strip_text(&verse.text));
    if include_number {
        return format!("{} {}", verse_label(verse), text.trim());
    }
    return text;
}
