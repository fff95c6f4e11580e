//! Reference string grammar.
//!
//! ```text
//! ref       := book (" " chapter (sep verselist)?)?
//! book      := digits | [1-3]? " "? words
//! sep       := ":" | "," | "."
//! verselist := item ("+" item)*
//! item      := number ("-" number)?
//! id        := book ("." chapter ("." verselist)?)?
//! ```
//!
//! Splitting is purely textual: this module never consults a document.
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Canonical id shape: an alphanumeric book token followed by up to two dotted segments.
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
static ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"^[A-Za-z0-9]+(?:\.[0-9]+(?:\.[0-9+\-]+)?)?$").expect("valid id regex");
});

/// A book token classified before any resolution runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BookToken {
    /// Anything that is not a plain number: a name, id or abbreviation.
    Name(String),
    /// A plain book number such as `"1"`.
    Number(u32),
}

impl BookToken {
    /// Classify a raw token. Surrounding whitespace is ignored.
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        let all_digits = !trimmed.is_empty() && trimmed.chars().all(|c| return c.is_ascii_digit());
        if all_digits && let Ok(number) = trimmed.parse::<u32>() {
            return Self::Number(number);
        }
        return Self::Name(trimmed.to_string());
    }
}

impl fmt::Display for BookToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Self::Name(name) => f.write_str(name),
            Self::Number(number) => write!(f, "{number}"),
        };
    }
}

impl From<u32> for BookToken {
    fn from(number: u32) -> Self {
        return Self::Number(number);
    }
}

impl From<&str> for BookToken {
    fn from(raw: &str) -> Self {
        return Self::classify(raw);
    }
}

/// Which of the two textual shapes an input took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceForm {
    /// Human form such as `"Genesis 1:1-3"`.
    Display,
    /// Dotted form such as `"1.1.1-3"` or `"GEN.1.1"`.
    Id,
}

/// Raw textual segments of a reference. Empty strings mark absent segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceParts {
    /// Book token, trimmed.
    pub book: String,
    /// Chapter digits.
    pub chapter: String,
    /// Verse list in compact notation. `,` and `.` inside the list are folded to `+`.
    pub verses: String,
}

/// Decide whether `input` is a dotted id or a display string.
pub fn classify(input: &str) -> ReferenceForm {
    if ID_PATTERN.is_match(input.trim()) {
        return ReferenceForm::Id;
    }
    return ReferenceForm::Display;
}

/// Split either form into its segments.
pub fn split(input: &str) -> (ReferenceForm, ReferenceParts) {
    let form = classify(input);
    let parts = match form {
        ReferenceForm::Display => split_display(input),
        ReferenceForm::Id => split_id(input),
    };
    return (form, parts);
}

/// Split a display string such as `"1 John 3:16-18"`.
///
/// Leading noise before the first digit or letter is skipped. Anything after
/// the verse list is ignored.
pub fn split_display(input: &str) -> ReferenceParts {
    let start = input
        .find(|c: char| return c.is_alphanumeric())
        .unwrap_or(input.len());
    let mut cursor = Cursor::new(input.get(start..).unwrap_or(""));

    let book = cursor.book();
    if book.is_empty() {
        return ReferenceParts::default();
    }

    let mut parts = ReferenceParts { book, ..ReferenceParts::default() };

    if cursor.skip_whitespace() == 0 {
        return parts;
    }
    parts.chapter = cursor.take_while(|c| return c.is_ascii_digit()).to_string();
    if parts.chapter.is_empty() {
        return parts;
    }

    if cursor.eat(|c| return matches!(c, ':' | ',' | '.')) {
        let raw = cursor.take_while(|c| return c.is_ascii_digit() || matches!(c, ',' | '.' | '-' | '+'));
        parts.verses = raw.replace([',', '.'], "+");
    }

    return parts;
}

/// Split a dotted id such as `"GEN.1.1-3"`. Returns empty parts when the
/// input does not have the id shape.
pub fn split_id(input: &str) -> ReferenceParts {
    let trimmed = input.trim();
    if !ID_PATTERN.is_match(trimmed) {
        return ReferenceParts::default();
    }

    let mut segments = trimmed.splitn(3, '.');
    return ReferenceParts {
        book: segments.next().unwrap_or("").to_string(),
        chapter: segments.next().unwrap_or("").to_string(),
        verses: segments.next().unwrap_or("").to_string(),
    };
}

/// Byte cursor over a display string.
struct Cursor<'a> {
    /// Byte offset of the next unread character.
    position: usize,
    /// The text being scanned.
    text: &'a str,
}

impl<'a> Cursor<'a> {
    /// Start at the beginning of `text`.
    const fn new(text: &'a str) -> Self {
        return Self { position: 0, text };
    }

    /// Read a book token: plain digits, or an optional `1`-`3` prefix and
    /// one or more words of letters.
    fn book(&mut self) -> String {
        let start = self.position;

        if self.eat(|c| return matches!(c, '1'..='3')) {
            let after_prefix = self.position;
            self.eat(char::is_whitespace);
            if self.words() {
                return self.slice_from(start).trim().to_string();
            }
            self.position = after_prefix;
        }

        self.position = start;
        if self.words() {
            return self.slice_from(start).trim().to_string();
        }

        return self.take_while(|c| return c.is_ascii_digit()).to_string();
    }

    /// Consume one character matching `predicate`.
    fn eat(&mut self, predicate: impl Fn(char) -> bool) -> bool {
        let Some(next) = self.peek() else {
            return false;
        };
        if !predicate(next) {
            return false;
        }
        self.position = self.position.saturating_add(next.len_utf8());
        return true;
    }

    /// The next unread character.
    fn peek(&self) -> Option<char> {
        return self.text.get(self.position..)?.chars().next();
    }

    /// Consume whitespace, returning how many bytes were skipped.
    fn skip_whitespace(&mut self) -> usize {
        return self.take_while(char::is_whitespace).len();
    }

    /// Text consumed since `start`.
    fn slice_from(&self, start: usize) -> &'a str {
        return self.text.get(start..self.position).unwrap_or("");
    }

    /// Consume characters while `predicate` holds.
    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let start = self.position;
        while self.eat(&predicate) {}
        return self.slice_from(start);
    }

    /// Consume one or more letter words separated by whitespace.
    /// A word must start with a letter so a chapter number ends the name.
    fn words(&mut self) -> bool {
        if self.take_while(char::is_alphabetic).is_empty() {
            return false;
        }
        loop {
            let before_gap = self.position;
            if self.skip_whitespace() == 0 {
                return true;
            }
            if self.take_while(char::is_alphabetic).is_empty() {
                self.position = before_gap;
                return true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(book: &str, chapter: &str, verses: &str) -> ReferenceParts {
        return ReferenceParts {
            book: book.to_string(),
            chapter: chapter.to_string(),
            verses: verses.to_string(),
        };
    }

    #[test]
    fn classifies_numeric_and_named_book_tokens() {
        assert_eq!(BookToken::classify("1"), BookToken::Number(1));
        assert_eq!(BookToken::classify(" 12 "), BookToken::Number(12));
        assert_eq!(BookToken::classify("1 John"), BookToken::Name("1 John".to_string()));
        assert_eq!(BookToken::classify("GEN"), BookToken::Name("GEN".to_string()));
        assert_eq!(BookToken::from(3_u32), BookToken::Number(3));
    }

    #[test]
    fn classifies_id_and_display_forms() {
        assert_eq!(classify("1.1.1-3"), ReferenceForm::Id);
        assert_eq!(classify("GEN.1.2+4"), ReferenceForm::Id);
        assert_eq!(classify("Genesis 1:1"), ReferenceForm::Display);
        assert_eq!(classify("1 John"), ReferenceForm::Display);
    }

    #[test]
    fn splits_full_display_reference() {
        assert_eq!(split_display("Genesis 1:1-3"), parts("Genesis", "1", "1-3"));
    }

    #[test]
    fn splits_numbered_book() {
        assert_eq!(split_display("1 John 3:16"), parts("1 John", "3", "16"));
        assert_eq!(split_display("2Kings 4"), parts("2Kings", "4", ""));
    }

    #[test]
    fn splits_multi_word_book() {
        assert_eq!(split_display("Song of Solomon 2:1"), parts("Song of Solomon", "2", "1"));
    }

    #[test]
    fn folds_comma_and_dot_verse_separators() {
        assert_eq!(split_display("John 3,16,18"), parts("John", "3", "16+18"));
        assert_eq!(split_display("John 3.16-18.20"), parts("John", "3", "16-18+20"));
    }

    #[test]
    fn partial_inputs_keep_what_was_typed() {
        assert_eq!(split_display("Gen"), parts("Gen", "", ""));
        assert_eq!(split_display("Genesis "), parts("Genesis", "", ""));
        assert_eq!(split_display("Genesis 1 "), parts("Genesis", "1", ""));
        assert_eq!(split_display("Genesis 1:1-"), parts("Genesis", "1", "1-"));
    }

    #[test]
    fn unicode_letters_are_book_characters() {
        assert_eq!(split_display("Génesis 1"), parts("Génesis", "1", ""));
    }

    #[test]
    fn nothing_to_split() {
        assert_eq!(split_display(""), ReferenceParts::default());
        assert_eq!(split_display("  :: "), ReferenceParts::default());
    }

    #[test]
    fn splits_id_segments() {
        assert_eq!(split_id("1.1.1-3"), parts("1", "1", "1-3"));
        assert_eq!(split_id("GEN.2"), parts("GEN", "2", ""));
        assert_eq!(split_id("Genesis 1"), ReferenceParts::default());
    }
}
