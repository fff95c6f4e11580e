//! Incremental reference autocomplete over partial keystrokes.
//!
//! Every call recomputes the result from the raw input. The only state carried
//! between calls is the previous raw input, which decides whether the book
//! name may be auto-completed (typing forward) or must be left alone
//! (deleting, editing, replacing).
use tracing::debug;

use crate::books;
use crate::grammar;
use crate::normalize::fold_compact;
use crate::reference;
use crate::types::{Book, Document, Reference, SearchReference};
use crate::verses;

/// Autocomplete engine for one input field.
#[derive(Debug, Clone, Default)]
pub struct Autocomplete {
    /// Raw input of the previous call, before any completion was applied.
    previous_input: String,
}

impl Autocomplete {
    /// A fresh engine with no history.
    pub fn new() -> Self {
        return Self::default();
    }

    /// Raw input of the previous call.
    pub fn previous_input(&self) -> &str {
        return &self.previous_input;
    }

    /// Forget the previous input, as if the field was just opened.
    pub fn reset(&mut self) {
        self.previous_input.clear();
    }

    /// Turn a partial input into a best-effort reference plus a suggested completion.
    pub fn search(&mut self, document: &Document, input: &str) -> SearchReference {
        let result = self.complete(document, input);
        self.previous_input = input.to_string();
        return result;
    }

    /// Compute the result for `input` without touching the history.
    fn complete(&self, document: &Document, input: &str) -> SearchReference {
        let mut result = SearchReference { autocompleted: input.to_string(), ..SearchReference::default() };
        if input.is_empty() {
            return result;
        }

        let parts = grammar::split_display(input);
        if parts.book.is_empty() {
            return result;
        }

        let Some(book) = find_book(document, &parts.book) else {
            return result;
        };
        result.book = book.number;

        // The book is only completed while typing forward, so deleting back
        // into the name is never undone.
        let mut value = input.to_string();
        if parts.chapter.is_empty() && input.starts_with(self.previous_input.as_str()) {
            value = format!("{} ", reference::to_display_string(&Reference::book(book.number), Some(document)));
            debug!(input, completed = %value, "book name completed");
            result.autocompleted.clone_from(&value);
        }

        let chapter_number = parts.chapter.parse::<u32>().unwrap_or(0);
        let Some(chapter) = book.chapters.iter().find(|c| return c.number == chapter_number) else {
            return result;
        };
        result.chapter = chapter.number;

        if parts.verses.is_empty() {
            if ends_with_space(&value) && !value.contains([':', ',', '.']) {
                result.autocompleted = format!("{}:", value.trim_end());
            }
            return result;
        }

        let wanted = verses::expand(&parts.verses);
        let found: Vec<_> = chapter
            .verses
            .iter()
            .filter(|verse| return wanted.iter().any(|n| return verse.covers(*n)))
            .cloned()
            .collect();
        if found.is_empty() {
            return result;
        }
        result.verses = found.iter().map(|verse| return verse.number).collect();
        result.verses_content = found;

        let trimmed = value.trim_end();
        if ends_with_space(&value) && !trimmed.ends_with(['-', '+']) {
            let ranges = value.matches('-').count();
            let singles = value.matches('+').count();
            let divider = if ranges == singles { '-' } else { '+' };
            result.autocompleted = format!("{trimmed}{divider}");
        }

        return result;
    }
}

/// Find the single book a typed token points at.
///
/// Matching ignores case, spaces and accents. An exact name, id or
/// abbreviation wins outright; otherwise the token must be contained in
/// exactly one name. Unnumbered names are preferred when the token does not
/// start with a digit, so `"John"` does not also match `"1 John"`.
pub fn find_book<'d>(document: &'d Document, token: &str) -> Option<&'d Book> {
    let needle = fold_compact(token);
    if needle.is_empty() {
        return None;
    }

    if let Some(book) = document.books.iter().find(|book| return fold_compact(&book.name) == needle) {
        return Some(book);
    }

    let by_abbreviation = document.books.iter().enumerate().find(|(index, book)| {
        return book.id.as_deref().is_some_and(|id| return fold_compact(id) == needle)
            || fold_compact(&books::resolve_abbreviation(document, *index)) == needle;
    });
    if let Some((_, book)) = by_abbreviation {
        return Some(book);
    }

    let mut candidates: Vec<&Book> = document
        .books
        .iter()
        .filter(|book| return fold_compact(&book.name).contains(&needle))
        .collect();

    let token_has_number = needle.starts_with(|c: char| return c.is_ascii_digit());
    if !token_has_number && candidates.iter().any(|book| return !starts_with_digit(&book.name)) {
        candidates.retain(|book| return !starts_with_digit(&book.name));
    }

    if candidates.len() != 1 {
        debug!(token, candidates = candidates.len(), "book not unique");
        return None;
    }
    return candidates.pop();
}

/// Whether the raw input ends in whitespace.
fn ends_with_space(value: &str) -> bool {
    return value.ends_with(char::is_whitespace);
}

/// Whether a book name carries a numeric prefix such as `"1 John"`.
fn starts_with_digit(name: &str) -> bool {
    return name.trim_start().starts_with(|c: char| return c.is_ascii_digit());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chapter, Verse};

    fn book(number: u32, name: &str, id: &str, chapters: u32) -> Book {
        let chapters = (1..=chapters)
            .map(|number| {
                let verses = (1..=5)
                    .map(|v| return Verse { number: v, text: format!("{name} {number}:{v}"), ..Verse::default() })
                    .collect();
                return Chapter { number, verses, ..Chapter::default() };
            })
            .collect();
        return Book {
            chapters,
            id: Some(id.to_string()),
            name: name.to_string(),
            number,
            ..Book::default()
        };
    }

    fn document() -> Document {
        return Document {
            books: vec![
                book(1, "Genesis", "GEN", 2),
                book(2, "Exodus", "EXO", 1),
                book(6, "Joshua", "JOS", 1),
                book(7, "Judges", "JDG", 1),
                book(18, "Job", "JOB", 1),
                book(43, "John", "JHN", 3),
                book(62, "1 John", "1JN", 1),
                book(63, "2 John", "2JN", 1),
                book(65, "Jude", "JUD", 1),
            ],
            name: "Test".to_string(),
            ..Document::default()
        };
    }

    #[test]
    fn empty_input_is_empty_result() {
        let mut engine = Autocomplete::new();
        assert_eq!(engine.search(&document(), ""), SearchReference::default());
    }

    #[test]
    fn typing_sequence_resolves_progressively() {
        let doc = document();
        let mut engine = Autocomplete::new();

        let partial = engine.search(&doc, "Jo");
        assert_eq!(partial.book, 0);
        assert_eq!(partial.autocompleted, "Jo");

        let exact = engine.search(&doc, "Genesis");
        assert_eq!(exact.book, 1);
        assert_eq!(exact.chapter, 0);

        let chapter = engine.search(&doc, "Genesis 1");
        assert_eq!(chapter.book, 1);
        assert_eq!(chapter.chapter, 1);
        assert!(chapter.verses.is_empty());
    }

    #[test]
    fn unique_book_is_completed_when_typing_forward() {
        let doc = document();
        let mut engine = Autocomplete::new();
        engine.search(&doc, "G");
        let result = engine.search(&doc, "Gen");
        assert_eq!(result.book, 1);
        assert_eq!(result.autocompleted, "Genesis ");
        assert_eq!(engine.previous_input(), "Gen");
    }

    #[test]
    fn deleting_does_not_complete() {
        let doc = document();
        let mut engine = Autocomplete::new();
        engine.search(&doc, "Genesis");
        let result = engine.search(&doc, "Genesi");
        assert_eq!(result.book, 1);
        assert_eq!(result.autocompleted, "Genesi");
    }

    #[test]
    fn unnumbered_names_win_without_digit() {
        let doc = document();
        let mut engine = Autocomplete::new();
        assert_eq!(engine.search(&doc, "John").book, 43);
        engine.reset();
        assert_eq!(engine.search(&doc, "1 Jo").book, 62);
        engine.reset();
        assert_eq!(engine.search(&doc, "1john").book, 62);
    }

    #[test]
    fn abbreviation_resolves_otherwise_ambiguous_token() {
        let doc = document();
        let mut engine = Autocomplete::new();
        assert_eq!(engine.search(&doc, "Jud").book, 65);
        engine.reset();
        assert_eq!(engine.search(&doc, "jdg").book, 7);
    }

    #[test]
    fn matching_ignores_case_and_accents() {
        let doc = document();
        let mut engine = Autocomplete::new();
        assert_eq!(engine.search(&doc, "éxo").book, 2);
    }

    #[test]
    fn chapter_divider_is_suggested_after_space() {
        let doc = document();
        let mut engine = Autocomplete::new();
        let result = engine.search(&doc, "Genesis 2 ");
        assert_eq!(result.chapter, 2);
        assert_eq!(result.autocompleted, "Genesis 2:");
    }

    #[test]
    fn unknown_chapter_stays_unresolved() {
        let doc = document();
        let mut engine = Autocomplete::new();
        let result = engine.search(&doc, "Genesis 9 ");
        assert_eq!(result.book, 1);
        assert_eq!(result.chapter, 0);
        assert_eq!(result.autocompleted, "Genesis 9 ");
    }

    #[test]
    fn verses_resolve_with_content() {
        let doc = document();
        let mut engine = Autocomplete::new();
        let result = engine.search(&doc, "John 3:1-2+5");
        assert_eq!(result.verses, vec![1, 2, 5]);
        assert_eq!(result.verses_content.len(), 3);
        assert_eq!(result.verses_content.first().map(|v| return v.text.as_str()), Some("John 3:1"));
    }

    #[test]
    fn verse_divider_alternates_between_range_and_list() {
        let doc = document();
        let mut engine = Autocomplete::new();
        assert_eq!(engine.search(&doc, "John 3:1 ").autocompleted, "John 3:1-");
        assert_eq!(engine.search(&doc, "John 3:1-2 ").autocompleted, "John 3:1-2+");
        assert_eq!(engine.search(&doc, "John 3:1-2+4 ").autocompleted, "John 3:1-2+4-");
    }

    #[test]
    fn missing_verses_leave_result_unresolved() {
        let doc = document();
        let mut engine = Autocomplete::new();
        let result = engine.search(&doc, "John 3:40 ");
        assert_eq!(result.chapter, 3);
        assert!(result.verses.is_empty());
        assert_eq!(result.autocompleted, "John 3:40 ");
    }

    #[test]
    fn sessions_do_not_share_history() {
        let doc = document();
        let mut first = Autocomplete::new();
        let mut second = Autocomplete::new();
        first.search(&doc, "Genesis 1");
        assert_eq!(second.search(&doc, "Gen").autocompleted, "Genesis ");
        assert_eq!(first.previous_input(), "Genesis 1");
    }
}
