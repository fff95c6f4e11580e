//! Book resolution: numbers, names, ids and abbreviations to canonical book numbers.
//!
//! The live document always wins; the canonical table is only consulted when
//! the document has nothing that matches.
use tracing::trace;

use crate::canon;
use crate::grammar::BookToken;
use crate::types::{Book, Document};

/// Resolve a book token to its 1-based number. Returns `0` when unresolved.
///
/// Numbers pass through untouched, without a bounds check. Names are matched
/// exactly against the document's book names and ids, then against the
/// canonical table.
pub fn resolve(token: &BookToken, document: Option<&Document>) -> u32 {
    let name = match token {
        BookToken::Name(name) => name,
        BookToken::Number(number) => return *number,
    };
    if name.is_empty() {
        return 0;
    }

    if let Some(document) = document
        && let Some((index, book)) = document
            .books
            .iter()
            .enumerate()
            .find(|(_, book)| return book.name == *name || book.id.as_deref() == Some(name.as_str()))
    {
        return number_or_position(book, index);
    }

    if let Some(number) = canon::number_of(name) {
        trace!(token = %name, number, "book resolved from canonical table");
        return number;
    }

    trace!(token = %name, "book unresolved");
    return 0;
}

/// Resolve a raw string, classifying it first.
pub fn resolve_str(raw: &str, document: Option<&Document>) -> u32 {
    return resolve(&BookToken::classify(raw), document);
}

/// Display name for a book number: the document's name, else the canonical one.
/// Empty when neither knows the number.
pub fn book_name(number: u32, document: Option<&Document>) -> String {
    let from_document = document
        .and_then(|d| return d.books.iter().find(|b| return b.number == number))
        .map(|b| return b.name.as_str())
        .filter(|name| return !name.is_empty());
    if let Some(name) = from_document {
        return name.to_string();
    }
    return canon::name_by_number(number).unwrap_or("").to_string();
}

/// Short name for the book at `book_index` (a 0-based position, not a number).
///
/// An explicit abbreviation is returned verbatim. A book named exactly as its
/// canonical id says gets the title-cased id (`"Gen"`). Anything else takes
/// the first three word characters of its name, four when the name starts
/// with a number (`"1Joh"`) or when three would clash with another book
/// (`"Judg"` next to `"Jude"`). Empty when the index is out of range.
pub fn resolve_abbreviation(document: &Document, book_index: usize) -> String {
    let Some(book) = document.books.get(book_index) else {
        return String::new();
    };

    if let Some(abbreviation) = book.abbreviation.as_ref().filter(|a| return !a.is_empty()) {
        return abbreviation.clone();
    }

    if let Some(id) = book.id.as_deref()
        && canon::name_by_id(id) == Some(book.name.as_str())
    {
        return canon::title_case_id(id);
    }

    let stripped = word_characters(&book.name);
    let starts_with_number = stripped.chars().next().is_some_and(|c| return c.is_ascii_digit());
    let width = if starts_with_number { 4 } else { 3 };
    let short = prefix(&stripped, width);

    if short.chars().count() == 3 && collides(document, book_index, &short) {
        return prefix(&stripped, 4);
    }
    return short;
}

/// Whether another book already claims the three-character short name.
fn collides(document: &Document, book_index: usize, short: &str) -> bool {
    return document
        .books
        .iter()
        .enumerate()
        .filter(|(index, _)| return *index != book_index)
        .any(|(_, other)| {
            return other.abbreviation.as_deref() == Some(short)
                || prefix(&word_characters(&other.name), 3) == short;
        });
}

/// The book's own number, or its 1-based position when the number is missing.
fn number_or_position(book: &Book, index: usize) -> u32 {
    if book.number > 0 {
        return book.number;
    }
    return u32::try_from(index).ok().and_then(|i| return i.checked_add(1)).unwrap_or(0);
}

/// First `width` characters of `text`.
fn prefix(text: &str, width: usize) -> String {
    return text.chars().take(width).collect();
}

/// Keep only word characters: letters, digits and underscores.
fn word_characters(text: &str) -> String {
    return text
        .chars()
        .filter(|c| return c.is_alphanumeric() || *c == '_')
        .collect();
}
