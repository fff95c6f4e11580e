//! Conversion between structured references and their two string forms.
//!
//! - canonical id: `"1.1.1-3"` (numeric book, `.` separators)
//! - display string: `"Genesis 1:1-3"` (book name, `" "` and `":"` separators)
use tracing::debug;

use crate::books;
use crate::grammar::{self, BookToken};
use crate::types::{Document, Reference, Verse, VerseReference};
use crate::{text, verses};

/// Options for [`format`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions<'a> {
    /// Document consulted for book names.
    pub document: Option<&'a Document>,
    /// Render the book as its name instead of its number.
    pub use_book_name: bool,
}

/// Either form accepted by [`resolve_reference`].
#[derive(Debug, Clone, Copy)]
pub enum ReferenceInput<'a> {
    /// An already structured reference.
    Structured(&'a Reference),
    /// A display string or canonical id to parse first.
    Text(&'a str),
}

impl<'a> From<&'a Reference> for ReferenceInput<'a> {
    fn from(reference: &'a Reference) -> Self {
        return Self::Structured(reference);
    }
}

impl<'a> From<&'a str> for ReferenceInput<'a> {
    fn from(text: &'a str) -> Self {
        return Self::Text(text);
    }
}

/// Parse a display string or canonical id into a [`Reference`].
///
/// Never fails: an unknown book resolves to `0`, a missing chapter to `0`,
/// and unparseable verse tokens are dropped.
pub fn parse(input: &str, document: Option<&Document>) -> Reference {
    let (form, parts) = grammar::split(input);
    let book = books::resolve(&BookToken::classify(&parts.book), document);
    let chapter = parts.chapter.parse::<u32>().unwrap_or(0);
    let reference = Reference::new(book, chapter, verses::expand(&parts.verses));

    debug!(input, ?form, ?reference, "parsed reference");
    return reference;
}

/// Build a reference string, stopping at the first missing field.
///
/// A reference without a book renders as `""`, one without a chapter as just
/// the book, one without verses as book and chapter. Autocomplete relies on
/// these partial forms.
pub fn format(
    reference: &Reference,
    chapter_separator: &str,
    verse_separator: &str,
    options: FormatOptions<'_>,
) -> String {
    if reference.book == 0 {
        return String::new();
    }

    let mut out = if options.use_book_name {
        let name = books::book_name(reference.book, options.document);
        if name.is_empty() { reference.book.to_string() } else { name }
    } else {
        reference.book.to_string()
    };
    if reference.chapter == 0 {
        return out;
    }

    out.push_str(chapter_separator);
    out.push_str(&reference.chapter.to_string());
    if reference.verses.is_empty() {
        return out;
    }

    out.push_str(verse_separator);
    out.push_str(&verses::compact(&reference.verses));
    return out;
}

/// Canonical dotted id: `"1"`, `"1.1"` or `"1.1.1-3"`.
pub fn to_canonical_id(reference: &Reference) -> String {
    return format(reference, ".", ".", FormatOptions::default());
}

/// Human display string: `"Genesis"`, `"Genesis 1"` or `"Genesis 1:1-3"`.
pub fn to_display_string(reference: &Reference, document: Option<&Document>) -> String {
    return format(reference, " ", ":", FormatOptions { document, use_book_name: true });
}

/// Display string followed by the document's short name: `"Genesis 1:1 KJV"`.
pub fn to_versioned_string(reference: &Reference, document: &Document) -> String {
    return format!("{} {}", to_display_string(reference, Some(document)), document.short_name());
}

/// Resolve a reference against a document, one [`VerseReference`] per verse.
///
/// A merged verse (`endNumber`) is returned once when any number it covers is
/// requested. When nothing matches, a single placeholder with verse number
/// `0` describes the reference itself. Empty text resolves to nothing.
pub fn resolve_reference<'a>(
    document: &Document,
    input: impl Into<ReferenceInput<'a>>,
) -> Vec<VerseReference> {
    let parsed;
    let reference = match input.into() {
        ReferenceInput::Structured(reference) => reference,
        ReferenceInput::Text(text) => {
            if text.trim().is_empty() {
                return Vec::new();
            }
            parsed = parse(text, Some(document));
            &parsed
        },
    };

    let found = verses_in(document, reference);
    if found.is_empty() {
        return vec![VerseReference {
            book: reference.book,
            chapter: reference.chapter,
            id: to_canonical_id(reference),
            reference: to_display_string(reference, Some(document)),
            verse: Verse::default(),
        }];
    }

    return found
        .into_iter()
        .map(|verse| return verse_reference(document, reference.book, reference.chapter, verse))
        .collect();
}

/// Describe one verse of a chapter. A merged block is labelled with its
/// whole range, built from its bounds rather than its member numbers.
pub fn verse_reference(document: &Document, book: u32, chapter: u32, verse: &Verse) -> VerseReference {
    let whole = Reference::chapter(book, chapter);
    let mut id = to_canonical_id(&whole);
    let mut display = to_display_string(&whole, Some(document));
    if book != 0 && chapter != 0 {
        let label = text::verse_label(verse);
        id = format!("{id}.{label}");
        display = format!("{display}:{label}");
    }
    return VerseReference { book, chapter, id, reference: display, verse: verse.clone() };
}

/// The verses of `reference` present in the document, in document order.
/// Missing books or chapters yield nothing.
pub fn verses_in<'d>(document: &'d Document, reference: &Reference) -> Vec<&'d Verse> {
    let chapter = document
        .books
        .iter()
        .find(|book| return book.number == reference.book)
        .and_then(|book| return book.chapters.iter().find(|c| return c.number == reference.chapter));
    let Some(chapter) = chapter else {
        return Vec::new();
    };

    return chapter
        .verses
        .iter()
        .filter(|verse| return reference.verses.iter().any(|n| return verse.covers(*n)))
        .collect();
}
