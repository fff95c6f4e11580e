//! Core domain types: the loaded document tree and the reference values built from it.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A book of the document. `number` is 1-based and unique across the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Explicit short name such as "Gen". Derived on demand when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    /// Ordered chapters. A missing array deserializes as empty.
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    /// Three-character canonical id such as "GEN" or "1SA".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name such as "Genesis".
    #[serde(default)]
    pub name: String,
    /// One-based book number.
    #[serde(default)]
    pub number: u32,
}

/// A chapter of a book. `number` is 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Optional heading such as "A Psalm of David".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// One-based chapter number.
    #[serde(default)]
    pub number: u32,
    /// Ordered verses. A missing array deserializes as empty.
    #[serde(default)]
    pub verses: Vec<Verse>,
}

/// A whole scripture document: name, free-form metadata and the book tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Short identifier such as "KJV".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    /// Ordered books.
    #[serde(default)]
    pub books: Vec<Book>,
    /// Free-form metadata (`title`, `identifier`, `language`, ...).
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
    /// Full name such as "King James Version".
    #[serde(default)]
    pub name: String,
}

/// The canonical structured form of a reference.
///
/// `book == 0` marks an unresolved book. `verses` is kept sorted and free of
/// duplicates when built through [`Reference::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// One-based book number, `0` when unresolved.
    pub book: u32,
    /// One-based chapter number, `0` when absent.
    pub chapter: u32,
    /// Requested verse numbers.
    pub verses: Vec<u32>,
}

impl Reference {
    /// Build a reference, sorting and deduplicating the verse set.
    pub fn new(book: u32, chapter: u32, mut verses: Vec<u32>) -> Self {
        verses.sort_unstable();
        verses.dedup();
        return Self { book, chapter, verses };
    }

    /// A reference to a whole book.
    pub const fn book(book: u32) -> Self {
        return Self { book, chapter: 0, verses: Vec::new() };
    }

    /// A reference to a whole chapter.
    pub const fn chapter(book: u32, chapter: u32) -> Self {
        return Self { book, chapter, verses: Vec::new() };
    }

    /// True when the book could not be resolved.
    pub const fn is_unresolved(&self) -> bool {
        return self.book == 0;
    }
}

/// Incremental autocomplete output. Recomputed from scratch on every keystroke.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReference {
    /// Suggested replacement for the input field.
    pub autocompleted: String,
    /// Resolved book number, `0` while ambiguous.
    pub book: u32,
    /// Resolved chapter number, `0` while unresolved.
    pub chapter: u32,
    /// Numbers of the verses that resolved.
    pub verses: Vec<u32>,
    /// The verses that resolved, in document order.
    pub verses_content: Vec<Verse>,
}

/// A verse of a chapter. `end_number` marks a block that absorbed the
/// following verses up to and including that number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    /// Last verse number covered by a merged block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_number: Option<u32>,
    /// One-based verse number.
    #[serde(default)]
    pub number: u32,
    /// Verse body with inline markup.
    #[serde(default)]
    pub text: String,
}

impl Verse {
    /// Whether this verse answers for `number`, including a merged span.
    pub fn covers(&self, number: u32) -> bool {
        if self.number == number {
            return true;
        }
        return self
            .end_number
            .is_some_and(|end| return number > self.number && number <= end);
    }

    /// Last verse number this block stands for; `number` unless merged.
    pub fn last_number(&self) -> u32 {
        return self.end_number.map_or(self.number, |end| return end.max(self.number));
    }
}

/// One resolved verse together with its display and canonical forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerseReference {
    /// One-based book number.
    pub book: u32,
    /// One-based chapter number.
    pub chapter: u32,
    /// Canonical dotted id such as "1.1.1".
    pub id: String,
    /// Display string such as "Genesis 1:1".
    pub reference: String,
    /// The verse itself. A placeholder with `number == 0` when nothing matched.
    pub verse: Verse,
}
