//! Strict lookups and chapter-by-chapter navigation.
//!
//! Unlike [`crate::reference::resolve_reference`], these fail loudly: a
//! missing book, chapter or verse is an [`Error`] naming what was asked for.
use rand::Rng;
use rand::seq::SliceRandom as _;
use tracing::debug;

use crate::autocomplete::find_book;
use crate::books;
use crate::canon::{BIBLE_SIZE, NT_SIZE, OT_SIZE};
use crate::error::Error;
use crate::grammar::BookToken;
use crate::reference::{resolve_reference, verse_reference};
use crate::types::{Book, Chapter, Document, Reference, Verse, VerseReference};

/// Find a book by number, exact name or id, falling back to fuzzy matching.
///
/// # Errors
///
/// Returns `Error::UnknownBook` if nothing matches.
pub fn book<'d>(document: &'d Document, token: &BookToken) -> Result<&'d Book, Error> {
    let number = books::resolve(token, Some(document));
    if let Some(found) = document.books.iter().find(|b| return number != 0 && b.number == number) {
        return Ok(found);
    }
    if let BookToken::Name(name) = token
        && let Some(found) = find_book(document, name)
    {
        return Ok(found);
    }
    return Err(Error::UnknownBook { token: token.to_string() });
}

/// Find a chapter of a book.
///
/// # Errors
///
/// Returns `Error::UnknownBook` or `Error::UnknownChapter`.
pub fn chapter<'d>(document: &'d Document, token: &BookToken, number: u32) -> Result<&'d Chapter, Error> {
    return chapter_of(book(document, token)?, number);
}

/// Find the verse covering `number`, including merged verses.
///
/// # Errors
///
/// Returns `Error::UnknownBook`, `Error::UnknownChapter` or `Error::UnknownVerse`.
pub fn verse<'d>(document: &'d Document, token: &BookToken, chapter_number: u32, number: u32) -> Result<&'d Verse, Error> {
    let found_book = book(document, token)?;
    let found = chapter_of(found_book, chapter_number)?;
    return found.verses.iter().find(|v| return v.covers(number)).ok_or_else(|| {
        return Error::UnknownVerse { book: found_book.name.clone(), chapter: chapter_number, verse: number };
    });
}

/// Chapter `number` of an already resolved book.
fn chapter_of(found: &Book, number: u32) -> Result<&Chapter, Error> {
    return found
        .chapters
        .iter()
        .find(|c| return c.number == number)
        .ok_or_else(|| return Error::UnknownChapter { book: found.name.clone(), chapter: number });
}

/// The chapter after (`next`) or before the given one, crossing into the
/// neighbouring book at either edge. `None` past the first or last chapter
/// of the document, or when the starting point does not exist.
pub fn close_chapter(document: &Document, book_number: u32, chapter_number: u32, next: bool) -> Option<VerseReference> {
    let book_index = document.books.iter().position(|b| return b.number == book_number)?;
    let current = document.books.get(book_index)?;
    let chapter_index = current.chapters.iter().position(|c| return c.number == chapter_number)?;

    let within = if next { chapter_index.checked_add(1) } else { chapter_index.checked_sub(1) };
    let target = match within.and_then(|i| return current.chapters.get(i)) {
        Some(chapter) => (current, chapter),
        None => {
            let neighbour_index = if next { book_index.checked_add(1) } else { book_index.checked_sub(1) }?;
            let neighbour = document.books.get(neighbour_index)?;
            let chapter = if next { neighbour.chapters.first() } else { neighbour.chapters.last() }?;
            (neighbour, chapter)
        },
    };

    let (target_book, target_chapter) = target;
    debug!(from_book = book_number, from_chapter = chapter_number, to_book = target_book.number, to_chapter = target_chapter.number, "navigated");
    return resolve_reference(document, &Reference::chapter(target_book.number, target_chapter.number))
        .into_iter()
        .next();
}

/// Old Testament books: the whole document when it holds exactly those,
/// the first 39 of a full 66-book document, otherwise books numbered 1 to 39.
pub fn old_testament(document: &Document) -> Vec<&Book> {
    let all = document.books.len();
    if all == OT_SIZE || all == BIBLE_SIZE {
        return document.books.iter().take(OT_SIZE).collect();
    }
    return document.books.iter().filter(|b| return (1..=OT_SIZE).contains(&as_index(b.number))).collect();
}

/// New Testament books: the whole document when it holds exactly those,
/// the last 27 of a full 66-book document, otherwise books numbered 40 to 66.
pub fn new_testament(document: &Document) -> Vec<&Book> {
    let all = document.books.len();
    if all == NT_SIZE {
        return document.books.iter().collect();
    }
    if all == BIBLE_SIZE {
        return document.books.iter().skip(OT_SIZE).collect();
    }
    return document
        .books
        .iter()
        .filter(|b| return (OT_SIZE.saturating_add(1)..=BIBLE_SIZE).contains(&as_index(b.number)))
        .collect();
}

/// A verse picked at random: a random book, then one of its chapters, then
/// one of that chapter's verses. Books and chapters without verses are never
/// picked. `None` only when the document has no verse at all.
pub fn random_verse(document: &Document, rng: &mut impl Rng) -> Option<VerseReference> {
    let books: Vec<&Book> = document
        .books
        .iter()
        .filter(|b| return b.chapters.iter().any(|c| return !c.verses.is_empty()))
        .collect();
    let picked_book = *books.choose(rng)?;
    let chapters: Vec<&Chapter> = picked_book.chapters.iter().filter(|c| return !c.verses.is_empty()).collect();
    let picked_chapter = *chapters.choose(rng)?;
    let picked = picked_chapter.verses.choose(rng)?;

    debug!(book = picked_book.number, chapter = picked_chapter.number, verse = picked.number, "picked random verse");
    return Some(verse_reference(document, picked_book.number, picked_chapter.number, picked));
}

/// Widen a book number for comparison against the table sizes.
fn as_index(number: u32) -> usize {
    return usize::try_from(number).unwrap_or(usize::MAX);
}
