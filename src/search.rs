//! Full-text verse search with a bounded result cache.
//!
//! The scan is linear over the document: no inverted index is built, so a
//! search costs one pass over the requested books. Results are memoized per
//! (folded query, limit, scope) in an LRU cache owned by the index.
use std::fmt;
use std::num::NonZeroUsize;

use lru::LruCache;
use tracing::debug;

use crate::books;
use crate::grammar::BookToken;
use crate::normalize::fold;
use crate::reference;
use crate::types::{Book, Document, Verse, VerseReference};

/// Cache entries kept when no capacity is configured.
pub const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

/// Result limit used when the caller has no preference.
pub const DEFAULT_LIMIT: usize = 500;

/// Identity of a memoized search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    /// Maximum result count requested.
    limit: usize,
    /// Folded query text.
    query: String,
    /// Resolved book number the search was restricted to.
    scope: Option<u32>,
}

/// Linear full-text search over a document, memoizing results.
pub struct TextSearchIndex {
    /// Recent results, least recently used evicted first.
    cache: LruCache<CacheKey, Vec<VerseReference>>,
}

impl TextSearchIndex {
    /// An index with the default cache capacity.
    pub fn new() -> Self {
        return Self::with_capacity(DEFAULT_CACHE_CAPACITY);
    }

    /// An index keeping at most `capacity` cached results.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        return Self { cache: LruCache::new(capacity) };
    }

    /// Number of cached result sets.
    pub fn cached(&self) -> usize {
        return self.cache.len();
    }

    /// Drop every cached result, e.g. after the document changed.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Find verses containing `query`, at most `limit` of them, in document order.
    ///
    /// A verse matches when its folded text contains the whole folded query,
    /// or every whitespace-separated query word. `scope` restricts the scan
    /// to one book; a scope that does not resolve finds nothing. The returned
    /// vector is a copy: changing it never affects later cached lookups.
    pub fn search(
        &mut self,
        document: &Document,
        query: &str,
        limit: usize,
        scope: Option<&BookToken>,
    ) -> Vec<VerseReference> {
        let query = fold(query);
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let scope = match scope {
            None => None,
            Some(token) => match books::resolve(token, Some(document)) {
                0 => {
                    debug!(?token, "search scope unresolved");
                    return Vec::new();
                },
                number => Some(number),
            },
        };

        let key = CacheKey { limit, query, scope };
        if let Some(cached) = self.cache.get(&key) {
            debug!(query = %key.query, limit, "search cache hit");
            return cached.clone();
        }

        let books: Vec<&Book> = document
            .books
            .iter()
            .filter(|book| return scope.is_none_or(|number| return book.number == number))
            .collect();
        let matches = scan(document, &books, &key.query, limit);
        debug!(query = %key.query, limit, found = matches.len(), "search cache miss");

        if let Some((evicted, _)) = self.cache.push(key, matches.clone()) {
            debug!(query = %evicted.query, "search cache evicted entry");
        }
        return matches;
    }
}

impl Default for TextSearchIndex {
    fn default() -> Self {
        return Self::new();
    }
}

impl fmt::Debug for TextSearchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f
            .debug_struct("TextSearchIndex")
            .field("cached", &self.cache.len())
            .field("capacity", &self.cache.cap())
            .finish();
    }
}

/// Scan books in order, stopping as soon as `limit` verses matched.
fn scan(document: &Document, books: &[&Book], query: &str, limit: usize) -> Vec<VerseReference> {
    let words: Vec<&str> = query.split_whitespace().collect();
    let mut matches: Vec<VerseReference> = Vec::new();

    for book in books {
        for chapter in &book.chapters {
            let mut batch: Vec<&Verse> = Vec::new();
            for verse in &chapter.verses {
                if !verse_matches(&verse.text, query, &words) {
                    continue;
                }
                batch.push(verse);
                if matches.len().saturating_add(batch.len()) >= limit {
                    break;
                }
            }

            matches.extend(
                batch
                    .into_iter()
                    .map(|verse| return reference::verse_reference(document, book.number, chapter.number, verse)),
            );
            if matches.len() >= limit {
                return matches;
            }
        }
    }

    return matches;
}

/// Whole-query containment, or every word contained somewhere.
fn verse_matches(text: &str, query: &str, words: &[&str]) -> bool {
    let text = fold(text);
    return text.contains(query) || words.iter().all(|word| return text.contains(word));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Chapter;

    fn chapter(number: u32, texts: &[&str]) -> Chapter {
        let verses = texts
            .iter()
            .zip(1_u32..)
            .map(|(text, number)| return Verse { number, text: (*text).to_string(), ..Verse::default() })
            .collect();
        return Chapter { number, verses, ..Chapter::default() };
    }

    fn document() -> Document {
        let genesis = Book {
            chapters: vec![
                chapter(1, &[
                    "In the beginning God created the heaven and the earth.",
                    "And the earth was without form, and void.",
                    "And God said, Let there be light: and there was light.",
                ]),
                chapter(2, &["Thus the heavens and the earth were finished."]),
            ],
            id: Some("GEN".to_string()),
            name: "Genesis".to_string(),
            number: 1,
            ..Book::default()
        };
        let john = Book {
            chapters: vec![chapter(1, &[
                "In the beginning was the Word.",
                "The light shineth in darkness; and the darkness comprehended it not.",
            ])],
            id: Some("JHN".to_string()),
            name: "John".to_string(),
            number: 43,
            ..Book::default()
        };
        return Document { books: vec![genesis, john], name: "Test".to_string(), ..Document::default() };
    }

    fn ids(results: &[VerseReference]) -> Vec<&str> {
        return results.iter().map(|r| return r.id.as_str()).collect();
    }

    #[test]
    fn finds_phrase_in_document_order() {
        let mut index = TextSearchIndex::new();
        let results = index.search(&document(), "the beginning", 10, None);
        assert_eq!(ids(&results), vec!["1.1.1", "43.1.1"]);
        assert_eq!(results.first().map(|r| return r.reference.as_str()), Some("Genesis 1:1"));
    }

    #[test]
    fn all_words_match_out_of_order() {
        let mut index = TextSearchIndex::new();
        let results = index.search(&document(), "void earth", 10, None);
        assert_eq!(ids(&results), vec!["1.1.2"]);
    }

    #[test]
    fn query_is_folded() {
        let mut index = TextSearchIndex::new();
        let results = index.search(&document(), "LÍGHT!", 10, None);
        assert_eq!(ids(&results), vec!["1.1.3", "43.1.2"]);
    }

    #[test]
    fn empty_query_returns_nothing_and_caches_nothing() {
        let mut index = TextSearchIndex::new();
        assert!(index.search(&document(), " ?! ", 10, None).is_empty());
        assert_eq!(index.cached(), 0);
    }

    #[test]
    fn results_never_exceed_limit() {
        let mut index = TextSearchIndex::new();
        let doc = document();
        for limit in 1..5 {
            assert!(index.search(&doc, "the", limit, None).len() <= limit);
        }
        assert_eq!(ids(&index.search(&doc, "earth", 2, None)), vec!["1.1.1", "1.1.2"]);
        assert!(index.search(&doc, "the", 0, None).is_empty());
    }

    #[test]
    fn merged_block_with_huge_end_is_reported_by_its_bounds() {
        let mut doc = document();
        let light = doc
            .books
            .first_mut()
            .and_then(|book| return book.chapters.first_mut())
            .and_then(|chapter| return chapter.verses.get_mut(2));
        if let Some(verse) = light {
            verse.end_number = Some(30_000_000);
        }
        let mut index = TextSearchIndex::new();
        let results = index.search(&doc, "light", 1, None);
        assert_eq!(ids(&results), vec!["1.1.3-30000000"]);
        assert_eq!(results.first().map(|r| return r.reference.as_str()), Some("Genesis 1:3-30000000"));
    }

    #[test]
    fn scope_restricts_to_one_book() {
        let mut index = TextSearchIndex::new();
        let doc = document();
        let scope = BookToken::classify("John");
        assert_eq!(ids(&index.search(&doc, "beginning", 10, Some(&scope))), vec!["43.1.1"]);
        let numeric = BookToken::Number(1);
        assert_eq!(ids(&index.search(&doc, "beginning", 10, Some(&numeric))), vec!["1.1.1"]);
    }

    #[test]
    fn unresolved_scope_finds_nothing() {
        let mut index = TextSearchIndex::new();
        let scope = BookToken::classify("Nonexistent");
        assert!(index.search(&document(), "beginning", 10, Some(&scope)).is_empty());
    }

    #[test]
    fn repeated_search_is_idempotent_and_isolated() {
        let mut index = TextSearchIndex::new();
        let doc = document();
        let mut first = index.search(&doc, "light", 10, None);
        first.clear();
        let second = index.search(&doc, "light", 10, None);
        let third = index.search(&doc, "light", 10, None);
        assert_eq!(second.len(), 2);
        assert_eq!(second, third);
        assert_eq!(index.cached(), 1);
    }

    #[test]
    fn cache_is_bounded() {
        let mut index = TextSearchIndex::with_capacity(NonZeroUsize::new(2).unwrap());
        let doc = document();
        index.search(&doc, "light", 10, None);
        index.search(&doc, "earth", 10, None);
        index.search(&doc, "word", 10, None);
        assert_eq!(index.cached(), 2);
    }

    #[test]
    fn limit_is_part_of_the_key() {
        let mut index = TextSearchIndex::new();
        let doc = document();
        assert_eq!(index.search(&doc, "earth", 1, None).len(), 1);
        assert_eq!(index.search(&doc, "earth", 10, None).len(), 3);
        assert_eq!(index.cached(), 2);
    }
}
