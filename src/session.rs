//! Caller-owned search session.
//!
//! Autocomplete history and the text-search cache live here instead of in
//! process-wide globals, so independent sessions never see each other's state.
use std::num::NonZeroUsize;

use crate::autocomplete::Autocomplete;
use crate::grammar::BookToken;
use crate::search::TextSearchIndex;
use crate::types::{Document, SearchReference, VerseReference};

/// State for one independent search context: an input field plus its result list.
#[derive(Debug, Default)]
pub struct Session {
    /// Keystroke history for reference autocomplete.
    pub autocomplete: Autocomplete,
    /// Memoized full-text search.
    pub search: TextSearchIndex,
}

impl Session {
    /// A session with the default cache capacity.
    pub fn new() -> Self {
        return Self::default();
    }

    /// A session whose text-search cache keeps at most `capacity` results.
    pub fn with_cache_capacity(capacity: NonZeroUsize) -> Self {
        return Self {
            autocomplete: Autocomplete::new(),
            search: TextSearchIndex::with_capacity(capacity),
        };
    }

    /// Autocomplete a partial reference typed into this session's field.
    pub fn autocomplete_search(&mut self, document: &Document, input: &str) -> SearchReference {
        return self.autocomplete.search(document, input);
    }

    /// Full-text search through this session's cache.
    pub fn text_search(
        &mut self,
        document: &Document,
        query: &str,
        limit: usize,
        scope: Option<&BookToken>,
    ) -> Vec<VerseReference> {
        return self.search.search(document, query, limit, scope);
    }
}
