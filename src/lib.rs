//! Scripture reference resolution and search.
//!
//! Parses references such as `"Genesis 1:1-3"` or `"1.1.1-3"`, resolves them
//! against a loaded [`Document`], autocompletes partial input keystroke by
//! keystroke and runs memoized full-text search. Mutable state lives in a
//! caller-owned [`Session`].
pub mod autocomplete;
pub mod books;
pub mod canon;
pub mod config;
pub mod document;
pub mod error;
pub mod grammar;
pub mod navigate;
pub mod normalize;
pub mod reference;
pub mod search;
pub mod session;
pub mod text;
pub mod types;
pub mod verses;

pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::grammar::BookToken;
pub use crate::reference::{ReferenceInput, resolve_reference, to_canonical_id, to_display_string, to_versioned_string};
pub use crate::session::Session;
pub use crate::types::{Book, Chapter, Document, Reference, SearchReference, Verse, VerseReference};
