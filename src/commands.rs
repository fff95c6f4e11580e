//! CLI commands for bibleref: get, id, random, search, complete, books, info, next, prev.
use std::collections::BTreeMap;
use std::path::Path;
use std::process::ExitCode;

use bibleref::autocomplete::find_book;
use bibleref::reference::{self, resolve_reference, to_canonical_id, to_display_string, to_versioned_string};
use bibleref::{BookToken, Config, Document, Error, Reference, SearchReference, Session, VerseReference};
use bibleref::{books, grammar, navigate, text};
use serde::Serialize;
use tracing::debug;

/// Exit code when the command ran but found nothing.
const NOT_FOUND: u8 = 1;

/// Everything a command needs: merged configuration and the loaded document.
pub struct Context {
    /// Configuration from `.bibleref.toml`, before flag overrides.
    pub config: Config,
    /// The document every command reads.
    pub document: Document,
    /// Print JSON instead of text.
    pub json: bool,
}

impl Context {
    /// Load `.bibleref.toml` from the working directory and the document it
    /// (or `--document`) names.
    ///
    /// # Errors
    ///
    /// Returns config errors, `Error::ConfigInvalid` when no document is
    /// named anywhere, or any error from loading the document.
    pub fn load(document_flag: Option<&Path>, json: bool) -> Result<Self, Error> {
        let config = Config::load(Path::new("."))?;
        let path = document_flag
            .map(Path::to_path_buf)
            .or_else(|| return config.document.clone())
            .ok_or_else(|| {
                return Error::ConfigInvalid {
                    reason: "no document: pass --document or set `document` in .bibleref.toml".to_string(),
                };
            })?;
        debug!(path = %path.display(), "loading document");
        let document = Document::load(&path)?;
        return Ok(Self { config, document, json });
    }
}

/// One row of `books --json`.
#[derive(Serialize)]
struct BookJson {
    /// Derived or explicit short name.
    abbreviation: String,
    /// Number of chapters.
    chapters: usize,
    /// Canonical id, empty when unknown.
    id: String,
    /// Display name.
    name: String,
    /// One-based book number.
    number: u32,
}

/// One snapshot of `complete --json`.
#[derive(Serialize)]
struct CompletionJson<'a> {
    /// Raw input as typed.
    input: &'a str,
    /// Engine output for that input.
    #[serde(flatten)]
    result: &'a SearchReference,
}

/// Output of `id --json`.
#[derive(Serialize)]
struct IdJson {
    /// Resolved book number.
    book: u32,
    /// Chapter number, `0` when absent.
    chapter: u32,
    /// Human display string.
    display: String,
    /// Canonical dotted id.
    id: String,
    /// Requested verse numbers.
    verses: Vec<u32>,
}

/// Output of `info --json`.
#[derive(Serialize)]
struct InfoJson {
    /// Number of books in the document.
    books: usize,
    /// Trimmed metadata with defaults.
    metadata: BTreeMap<String, String>,
    /// Full document name.
    name: String,
    /// Books counted as New Testament.
    new_testament: usize,
    /// Books counted as Old Testament.
    old_testament: usize,
    /// Short identifier.
    short_name: String,
    /// bibleref version.
    version: String,
}

/// List every book with its number, id, abbreviation and chapter count.
///
/// # Errors
///
/// Returns `Error::Json` if JSON output fails.
pub fn books(context: &Context) -> Result<ExitCode, Error> {
    let document = &context.document;
    let rows: Vec<BookJson> = document
        .books
        .iter()
        .enumerate()
        .map(|(index, book)| {
            return BookJson {
                abbreviation: books::resolve_abbreviation(document, index),
                chapters: book.chapters.len(),
                id: book.id.clone().unwrap_or_default(),
                name: book.name.clone(),
                number: book.number,
            };
        })
        .collect();

    if context.json {
        print_json(&rows)?;
    } else {
        for row in &rows {
            println!("{:>3}  {:<4} {:<5} {} ({} chapters)", row.number, row.id, row.abbreviation, row.name, row.chapters);
        }
    }
    return Ok(ExitCode::SUCCESS);
}

/// Jump to the chapter after (`next`) or before the reference's chapter.
///
/// # Errors
///
/// Returns `Error::UnknownBook` or `Error::UnknownChapter` when the starting
/// point does not exist, or `Error::Json` if JSON output fails.
pub fn close(context: &Context, input: &str, next: bool) -> Result<ExitCode, Error> {
    let document = &context.document;
    let parsed = parse_reference(document, input)?;
    navigate::chapter(document, &BookToken::Number(parsed.book), parsed.chapter)?;

    let Some(found) = navigate::close_chapter(document, parsed.book, parsed.chapter, next) else {
        let direction = if next { "after" } else { "before" };
        eprintln!("No chapter {direction} {}.", to_display_string(&Reference::chapter(parsed.book, parsed.chapter), Some(document)));
        return Ok(ExitCode::from(NOT_FOUND));
    };

    if context.json {
        print_json(&found)?;
    } else {
        println!("{}\t{}", found.reference, found.id);
    }
    return Ok(ExitCode::SUCCESS);
}

/// Replay input snapshots through one autocomplete session, as if typed
/// one after the other into the same field.
///
/// # Errors
///
/// Returns `Error::Json` if JSON output fails.
pub fn complete(context: &Context, inputs: &[String]) -> Result<ExitCode, Error> {
    let document = &context.document;
    let mut session = Session::with_cache_capacity(context.config.cache_capacity);
    let results: Vec<SearchReference> = inputs.iter().map(|input| return session.autocomplete_search(document, input)).collect();

    if context.json {
        let rows: Vec<CompletionJson<'_>> = inputs
            .iter()
            .zip(&results)
            .map(|(input, result)| return CompletionJson { input, result })
            .collect();
        print_json(&rows)?;
    } else {
        for (input, result) in inputs.iter().zip(&results) {
            let resolved = Reference::new(result.book, result.chapter, result.verses.clone());
            println!("{input:?} -> {:?}  [{}]", result.autocompleted, to_canonical_id(&resolved));
        }
    }

    if results.last().is_none_or(|last| return last.book == 0) {
        return Ok(ExitCode::from(NOT_FOUND));
    }
    return Ok(ExitCode::SUCCESS);
}

/// Print the verses of a reference. A reference without verses prints its
/// whole chapter. `with_version` suffixes each reference with the
/// document's short name.
///
/// # Errors
///
/// Returns `Error::UnknownBook` if no book matches, or `Error::Json` if JSON output fails.
pub fn get(context: &Context, input: &str, with_version: bool) -> Result<ExitCode, Error> {
    let document = &context.document;
    let mut parsed = parse_reference(document, input)?;
    if parsed.verses.is_empty()
        && let Ok(chapter) = navigate::chapter(document, &BookToken::Number(parsed.book), parsed.chapter)
    {
        let whole: Vec<u32> = chapter.verses.iter().map(|verse| return verse.number).collect();
        parsed = Reference::new(parsed.book, parsed.chapter, whole);
    }

    let mut found: Vec<VerseReference> =
        resolve_reference(document, &parsed).into_iter().filter(|found| return found.verse.number != 0).collect();
    if with_version {
        for verse in &mut found {
            append_version(document, verse);
        }
    }

    if context.json {
        print_json(&found)?;
    } else {
        for verse in &found {
            println!("{}  {}", verse.reference, text::verse_text(&verse.verse, false).trim());
        }
    }

    if found.is_empty() {
        eprintln!("No verses found for `{input}`.");
        return Ok(ExitCode::from(NOT_FOUND));
    }
    return Ok(ExitCode::SUCCESS);
}

/// Print the canonical id and display string of a reference.
///
/// # Errors
///
/// Returns `Error::UnknownBook` if no book matches, or `Error::Json` if JSON output fails.
pub fn id(context: &Context, input: &str, with_version: bool) -> Result<ExitCode, Error> {
    let document = &context.document;
    let parsed = parse_reference(document, input)?;
    let display = if with_version {
        to_versioned_string(&parsed, document)
    } else {
        to_display_string(&parsed, Some(document))
    };
    let out = IdJson {
        book: parsed.book,
        chapter: parsed.chapter,
        display,
        id: to_canonical_id(&parsed),
        verses: parsed.verses.clone(),
    };

    if context.json {
        print_json(&out)?;
    } else {
        println!("{}\t{}", out.id, out.display);
    }
    return Ok(ExitCode::SUCCESS);
}

/// Describe the loaded document.
///
/// # Errors
///
/// Returns `Error::Json` if JSON output fails.
pub fn info(context: &Context) -> Result<ExitCode, Error> {
    let document = &context.document;
    let out = InfoJson {
        books: document.books.len(),
        metadata: document.metadata_summary(),
        name: document.name.clone(),
        new_testament: navigate::new_testament(document).len(),
        old_testament: navigate::old_testament(document).len(),
        short_name: document.short_name(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    if context.json {
        print_json(&out)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("# {} ({})", out.name, out.short_name);
    println!();
    println!("Books:      {} ({} Old Testament, {} New Testament)", out.books, out.old_testament, out.new_testament);
    println!("bibleref:   {}", out.version);
    if !out.metadata.is_empty() {
        println!();
        println!("## Metadata");
        println!();
        for (key, value) in &out.metadata {
            println!("- {key}: {value}");
        }
    }
    return Ok(ExitCode::SUCCESS);
}

/// Print one verse picked at random from the document.
///
/// # Errors
///
/// Returns `Error::Json` if JSON output fails.
pub fn random(context: &Context, with_version: bool) -> Result<ExitCode, Error> {
    let document = &context.document;
    let Some(mut picked) = navigate::random_verse(document, &mut rand::thread_rng()) else {
        eprintln!("The document has no verses.");
        return Ok(ExitCode::from(NOT_FOUND));
    };
    if with_version {
        append_version(document, &mut picked);
    }

    if context.json {
        print_json(&picked)?;
    } else {
        println!("{}  {}", picked.reference, text::verse_text(&picked.verse, false).trim());
    }
    return Ok(ExitCode::SUCCESS);
}

/// Full-text search, optionally restricted to one book.
///
/// # Errors
///
/// Returns `Error::UnknownBook` if `--book` matches nothing, or `Error::Json`
/// if JSON output fails.
pub fn search(context: &Context, query: &str, limit: Option<usize>, book: Option<&str>) -> Result<ExitCode, Error> {
    let document = &context.document;
    let scope = match book {
        None => None,
        Some(raw) => Some(BookToken::Number(navigate::book(document, &BookToken::classify(raw))?.number)),
    };
    let limit = limit.unwrap_or(context.config.search_limit);

    let mut session = Session::with_cache_capacity(context.config.cache_capacity);
    let found = session.text_search(document, query, limit, scope.as_ref());

    if context.json {
        print_json(&found)?;
    } else {
        for verse in &found {
            println!("{}  {}", verse.reference, text::verse_text(&verse.verse, false).trim());
        }
        eprintln!("{} verses (limit {limit})", found.len());
    }

    if found.is_empty() {
        return Ok(ExitCode::from(NOT_FOUND));
    }
    return Ok(ExitCode::SUCCESS);
}

/// Parse a reference typed on the command line. A book the strict resolver
/// misses is retried with the forgiving autocomplete matcher, so `gen 1:1`
/// works as well as `Genesis 1:1`.
///
/// # Errors
///
/// Returns `Error::UnknownBook` if neither matcher finds the book.
fn parse_reference(document: &Document, input: &str) -> Result<Reference, Error> {
    let parsed = reference::parse(input, Some(document));
    if parsed.book != 0 {
        return Ok(parsed);
    }

    let (_, parts) = grammar::split(input);
    let Some(book) = find_book(document, &parts.book) else {
        return Err(Error::UnknownBook { token: parts.book });
    };
    debug!(input, book = book.number, "book matched loosely");
    return Ok(Reference::new(book.number, parsed.chapter, parsed.verses));
}

/// Suffix a resolved verse's display string with the document's short name.
fn append_version(document: &Document, verse: &mut VerseReference) {
    verse.reference.push(' ');
    verse.reference.push_str(&document.short_name());
}

/// Print any serializable value as pretty JSON on stdout.
///
/// # Errors
///
/// Returns `Error::Json` if serialization fails.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    return Ok(());
}
