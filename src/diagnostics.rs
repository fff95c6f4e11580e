use bibleref::Error;
use bibleref::canon;
use bibleref::config::CONFIG_FILE;

/// ANSI bold for headings.
const BOLD: &str = "\x1b[1m";
/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where there is one,
/// how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::ConfigInvalid { reason } => render_config_invalid(reason),
        Error::DocumentInvalid { reason } => format!(
            "\
# Error: Invalid Document

The document is missing required content: {reason}.

## Fix

A document needs a `name` and at least one book whose first chapter has a
first verse with `text`.
"
        ),
        Error::DocumentNotFound { path } => format!(
            "\
# Error: Document Not Found

`{}` does not exist.

## Fix

Pass an existing file with `--document`, or set `document` in `{CONFIG_FILE}`.
",
            path.display()
        ),
        Error::UnknownBook { token } => render_unknown_book(token),
        Error::UnknownChapter { book, chapter } => format!(
            "\
# Error: Unknown Chapter

{book} has no chapter {chapter}.
"
        ),
        Error::UnknownVerse { book, chapter, verse } => format!(
            "\
# Error: Unknown Verse

{book} {chapter} has no verse {verse}.
"
        ),
        Error::Io(_) | Error::Json(_) | Error::TomlDe(_) => render_generic(e),
    };
}

/// Wrapped library errors: a heading plus the underlying message.
fn render_generic(e: &Error) -> String {
    let title = match e {
        Error::Json(_) => "Invalid JSON",
        Error::TomlDe(_) => "Invalid TOML",
        _ => "I/O",
    };
    return format!(
        "\
# Error: {title}

{e}
"
    );
}

/// Config problems, including a missing document setting.
fn render_config_invalid(reason: &str) -> String {
    return format!(
        "\
# Error: Invalid Config

{reason}

## Fix

Example `{CONFIG_FILE}`:

    document = \"kjv.json\"
    search_limit = 500
    cache_capacity = 256
"
    );
}

/// Unknown book, with canonical names that share its first letters.
fn render_unknown_book(token: &str) -> String {
    let mut out = format!(
        "\
# Error: Unknown Book

No book matches `{token}`.
"
    );

    let suggestions = suggest_books(token);
    if !suggestions.is_empty() {
        out.push_str("\n## Did you mean\n\n");
        for name in suggestions {
            out.push_str("- ");
            out.push_str(name);
            out.push('\n');
        }
    }

    out.push_str("\nRun `bibleref books` to list the document's books.\n");
    return out;
}

/// Canonical names sharing the token's first two letters, case-insensitively.
fn suggest_books(token: &str) -> Vec<&'static str> {
    let prefix: String = token.chars().filter(|c| return !c.is_whitespace()).take(2).collect::<String>().to_lowercase();
    if prefix.chars().count() < 2 {
        return Vec::new();
    }
    return canon::names()
        .filter(|name| return name.replace(' ', "").to_lowercase().starts_with(&prefix))
        .take(5)
        .collect();
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn unknown_book_suggests_canonical_names() {
        let md = render_error(&Error::UnknownBook { token: "Gn".to_string() });
        assert!(md.starts_with("# Error: Unknown Book"));
        assert!(!md.contains("Did you mean"));

        let md = render_error(&Error::UnknownBook { token: "Revelatoin".to_string() });
        assert!(md.contains("- Revelation"), "{md}");
    }

    #[test]
    fn missing_document_points_at_config() {
        let md = render_error(&Error::DocumentNotFound { path: PathBuf::from("kjv.json") });
        assert!(md.contains("`kjv.json` does not exist."));
        assert!(md.contains(".bibleref.toml"));
    }

    #[test]
    fn wrapped_errors_render_generic_heading() {
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let md = render_error(&Error::Json(json));
        assert!(md.starts_with("# Error: Invalid JSON"));
    }
}
