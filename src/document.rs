//! Loading, validation and metadata for JSON scripture documents.
use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::canon;
use crate::error::Error;
use crate::text::strip_text;
use crate::types::Document;

impl Document {
    /// Read and validate a document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `Error::DocumentNotFound` if the file doesn't exist,
    /// `Error::Io` for other read failures,
    /// `Error::Json` if the content is not a valid document,
    /// or `Error::DocumentInvalid` if validation fails.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = match std::fs::read_to_string(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::DocumentNotFound { path: path.to_path_buf() });
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };
        let document = Self::parse(&content)?;
        debug!(path = %path.display(), books = document.books.len(), "document loaded");
        return Ok(document);
    }

    /// Parse and validate a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if the content is not a valid document,
    /// or `Error::DocumentInvalid` if validation fails.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let mut document: Self = serde_json::from_str(content)?;
        document.validate()?;
        return Ok(document);
    }

    /// Check the minimum shape and fill in missing book names, numbers and ids.
    ///
    /// Only the first book, chapter and verse are inspected for content.
    ///
    /// # Errors
    ///
    /// Returns `Error::DocumentInvalid` naming the first missing piece.
    pub fn validate(&mut self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(invalid("missing name"));
        }
        let Some(first_book) = self.books.first() else {
            return Err(invalid("no books"));
        };
        let Some(first_chapter) = first_book.chapters.first() else {
            return Err(invalid("no initial chapters"));
        };
        let Some(first_verse) = first_chapter.verses.first() else {
            return Err(invalid("no initial verses"));
        };
        if first_verse.text.is_empty() {
            return Err(invalid("no initial text"));
        }

        for (index, book) in self.books.iter_mut().enumerate() {
            if book.name.is_empty() {
                let by_id = book.id.as_deref().and_then(canon::name_by_id);
                book.name = by_id.or_else(|| return canon::name_by_number(book.number)).unwrap_or("").to_string();
                debug!(index, name = %book.name, "filled missing book name");
            }
            if book.number == 0 {
                book.number = u32::try_from(index).ok().and_then(|i| return i.checked_add(1)).unwrap_or(0);
                debug!(index, number = book.number, "filled missing book number");
            }
            if book.id.is_none() {
                book.id = canon::id_by_number(book.number).map(str::to_string);
            }
        }

        return Ok(());
    }

    /// Short identifier such as `"KJV"`.
    ///
    /// Explicit abbreviation first, then `metadata.identifier`, then the
    /// upper-cased name when it is short, else the initials of the
    /// non-numeric words of the name.
    pub fn short_name(&self) -> String {
        if let Some(abbreviation) = self.abbreviation.as_ref().filter(|a| return !a.trim().is_empty()) {
            return abbreviation.clone();
        }
        if let Some(identifier) = self.metadata_string("identifier") {
            return identifier;
        }
        if self.name.chars().count() < 5 {
            return self.name.to_uppercase();
        }
        return self
            .name
            .split_whitespace()
            .filter(|word| return word.parse::<f64>().is_err())
            .filter_map(|word| return word.chars().next())
            .collect::<String>()
            .to_uppercase();
    }

    /// Metadata with tags stripped and values trimmed. Empty values are
    /// dropped; `title` and `identifier` always have a value.
    pub fn metadata_summary(&self) -> BTreeMap<String, String> {
        let mut summary: BTreeMap<String, String> = self
            .metadata
            .keys()
            .filter_map(|key| return self.metadata_string(key).map(|value| return (key.clone(), value)))
            .collect();

        summary.entry("title".to_string()).or_insert_with(|| return self.name.clone());
        summary.entry("identifier".to_string()).or_insert_with(|| return self.short_name());
        return summary;
    }

    /// A metadata value rendered as trimmed text, `None` when empty.
    fn metadata_string(&self, key: &str) -> Option<String> {
        let rendered = match self.metadata.get(key)? {
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(serde_json::Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            serde_json::Value::Bool(flag) => flag.to_string(),
            serde_json::Value::Number(number) => number.to_string(),
            serde_json::Value::String(text) => text.clone(),
            serde_json::Value::Null | serde_json::Value::Object(_) => return None,
        };
        let trimmed = strip_text(&rendered).trim().to_string();
        if trimmed.is_empty() {
            return None;
        }
        return Some(trimmed);
    }
}

/// Shorthand for a validation failure.
fn invalid(reason: &str) -> Error {
    return Error::DocumentInvalid { reason: reason.to_string() };
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "name": "King James Version",
        "metadata": {"language": " en ", "publisher": "", "contributors": ["A", "B"]},
        "books": [
            {"name": "Genesis", "chapters": [{"number": 1, "verses": [{"number": 1, "text": "In the beginning"}]}]},
            {"id": "EXO", "number": 2},
            {"name": "Custom"}
        ]
    }"#;

    #[test]
    fn fills_missing_book_fields() {
        let document = Document::parse(MINIMAL).unwrap();
        let genesis = document.books.first().unwrap();
        assert_eq!(genesis.number, 1);
        assert_eq!(genesis.id.as_deref(), Some("GEN"));
        let exodus = document.books.get(1).unwrap();
        assert_eq!(exodus.name, "Exodus");
        let custom = document.books.get(2).unwrap();
        assert_eq!(custom.number, 3);
        assert_eq!(custom.id.as_deref(), Some("LEV"));
    }

    #[test]
    fn rejects_incomplete_documents() {
        let cases = [
            r#"{"name": "", "books": []}"#,
            r#"{"name": "X", "books": []}"#,
            r#"{"name": "X", "books": [{"name": "Genesis"}]}"#,
            r#"{"name": "X", "books": [{"name": "Genesis", "chapters": [{"number": 1}]}]}"#,
            r#"{"name": "X", "books": [{"name": "Genesis", "chapters": [{"number": 1, "verses": [{"number": 1}]}]}]}"#,
        ];
        for case in cases {
            assert!(matches!(Document::parse(case), Err(Error::DocumentInvalid { .. })), "accepted: {case}");
        }
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(Document::parse("{"), Err(Error::Json(_))));
    }

    #[test]
    fn short_name_falls_back_to_initials() {
        let document = Document::parse(MINIMAL).unwrap();
        assert_eq!(document.short_name(), "KJV");

        let short = Document { name: "web".to_string(), ..Document::default() };
        assert_eq!(short.short_name(), "WEB");

        let numbered = Document { name: "Bible 2009 Edition".to_string(), ..Document::default() };
        assert_eq!(numbered.short_name(), "BE");
    }

    #[test]
    fn metadata_summary_trims_and_defaults() {
        let document = Document::parse(MINIMAL).unwrap();
        let summary = document.metadata_summary();
        assert_eq!(summary.get("language").map(String::as_str), Some("en"));
        assert_eq!(summary.get("contributors").map(String::as_str), Some("A, B"));
        assert!(!summary.contains_key("publisher"));
        assert_eq!(summary.get("title").map(String::as_str), Some("King James Version"));
        assert_eq!(summary.get("identifier").map(String::as_str), Some("KJV"));
    }

    #[test]
    fn load_reports_missing_file() {
        let missing = Path::new("definitely/not/here.json");
        assert!(matches!(Document::load(missing), Err(Error::DocumentNotFound { .. })));
    }
}
