use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::search::{DEFAULT_CACHE_CAPACITY, DEFAULT_LIMIT};

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".bibleref.toml";

/// Project configuration loaded from `.bibleref.toml`.
/// Command-line flags override every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Text-search cache entries kept per session.
    pub cache_capacity: NonZeroUsize,
    /// Default document path, relative to the config file's directory.
    pub document: Option<PathBuf>,
    /// Default maximum number of text-search results.
    pub search_limit: usize,
}

/// Raw TOML structure for `.bibleref.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct BiblerefTomlConfig {
    /// Cache entries; must be at least one.
    cache_capacity: Option<usize>,
    /// Document path.
    document: Option<PathBuf>,
    /// Search result limit.
    search_limit: Option<usize>,
}

impl Config {
    /// Load config from `.bibleref.toml` in the given root directory.
    /// Returns defaults if the file doesn't exist.
    /// Returns an error if the file exists but is malformed, never silently
    /// falling back to defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// `Error::TomlDe` if the TOML is malformed,
    /// or `Error::ConfigInvalid` if `cache_capacity` is zero.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: BiblerefTomlConfig = toml::from_str(&content)?;
        let cache_capacity = match raw.cache_capacity {
            None => DEFAULT_CACHE_CAPACITY,
            Some(n) => NonZeroUsize::new(n).ok_or_else(|| {
                return Error::ConfigInvalid { reason: "cache_capacity must be at least 1".to_string() };
            })?,
        };

        return Ok(Self {
            cache_capacity,
            document: raw.document.map(|d| return root.join(d)),
            search_limit: raw.search_limit.unwrap_or(DEFAULT_LIMIT),
        });
    }
}

impl Default for Config {
    fn default() -> Self {
        return Self { cache_capacity: DEFAULT_CACHE_CAPACITY, document: None, search_limit: DEFAULT_LIMIT };
    }
}
