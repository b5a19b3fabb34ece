//! Local persistence for QuoteSync.
//!
//! Two storage scopes backed by JSON files in two separate directories:
//!
//! - Durable scope: the full quote collection and the last-selected
//!   category filter. Survives restarts.
//! - Session scope: the last-displayed quote. The host environment owns
//!   the session directory's lifetime and clears it at session end; this
//!   module never deletes it.
//!
//! Durable saves are full-file overwrites, written to a temporary file and
//! renamed into place so a failed save leaves the previous durable state
//! unchanged. Save failures surface as `QuoteError::Persistence`, never
//! silently.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{QuoteError, QuoteResult};
use crate::models::QuoteRecord;

const QUOTES_FILE: &str = "quotes.json";
const CATEGORY_FILE: &str = "selected_category.json";
const LAST_VIEWED_FILE: &str = "last_viewed.json";

/// Local cache spanning the durable and session storage scopes
pub struct LocalCache {
    durable_dir: PathBuf,
    session_dir: PathBuf,
}

impl LocalCache {
    /// Create a cache over the given directories, creating them if needed
    pub fn new(durable_dir: impl Into<PathBuf>, session_dir: impl Into<PathBuf>) -> QuoteResult<Self> {
        let durable_dir = durable_dir.into();
        let session_dir = session_dir.into();
        fs::create_dir_all(&durable_dir)?;
        fs::create_dir_all(&session_dir)?;
        Ok(Self {
            durable_dir,
            session_dir,
        })
    }

    /// Load the durable collection. Absent file yields None (the caller's
    /// default-seed path); a present but unreadable file is an error, not
    /// a silent reset.
    pub fn load_durable(&self) -> QuoteResult<Option<Vec<QuoteRecord>>> {
        let path = self.durable_dir.join(QUOTES_FILE);
        match read_optional(&path)? {
            None => Ok(None),
            Some(content) => {
                let quotes: Vec<QuoteRecord> = serde_json::from_str(&content).map_err(|e| {
                    QuoteError::persistence(format!("corrupt quote cache {}: {}", path.display(), e))
                })?;
                Ok(Some(quotes))
            }
        }
    }

    /// Overwrite the durable collection with the full in-memory state
    pub fn save_durable(&self, quotes: &[QuoteRecord]) -> QuoteResult<()> {
        let content = serde_json::to_string_pretty(quotes)
            .map_err(|e| QuoteError::persistence(format!("serialize quote cache: {}", e)))?;
        write_atomic(&self.durable_dir.join(QUOTES_FILE), &content)
    }

    /// Load the last-selected category filter, if one was ever saved
    pub fn load_selected_category(&self) -> QuoteResult<Option<String>> {
        let path = self.durable_dir.join(CATEGORY_FILE);
        match read_optional(&path)? {
            None => Ok(None),
            Some(content) => {
                let category: String = serde_json::from_str(&content).map_err(|e| {
                    QuoteError::persistence(format!(
                        "corrupt category cache {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Ok(Some(category))
            }
        }
    }

    /// Persist the selected category filter durably
    pub fn save_selected_category(&self, category: &str) -> QuoteResult<()> {
        let content = serde_json::to_string(category)
            .map_err(|e| QuoteError::persistence(format!("serialize category: {}", e)))?;
        write_atomic(&self.durable_dir.join(CATEGORY_FILE), &content)
    }

    /// Load the last-displayed quote from the session scope.
    ///
    /// Session data is ephemeral, so a corrupt file is treated as absent.
    pub fn load_session_last(&self) -> QuoteResult<Option<QuoteRecord>> {
        let path = self.session_dir.join(LAST_VIEWED_FILE);
        match read_optional(&path)? {
            None => Ok(None),
            Some(content) => Ok(serde_json::from_str(&content).ok()),
        }
    }

    /// Record the last-displayed quote in the session scope
    pub fn save_session_last(&self, record: &QuoteRecord) -> QuoteResult<()> {
        let content = serde_json::to_string(record)
            .map_err(|e| QuoteError::persistence(format!("serialize last viewed: {}", e)))?;
        write_atomic(&self.session_dir.join(LAST_VIEWED_FILE), &content)
    }
}

fn read_optional(path: &Path) -> QuoteResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(QuoteError::persistence(format!(
            "read {}: {}",
            path.display(),
            e
        ))),
    }
}

fn write_atomic(path: &Path, content: &str) -> QuoteResult<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content)
        .map_err(|e| QuoteError::persistence(format!("write {}: {}", tmp.display(), e)))?;
    fs::rename(&tmp, path)
        .map_err(|e| QuoteError::persistence(format!("rename into {}: {}", path.display(), e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cache() -> (TempDir, TempDir, LocalCache) {
        let durable = TempDir::new().unwrap();
        let session = TempDir::new().unwrap();
        let cache = LocalCache::new(durable.path(), session.path()).unwrap();
        (durable, session, cache)
    }

    #[test]
    fn test_load_durable_absent() {
        let (_d, _s, cache) = cache();
        assert!(cache.load_durable().unwrap().is_none());
    }

    #[test]
    fn test_durable_round_trip() {
        let (_d, _s, cache) = cache();
        let quotes = vec![
            QuoteRecord::new("A", "X"),
            QuoteRecord::new("B", "Y"),
        ];

        cache.save_durable(&quotes).unwrap();
        let loaded = cache.load_durable().unwrap().unwrap();
        assert_eq!(loaded, quotes);
    }

    #[test]
    fn test_durable_save_is_full_overwrite() {
        let (_d, _s, cache) = cache();
        cache
            .save_durable(&[QuoteRecord::new("A", "X"), QuoteRecord::new("B", "Y")])
            .unwrap();
        cache.save_durable(&[QuoteRecord::new("C", "Z")]).unwrap();

        let loaded = cache.load_durable().unwrap().unwrap();
        assert_eq!(loaded, vec![QuoteRecord::new("C", "Z")]);
    }

    #[test]
    fn test_corrupt_durable_is_an_error() {
        let (durable, _s, cache) = cache();
        fs::write(durable.path().join(QUOTES_FILE), "not json").unwrap();
        assert!(matches!(
            cache.load_durable(),
            Err(QuoteError::Persistence(_))
        ));
    }

    #[test]
    fn test_selected_category_round_trip() {
        let (_d, _s, cache) = cache();
        assert!(cache.load_selected_category().unwrap().is_none());

        cache.save_selected_category("Life").unwrap();
        assert_eq!(
            cache.load_selected_category().unwrap().as_deref(),
            Some("Life")
        );
    }

    #[test]
    fn test_session_last_round_trip() {
        let (_d, _s, cache) = cache();
        assert!(cache.load_session_last().unwrap().is_none());

        let record = QuoteRecord::new("Shown", "Life");
        cache.save_session_last(&record).unwrap();
        assert_eq!(cache.load_session_last().unwrap(), Some(record));
    }

    #[test]
    fn test_corrupt_session_last_treated_as_absent() {
        let (_d, session, cache) = cache();
        fs::write(session.path().join(LAST_VIEWED_FILE), "garbage").unwrap();
        assert!(cache.load_session_last().unwrap().is_none());
    }

    #[test]
    fn test_scopes_are_independent() {
        let (durable, session, cache) = cache();
        cache.save_durable(&[QuoteRecord::new("A", "X")]).unwrap();
        cache
            .save_session_last(&QuoteRecord::new("A", "X"))
            .unwrap();

        assert!(durable.path().join(QUOTES_FILE).exists());
        assert!(!durable.path().join(LAST_VIEWED_FILE).exists());
        assert!(session.path().join(LAST_VIEWED_FILE).exists());
        assert!(!session.path().join(QUOTES_FILE).exists());
    }
}
