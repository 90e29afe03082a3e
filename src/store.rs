// src/store.rs
// =============================================================================
// The results file: a JSON array with one DomainResult per domain.
//
// Every domain worker writes its record here as soon as it finishes, so an
// interrupted run still leaves a readable, partial file behind.
//
// How an update works (all inside one lock shared by every worker):
// 1. Read the current array (a missing or unparsable file counts as empty)
// 2. Replace the record with the same `name`, or append a new one
// 3. Write the whole array to "<output>.tmp"
// 4. Rename the temp file over the output file
//
// Step 4 is atomic on the same filesystem, so readers only ever see a
// complete old file or a complete new one.
// =============================================================================

use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::report::DomainResult;

/// Shared handle to the results file.
///
/// Wrap it in an `Arc` to hand it to many workers; `upsert` serializes
/// them.
#[derive(Debug)]
pub struct ResultStore {
    path: PathBuf,
    // Guards the whole read-modify-write-rename cycle
    lock: Mutex<()>,
}

impl ResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Creates the file with an empty array if it does not exist yet.
    // An existing file is left untouched.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        if tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(());
        }
        tokio::fs::write(&self.path, b"[]\n")
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.display().to_string(),
                source,
            })
    }

    // Inserts `result`, or replaces the existing record with the same name
    pub async fn upsert(&self, result: DomainResult) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        let mut results = self.read_all().await?;

        match results.iter_mut().find(|existing| existing.name == result.name) {
            Some(existing) => *existing = result,
            None => results.push(result),
        }

        let json = to_indented_json(&results)?;
        self.replace_file(&json).await
    }

    // Reads every record currently in the file
    #[cfg(test)]
    pub async fn load(&self) -> Result<Vec<DomainResult>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_all().await
    }

    async fn read_all(&self) -> Result<Vec<DomainResult>, StoreError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.display().to_string(),
                    source,
                })
            }
        };

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        match serde_json::from_slice(&content) {
            Ok(results) => Ok(results),
            Err(e) => {
                tracing::warn!(
                    "Results file {} is not a valid result array ({}), starting fresh",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    async fn replace_file(&self, json: &[u8]) -> Result<(), StoreError> {
        let tmp_path = temp_path(&self.path);

        if let Err(source) = tokio::fs::write(&tmp_path, json).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(StoreError::Write {
                path: tmp_path.display().to_string(),
                source,
            });
        }

        if let Err(source) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(StoreError::Rename {
                path: self.path.display().to_string(),
                source,
            });
        }

        Ok(())
    }
}

// "<output>.tmp" next to the output file
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

// serde_json's pretty printer with four-space indentation
fn to_indented_json<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why tokio::sync::Mutex and not std::sync::Mutex?
//    - the guard is held across .await points (file reads and writes)
//    - a std guard must not be held across an await; tokio's can
//
// 2. Why Mutex<()>?
//    - the data lives in the file, not in memory
//    - the mutex only makes sure one update runs at a time
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn record(name: &str, date: &str) -> DomainResult {
        DomainResult {
            name: name.to_string(),
            logo: "-".to_string(),
            internal_link: Vec::new(),
            email: vec!["-".to_string()],
            matched: vec!["Foo".to_string()],
            last_updated: date.to_string(),
        }
    }

    #[tokio::test]
    async fn test_initialize_creates_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("programs.json"));

        store.initialize().await.unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "[]\n");
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("programs.json");
        let store = ResultStore::new(&path);
        store.upsert(record("https://a.com", "2024-01-01")).await.unwrap();

        store.initialize().await.unwrap();

        assert_eq!(store.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_same_name_twice_keeps_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("programs.json"));

        store.upsert(record("https://a.com", "2024-01-01")).await.unwrap();
        store.upsert(record("https://a.com", "2024-02-02")).await.unwrap();

        let results = store.load().await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].last_updated, "2024-02-02");
    }

    #[tokio::test]
    async fn test_upsert_replaces_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("programs.json"));

        store.upsert(record("https://a.com", "2024-01-01")).await.unwrap();
        store.upsert(record("https://b.com", "2024-01-01")).await.unwrap();
        store.upsert(record("https://a.com", "2024-03-03")).await.unwrap();

        let names: Vec<_> = store.load().await.unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["https://a.com", "https://b.com"]);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("programs.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = ResultStore::new(&path);

        store.upsert(record("https://a.com", "2024-01-01")).await.unwrap();

        let results = store.load().await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(!temp_path(&path).exists());
    }

    #[tokio::test]
    async fn test_file_uses_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("programs.json"));

        store.upsert(record("https://a.com", "2024-01-01")).await.unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(content.starts_with("[\n    {\n        \"name\": \"https://a.com\""));
    }

    #[tokio::test]
    async fn test_concurrent_upserts_keep_every_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(ResultStore::new(dir.path().join("programs.json")));
        store.initialize().await.unwrap();

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .upsert(record(&format!("https://site{}.com", i), "2024-01-01"))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let results = store.load().await.unwrap();
        assert_eq!(results.len(), 32);
        let names: std::collections::HashSet<_> = results.iter().map(|r| &r.name).collect();
        assert_eq!(names.len(), 32);
    }

    #[tokio::test]
    async fn test_write_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("missing").join("programs.json"));

        let err = store.upsert(record("https://a.com", "2024-01-01")).await;
        assert!(matches!(err, Err(StoreError::Write { .. })));
    }
}
