//! PlanStore - the single on-disk copy of the latest plan
//!
//! Every successful breakdown overwrites the same file. There is no history
//! and no locking between writers: the last one to finish wins.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

/// Fixed-path JSON file holding the most recent plan
#[derive(Debug, Clone)]
pub struct PlanStore {
    path: PathBuf,
}

impl PlanStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the file with `value`, pretty-printed with 4-space indent
    ///
    /// The content goes to a sibling temp file that is synced and then renamed
    /// over the target, so readers see either the old plan or the new one in full.
    pub fn write(&self, value: &Value) -> io::Result<()> {
        debug!(path = %self.path.display(), "PlanStore::write: called");
        let bytes = to_pretty_json(value)?;
        self.replace_with(&bytes)
    }

    /// Same as [`PlanStore::write`], run on the blocking thread pool
    pub async fn write_async(&self, value: &Value) -> io::Result<()> {
        debug!(path = %self.path.display(), "PlanStore::write_async: called");
        let bytes = to_pretty_json(value)?;
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.replace_with(&bytes))
            .await
            .map_err(io::Error::other)?
    }

    fn replace_with(&self, bytes: &[u8]) -> io::Result<()> {
        let tmp = self.temp_path();
        if let Err(e) = write_synced(&tmp, bytes).and_then(|_| fs::rename(&tmp, &self.path)) {
            debug!(error = %e, "PlanStore::replace_with: failed, removing temp file");
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        Ok(())
    }

    /// Read back the stored plan
    pub fn read(&self) -> io::Result<Value> {
        debug!(path = %self.path.display(), "PlanStore::read: called");
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(io::Error::other)
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "plan.json".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", name, uuid::Uuid::now_v7().simple()))
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Serialize with 4-space indentation, keys in parse order
pub fn to_pretty_json(value: &Value) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser).map_err(io::Error::other)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_pretty_json_uses_four_spaces() {
        let bytes = to_pretty_json(&json!({"goal": "x", "phases": []})).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "{\n    \"goal\": \"x\",\n    \"phases\": []\n}");
    }

    #[test]
    fn test_pretty_json_keeps_key_order() {
        let value: Value = serde_json::from_str(r#"{"phases": [], "goal": "x"}"#).unwrap();
        let text = String::from_utf8(to_pretty_json(&value).unwrap()).unwrap();
        assert!(text.find("phases").unwrap() < text.find("goal").unwrap());
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let store = PlanStore::new(dir.path().join("output.json"));
        let value = json!({
            "goal": "Learn Rust",
            "phases": [{"name": "Basics", "tasks": ["Read the book", "Écrire du code"]}]
        });

        store.write(&value).unwrap();
        assert_eq!(store.read().unwrap(), value);
    }

    #[test]
    fn test_write_overwrites_and_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let store = PlanStore::new(dir.path().join("output.json"));

        store.write(&json!({"goal": "first", "phases": [1, 2, 3]})).unwrap();
        store.write(&json!({"goal": "second"})).unwrap();

        assert_eq!(store.read().unwrap(), json!({"goal": "second"}));
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = PlanStore::new(dir.path().join("no-such-dir").join("output.json"));
        assert!(store.write(&json!({})).is_err());
    }

    #[tokio::test]
    async fn test_write_async_replaces_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output.json");
        fs::write(&path, "stale").unwrap();
        let store = PlanStore::new(&path);
        let value = json!({"goal": "x", "phases": [{"name": "Only", "tasks": ["one"]}]});

        store.write_async(&value).await.unwrap();

        assert_eq!(fs::read(&path).unwrap(), to_pretty_json(&value).unwrap());
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_write_async_to_missing_directory_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let store = PlanStore::new(dir.path().join("no-such-dir").join("output.json"));

        let err = store.write_async(&json!({})).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = PlanStore::new(dir.path().join("absent.json"));
        assert_eq!(store.read().unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
