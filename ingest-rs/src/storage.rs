use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error at line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Newline delimited JSON log. Entries are only ever appended.
pub struct AppendLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl AppendLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `entry` as a single line. The file is created on first use.
    pub async fn append<T: Serialize + ?Sized>(&self, entry: &T) -> Result<(), StorageError> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }

    /// Parses every entry of the log, line by line. A missing log reads as empty.
    pub async fn read_all<T: DeserializeOwned>(&self) -> Result<Vec<T>, StorageError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line).map_err(|source| StorageError::Json {
                    line: idx + 1,
                    source,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn temp_log() -> AppendLog {
        AppendLog::new(std::env::temp_dir().join(format!("ingest-{}.ndjson", uuid::Uuid::new_v4())))
    }

    #[tokio::test]
    async fn test_missing_log_reads_empty() {
        let log = temp_log();
        let entries: Vec<Value> = log.read_all().await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_append_one_line_per_entry() {
        let log = temp_log();
        log.append(&json!({"a": 1, "nested": {"b": [1, 2]}})).await.unwrap();
        log.append(&json!({"a": 2})).await.unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.ends_with('\n'));

        let entries: Vec<Value> = log.read_all().await.unwrap();
        assert_eq!(entries, vec![json!({"a": 1, "nested": {"b": [1, 2]}}), json!({"a": 2})]);
        std::fs::remove_file(log.path()).unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_appends_dont_interleave() {
        let log = Arc::new(temp_log());
        let mut handles = Vec::new();
        for i in 0..32 {
            let log = log.clone();
            handles.push(tokio::spawn(async move {
                log.append(&json!({"device": i, "payload": "x".repeat(512)}))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let entries: Vec<Value> = log.read_all().await.unwrap();
        assert_eq!(entries.len(), 32);
        let mut devices: Vec<i64> = entries
            .iter()
            .map(|e| e["device"].as_i64().unwrap())
            .collect();
        devices.sort();
        assert_eq!(devices, (0..32).collect::<Vec<_>>());
        std::fs::remove_file(log.path()).unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_line_is_reported() {
        let log = temp_log();
        std::fs::write(log.path(), "{\"a\":1}\nnot json\n").unwrap();
        let result: Result<Vec<Value>, _> = log.read_all().await;
        assert!(matches!(result, Err(StorageError::Json { line: 2, .. })));
        std::fs::remove_file(log.path()).unwrap();
    }

    #[tokio::test]
    async fn test_unwritable_path_fails() {
        let log = AppendLog::new("/nonexistent-dir/log.ndjson");
        assert!(matches!(
            log.append(&json!({})).await,
            Err(StorageError::Io(_))
        ));
    }
}
