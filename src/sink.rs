//! Append-only log file shared by all request handlers.
//!
//! The file is opened once at startup in create + append mode, so existing
//! records survive restarts. Handlers serialize a record into a complete line
//! first and then take the lock for a single write and flush, which keeps
//! concurrent records from interleaving.

use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::record::LogRecord;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode log record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to append to log file: {0}")]
    Write(#[from] std::io::Error),
}

/// Single-writer handle to the log file.
pub struct LogSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl LogSink {
    /// Opens (or creates) the file for appending. Never truncates.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|source| SinkError::Open {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record. Returns once the bytes have been handed to the OS.
    pub async fn append(&self, record: &LogRecord) -> Result<(), SinkError> {
        let line = record.to_line()?;

        let mut file = self.file.lock().await;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }

    /// Flush and sync the file before the process exits.
    pub async fn close(&self) -> Result<(), SinkError> {
        let mut file = self.file.lock().await;
        file.flush().await?;
        file.sync_all().await?;
        tracing::debug!(path = %self.path.display(), "Log file synced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Level;
    use std::sync::Arc;

    fn read_records(path: &Path) -> Vec<LogRecord> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| LogRecord::from_line(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_open_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");

        let sink = LogSink::open(&path).await.unwrap();
        assert!(path.exists());
        assert_eq!(sink.path(), path.as_path());
    }

    #[tokio::test]
    async fn test_open_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("app.log");

        let err = LogSink::open(&path).await.err().unwrap();
        assert!(matches!(err, SinkError::Open { .. }));
    }

    #[tokio::test]
    async fn test_append_does_not_truncate_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let earlier = LogRecord::new(Level::Info, "GET /a").with_attr("key", "value");
        std::fs::write(&path, earlier.to_line().unwrap()).unwrap();

        let sink = LogSink::open(&path).await.unwrap();
        sink.append(&LogRecord::new(Level::Info, "GET /b"))
            .await
            .unwrap();
        sink.close().await.unwrap();

        let records = read_records(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].msg, "GET /a");
        assert_eq!(records[1].msg, "GET /b");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_never_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let sink = Arc::new(LogSink::open(&path).await.unwrap());

        let mut tasks = Vec::new();
        for i in 0..64 {
            let sink = sink.clone();
            tasks.push(tokio::spawn(async move {
                // Large payloads make torn writes visible if locking were missing
                let record = LogRecord::new(Level::Info, format!("GET /{}", i))
                    .with_attr("payload", "x".repeat(8192));
                sink.append(&record).await.unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
        sink.close().await.unwrap();

        let records = read_records(&path);
        assert_eq!(records.len(), 64);

        let mut messages: Vec<_> = records.iter().map(|r| r.msg.clone()).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), 64);
    }
}
