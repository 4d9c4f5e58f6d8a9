//! JSONL file writer for agent messages.
//!
//! Each [`Message`] is serialized as a single JSON line. A run boundary is
//! written as a `{"event": "run_started", ...}` line, since message ids
//! restart at 1 on every run.

use buildcrew_application::MessageLogSink;
use buildcrew_domain::Message;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL message log that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlMessageLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlMessageLog {
    /// Open the log at the given path, appending to an existing file.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create message log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open message log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&self, line: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // JSONL is append-only; flush each line so a crash loses nothing
            let _ = writer.flush();
        }
    }
}

impl MessageLogSink for JsonlMessageLog {
    fn record(&self, message: &Message) {
        let Ok(line) = serde_json::to_string(message) else {
            return;
        };
        self.write_line(&line);
    }

    fn on_reset(&self) {
        let marker = serde_json::json!({
            "event": "run_started",
            "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        });
        self.write_line(&marker.to_string());
    }
}

impl Drop for JsonlMessageLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildcrew_domain::{AgentRole, MessageBus, MessageDraft, MessageSender};

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_line_per_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("messages.jsonl");
        let log = JsonlMessageLog::new(&path).unwrap();

        let mut bus = MessageBus::new();
        log.on_reset();
        log.record(&bus.append(
            MessageDraft::task(MessageSender::System, "Design the system architecture")
                .to(AgentRole::Architect),
        ));
        log.record(&bus.append(MessageDraft::response(AgentRole::Architect, "done")));
        drop(log);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["event"], "run_started");
        assert_eq!(lines[1]["id"], 1);
        assert_eq!(lines[1]["type"], "task");
        assert!(lines[1].get("timestamp").is_some());
        assert_eq!(lines[2]["content"], "done");
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.jsonl");

        for _ in 0..2 {
            let log = JsonlMessageLog::new(&path).unwrap();
            log.on_reset();
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_returns_none_for_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        // A regular file cannot be a parent directory
        assert!(JsonlMessageLog::new(blocker.join("messages.jsonl")).is_none());
    }
}
