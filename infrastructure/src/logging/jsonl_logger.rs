//! JSONL file writer for debate events.
//!
//! Each [`DebateEvent`] becomes one JSON line carrying `type`, a sequence
//! number `seq` and an RFC3339 `timestamp`, appended through a buffered
//! writer.

use debate_application::ports::debate_logger::{DebateEvent, DebateLogger};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

struct Sink {
    writer: BufWriter<File>,
    next_seq: u64,
}

/// Debate transcript logger that writes one JSON object per line.
///
/// Thread-safe via a `Mutex`. Flushes after every event and on `Drop`.
pub struct JsonlDebateLogger {
    sink: Mutex<Sink>,
    path: PathBuf,
}

impl JsonlDebateLogger {
    /// Create a logger writing to `path`, truncating any previous transcript.
    ///
    /// Parent directories are created as needed.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self {
            sink: Mutex::new(Sink {
                writer: BufWriter::new(file),
                next_seq: 1,
            }),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: DebateEvent, seq: u64) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let mut map = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::from(event.event_type));
        map.insert("seq".to_string(), Value::from(seq));
        map.insert("timestamp".to_string(), Value::from(timestamp));
        Value::Object(map)
    }
}

impl DebateLogger for JsonlDebateLogger {
    fn log(&self, event: DebateEvent) {
        let Ok(mut sink) = self.sink.lock() else {
            return;
        };
        let seq = sink.next_seq;
        sink.next_seq += 1;

        let Ok(line) = serde_json::to_string(&Self::record(event, seq)) else {
            return;
        };
        if let Err(e) = writeln!(sink.writer, "{}", line).and_then(|_| sink.writer.flush()) {
            warn!("Could not write debate log {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlDebateLogger {
    fn drop(&mut self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.writer.flush();
        }
    }
}
