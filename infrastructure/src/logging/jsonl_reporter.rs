//! JSONL file writer for resolution results.
//!
//! Each reported event becomes one JSON line with a `type` field
//! (`resolved`, `failed`, `batch_complete`) and a `timestamp`, appended
//! through a buffered writer.

use serde_json::{Map, Value, json};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use vetting_application::{BatchSummary, DataPointKey, ResolutionReporter, ResolveError};
use vetting_domain::Resolution;

/// Resolution reporter that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlResolutionReporter {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlResolutionReporter {
    /// Create a reporter writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create results directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create results file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_record(&self, event_type: &str, payload: Value) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = match payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        record.insert("type".to_string(), Value::String(event_type.to_string()));
        record.insert("timestamp".to_string(), Value::String(timestamp));

        let Ok(line) = serde_json::to_string(&Value::Object(record)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl ResolutionReporter for JsonlResolutionReporter {
    fn on_resolved(&self, key: &DataPointKey, resolution: &Resolution) {
        let mut payload = serde_json::to_value(resolution).unwrap_or_else(|_| json!({}));
        if let Value::Object(map) = &mut payload {
            map.insert("locale".to_string(), json!(key.locale));
            map.insert("xpath".to_string(), json!(key.xpath));
            map.insert("disputed".to_string(), json!(resolution.is_disputed()));
        }
        self.write_record("resolved", payload);
    }

    fn on_failed(&self, key: &DataPointKey, error: &ResolveError) {
        self.write_record(
            "failed",
            json!({
                "locale": key.locale,
                "xpath": key.xpath,
                "error": error.to_string(),
            }),
        );
    }

    fn on_batch_complete(&self, summary: &BatchSummary) {
        self.write_record(
            "batch_complete",
            serde_json::to_value(summary).unwrap_or_else(|_| json!({})),
        );
    }
}

impl Drop for JsonlResolutionReporter {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
