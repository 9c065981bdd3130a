//! Append-only JSONL writer for the activity log.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::entry::ActivityEntry;

/// Appends entries to `logs/<date>_<session>.jsonl`.
pub struct ActivityWriter {
    session: String,
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl ActivityWriter {
    /// Open (or create) today's file for `session` under `logs_dir`.
    pub fn new(logs_dir: impl AsRef<Path>, session: impl Into<String>) -> std::io::Result<Self> {
        let session = session.into();
        let logs_dir = logs_dir.as_ref();
        fs::create_dir_all(logs_dir)?;

        let date = chrono::Local::now().format("%Y-%m-%d");
        let path = logs_dir.join(format!("{}_{}.jsonl", date, session));

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            session,
            writer: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one entry as a line and flush.
    pub fn write(&self, entry: &ActivityEntry) -> std::io::Result<()> {
        let json = entry
            .to_json_line()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let mut writer = self.writer.lock();
        writeln!(writer, "{}", json)?;
        writer.flush()
    }

    pub fn flush(&self) -> std::io::Result<()> {
        self.writer.lock().flush()
    }
}

impl Drop for ActivityWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Read every entry under `logs_dir`, oldest first.
///
/// Lines that fail to parse are skipped.
pub fn read_entries(logs_dir: impl AsRef<Path>) -> std::io::Result<Vec<ActivityEntry>> {
    let logs_dir = logs_dir.as_ref();
    if !logs_dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for dir_entry in fs::read_dir(logs_dir)? {
        let path = dir_entry?.path();
        if path.extension().map(|e| e == "jsonl").unwrap_or(false) {
            let content = fs::read_to_string(&path)?;
            for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
                match ActivityEntry::from_json_line(line) {
                    Ok(entry) => entries.push(entry),
                    Err(e) => tracing::debug!(path = %path.display(), "Skipping log line: {}", e),
                }
            }
        }
    }

    entries.sort_by(|a, b| a.ts.cmp(&b.ts));
    Ok(entries)
}
