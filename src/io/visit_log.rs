//! Append-only line store for qualifying visits and submissions
//!
//! Each store is a plain text file; one classified request produces at most
//! one line. Appends from concurrent requests are serialized so lines never
//! interleave.

use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Line-oriented append-only log file
pub struct VisitLog {
    file_path: PathBuf,
    write_lock: Mutex<()>,
}

impl VisitLog {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        let file_path = file_path.as_ref().to_path_buf();
        info!(file_path = %file_path.display(), "visit_log_initialized");
        Self { file_path, write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Append a line to the store.
    ///
    /// A missing trailing newline is added so every entry stays on its own line.
    pub fn append(&self, line: &str) -> std::io::Result<()> {
        let _guard = self.write_lock.lock();

        // Create parent directories if they don't exist
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&self.file_path)?;

        if line.ends_with('\n') {
            file.write_all(line.as_bytes())?;
        } else {
            writeln!(file, "{}", line)?;
        }
        debug!(file = %self.file_path.display(), bytes = %line.len(), "visit_log_written");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn test_append_line() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("ips.txt");
        let log = VisitLog::new(&file_path);

        log.append("203.0.113.5 | OS: Linux | Browser: Firefox 121.0 | now\n").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "203.0.113.5 | OS: Linux | Browser: Firefox 121.0 | now\n");
    }

    #[test]
    fn test_missing_newline_added() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("ips.txt");
        let log = VisitLog::new(&file_path);

        log.append("first").unwrap();
        log.append("second\n").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_append_mode() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("submissions.txt");
        fs::write(&file_path, "existing line\n").unwrap();

        let log = VisitLog::new(&file_path);
        log.append("new line\n").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["existing line", "new line"]);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let nested_path = dir.path().join("nested").join("dir").join("ips.txt");
        let log = VisitLog::new(&nested_path);

        log.append("line\n").unwrap();
        assert!(nested_path.exists());
        assert_eq!(log.path(), nested_path.as_path());
    }

    #[test]
    fn test_write_error_reported() {
        let dir = tempdir().unwrap();
        // A directory cannot be opened for appending
        let log = VisitLog::new(dir.path());
        assert!(log.append("line\n").is_err());
    }

    #[test]
    fn test_concurrent_appends_do_not_interleave() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("ips.txt");
        let log = Arc::new(VisitLog::new(&file_path));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let log = log.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        log.append(&format!("thread-{t} entry-{i} {}\n", "x".repeat(200)))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let content = fs::read_to_string(&file_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 200);
        assert!(lines.iter().all(|l| l.starts_with("thread-") && l.ends_with(&"x".repeat(200))));
    }
}
