//! # Line Store
//!
//! Generic read/write/append of line-oriented records to named files.
//!
//! ## Failure Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     I/O Error Handling                                  │
//! │                                                                         │
//! │  read_lines("products.txt")                                             │
//! │       │                                                                 │
//! │       ├── file missing ──────► empty Vec (normal first-run case)        │
//! │       ├── file unreadable ───► warn! + empty Vec                        │
//! │       └── ok ────────────────► one String per line                      │
//! │                                                                         │
//! │  write_lines("products.txt", lines)                                     │
//! │       │                                                                 │
//! │       ├── write fails ───────► warn! + no-op                            │
//! │       └── ok ────────────────► whole file replaced                      │
//! │                                                                         │
//! │  Callers can NOT distinguish "empty" from "unreadable" and a failed     │
//! │  write leaves the file stale behind the cache. Both are deliberate      │
//! │  trade-offs of the flat-file design, accepted for a single-user tool.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes replace the whole file in place, with no write-ahead log or
//! atomic-rename step, so a crash mid-write can truncate the file. Also a
//! documented gap, not a feature.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

// =============================================================================
// LineStore Trait
// =============================================================================

/// Capability interface for line-oriented storage.
///
/// The ledgers depend on this trait, never on the filesystem directly, so an
/// alternative backing (in-memory, key-value store) can be substituted for
/// tests without touching ledger logic.
pub trait LineStore {
    /// Reads all lines of a named file. Empty if the file is absent or
    /// unreadable - never an error.
    fn read_lines(&self, name: &str) -> Vec<String>;

    /// Replaces the whole file with the given lines, creating parent
    /// directories on demand. I/O errors are logged and swallowed.
    fn write_lines(&self, name: &str, lines: &[String]);

    /// Appends one line plus a line terminator, creating the file if
    /// absent.
    fn append_line(&self, name: &str, line: &str);

    /// Whether the named file exists.
    fn exists(&self, name: &str) -> bool;

    /// Creates the named file empty if absent. Idempotent: existing content
    /// is never touched.
    fn initialize(&self, name: &str);
}

// =============================================================================
// Filesystem Backing
// =============================================================================

/// Line store backed by UTF-8 text files under a base directory.
#[derive(Debug, Clone)]
pub struct FsLineStore {
    base_dir: PathBuf,
}

impl FsLineStore {
    /// Creates a store rooted at `base_dir`. The directory itself is
    /// created lazily on first write/initialize.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        FsLineStore {
            base_dir: base_dir.into(),
        }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }

    fn try_write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.ensure_parent(path)?;
        fs::write(path, contents)
    }

    fn try_append(&self, path: &Path, line: &str) -> io::Result<()> {
        self.ensure_parent(path)?;
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{line}")
    }
}

impl LineStore for FsLineStore {
    fn read_lines(&self, name: &str) -> Vec<String> {
        let path = self.path_for(name);

        match fs::read_to_string(&path) {
            Ok(contents) => contents.lines().map(str::to_string).collect(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(file = %path.display(), "File absent, treating as empty");
                Vec::new()
            }
            Err(err) => {
                warn!(file = %path.display(), error = %err, "Read failed, treating as empty");
                Vec::new()
            }
        }
    }

    fn write_lines(&self, name: &str, lines: &[String]) {
        let path = self.path_for(name);

        let mut contents = lines.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }

        if let Err(err) = self.try_write(&path, &contents) {
            warn!(file = %path.display(), error = %err, "Write failed, file left stale");
        }
    }

    fn append_line(&self, name: &str, line: &str) {
        let path = self.path_for(name);

        if let Err(err) = self.try_append(&path, line) {
            warn!(file = %path.display(), error = %err, "Append failed, line dropped");
        }
    }

    fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    fn initialize(&self, name: &str) {
        let path = self.path_for(name);

        if path.exists() {
            return;
        }

        if let Err(err) = self.try_write(&path, "") {
            warn!(file = %path.display(), error = %err, "Initialize failed");
        }
    }
}

// =============================================================================
// In-Memory Backing
// =============================================================================

/// Line store backed by a shared in-memory map.
///
/// Clones share the same backing, so a test can hold one handle to inspect
/// what a ledger wrote through another. Substituted for [`FsLineStore`] in
/// ledger and service tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryLineStore {
    files: Arc<Mutex<HashMap<String, Vec<String>>>>,
}

impl MemoryLineStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_files<T>(&self, f: impl FnOnce(&mut HashMap<String, Vec<String>>) -> T) -> T {
        // Single-actor design: the lock is only ever contended in tests,
        // and a poisoned lock means a test already panicked.
        let mut files = self.files.lock().expect("line store lock poisoned");
        f(&mut files)
    }
}

impl LineStore for MemoryLineStore {
    fn read_lines(&self, name: &str) -> Vec<String> {
        self.with_files(|files| files.get(name).cloned().unwrap_or_default())
    }

    fn write_lines(&self, name: &str, lines: &[String]) {
        self.with_files(|files| {
            files.insert(name.to_string(), lines.to_vec());
        });
    }

    fn append_line(&self, name: &str, line: &str) {
        self.with_files(|files| {
            files
                .entry(name.to_string())
                .or_default()
                .push(line.to_string());
        });
    }

    fn exists(&self, name: &str) -> bool {
        self.with_files(|files| files.contains_key(name))
    }

    fn initialize(&self, name: &str) {
        self.with_files(|files| {
            files.entry(name.to_string()).or_default();
        });
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fs_read_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FsLineStore::new(dir.path());

        assert!(store.read_lines("absent.txt").is_empty());
        assert!(!store.exists("absent.txt"));
    }

    #[test]
    fn test_fs_write_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FsLineStore::new(dir.path());

        let written = lines(&["P1,Milk,DAIRY,2.50,20", "P2,Bread,BAKERY,1.80,15"]);
        store.write_lines("products.txt", &written);

        assert_eq!(store.read_lines("products.txt"), written);
        assert!(store.exists("products.txt"));
    }

    #[test]
    fn test_fs_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = FsLineStore::new(dir.path().join("nested").join("data"));

        store.write_lines("products.txt", &lines(&["P1,Milk,DAIRY,2.50,20"]));
        assert_eq!(store.read_lines("products.txt").len(), 1);
    }

    #[test]
    fn test_fs_write_replaces_whole_file() {
        let dir = TempDir::new().unwrap();
        let store = FsLineStore::new(dir.path());

        store.write_lines("f.txt", &lines(&["one", "two", "three"]));
        store.write_lines("f.txt", &lines(&["only"]));

        assert_eq!(store.read_lines("f.txt"), lines(&["only"]));
    }

    #[test]
    fn test_fs_append_creates_and_extends() {
        let dir = TempDir::new().unwrap();
        let store = FsLineStore::new(dir.path());

        store.append_line("log.txt", "first");
        store.append_line("log.txt", "second");

        assert_eq!(store.read_lines("log.txt"), lines(&["first", "second"]));
    }

    #[test]
    fn test_fs_initialize_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FsLineStore::new(dir.path());

        store.initialize("f.txt");
        assert!(store.exists("f.txt"));
        assert!(store.read_lines("f.txt").is_empty());

        // Second initialize never alters existing content
        store.write_lines("f.txt", &lines(&["kept"]));
        store.initialize("f.txt");
        assert_eq!(store.read_lines("f.txt"), lines(&["kept"]));
    }

    #[test]
    fn test_memory_store_clones_share_backing() {
        let store = MemoryLineStore::new();
        let handle = store.clone();

        store.write_lines("f.txt", &lines(&["a", "b"]));
        assert_eq!(handle.read_lines("f.txt"), lines(&["a", "b"]));

        handle.append_line("f.txt", "c");
        assert_eq!(store.read_lines("f.txt"), lines(&["a", "b", "c"]));
    }

    #[test]
    fn test_memory_initialize_is_idempotent() {
        let store = MemoryLineStore::new();

        assert!(!store.exists("f.txt"));
        store.initialize("f.txt");
        assert!(store.exists("f.txt"));

        store.write_lines("f.txt", &lines(&["kept"]));
        store.initialize("f.txt");
        assert_eq!(store.read_lines("f.txt"), lines(&["kept"]));
    }
}
