//! File-backed table primitive.
//!
//! A [`Table`] owns one newline-delimited JSON file and is the only code
//! that touches its bytes. Repositories layer domain operations on top.
//!
//! ## Concurrency
//!
//! Writers (`append`, `append_with`, `rewrite_all`, `update_with`,
//! `compact`) serialize on an exclusive advisory lock taken at the OS-file
//! level, so the discipline holds across processes, not just threads. The
//! lock lives on a sidecar `<file>.lock` path: rewrites replace the data
//! file by rename, and a lock held on the renamed-away inode would no
//! longer exclude anyone.
//!
//! Readers never take the lock. A scan observes either the pre- or
//! post-append state; a torn trailing line fails to decode and is skipped.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec;
use crate::error::{Result, StoreError};

/// Outcome of a [`Table::compact`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CompactReport {
    /// Lines that decoded and were kept
    pub kept: usize,

    /// Non-blank lines that failed to decode and were removed
    pub dropped: usize,
}

/// A typed table over one append-ordered text file.
pub struct Table<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> Table<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record in file order.
    ///
    /// A missing file is an empty table, not an error. Lines that fail to
    /// decode are skipped (logged at `warn`); hard read errors surface as
    /// [`StoreError::Storage`].
    pub fn scan_all(&self) -> Result<Vec<T>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(StoreError::Storage(format!(
                    "open {}: {}",
                    self.path.display(),
                    err
                )))
            }
        };

        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match codec::decode::<T>(&line) {
                Some(record) => records.push(record),
                None => {
                    tracing::warn!(path = %self.path.display(), "skipping malformed record line");
                }
            }
        }
        Ok(records)
    }

    /// Append one record under the exclusive write lock.
    ///
    /// Creates the file and its parent directory if absent.
    pub fn append(&self, record: &T) -> Result<()> {
        let _lock = self.lock_exclusive()?;
        self.append_locked(record)
    }

    /// Atomic append-if-allowed: scan, check, append in one critical section.
    ///
    /// `build` receives the current records and either returns the record to
    /// append or rejects (typically with [`StoreError::Conflict`]). Because
    /// the write lock is held across scan and append, two concurrent callers
    /// cannot both pass a uniqueness check before either writes.
    pub fn append_with<F>(&self, build: F) -> Result<T>
    where
        F: FnOnce(&[T]) -> Result<T>,
    {
        let _lock = self.lock_exclusive()?;
        let existing = self.scan_all()?;
        let record = build(&existing)?;
        self.append_locked(&record)?;
        Ok(record)
    }

    /// Atomically replace the whole file with the given records, in order.
    pub fn rewrite_all(&self, records: &[T]) -> Result<()> {
        let _lock = self.lock_exclusive()?;
        self.rewrite_locked(records)
    }

    /// Scan, let `apply` mutate the records in place, and rewrite if it
    /// reports a change. Returns whether anything was written.
    ///
    /// The lock is held from scan through rewrite, so a concurrent append
    /// cannot be lost between the two.
    pub fn update_with<F>(&self, apply: F) -> Result<bool>
    where
        F: FnOnce(&mut Vec<T>) -> bool,
    {
        let _lock = self.lock_exclusive()?;
        let mut records = self.scan_all()?;
        if !apply(&mut records) {
            return Ok(false);
        }
        self.rewrite_locked(&records)?;
        Ok(true)
    }

    /// Drop blank and undecodable lines, keeping valid lines byte-for-byte
    /// in their original order. The file is rewritten only when something
    /// was actually removed.
    pub fn compact(&self) -> Result<CompactReport> {
        let _lock = self.lock_exclusive()?;

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(CompactReport { kept: 0, dropped: 0 })
            }
            Err(err) => {
                return Err(StoreError::Storage(format!(
                    "open {}: {}",
                    self.path.display(),
                    err
                )))
            }
        };

        let mut kept_lines: Vec<String> = Vec::new();
        let mut dropped = 0usize;
        let mut blank = 0usize;
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                blank += 1;
                continue;
            }
            if codec::decode::<T>(&line).is_some() {
                kept_lines.push(line);
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 || blank > 0 {
            let mut contents = kept_lines.join("\n");
            if !contents.is_empty() {
                contents.push('\n');
            }
            self.replace_file_locked(&contents)?;
        }

        Ok(CompactReport {
            kept: kept_lines.len(),
            dropped,
        })
    }

    /// Take the exclusive advisory lock; released when the handle drops.
    fn lock_exclusive(&self) -> Result<File> {
        self.ensure_parent()?;
        let lock_path = lock_path_for(&self.path);
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&lock_path)
            .map_err(|err| {
                StoreError::Storage(format!("open lock {}: {}", lock_path.display(), err))
            })?;
        lock_file.lock().map_err(|err| {
            StoreError::Storage(format!("lock {}: {}", lock_path.display(), err))
        })?;
        Ok(lock_file)
    }

    /// Append one encoded line. Caller must hold the write lock.
    ///
    /// Line and terminator go out in a single write so a concurrent reader
    /// never sees the record without its newline from a finished append.
    fn append_locked(&self, record: &T) -> Result<()> {
        let mut line = codec::encode(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| {
                StoreError::Storage(format!("open {}: {}", self.path.display(), err))
            })?;
        file.write_all(line.as_bytes()).map_err(|err| {
            StoreError::Storage(format!("append {}: {}", self.path.display(), err))
        })?;
        Ok(())
    }

    /// Encode and atomically replace. Caller must hold the write lock.
    fn rewrite_locked(&self, records: &[T]) -> Result<()> {
        let mut contents = String::new();
        for record in records {
            contents.push_str(&codec::encode(record)?);
            contents.push('\n');
        }
        self.replace_file_locked(&contents)
    }

    /// Write `contents` to a temp file in the same directory and rename it
    /// over the data file. Caller must hold the write lock.
    fn replace_file_locked(&self, contents: &str) -> Result<()> {
        let temp_path = sibling_path(&self.path, ".tmp");
        let mut temp = File::create(&temp_path).map_err(|err| {
            StoreError::Storage(format!("create {}: {}", temp_path.display(), err))
        })?;
        temp.write_all(contents.as_bytes()).map_err(|err| {
            StoreError::Storage(format!("write {}: {}", temp_path.display(), err))
        })?;
        temp.sync_all().map_err(|err| {
            StoreError::Storage(format!("sync {}: {}", temp_path.display(), err))
        })?;
        drop(temp);

        rename_with_fallback(&temp_path, &self.path).map_err(|err| {
            StoreError::Storage(format!("replace {}: {}", self.path.display(), err))
        })
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| {
                    StoreError::Storage(format!("create dir {}: {}", parent.display(), err))
                })?;
            }
        }
        Ok(())
    }
}

fn lock_path_for(path: &Path) -> PathBuf {
    sibling_path(path, ".lock")
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Atomically rename a file, with fallback for platforms where rename fails
/// if the target exists. The temp file is cleaned up if the rename
/// ultimately fails.
fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: u32,
        label: String,
    }

    fn row(id: u32, label: &str) -> Row {
        Row {
            id,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_scan_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let table: Table<Row> = Table::new(dir.path().join("absent.jsonl"));
        assert!(table.scan_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_preserves_file_order() {
        let dir = tempdir().unwrap();
        let table: Table<Row> = Table::new(dir.path().join("rows.jsonl"));
        for id in 0..5 {
            table.append(&row(id, "r")).unwrap();
        }
        let ids: Vec<u32> = table.scan_all().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_append_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let table: Table<Row> = Table::new(dir.path().join("nested/deeper/rows.jsonl"));
        table.append(&row(1, "made it")).unwrap();
        assert_eq!(table.scan_all().unwrap().len(), 1);
    }

    #[test]
    fn test_scan_skips_malformed_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rows.jsonl");
        let valid = codec::encode(&row(1, "good")).unwrap();
        fs::write(&path, format!("{}\n\n{{\"id\":2,\"lab\n", valid)).unwrap();

        let table: Table<Row> = Table::new(&path);
        let records = table.scan_all().unwrap();
        assert_eq!(records, vec![row(1, "good")]);
    }

    #[test]
    fn test_rewrite_all_replaces_content() {
        let dir = tempdir().unwrap();
        let table: Table<Row> = Table::new(dir.path().join("rows.jsonl"));
        table.append(&row(1, "old")).unwrap();
        table.rewrite_all(&[row(2, "new"), row(3, "newer")]).unwrap();
        let records = table.scan_all().unwrap();
        assert_eq!(records, vec![row(2, "new"), row(3, "newer")]);
    }

    #[test]
    fn test_append_with_rejection_appends_nothing() {
        let dir = tempdir().unwrap();
        let table: Table<Row> = Table::new(dir.path().join("rows.jsonl"));
        table.append(&row(1, "taken")).unwrap();

        let result = table.append_with(|existing| {
            if existing.iter().any(|r| r.label == "taken") {
                return Err(StoreError::Conflict("label taken".to_string()));
            }
            Ok(row(2, "taken"))
        });
        assert!(matches!(result, Err(StoreError::Conflict(_))));
        assert_eq!(table.scan_all().unwrap().len(), 1);
    }

    #[test]
    fn test_update_with_rewrites_only_on_change() {
        let dir = tempdir().unwrap();
        let table: Table<Row> = Table::new(dir.path().join("rows.jsonl"));
        table.append(&row(1, "a")).unwrap();
        table.append(&row(2, "b")).unwrap();

        let changed = table
            .update_with(|records| match records.iter_mut().find(|r| r.id == 2) {
                Some(slot) => {
                    slot.label = "b2".to_string();
                    true
                }
                None => false,
            })
            .unwrap();
        assert!(changed);

        let unchanged = table
            .update_with(|records| records.iter_mut().any(|r| r.id == 99))
            .unwrap();
        assert!(!unchanged);

        let records = table.scan_all().unwrap();
        assert_eq!(records, vec![row(1, "a"), row(2, "b2")]);
    }

    #[test]
    fn test_compact_drops_corrupt_keeps_valid_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rows.jsonl");
        let first = codec::encode(&row(1, "keep")).unwrap();
        let second = codec::encode(&row(2, "also keep")).unwrap();
        fs::write(&path, format!("{}\n{{broken\n\n{}\n", first, second)).unwrap();

        let table: Table<Row> = Table::new(&path);
        let report = table.compact().unwrap();
        assert_eq!(report, CompactReport { kept: 2, dropped: 1 });

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, format!("{}\n{}\n", first, second));
    }

    #[test]
    fn test_compact_missing_file_is_noop() {
        let dir = tempdir().unwrap();
        let table: Table<Row> = Table::new(dir.path().join("absent.jsonl"));
        let report = table.compact().unwrap();
        assert_eq!(report, CompactReport { kept: 0, dropped: 0 });
        assert!(!table.path().exists());
    }

    #[test]
    fn test_concurrent_appends_never_tear_lines() {
        use std::sync::Arc;
        use std::thread;

        let dir = tempdir().unwrap();
        let path = Arc::new(dir.path().join("rows.jsonl"));

        let mut handles = Vec::new();
        for worker in 0u32..8 {
            let path = Arc::clone(&path);
            handles.push(thread::spawn(move || {
                let table: Table<Row> = Table::new(path.as_ref());
                for n in 0..10 {
                    table
                        .append(&row(worker * 10 + n, "concurrent"))
                        .expect("append");
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let table: Table<Row> = Table::new(path.as_ref());
        assert_eq!(table.scan_all().unwrap().len(), 80);
    }
}
