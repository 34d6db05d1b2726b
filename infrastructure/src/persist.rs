//! Shared persistence primitives for the JSON file adapters.
//!
//! Each document on disk has a sibling `<file>.lock`. Writers hold an
//! exclusive `flock` on it across load, check and save, so every process
//! (and every adapter instance inside one process) serializes on the same
//! document. Rewrites go through a uniquely named temporary file in the
//! same directory followed by a rename, so readers see either the old or
//! the new document and concurrent writers never share a temp path.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use tracing::{debug, trace};

/// How long a writer waits for another holder before giving up.
pub(crate) const LOCK_TIMEOUT: Duration = Duration::from_secs(10);

const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Exclusive lock on one document, released when dropped.
///
/// The lock belongs to the open file description, so dropping the guard
/// (closing the file) releases it even if the process panics.
#[derive(Debug)]
pub(crate) struct DocumentLock {
    _file: File,
}

impl DocumentLock {
    /// Acquire the lock guarding `document`, polling until `LOCK_TIMEOUT`.
    pub(crate) async fn acquire(document: &Path) -> io::Result<Self> {
        Self::acquire_within(document, LOCK_TIMEOUT).await
    }

    pub(crate) async fn acquire_within(document: &Path, timeout: Duration) -> io::Result<Self> {
        let path = lock_path(document);
        ensure_parent(&path)?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;

        let deadline = Instant::now() + timeout;
        let mut waited = false;
        loop {
            if try_flock_exclusive(&file)? {
                if waited {
                    debug!(lock = %path.display(), "Acquired document lock after waiting");
                }
                return Ok(Self { _file: file });
            }
            if Instant::now() >= deadline {
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("timed out waiting for {}", path.display()),
                ));
            }
            if !waited {
                trace!(lock = %path.display(), "Document lock busy, waiting");
                waited = true;
            }
            tokio::time::sleep(LOCK_POLL_INTERVAL).await;
        }
    }
}

/// `<dir>/<file>.lock` next to the guarded document.
pub(crate) fn lock_path(document: &Path) -> PathBuf {
    let mut name = document
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    document.with_file_name(name)
}

/// Replace `path` with `bytes` through a unique temp file and a rename.
pub(crate) fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = ensure_parent(path)?;
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> io::Result<&Path> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)?;
            Ok(parent)
        }
        None => Ok(Path::new(".")),
    }
}

#[cfg(unix)]
#[allow(unsafe_code)]
fn try_flock_exclusive(file: &File) -> io::Result<bool> {
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();
    // SAFETY: `fd` is a valid descriptor owned by `file` for the duration
    // of this call; flock does not retain it.
    let ret = unsafe { libc::flock(fd, libc::LOCK_EX | libc::LOCK_NB) };
    if ret == 0 {
        return Ok(true);
    }
    let err = io::Error::last_os_error();
    match err.raw_os_error() {
        Some(code) if code == libc::EWOULDBLOCK || code == libc::EINTR => Ok(false),
        _ => Err(err),
    }
}

#[cfg(not(unix))]
fn try_flock_exclusive(_file: &File) -> io::Result<bool> {
    // No advisory locking; only the per-process ordering of writes applies.
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_path_sits_next_to_document() {
        assert_eq!(
            lock_path(Path::new("/data/form.json")),
            PathBuf::from("/data/form.json.lock")
        );
        assert_eq!(
            lock_path(Path::new("properties.json")),
            PathBuf::from("properties.json.lock")
        );
    }

    #[test]
    fn test_atomic_write_creates_parents_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("doc.json");

        atomic_write(&path, b"{\"a\":1}").unwrap();
        atomic_write(&path, b"{\"a\":2}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":2}");
        let entries: Vec<_> = fs::read_dir(path.parent().unwrap()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_parallel_atomic_writes_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let path = path.clone();
                std::thread::spawn(move || atomic_write(&path, format!("{i}").as_bytes()))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let written: u32 = fs::read_to_string(&path).unwrap().parse().unwrap();
        assert!(written < 16);
    }

    #[tokio::test]
    async fn test_second_holder_waits_for_release() {
        let dir = tempfile::tempdir().unwrap();
        let document = dir.path().join("doc.json");

        let first = DocumentLock::acquire(&document).await.unwrap();
        assert!(lock_path(&document).exists());

        let busy = DocumentLock::acquire_within(&document, Duration::from_millis(30)).await;
        if cfg!(unix) {
            assert_eq!(busy.unwrap_err().kind(), io::ErrorKind::TimedOut);
        }

        drop(first);
        DocumentLock::acquire_within(&document, Duration::from_millis(200))
            .await
            .unwrap();
    }
}
