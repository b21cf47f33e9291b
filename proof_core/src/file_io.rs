//! # File I/O Module
//!
//! Handles session file operations with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **File locking**: Prevent two running instances clobbering one session
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Sessions are saved as `.sdc` (sourdough calculator) files containing JSON.
//! Lock files use the `.sdc.lock` extension with metadata about the holder.
//!
//! ## Example
//!
//! ```rust,no_run
//! use proof_core::file_io::{load_session, save_session, SessionLock};
//! use proof_core::session::Session;
//! use std::path::Path;
//!
//! let path = Path::new("sourdough.sdc");
//! let lock = SessionLock::acquire(path).unwrap();
//!
//! let mut session = load_session(path).unwrap_or_default();
//! session.settings.q10 = 2.1;
//! session.touch();
//! save_session(&session, path).unwrap();
//!
//! drop(lock); // releases the lock file
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::session::{Session, SCHEMA_VERSION};

/// Lock metadata stored in .sdc.lock files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// Machine name where the lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    fn for_current_process() -> Self {
        LockInfo {
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// Short description of the holder, for error messages
    pub fn holder(&self) -> String {
        format!("pid {} on {}", self.pid, self.machine)
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

/// Session lock guard that releases the lock when dropped.
///
/// Uses both an OS-level exclusive lock (via fs2) and a .lock sidecar file
/// with holder metadata, so a second instance can report who holds it.
pub struct SessionLock {
    lock_path: PathBuf,
    /// The underlying file handle (keeps the OS lock alive)
    _lock_file: File,
    /// Lock metadata
    pub info: LockInfo,
}

impl SessionLock {
    /// Acquire an exclusive lock for a session file.
    ///
    /// # Returns
    ///
    /// * `Ok(SessionLock)` - Lock acquired successfully
    /// * `Err(CalcError::SessionLocked)` - Another process holds the lock
    pub fn acquire(path: &Path) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::for_current_process();

        if lock_path.exists() {
            if let Ok(existing) = read_lock_info(&lock_path) {
                if !is_lock_stale(&existing) {
                    return Err(CalcError::session_locked(
                        path.display().to_string(),
                        existing.holder(),
                        existing.locked_at.to_rfc3339(),
                    ));
                }
                // Stale lock, take it over
            }
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| {
                CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string())
            })?;

        lock_file.try_lock_exclusive().map_err(|_| {
            CalcError::session_locked(
                path.display().to_string(),
                "another process".to_string(),
                "unknown".to_string(),
            )
        })?;

        let lock_json =
            serde_json::to_string_pretty(&info).map_err(|e| CalcError::SerializationError {
                reason: e.to_string(),
            })?;

        lock_file.write_all(lock_json.as_bytes()).map_err(|e| {
            CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string())
        })?;

        lock_file.sync_all().map_err(|e| {
            CalcError::file_error("sync lock", lock_path.display().to_string(), e.to_string())
        })?;

        Ok(SessionLock {
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Check if a session file is locked without acquiring the lock.
    ///
    /// Returns `Some(LockInfo)` if locked, `None` if available.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        if lock_path.exists() {
            if let Ok(info) = read_lock_info(&lock_path) {
                if !is_lock_stale(&info) {
                    return Some(info);
                }
            }
        }
        None
    }
}

impl Drop for SessionLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
        // OS lock is released when _lock_file is dropped
    }
}

/// Get the lock file path for a session file
fn lock_path_for(session_path: &Path) -> PathBuf {
    let mut lock_path = session_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

fn read_lock_info(lock_path: &Path) -> CalcResult<LockInfo> {
    let mut file = File::open(lock_path).map_err(|e| {
        CalcError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })
}

/// Check if a lock is stale (holder process gone or lock very old)
fn is_lock_stale(info: &LockInfo) -> bool {
    if let Some(our_machine) = hostname() {
        if info.machine == our_machine {
            #[cfg(unix)]
            {
                if fs::metadata(format!("/proc/{}", info.pid)).is_err() {
                    return true;
                }
            }
            #[cfg(windows)]
            {
                use std::process::Command;
                let output = Command::new("tasklist")
                    .args(["/FI", &format!("PID eq {}", info.pid), "/NH"])
                    .output();
                if let Ok(output) = output {
                    let stdout = String::from_utf8_lossy(&output.stdout);
                    if stdout.contains("No tasks") || !stdout.contains(&info.pid.to_string()) {
                        return true;
                    }
                }
            }
        }
    }

    // A lock older than 24 hours is stale regardless
    let age = Utc::now() - info.locked_at;
    age.num_hours() > 24
}

/// Save a session to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize the session to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp over the target (atomic on most filesystems)
///
/// This prevents corruption if the process is interrupted mid-write.
pub fn save_session(session: &Session, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(session).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = path.with_extension("sdc.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load a session from a file.
///
/// # Returns
///
/// * `Ok(Session)` - Successfully loaded session
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_session(path: &Path) -> CalcResult<Session> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let session: Session =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&session.meta.version)?;

    Ok(session)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(CalcError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(CalcError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // For 0.x versions, a newer minor version than we support is rejected
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 {
        if file_parts[1] > current_parts[1] {
            return Err(CalcError::VersionMismatch {
                file_version: file_version.to_string(),
                expected_version: SCHEMA_VERSION.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_session_path(name: &str) -> PathBuf {
        temp_dir().join(format!("proofcalc_test_{}.sdc", name))
    }

    #[test]
    fn test_lock_path_generation() {
        let session_path = Path::new("/path/to/sourdough.sdc");
        let lock_path = lock_path_for(session_path);
        assert_eq!(lock_path, Path::new("/path/to/sourdough.sdc.lock"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_session_path("roundtrip");

        let mut session = Session::new();
        session.settings.st_k = 2.75;
        session.water.room_temp_c = 19.5;
        save_session(&session, &path).unwrap();

        let loaded = load_session(&path).unwrap();
        assert_eq!(loaded.settings.st_k, 2.75);
        assert_eq!(loaded.water.room_temp_c, 19.5);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let path = temp_session_path("atomic");
        let tmp_path = path.with_extension("sdc.tmp");

        save_session(&Session::new(), &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_lock_acquire_and_release() {
        let path = temp_session_path("lock_test");
        File::create(&path).unwrap();

        let lock = SessionLock::acquire(&path).unwrap();
        assert_eq!(lock.info.pid, std::process::id());

        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());

        drop(lock);
        assert!(!lock_path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_lock_check_reports_holder() {
        let path = temp_session_path("lock_check");
        File::create(&path).unwrap();

        assert!(SessionLock::check(&path).is_none());

        let lock = SessionLock::acquire(&path).unwrap();
        let info = SessionLock::check(&path).expect("lock should be visible");
        assert_eq!(info.pid, std::process::id());

        drop(lock);
        assert!(SessionLock::check(&path).is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());

        // Different major fails
        assert!(validate_version("1.0.0").is_err());

        // Newer minor (in 0.x) fails
        assert!(validate_version("0.2.0").is_err());

        // Garbage fails
        assert!(validate_version("not-a-version").is_err());
    }

    #[test]
    fn test_load_missing_file_is_file_error() {
        let path = temp_session_path("does_not_exist");
        let err = load_session(&path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
