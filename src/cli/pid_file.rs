//! PID file management for daemon mode

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process;

const PID_FILE_NAME: &str = "clip-tracker.pid";

/// Default PID file location: the user runtime dir, else the temp dir
fn default_pid_path() -> PathBuf {
    dirs::runtime_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(PID_FILE_NAME)
}

/// PID file guarding the single capture daemon
pub struct PidFile {
    path: PathBuf,
    owned: bool,
}

impl PidFile {
    /// Create a new PID file manager with default path
    pub fn new() -> Self {
        Self::with_path(default_pid_path())
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            owned: false,
        }
    }

    /// Get the PID file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// PID of the running daemon, if any. A stale file is left in place.
    pub fn running_pid(&self) -> Option<u32> {
        let mut contents = String::new();
        File::open(&self.path)
            .and_then(|mut file| file.read_to_string(&mut contents))
            .ok()?;

        let pid: u32 = contents.trim().parse().ok()?;
        process_alive(pid).then_some(pid)
    }

    /// Acquire the PID file (fails if another daemon is running)
    pub fn acquire(&mut self) -> Result<(), PidFileError> {
        // Check for existing daemon
        if let Some(pid) = self.running_pid() {
            return Err(PidFileError::AlreadyRunning(pid));
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PidFileError::WriteFailed(format!("Failed to create PID directory: {}", e))
            })?;
        }

        // Write our PID, replacing any stale file
        let mut file = File::create(&self.path).map_err(|e| {
            PidFileError::WriteFailed(format!("Failed to create PID file: {}", e))
        })?;

        write!(file, "{}", process::id())
            .map_err(|e| PidFileError::WriteFailed(format!("Failed to write PID: {}", e)))?;

        self.owned = true;
        Ok(())
    }

    /// Release the PID file if this process owns it
    pub fn release(&mut self) -> Result<(), PidFileError> {
        if self.owned && self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                PidFileError::RemoveFailed(format!("Failed to remove PID file: {}", e))
            })?;
        }
        self.owned = false;
        Ok(())
    }
}

impl Default for PidFile {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        // Best-effort cleanup
        let _ = self.release();
    }
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pid) else {
        return false;
    };
    // Signal 0 only checks for existence; EPERM still means it exists
    match kill(Pid::from_raw(raw), None) {
        Ok(()) => true,
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn process_alive(pid: u32) -> bool {
    pid == process::id()
}

/// PID file errors
#[derive(Debug, thiserror::Error)]
pub enum PidFileError {
    #[error("Another daemon is already running (PID: {0})")]
    AlreadyRunning(u32),

    #[error("Failed to write PID file: {0}")]
    WriteFailed(String),

    #[error("Failed to remove PID file: {0}")]
    RemoveFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_names_the_app() {
        let pid_file = PidFile::new();
        assert!(pid_file.path().ends_with(PID_FILE_NAME));
    }

    #[test]
    fn running_pid_is_none_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = PidFile::with_path(dir.path().join("missing.pid"));
        assert!(pid_file.running_pid().is_none());
    }

    #[test]
    fn acquire_writes_pid_and_release_removes_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daemon.pid");
        let mut pid_file = PidFile::with_path(&path);

        pid_file.acquire().unwrap();
        assert_eq!(pid_file.running_pid(), Some(process::id()));

        pid_file.release().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn second_acquire_reports_running_daemon() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daemon.pid");
        let mut first = PidFile::with_path(&path);
        first.acquire().unwrap();

        let mut second = PidFile::with_path(&path);
        let err = second.acquire().unwrap_err();

        assert!(matches!(err, PidFileError::AlreadyRunning(pid) if pid == process::id()));
    }

    #[test]
    fn observer_drop_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daemon.pid");
        let mut owner = PidFile::with_path(&path);
        owner.acquire().unwrap();

        drop(PidFile::with_path(&path));

        assert!(path.exists());
    }

    #[test]
    fn garbage_pid_is_not_running() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daemon.pid");
        fs::write(&path, "not-a-pid").unwrap();

        assert!(PidFile::with_path(&path).running_pid().is_none());
    }
}
