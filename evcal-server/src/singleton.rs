//! One evcal-server per user.
//!
//! The running server holds an exclusive lock on `server.lock` in the runtime
//! directory and writes its pid and listen address into it, so a second start
//! can say who is already serving the store.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use fs2::FileExt;

const LOCK_FILE: &str = "server.lock";

/// Held for the lifetime of the server; the lock is released on drop.
pub struct InstanceLock {
    _file: File,
}

impl InstanceLock {
    /// Lock the per-user runtime directory.
    pub fn acquire_default(addr: SocketAddr) -> Result<Self> {
        Self::acquire(&runtime_dir()?, addr)
    }

    pub fn acquire(dir: &Path, addr: SocketAddr) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join(LOCK_FILE);

        // Not truncated yet: the current holder's details stay readable.
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .context("Failed to open lock file")?;

        if file.try_lock_exclusive().is_err() {
            let holder = fs::read_to_string(&path).unwrap_or_default();
            let holder = match holder.trim() {
                "" => "unknown process",
                owner => owner,
            };
            bail!(
                "evcal-server is already running ({}).\n\
                If you believe this is an error, remove: {}",
                holder,
                path.display()
            );
        }

        file.set_len(0)?;
        write!(file, "pid {} on {}", std::process::id(), addr)?;
        file.flush()?;

        tracing::debug!(path = %path.display(), %addr, "acquired server lock");
        Ok(InstanceLock { _file: file })
    }
}

fn runtime_dir() -> Result<PathBuf> {
    dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .map(|dir| dir.join("evcal"))
        .context("Could not determine runtime directory")
}
