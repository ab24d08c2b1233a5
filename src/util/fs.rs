//! Downloaded-file helpers
//!
//! The download interface is a directory the browser writes into; tests poll
//! it for a named file with a bounded 1 s-interval wait.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::{Error, Result};

const FILE_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Poll `dir` until `file_name` exists or the timeout elapses
pub async fn wait_for_download(dir: &Path, file_name: &str, timeout: Duration) -> Result<PathBuf> {
    let path = dir.join(file_name);
    info!(path = %path.display(), ?timeout, "Waiting for downloaded file");
    wait_for_file(&path, timeout).await?;
    Ok(path)
}

/// Poll until `path` exists or the timeout elapses
pub async fn wait_for_file(path: &Path, timeout: Duration) -> Result<()> {
    let deadline = Instant::now() + timeout;
    loop {
        if path.exists() {
            debug!(path = %path.display(), "File found");
            return Ok(());
        }
        if Instant::now() >= deadline {
            warn!(path = %path.display(), "Timeout reached, file not found");
            return Err(Error::FileWait {
                path: path.display().to_string(),
                timeout,
            });
        }
        tokio::time::sleep(FILE_POLL_INTERVAL).await;
    }
}

/// Read a file to a string
pub fn read_file_content(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(Error::Io)
}
