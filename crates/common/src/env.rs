//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the upload directory exists and is a directory.
pub async fn ensure_upload_dir(upload_dir: &Path) -> anyhow::Result<()> {
    match tokio::fs::metadata(upload_dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(anyhow::anyhow!("{} exists but is not a directory", upload_dir.display())),
        Err(_) => {
            tokio::fs::create_dir_all(upload_dir)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", upload_dir.display()))?;
            info!(dir = %upload_dir.display(), "created upload directory");
            Ok(())
        }
    }
}

/// Create the parent directory of a sqlite database file so `mode=rwc` can open it.
pub async fn ensure_sqlite_parent(database_url: &str) -> anyhow::Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else { return Ok(()) };
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return Ok(());
    }
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            warn!(dir = %parent.display(), error = %e, "cannot create sqlite directory");
        }
    }
    Ok(())
}
