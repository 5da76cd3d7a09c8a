use std::path::{Path, PathBuf};

use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::errors::ServiceError;

/// Upper bound on `-N` suffixes tried when several uploads share a millisecond.
const MAX_NAME_ATTEMPTS: u32 = 1000;
const MAX_EXTENSION_LEN: usize = 8;

/// Directory-backed store for uploaded images.
///
/// Files are named `<unix-millis>[-N].<ext>` and addressed publicly as
/// `<public_prefix>/<file>`.
#[derive(Clone, Debug)]
pub struct UploadStore {
    root: PathBuf,
    public_prefix: String,
}

impl UploadStore {
    pub fn new<P: Into<PathBuf>>(root: P, public_prefix: &str) -> Self {
        let prefix = public_prefix.trim_end_matches('/');
        let public_prefix = if prefix.starts_with('/') { prefix.to_string() } else { format!("/{prefix}") };
        Self { root: root.into(), public_prefix }
    }

    pub fn from_config(cfg: &configs::UploadConfig) -> Self {
        Self::new(&cfg.dir, &cfg.public_prefix)
    }

    pub fn root(&self) -> &Path { &self.root }

    pub fn public_prefix(&self) -> &str { &self.public_prefix }

    /// Persist `bytes` under a fresh name and return its public path.
    pub async fn store(&self, original_name: Option<&str>, bytes: &[u8]) -> Result<String, ServiceError> {
        fs::create_dir_all(&self.root).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        let millis = chrono::Utc::now().timestamp_millis();
        let ext = original_name.map(sanitize_extension).unwrap_or_default();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let file_name = if attempt == 0 { format!("{millis}{ext}") } else { format!("{millis}-{attempt}{ext}") };
            let path = self.root.join(&file_name);
            let mut file = match fs::OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(f) => f,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(ServiceError::Storage(e.to_string())),
            };
            if let Err(e) = write_all(&mut file, bytes).await {
                drop(file);
                let _ = fs::remove_file(&path).await;
                return Err(ServiceError::Storage(e.to_string()));
            }
            info!(file = %file_name, size = bytes.len(), "upload_stored");
            return Ok(format!("{}/{}", self.public_prefix, file_name));
        }
        Err(ServiceError::Storage(format!("no free file name for timestamp {millis}")))
    }

    /// Delete a previously stored file. Returns whether a file was removed.
    ///
    /// Paths outside the upload prefix, or that would escape the directory, are
    /// ignored.
    pub async fn remove(&self, public_path: &str) -> Result<bool, ServiceError> {
        let Some(file_name) = self.file_name_of(public_path) else {
            debug!(path = %public_path, "not an upload path; skipping removal");
            return Ok(false);
        };
        match fs::remove_file(self.root.join(file_name)).await {
            Ok(()) => {
                info!(file = %file_name, "upload_removed");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(file = %file_name, "upload already gone");
                Ok(false)
            }
            Err(e) => Err(ServiceError::Storage(e.to_string())),
        }
    }

    fn file_name_of<'a>(&self, public_path: &'a str) -> Option<&'a str> {
        let name = public_path.strip_prefix(self.public_prefix.as_str())?.strip_prefix('/')?;
        let valid = !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\']);
        valid.then_some(name)
    }
}

async fn write_all(file: &mut fs::File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await
}

/// `.ext` (lowercased) when the client name ends in a short alphanumeric
/// extension, otherwise empty.
pub fn sanitize_extension(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= MAX_EXTENSION_LEN && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}
