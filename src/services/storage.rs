use crate::models::MediaKind;
use crate::services::error::{ServiceError, ServiceResult};
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// Local-directory storage for uploaded media files.
///
/// Files land in `<root>/photos/` or `<root>/videos/` under a generated name;
/// the database only keeps the relative reference (`photos/<name>`).
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    max_size: usize,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>, max_size: usize) -> Self {
        Self {
            root: root.into(),
            max_size,
        }
    }

    pub fn save(
        &self,
        kind: MediaKind,
        original_name: &str,
        content_type: Option<&str>,
        data: &[u8],
    ) -> ServiceResult<String> {
        if data.is_empty() {
            return Err(ServiceError::invalid("file", "The submitted file is empty"));
        }
        if data.len() > self.max_size {
            return Err(ServiceError::invalid(
                "file",
                format!(
                    "File too large: {} bytes (max {} bytes)",
                    data.len(),
                    self.max_size
                ),
            ));
        }

        let mime = match content_type {
            Some(ct) if ct != "application/octet-stream" => ct.to_string(),
            _ => mime_guess::from_path(original_name)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        };
        let top_level = mime.split('/').next().unwrap_or_default();
        if top_level != kind.accepted_mime() {
            return Err(ServiceError::invalid(
                "file",
                format!("Expected a {} file, got {}", kind.accepted_mime(), mime),
            ));
        }

        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .or_else(|| {
                mime_guess::get_mime_extensions_str(&mime)
                    .and_then(|exts| exts.first())
                    .map(|e| e.to_string())
            });

        let filename = match extension {
            Some(ext) if !ext.is_empty() => format!("{}.{}", Uuid::new_v4(), ext),
            _ => Uuid::new_v4().to_string(),
        };
        let reference = format!("{}/{}", kind.upload_prefix(), filename);

        let dir = self.root.join(kind.upload_prefix());
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join(&filename), data)?;

        tracing::debug!("Stored {} ({} bytes)", reference, data.len());
        Ok(reference)
    }

    /// Maps a stored reference to its path on disk.
    ///
    /// Only plain relative paths are accepted; anything that could escape the
    /// storage root is rejected.
    pub fn resolve(&self, reference: &str) -> ServiceResult<PathBuf> {
        let relative = Path::new(reference);
        let safe = !reference.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(ServiceError::invalid("file", "Invalid file reference"));
        }
        Ok(self.root.join(relative))
    }

    pub fn remove(&self, reference: &str) -> ServiceResult<()> {
        let path = self.resolve(reference)?;
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}
