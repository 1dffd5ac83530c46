use crate::domain::marketplace::{FileStoragePort, StorageError, StoreFileParams, StoredFile};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Directory below the web root that uploaded images are written to. Links
/// stored on project pictures are relative to the web root.
pub const IMAGES_PATH: &str = "content/images";

const FALLBACK_FILE_NAME: &str = "upload";

/// Writes uploads to `<web_root>/content/images` on the local file system.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    images_dir: PathBuf,
}

impl LocalFileStorage {
    pub fn new(web_root: impl AsRef<Path>) -> Self {
        Self {
            images_dir: web_root.as_ref().join(IMAGES_PATH),
        }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }
}

/// Reduces a client supplied name to its last path component made of
/// `[A-Za-z0-9._-]`, never starting with a dot.
fn sanitize_file_name(file_name: Option<&str>) -> String {
    let base = file_name
        .map(|name| name.rsplit(['/', '\\']).next().unwrap_or_default())
        .unwrap_or_default();

    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let sanitized = sanitized.trim_start_matches('.');

    if sanitized.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        sanitized.to_string()
    }
}

#[async_trait]
impl FileStoragePort for LocalFileStorage {
    async fn store(&self, params: StoreFileParams) -> Result<StoredFile, StorageError> {
        let file_name = format!(
            "{}-{}",
            Uuid::now_v7(),
            sanitize_file_name(params.file_name.as_deref())
        );
        let destination = self.images_dir.join(&file_name);
        tracing::info!(destination = %destination.display(), "saving upload");

        tokio::fs::create_dir_all(&self.images_dir).await?;
        tokio::fs::write(&destination, &params.content).await?;

        Ok(StoredFile {
            link: format!("{IMAGES_PATH}/{file_name}"),
        })
    }
}
