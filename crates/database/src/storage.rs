use crate::error::Result;
use async_trait::async_trait;
use log::{debug, info, warn};
use std::{
    io::{Error, ErrorKind},
    path::{Component, Path, PathBuf},
};
use tokio::{fs::OpenOptions, io::AsyncWriteExt};
use uuid::Uuid;

/// An uploaded image waiting to be written to storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Where image files owned by rows live
///
/// Rows store the name returned by [`ImageStorage::save`], a `/`-separated
/// path relative to the storage root.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Writes `bytes` under `dir` and returns the stored name
    ///
    /// Never overwrites: if the name is taken a random suffix is added.
    async fn save(&self, dir: &str, file_name: &str, bytes: &[u8]) -> std::io::Result<String>;

    /// Removes a stored file, returning `false` if it was already absent
    async fn delete(&self, name: &str) -> std::io::Result<bool>;

    async fn exists(&self, name: &str) -> std::io::Result<bool>;
}

/// Image storage on the local file system
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    root: PathBuf,
}

impl FileSystemStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a stored name, refusing anything that escapes the root
    fn path(&self, name: &str) -> std::io::Result<PathBuf> {
        let relative = Path::new(name);
        let is_contained = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

        if name.is_empty() || !is_contained {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("invalid storage name: {name:?}"),
            ));
        }

        Ok(self.root.join(relative))
    }
}

/// Splits `photo.png` into `("photo", Some("png"))`
fn split_extension(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    }
}

#[async_trait]
impl ImageStorage for FileSystemStorage {
    async fn save(&self, dir: &str, file_name: &str, bytes: &[u8]) -> std::io::Result<String> {
        // Keep only the final component of whatever the client sent
        let file_name = Path::new(file_name)
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidInput,
                    format!("invalid upload name: {file_name:?}"),
                )
            })?;

        let dir = dir.trim_matches('/');
        let mut name = format!("{dir}/{file_name}");
        loop {
            let path = self.path(&name)?;
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }

            // `create_new` claims the name atomically
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(bytes).await?;
                    file.flush().await?;
                    break;
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    let mut suffix = Uuid::new_v4().simple().to_string();
                    suffix.truncate(7);
                    name = match split_extension(file_name) {
                        (stem, Some(ext)) => format!("{dir}/{stem}_{suffix}.{ext}"),
                        (stem, None) => format!("{dir}/{stem}_{suffix}"),
                    };
                }
                Err(e) => return Err(e),
            }
        }

        debug!("Stored {} bytes as {name}", bytes.len());
        Ok(name)
    }

    async fn delete(&self, name: &str) -> std::io::Result<bool> {
        match tokio::fs::remove_file(self.path(name)?).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn exists(&self, name: &str) -> std::io::Result<bool> {
        tokio::fs::try_exists(self.path(name)?).await
    }
}

/// Deletes the image a row owns, if any
///
/// A file that is already gone is logged and skipped so the row delete can
/// go ahead.
pub(crate) async fn remove_image(storage: &dyn ImageStorage, name: Option<&str>) -> Result<()> {
    let Some(name) = name.filter(|name| !name.is_empty()) else {
        return Ok(());
    };

    if storage.delete(name).await? {
        info!("Removed image {name}");
    } else {
        warn!("Image {name} was already missing from storage");
    }

    Ok(())
}

/// Best-effort cleanup of a file written for a row that was never saved
pub(crate) async fn discard_image(storage: &dyn ImageStorage, name: Option<&str>) {
    if let Err(e) = remove_image(storage, name).await {
        warn!("Could not discard image {name:?}: {e}");
    }
}

/// Writes an optional upload, returning the stored name
pub(crate) async fn store_image(
    storage: &dyn ImageStorage,
    dir: &str,
    upload: Option<&ImageUpload>,
) -> Result<Option<String>> {
    match upload {
        Some(upload) => Ok(Some(
            storage
                .save(dir, &upload.file_name, &upload.bytes)
                .await?,
        )),
        None => Ok(None),
    }
}
