//! Quest images stored under `<uploads_root>/uploads/` through a cap-std
//! directory handle, so no stored path can escape the upload directory.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ImageUpload;
use crate::domain::ports::{ImageStore, ImageStoreError};

/// Directory, relative to the uploads root, holding quest images.
pub const UPLOADS_DIR: &str = "uploads";

/// [`ImageStore`] writing into a capability-scoped directory.
#[derive(Clone)]
pub struct CapStdImageStore {
    dir: Arc<Dir>,
}

impl CapStdImageStore {
    /// Open (creating if needed) `<uploads_root>/uploads`.
    ///
    /// # Errors
    /// Any I/O error raised while creating or opening the directory.
    pub fn open(uploads_root: &Path) -> io::Result<Self> {
        let path = uploads_root.join(UPLOADS_DIR);
        Dir::create_ambient_dir_all(&path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(&path, ambient_authority())?;
        Ok(Self { dir: Arc::new(dir) })
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T, ImageStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Dir) -> Result<T, ImageStoreError> + Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || op(&dir))
            .await
            .map_err(|err| ImageStoreError::io(err.to_string()))?
    }
}

/// File name inside the upload directory for a stored `uploads/<name>`
/// path, rejecting anything that is not a single plain component.
fn file_name_of(path: &str) -> Result<&str, ImageStoreError> {
    path.strip_prefix(UPLOADS_DIR)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|name| {
            !name.is_empty() && !name.contains(['/', '\\']) && !name.starts_with('.')
        })
        .ok_or_else(|| ImageStoreError::invalid_path(path))
}

#[async_trait]
impl ImageStore for CapStdImageStore {
    async fn save(&self, image: &ImageUpload) -> Result<String, ImageStoreError> {
        let name = format!("{}.{}", Uuid::new_v4().simple(), image.extension());
        let bytes = image.bytes().to_vec();
        let file_name = name.clone();
        self.blocking(move |dir| {
            dir.write(&file_name, &bytes)
                .map_err(|err| ImageStoreError::io(err.to_string()))
        })
        .await?;
        debug!(file = %name, "stored quest image");
        Ok(format!("{UPLOADS_DIR}/{name}"))
    }

    async fn remove(&self, path: &str) -> Result<(), ImageStoreError> {
        let name = file_name_of(path)?.to_owned();
        self.blocking(move |dir| match dir.remove_file(&name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ImageStoreError::io(err.to_string())),
        })
        .await
    }
}
