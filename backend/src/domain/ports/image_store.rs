//! Driven port for quest image files.

use async_trait::async_trait;

use crate::domain::ImageUpload;

use super::define_port_error;

define_port_error! {
    pub enum ImageStoreError {
        Io { message: String } => "image store I/O failed: {message}",
        InvalidPath { path: String } => "image path {path} is outside the upload directory",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist an upload under a fresh name; returns its relative path.
    async fn save(&self, image: &ImageUpload) -> Result<String, ImageStoreError>;

    /// Remove a previously saved image. Missing files are not an error.
    async fn remove(&self, path: &str) -> Result<(), ImageStoreError>;
}
