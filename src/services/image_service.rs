//! Image service - Validates uploads and hands them to object storage.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::IMAGE_FOLDER;
use crate::domain::ImageUpload;
use crate::errors::{AppError, AppResult};
use crate::infra::ImageStore;

/// Image upload trait for dependency injection.
#[async_trait]
pub trait ImageService: Send + Sync {
    /// Store a listing image and return its public URL
    async fn upload(&self, image: ImageUpload) -> AppResult<String>;
}

/// Uploads every listing image into the shared properties folder.
pub struct ImageUploader {
    store: Arc<dyn ImageStore>,
}

impl ImageUploader {
    pub fn new(store: Arc<dyn ImageStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ImageService for ImageUploader {
    async fn upload(&self, image: ImageUpload) -> AppResult<String> {
        if image.is_empty() {
            return Err(AppError::EmptyPayload);
        }

        let size = image.bytes.len();
        let url = self.store.store(IMAGE_FOLDER, image).await?;
        tracing::info!(bytes = size, url = %url, "Listing image uploaded");
        Ok(url)
    }
}
