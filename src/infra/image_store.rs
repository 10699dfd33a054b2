//! Remote object storage for listing images.
//!
//! Uploads go to an HTTP provider that accepts an unsigned multipart upload
//! (`file`, `upload_preset`, `folder`) and answers with the public
//! `secure_url` of the stored object.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;

use crate::config::Config;
use crate::domain::ImageUpload;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Object storage trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store the bytes under `folder` and return the public URL
    async fn store(&self, folder: &str, image: ImageUpload) -> AppResult<String>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// reqwest-backed provider client
pub struct HttpImageStore {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
}

impl HttpImageStore {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.image_upload_timeout_seconds))
            .build()
            .map_err(|e| AppError::internal(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            client,
            upload_url: config.image_upload_url.clone(),
            upload_preset: config.image_upload_preset().to_string(),
        })
    }
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn store(&self, folder: &str, image: ImageUpload) -> AppResult<String> {
        let file_name = image.file_name.unwrap_or_else(|| "upload".to_string());
        let mut part = Part::bytes(image.bytes).file_name(file_name);
        if let Some(content_type) = image.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| AppError::BadRequest(format!("Invalid content type: {}", e)))?;
        }

        let form = Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .text("folder", folder.to_string())
            .part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::Upload(e.to_string()))?;

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upload(format!("Unexpected provider response: {}", e)))?;

        tracing::debug!(url = %body.secure_url, "Image stored");
        Ok(body.secure_url)
    }
}
