use std::collections::HashMap;

use axum::extract::{DefaultBodyLimit, Multipart};
use storefront_common::storage::{ImageStore, StoredImage, is_image_file};

use crate::error::AppError;

/// Multipart field carrying the optional image.
pub const IMAGE_FIELD: &str = "image";

/// Headroom on top of the image size limit for the text fields and multipart
/// framing.
const FORM_OVERHEAD: usize = 64 * 1024;

/// Body limit layer for routes accepting an image upload.
pub fn upload_body_limit(max_image_size: u64) -> DefaultBodyLimit {
    let max = usize::try_from(max_image_size)
        .unwrap_or(usize::MAX)
        .saturating_add(FORM_OVERHEAD);
    DefaultBodyLimit::max(max)
}

/// An image read from the request but not yet persisted.
#[derive(Debug)]
pub struct PendingImage {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl PendingImage {
    /// Hand the image to the store, yielding the public path to record.
    pub async fn persist(self, images: &dyn ImageStore) -> Result<StoredImage, AppError> {
        let stored = images.save(&self.file_name, &self.data).await?;
        tracing::info!(path = %stored.public_path, size = stored.size, "Stored uploaded image");
        Ok(stored)
    }
}

/// Text fields plus at most one image from a multipart request.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    pub image: Option<PendingImage>,
}

impl MultipartForm {
    /// Read every field of the request. The first `image` field with content
    /// is kept; a second one is rejected. Unknown file fields are ignored.
    pub async fn read(mut multipart: Multipart, max_image_size: u64) -> Result<Self, AppError> {
        let mut form = MultipartForm::default();

        while let Some(mut field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == IMAGE_FIELD {
                let file_name = field.file_name().map(str::to_string);

                let mut data = Vec::new();
                while let Some(chunk) = field
                    .chunk()
                    .await
                    .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
                {
                    if (data.len() + chunk.len()) as u64 > max_image_size {
                        return Err(AppError::Validation(format!(
                            "Image exceeds maximum size of {max_image_size} bytes"
                        )));
                    }
                    data.extend_from_slice(&chunk);
                }

                // Browsers send an empty part when no file was picked.
                let Some(file_name) = file_name.filter(|n| !n.trim().is_empty()) else {
                    continue;
                };
                if data.is_empty() {
                    continue;
                }
                if form.image.is_some() {
                    return Err(AppError::Validation(
                        "Only one image may be uploaded".into(),
                    ));
                }
                if !is_image_file(&file_name) {
                    return Err(AppError::Validation(format!(
                        "'{file_name}' is not a supported image type"
                    )));
                }
                form.image = Some(PendingImage { file_name, data });
            } else if field.file_name().is_none() {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read '{name}': {e}")))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// Persist the uploaded image, if the request carried one.
    pub async fn persist_image(
        &mut self,
        images: &dyn ImageStore,
    ) -> Result<Option<StoredImage>, AppError> {
        match self.image.take() {
            Some(image) => Ok(Some(image.persist(images).await?)),
            None => Ok(None),
        }
    }

    /// Trimmed, non-empty value of a required text field.
    pub fn required(&self, name: &str) -> Result<String, AppError> {
        self.optional(name)
            .ok_or_else(|| AppError::Validation(format!("Field '{name}' is required")))
    }

    /// Trimmed value of an optional text field; blank counts as absent.
    pub fn optional(&self, name: &str) -> Option<String> {
        crate::models::shared::normalize_optional(self.fields.get(name).cloned())
    }

    #[cfg(test)]
    pub(crate) fn from_fields<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            image: None,
        }
    }
}

/// Remove an image stored for a request that then failed.
pub async fn discard(images: &dyn ImageStore, stored: &StoredImage) {
    match images.remove(&stored.public_path).await {
        Ok(_) => tracing::info!(path = %stored.public_path, "Discarded image of failed request"),
        Err(e) => tracing::warn!(
            path = %stored.public_path,
            "Failed to discard image of failed request: {}",
            e
        ),
    }
}

/// Best-effort removal of an image no row references any more.
pub async fn release(images: &dyn ImageStore, public_path: &str) {
    match images.remove(public_path).await {
        Ok(true) => tracing::info!(path = %public_path, "Removed image file"),
        Ok(false) => tracing::warn!(path = %public_path, "Image file already missing"),
        Err(e) => tracing::warn!(path = %public_path, "Error deleting image file: {}", e),
    }
}
