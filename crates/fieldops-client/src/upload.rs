//! Hosted-image upload
//!
//! Survey photos are resized and re-encoded client-side, then posted as
//! `multipart/form-data` to the hosted image API with a fixed upload
//! preset. Only the returned `secure_url` is kept; the backend stores the
//! URL, never the bytes.

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::io::Cursor;
use std::time::Duration;
use tracing::info;

use crate::config::ImageConfig;
use crate::error::ClientError;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Debug, Clone)]
pub struct ImageUploader {
    http: Client,
    config: ImageConfig,
}

impl ImageUploader {
    pub fn new(config: ImageConfig) -> Result<Self, ClientError> {
        if config.upload_url.trim().is_empty() {
            return Err(ClientError::Config("images.upload_url must be set".into()));
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn max_photos(&self) -> usize {
        self.config.max_photos
    }

    /// Decode, downscale to the configured bounding box and re-encode as
    /// JPEG. Images already within bounds are still re-encoded so every
    /// upload is a predictable size.
    pub fn prepare(&self, bytes: &[u8]) -> Result<Vec<u8>, ClientError> {
        let img = image::load_from_memory(bytes).map_err(|e| ClientError::Image(e.to_string()))?;

        let max = self.config.max_dimension;
        let img = if img.width() > max || img.height() > max {
            img.resize(max, max, image::imageops::FilterType::Triangle)
        } else {
            img
        };

        // JPEG has no alpha channel; flatten before encoding.
        let rgb = image::DynamicImage::ImageRgb8(img.to_rgb8());

        let mut out = Vec::new();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
            Cursor::new(&mut out),
            self.config.jpeg_quality,
        );
        rgb.write_with_encoder(encoder)
            .map_err(|e| ClientError::Image(e.to_string()))?;
        Ok(out)
    }

    /// Upload prepared JPEG bytes; returns the hosted `secure_url`.
    pub async fn upload(&self, jpeg: Vec<u8>, filename: &str) -> Result<String, ClientError> {
        let part = Part::bytes(jpeg)
            .file_name(filename.to_string())
            .mime_str("image/jpeg")?;
        let form = Form::new()
            .text("upload_preset", self.config.upload_preset.clone())
            .part("file", part);

        let response = self
            .http
            .post(&self.config.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: if body.is_empty() {
                    "image upload failed".into()
                } else {
                    body
                },
            });
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        info!(url = %uploaded.secure_url, "image uploaded");
        Ok(uploaded.secure_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploader(max_dimension: u32) -> ImageUploader {
        ImageUploader::new(ImageConfig {
            upload_url: "https://img.example/upload".into(),
            upload_preset: "fieldops".into(),
            max_photos: 5,
            max_dimension,
            jpeg_quality: 80,
        })
        .unwrap()
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(width, height);
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn prepare_downscales_oversized_images() {
        let uploader = uploader(64);
        let jpeg = uploader.prepare(&png_bytes(200, 100)).unwrap();

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert!(decoded.width() <= 64);
        assert!(decoded.height() <= 64);
    }

    #[test]
    fn prepare_keeps_small_images_at_size() {
        let uploader = uploader(1280);
        let jpeg = uploader.prepare(&png_bytes(40, 30)).unwrap();

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
    }

    #[test]
    fn prepare_rejects_garbage_bytes() {
        let uploader = uploader(1280);
        assert!(matches!(
            uploader.prepare(b"not an image"),
            Err(ClientError::Image(_))
        ));
    }

    #[test]
    fn new_requires_upload_url() {
        assert!(ImageUploader::new(ImageConfig::default()).is_err());
    }
}
