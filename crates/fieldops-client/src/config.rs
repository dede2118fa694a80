use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub api: ApiConfig,
    #[serde(default)]
    pub images: ImageConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    30
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ImageConfig {
    #[serde(default)]
    pub upload_url: String,
    #[serde(default)]
    pub upload_preset: String,
    #[serde(default = "default_max_photos")]
    pub max_photos: usize,
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

fn default_max_photos() -> usize {
    5
}

fn default_max_dimension() -> u32 {
    1280
}

fn default_jpeg_quality() -> u8 {
    80
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            upload_url: String::new(),
            upload_preset: String::new(),
            max_photos: default_max_photos(),
            max_dimension: default_max_dimension(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl Settings {
    /// Load from `config/fieldops.*` (optional) with `FIELDOPS`-prefixed
    /// environment overrides, e.g. `FIELDOPS__API__BASE_URL=...`.
    pub fn load() -> Result<Self, ClientError> {
        Self::load_from(None)
    }

    /// Same as [`Settings::load`], but an explicit path replaces the
    /// default file lookup and must exist.
    pub fn load_from(path: Option<&str>) -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();

        let file = match path {
            Some(path) => File::with_name(path),
            None => File::with_name("config/fieldops").required(false),
        };
        let config = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("FIELDOPS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ClientError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ClientError::Config("api.base_url must be set".into()));
        }
        if self.images.jpeg_quality == 0 || self.images.jpeg_quality > 100 {
            return Err(ClientError::Config(
                "images.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        if self.images.max_photos == 0 {
            return Err(ClientError::Config("images.max_photos must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_defaults_are_sensible() {
        let images = ImageConfig::default();
        assert_eq!(images.max_photos, 5);
        assert_eq!(images.max_dimension, 1280);
        assert_eq!(images.jpeg_quality, 80);
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let err = Settings::load_from(Some("/nonexistent/fieldops"));
        assert!(err.is_err());
    }

    #[test]
    fn validate_rejects_empty_base_url() {
        let settings = Settings {
            api: ApiConfig {
                base_url: "  ".into(),
                timeout_seconds: 30,
            },
            images: ImageConfig::default(),
        };
        assert!(settings.validate().is_err());
    }
}
