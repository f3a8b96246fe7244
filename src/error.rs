//! Error types for media loading and configuration.
//!
//! Neither kind is fatal to the gallery: media errors end at the loader
//! boundary (the card falls back to a placeholder), config errors fall back
//! to defaults in `main`.

use thiserror::Error;

/// Failure while resolving a media reference into pixels.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("invalid media URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unsupported URL scheme `{0}`")]
    UnsupportedScheme(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {status} for {url}")]
    Status { status: u16, url: String },
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Failure while loading or validating a [`GalleryConfig`](crate::config::GalleryConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
