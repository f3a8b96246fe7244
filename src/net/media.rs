//! Media sources: turn a [`MediaRef`] into decoded RGBA pixels.
//!
//! The loader only talks to the [`MediaSource`] trait, so tests and offline
//! builds can swap the network out.

use std::time::Duration;

use url::Url;

use crate::error::MediaError;
use crate::item::MediaRef;

/// Textures wider than this are downsized before upload.
pub const MAX_TEXTURE_WIDTH: u32 = 800;

/// Decoded image data (RGBA).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Resolves media references. Called from worker threads.
pub trait MediaSource: Send + Sync + 'static {
    fn fetch(&self, media: &MediaRef) -> Result<ImageData, MediaError>;
}

/// Fetches remote images over HTTP(S); inline payloads are decoded directly.
pub struct HttpMediaSource {
    client: reqwest::blocking::Client,
    max_width: u32,
}

impl HttpMediaSource {
    pub fn new() -> Result<Self, MediaError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("orbit-gallery/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self {
            client,
            max_width: MAX_TEXTURE_WIDTH,
        })
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, MediaError> {
        let parsed = Url::parse(url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MediaError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        let response = self
            .client
            .get(parsed.as_str())
            .header("Accept", "image/avif,image/webp,image/*;q=0.8")
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(MediaError::Status {
                status: status.as_u16(),
                url: parsed.to_string(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}

impl MediaSource for HttpMediaSource {
    fn fetch(&self, media: &MediaRef) -> Result<ImageData, MediaError> {
        match media {
            MediaRef::Url(url) => {
                let bytes = self.download(url)?;
                decode(&bytes, self.max_width)
            }
            MediaRef::Inline { bytes, .. } => decode(bytes, self.max_width),
        }
    }
}

/// Decode an encoded image, capping its width at `max_width` (aspect kept).
pub fn decode(bytes: &[u8], max_width: u32) -> Result<ImageData, MediaError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (w, h) = rgba.dimensions();

    let rgba = if w > max_width {
        let new_h = ((h as f32 * max_width as f32 / w as f32) as u32).max(1);
        image::imageops::resize(&rgba, max_width, new_h, image::imageops::FilterType::Triangle)
    } else {
        rgba
    };

    let (width, height) = rgba.dimensions();
    Ok(ImageData {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::new(width, height));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn decode_keeps_small_images() {
        let data = decode(&png(4, 3), MAX_TEXTURE_WIDTH).unwrap();
        assert_eq!((data.width, data.height), (4, 3));
        assert_eq!(data.rgba.len(), 4 * 3 * 4);
    }

    #[test]
    fn decode_downsizes_wide_images() {
        let data = decode(&png(1000, 10), MAX_TEXTURE_WIDTH).unwrap();
        assert_eq!((data.width, data.height), (800, 8));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = decode(b"not an image", MAX_TEXTURE_WIDTH).unwrap_err();
        assert!(matches!(err, MediaError::Decode(_)));
    }

    #[test]
    fn inline_media_skips_the_network() {
        let source = HttpMediaSource::new().unwrap();
        let media = MediaRef::inline(png(2, 2), "image/png");
        let data = source.fetch(&media).unwrap();
        assert_eq!((data.width, data.height), (2, 2));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let source = HttpMediaSource::new().unwrap();
        let err = source
            .fetch(&MediaRef::Url("file:///etc/passwd".to_string()))
            .unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedScheme(s) if s == "file"));
    }

    #[test]
    fn malformed_url_is_rejected() {
        let source = HttpMediaSource::new().unwrap();
        let err = source.fetch(&MediaRef::Url("not a url".to_string())).unwrap_err();
        assert!(matches!(err, MediaError::InvalidUrl(_)));
    }
}
