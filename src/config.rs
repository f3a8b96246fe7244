//! Gallery configuration.
//!
//! Every field has a default taken from the tuned look of the gallery, so a
//! config file only needs to name what it changes:
//!
//! ```json
//! { "layout": { "item_count": 60 }, "camera": { "fov_deg": 45.0 } }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable consulted when no `--config` flag is given.
pub const CONFIG_ENV: &str = "ORBIT_GALLERY_CONFIG";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GalleryConfig {
    pub layout: LayoutConfig,
    pub camera: CameraConfig,
    pub overlay: OverlayConfig,
}

/// Sphere placement.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Radius of the placement sphere (world units)
    pub radius: f32,
    /// Number of seeded items
    pub item_count: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            radius: 13.5,
            item_count: 140,
        }
    }
}

/// Camera rig tuning.
///
/// Per-frame factors are expressed against a 60 Hz frame and rescaled by the
/// rig for the actual frame time.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance from the globe center along +Z
    pub distance: f32,
    /// Vertical field of view in degrees
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Normalized pointer position → camera offset multiplier
    pub parallax: f32,
    /// Fraction of the remaining parallax gap closed per 60 Hz frame
    pub parallax_smoothing: f32,
    /// Idle yaw increment per 60 Hz frame (radians)
    pub idle_rotation: f32,
    /// Drag points → radians
    pub drag_sensitivity: f32,
    /// Fraction of drag velocity lost per 60 Hz frame
    pub drag_damping: f32,
    /// Maximum container pitch either way (degrees)
    pub max_pitch_deg: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 44.0,
            fov_deg: 38.0,
            near: 0.1,
            far: 200.0,
            parallax: 2.0,
            parallax_smoothing: 0.05,
            idle_rotation: 0.0008,
            drag_sensitivity: 0.004,
            drag_damping: 0.05,
            max_pitch_deg: 30.0,
        }
    }
}

/// Lightbox overlay tuning.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverlayConfig {
    /// Largest share of the viewport the open frame may cover, per axis
    pub fill: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { fill: 0.9 }
    }
}

impl GalleryConfig {
    /// Parse a config from JSON text and validate it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GalleryConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Reject values the layout and projection math cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.layout.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "layout.radius must be positive, got {}",
                self.layout.radius
            )));
        }
        if !(self.overlay.fill > 0.0 && self.overlay.fill <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "overlay.fill must be in (0, 1], got {}",
                self.overlay.fill
            )));
        }
        if !(self.camera.fov_deg > 0.0 && self.camera.fov_deg < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.fov_deg must be in (0, 180), got {}",
                self.camera.fov_deg
            )));
        }
        if !(self.camera.near > 0.0 && self.camera.far > self.camera.near) {
            return Err(ConfigError::Invalid(
                "camera.near must be positive and below camera.far".to_string(),
            ));
        }
        Ok(())
    }
}
