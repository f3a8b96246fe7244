//! `GalleryApp`: the top-level egui application state.
//!
//! This module declares the `GalleryApp` struct and its constructor.
//! All methods are split across the sibling sub-modules:
//!
//! - `globe`   : camera rig, pointer routing, card painting
//! - `lightbox`: overlay painting and close gestures
//! - `chrome`  : title, hints, stats, dropped files

pub mod chrome;
pub mod globe;
pub mod lightbox;

use std::collections::HashMap;
use std::sync::Arc;

use eframe::egui;

use orbit_gallery::config::GalleryConfig;
use orbit_gallery::engine::{Affordance, HostRecede, LightboxTransitionController};
use orbit_gallery::item::{seeded_items, ItemSet};
use orbit_gallery::net::image::ImageLoader;
use orbit_gallery::net::media::MediaSource;
use orbit_gallery::render::{CameraRig, GlobeScene, Viewport};

// ─── Application state ───────────────────────────────────────────────────────

pub struct GalleryApp {
    pub config: GalleryConfig,
    pub items: ItemSet,
    pub scene: GlobeScene,
    pub rig: CameraRig,
    pub lightbox: LightboxTransitionController,
    pub host: HostRecede,
    // Image loading
    pub image_loader: ImageLoader,
    pub image_textures: HashMap<String, egui::TextureHandle>,
    /// Cursor requested by whichever layer the pointer is over
    pub affordance: Affordance,
    pub show_stats: bool,
}

impl GalleryApp {
    pub fn new(config: GalleryConfig, source: Arc<dyn MediaSource>) -> Self {
        let items = ItemSet::new(seeded_items(config.layout.item_count));
        let mut scene = GlobeScene::new(config.layout.radius);
        scene.sync(&items);
        Self {
            rig: CameraRig::new(config.camera.clone(), Viewport::new(1280.0, 800.0)),
            lightbox: LightboxTransitionController::from_config(&config.overlay),
            host: HostRecede::new(),
            image_loader: ImageLoader::new(source),
            image_textures: HashMap::new(),
            affordance: Affordance::Default,
            show_stats: false,
            config,
            items,
            scene,
        }
    }

    /// Upload freshly decoded images as textures.
    pub fn poll_images(&mut self, ctx: &egui::Context) {
        for key in self.image_loader.poll() {
            if self.image_textures.contains_key(&key) {
                continue;
            }
            if let Some(data) = self.image_loader.get(&key) {
                let image = egui::ColorImage::from_rgba_unmultiplied(
                    [data.width as usize, data.height as usize],
                    &data.rgba,
                );
                let tex = ctx.load_texture(format!("img_{}", key), image, egui::TextureOptions::LINEAR);
                self.image_textures.insert(key, tex);
            }
        }
    }
}
