//! Globe panel: pointer input → rig and scene, then cards painted back to
//! front under the host recede transform.

use eframe::egui;

use orbit_gallery::engine::HostLook;
use orbit_gallery::item::MediaRef;
use orbit_gallery::render::{PixelRect, ScreenProjector, Viewport};

use super::GalleryApp;
use crate::ui;

pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(10, 10, 12);

/// Brightness kept by cards seen from behind.
const BACK_FACE_DIM: f32 = 0.45;

impl GalleryApp {
    pub fn globe_panel(&mut self, ui: &mut egui::Ui, dt: f32) {
        let rect = ui.max_rect();
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        let size = glam::Vec2::new(rect.width(), rect.height());
        self.rig.set_viewport(Viewport::new(size.x, size.y));

        let look = self.host.look();
        let center = rect.center();
        let to_local = |p: egui::Pos2| ui::to_vec2(ui::unscale_about(p, center, look.scale) - rect.min);
        let pointer = response.hover_pos().map(to_local);

        if response.dragged() && self.scene.is_interactive() {
            self.rig.drag(ui::to_vec2(response.drag_delta()) / look.scale, dt);
        }
        if response.drag_stopped() {
            self.rig.release();
        }

        let pointer_ndc = {
            let before = ScreenProjector::new(self.rig.camera());
            pointer.map(|p| before.pixel_to_ndc(p))
        };
        self.rig.tick(dt, pointer_ndc);
        let container = self.rig.container().matrix();
        let projector = ScreenProjector::new(self.rig.camera());

        self.affordance = self.scene.pointer_move(&projector, container, pointer);
        if response.clicked() {
            if let Some(p) = response.interact_pointer_pos() {
                if let Some(selected) = self.scene.click(&projector, container, to_local(p)) {
                    let origin = to_screen_rect(selected.origin, rect, look.scale);
                    let screen = ui.ctx().screen_rect();
                    self.lightbox.select(
                        selected.item,
                        origin,
                        Viewport::new(screen.width(), screen.height()),
                    );
                }
            }
        }
        self.scene.tick(dt);

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, BACKGROUND);
        for card in self.scene.draw_list(&projector, container) {
            let Some(item) = self.scene.item(card.index) else {
                continue;
            };
            let media = item.media.clone();
            let aspect = item.aspect();
            let corners = card
                .corners
                .map(|c| ui::scale_about(rect.min + egui::vec2(c.x, c.y), center, look.scale));
            let tint = card_tint(look, card.front_facing);
            self.paint_card(&painter, &media, aspect, corners, tint);
        }
    }

    fn paint_card(
        &mut self,
        painter: &egui::Painter,
        media: &MediaRef,
        card_aspect: f32,
        corners: [egui::Pos2; 4],
        tint: egui::Color32,
    ) {
        self.image_loader.request(media);
        match self.image_textures.get(media.cache_key()) {
            Some(tex) => {
                let [w, h] = tex.size();
                let uv = ui::cover_uv(w as f32 / h.max(1) as f32, card_aspect);
                ui::paint_textured_quad(painter, corners, tex.id(), uv, tint);
            }
            None => {
                let failed = self.image_loader.state(media).is_failed();
                ui::paint_placeholder(painter, corners, failed, tint);
            }
        }
    }
}

fn card_tint(look: HostLook, front_facing: bool) -> egui::Color32 {
    // desaturation is approximated by dimming; egui tints cannot mix channels
    let mut gray = 255.0 - (1.0 - look.saturation) * 70.0;
    if !front_facing {
        gray *= BACK_FACE_DIM;
    }
    egui::Color32::from_gray(gray.clamp(0.0, 255.0) as u8).gamma_multiply(look.opacity)
}

/// Globe-local pixel rect → screen rect, applying the recede scale.
fn to_screen_rect(local: PixelRect, globe: egui::Rect, scale: f32) -> PixelRect {
    let min = ui::scale_about(globe.min + egui::vec2(local.left, local.top), globe.center(), scale);
    PixelRect::new(min.y, min.x, local.width * scale, local.height * scale)
}
