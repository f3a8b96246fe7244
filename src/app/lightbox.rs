//! Lightbox overlay painting.
//!
//! Drawn on the foreground layer so nothing underneath receives pointer
//! events while it is up. Everything visual comes from the controller's
//! `OverlayStyle`; this module only paints it and turns clicks into `close`.

use eframe::egui;

use orbit_gallery::engine::{Affordance, Phase};
use orbit_gallery::render::PixelRect;

use super::GalleryApp;
use crate::ui;

const BACKDROP_ALPHA: f32 = 0.85;
const BUTTON_RADIUS: f32 = 18.0;
const BUTTON_MARGIN: f32 = 12.0;
const CAPTION_GAP: f32 = 14.0;

impl GalleryApp {
    pub fn lightbox_layer(&mut self, ctx: &egui::Context) {
        if self.lightbox.phase() == Phase::Closed {
            return;
        }
        let Some(item) = self.lightbox.state().active_item.clone() else {
            return;
        };
        let style = *self.lightbox.style();
        let screen = ctx.screen_rect();
        let mut close = false;

        egui::Area::new(egui::Id::new("lightbox"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let backdrop = ui.allocate_rect(screen, egui::Sense::click());
                let frame_rect = ui::to_rect(style.frame);
                let frame = ui.interact(frame_rect, egui::Id::new("lightbox_frame"), egui::Sense::click());
                let button_rect = button_rect(style.frame, style.button_scale);
                let button = ui.interact(button_rect, egui::Id::new("lightbox_close"), egui::Sense::click());

                let painter = ui.painter();
                painter.rect_filled(
                    screen,
                    0.0,
                    egui::Color32::BLACK.gamma_multiply(BACKDROP_ALPHA * style.backdrop_opacity),
                );

                // frame: shadow, fill, clipped image
                let opacity = style.frame_opacity;
                if style.frame_shadow > 0.0 {
                    let shadow = egui::epaint::Shadow {
                        offset: egui::vec2(0.0, 16.0),
                        blur: 48.0,
                        spread: 0.0,
                        color: egui::Color32::BLACK.gamma_multiply(style.frame_shadow * opacity),
                    };
                    painter.add(shadow.as_shape(frame_rect, style.frame_radius));
                }
                painter.rect_filled(
                    frame_rect,
                    style.frame_radius,
                    egui::Color32::from_gray(24).gamma_multiply(opacity),
                );
                let clipped = painter.with_clip_rect(frame_rect.shrink(style.frame_radius * 0.3));
                let image_rect = egui::Rect::from_center_size(
                    frame_rect.center(),
                    frame_rect.size() * style.image_scale,
                );
                let tint = egui::Color32::WHITE.gamma_multiply(opacity);
                match self.image_textures.get(item.media.cache_key()) {
                    Some(tex) => {
                        let [w, h] = tex.size();
                        let uv = ui::cover_uv(w as f32 / h.max(1) as f32, item.aspect());
                        clipped.image(tex.id(), image_rect, uv, tint);
                    }
                    None => {
                        let c = [
                            image_rect.left_bottom(),
                            image_rect.right_bottom(),
                            image_rect.right_top(),
                            image_rect.left_top(),
                        ];
                        let failed = self.image_loader.state(&item.media).is_failed();
                        ui::paint_placeholder(&clipped, c, failed, tint);
                    }
                }

                // caption below the frame
                if style.caption_opacity > 0.0 {
                    painter.text(
                        egui::pos2(
                            frame_rect.center().x,
                            frame_rect.bottom() + CAPTION_GAP + style.caption_offset,
                        ),
                        egui::Align2::CENTER_TOP,
                        &item.title,
                        egui::FontId::proportional(18.0),
                        egui::Color32::from_gray(235).gamma_multiply(style.caption_opacity),
                    );
                }

                // close button
                if style.button_opacity > 0.0 {
                    let fill = if button.hovered() { 70 } else { 45 };
                    painter.circle_filled(
                        button_rect.center(),
                        button_rect.width() * 0.5,
                        egui::Color32::from_gray(fill).gamma_multiply(style.button_opacity),
                    );
                    painter.text(
                        button_rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "×",
                        egui::FontId::proportional(20.0 * style.button_scale),
                        egui::Color32::WHITE.gamma_multiply(style.button_opacity),
                    );
                }

                self.affordance = if button.hovered() {
                    Affordance::Pointer
                } else if frame.hovered() {
                    Affordance::Default
                } else {
                    self.lightbox.affordance()
                };
                close = backdrop.clicked() || button.clicked();
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            close = true;
        }
        if close {
            self.lightbox.close();
        }
    }
}

/// Close button in the frame's top-right corner.
fn button_rect(frame: PixelRect, scale: f32) -> egui::Rect {
    let radius = BUTTON_RADIUS * scale.max(0.0);
    let center = egui::pos2(
        frame.left + frame.width - BUTTON_MARGIN - BUTTON_RADIUS,
        frame.top + BUTTON_MARGIN + BUTTON_RADIUS,
    );
    egui::Rect::from_center_size(center, egui::vec2(radius * 2.0, radius * 2.0))
}
