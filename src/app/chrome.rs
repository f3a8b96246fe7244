//! Page chrome drawn over the globe: title, hint line, optional stats, and
//! dropped image files turned into generated items.

use eframe::egui;

use super::GalleryApp;
use crate::ui;

impl GalleryApp {
    pub fn chrome(&mut self, ctx: &egui::Context) {
        let look = self.host.look();
        let text = egui::Color32::from_gray(220).gamma_multiply(look.opacity);
        let dim = egui::Color32::from_gray(140).gamma_multiply(look.opacity);

        egui::Area::new(egui::Id::new("chrome_title"))
            .order(egui::Order::Middle)
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(24.0, 20.0))
            .interactable(!self.lightbox.is_engaged())
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Orbit Gallery").size(22.0).strong().color(text));
                ui.label(egui::RichText::new(format!("{} images", self.items.len())).color(dim));
                if ui
                    .add(egui::Label::new(egui::RichText::new("stats").small().color(dim)).sense(egui::Sense::click()))
                    .on_hover_cursor(egui::CursorIcon::PointingHand)
                    .clicked()
                {
                    self.show_stats = !self.show_stats;
                }
                if self.show_stats {
                    ui.label(
                        egui::RichText::new(format!(
                            "loaded {} · pending {} · failed {}",
                            self.image_loader.loaded_count(),
                            self.image_loader.pending_count(),
                            self.image_loader.failed_count(),
                        ))
                        .small()
                        .monospace()
                        .color(dim),
                    );
                }
            });

        egui::Area::new(egui::Id::new("chrome_hint"))
            .order(egui::Order::Middle)
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -20.0))
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new("Drag to spin · Click a card to open · Drop an image to add it")
                        .small()
                        .color(dim),
                );
            });
    }

    /// Files dropped on the window join the globe as generated items.
    pub fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            let Some(path) = file.path else {
                continue;
            };
            let Some(mime) = ui::guess_mime(&path) else {
                log::warn!("ignoring dropped file {}: not an image", path.display());
                continue;
            };
            let bytes = match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::warn!("could not read dropped file {}: {}", path.display(), e);
                    continue;
                }
            };
            let title = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string();
            let item = self.items.push_generated(&title, bytes, mime);
            log::info!("added {} ({})", item.id, title);
        }
    }
}
