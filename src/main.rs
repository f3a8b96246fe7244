use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eframe::egui;

use orbit_gallery::config::{GalleryConfig, CONFIG_ENV};
use orbit_gallery::engine::Affordance;
use orbit_gallery::net::media::HttpMediaSource;
use orbit_gallery::render::Viewport;

mod app;
mod ui;

use app::GalleryApp;

/// Media cards on a slowly turning globe.
#[derive(Parser, Debug)]
#[command(name = "orbit-gallery", version, about)]
struct Args {
    /// JSON config file (defaults to $ORBIT_GALLERY_CONFIG if set)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of seeded images
    #[arg(long)]
    items: Option<usize>,

    /// Globe radius in world units
    #[arg(long)]
    radius: Option<f32>,
}

/// Config file (if any) plus command-line overrides. Anything unusable falls
/// back to the defaults with a warning.
fn load_config(args: &Args) -> GalleryConfig {
    let path = args
        .config
        .clone()
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    let mut config = match path {
        Some(path) => match GalleryConfig::load(&path) {
            Ok(config) => {
                log::info!("config loaded from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{}: {}; using defaults", path.display(), e);
                GalleryConfig::default()
            }
        },
        None => GalleryConfig::default(),
    };

    if let Some(items) = args.items {
        config.layout.item_count = items;
    }
    if let Some(radius) = args.radius {
        config.layout.radius = radius;
    }
    if let Err(e) = config.validate() {
        log::warn!("{}; using defaults", e);
        config = GalleryConfig::default();
    }
    config
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let config = load_config(&args);
    log::info!(
        "{} items on radius {}, camera at {} (fov {}°)",
        config.layout.item_count,
        config.layout.radius,
        config.camera.distance,
        config.camera.fov_deg
    );

    let source = match HttpMediaSource::new() {
        Ok(source) => Arc::new(source),
        Err(e) => {
            log::error!("could not set up the media client: {}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Orbit Gallery"),
        ..Default::default()
    };

    eframe::run_native(
        "Orbit Gallery",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(GalleryApp::new(config, source)))
        }),
    )
    .expect("Failed to start Orbit Gallery");
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| i.stable_dt).min(0.1);

        // Membership changes first, so this frame lays out the new set
        self.handle_dropped_files(ctx);
        self.scene.sync(&self.items);
        self.poll_images(ctx);

        // Overlay and host follow the lightbox phase
        let screen = ctx.screen_rect();
        self.lightbox.resize(Viewport::new(screen.width(), screen.height()));
        self.lightbox.tick(dt);
        self.host.follow(self.lightbox.is_engaged());
        self.host.tick(dt);
        self.scene.set_interactive(!self.lightbox.is_engaged());

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(app::globe::BACKGROUND))
            .show(ctx, |ui| self.globe_panel(ui, dt));
        self.chrome(ctx);
        self.lightbox_layer(ctx);

        // widgets set their own cursors; only override when asked to
        if self.affordance != Affordance::Default {
            ctx.set_cursor_icon(ui::cursor_icon(self.affordance));
        }
        ctx.request_repaint();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.lightbox.teardown();
        self.scene.teardown();
        log::info!("orbit gallery closed");
    }
}
