//! Lightbox open/close transitions.
//!
//! ```text
//!   Closed ──select──▶ Opening ──settled──▶ Open
//!     ▲                   │                  │
//!     │                 close              close
//!     │                   ▼                  │
//!     └────teardown──── Closing ◀────────────┘
//! ```
//!
//! The controller owns the overlay's style state ([`OverlayStyle`]) and a
//! single timeline slot. Every transition kills the previous timeline before
//! starting its own, and close tweens start from whatever the overlay shows
//! right now, so closing mid-open reverses smoothly from the in-flight rect.
//!
//! Re-entrancy:
//! - `select` while Opening or Open is ignored.
//! - `select` while Closing abandons the close and opens the new item from
//!   its own origin.
//! - `close` while Closed or Closing is a no-op.

use crate::anim::{Animatable, Ease, Timeline, TimelineSlot};
use crate::config::OverlayConfig;
use crate::engine::interaction::Affordance;
use crate::item::Item;
use crate::render::projector::{PixelRect, Viewport};

// ── Motion constants ──

pub const OPEN_BACKDROP_DURATION: f32 = 0.8;
pub const OPEN_FRAME_DURATION: f32 = 0.8;
pub const OPEN_IMAGE_DURATION: f32 = 1.0;
pub const OPEN_IMAGE_START_SCALE: f32 = 1.1;
pub const OPEN_CAPTION_DELAY: f32 = 0.4;
pub const OPEN_CAPTION_DURATION: f32 = 0.6;
pub const OPEN_BUTTON_DELAY: f32 = 0.5;
pub const OPEN_BUTTON_DURATION: f32 = 0.4;
pub const CAPTION_RISE: f32 = 20.0;
pub const FRAME_RADIUS: f32 = 4.0;
pub const FRAME_SHADOW: f32 = 0.5;

pub const CLOSE_CHROME_DURATION: f32 = 0.2;
pub const CLOSE_FRAME_DURATION: f32 = 0.6;
pub const CLOSE_BACKDROP_DURATION: f32 = 0.7;
pub const CAPTION_SINK: f32 = 10.0;
pub const BUTTON_REST_SCALE: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// Observable transition state. Back to `Default` once a close completes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransitionState {
    pub phase: Phase,
    pub active_item: Option<Item>,
    /// Where the item sat on screen when it was selected
    pub origin: Option<PixelRect>,
}

/// Animated overlay properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayProp {
    FrameTop,
    FrameLeft,
    FrameWidth,
    FrameHeight,
    FrameRadius,
    FrameOpacity,
    FrameShadow,
    BackdropOpacity,
    ImageScale,
    CaptionOpacity,
    CaptionOffset,
    ButtonOpacity,
    ButtonScale,
}

/// Everything the overlay painter needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub frame: PixelRect,
    pub frame_radius: f32,
    pub frame_opacity: f32,
    /// Shadow strength in [0, 1]
    pub frame_shadow: f32,
    pub backdrop_opacity: f32,
    /// Zoom of the image inside the frame (clipped to the frame)
    pub image_scale: f32,
    pub caption_opacity: f32,
    /// Downward offset of the caption in pixels
    pub caption_offset: f32,
    pub button_opacity: f32,
    pub button_scale: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            frame: PixelRect::default(),
            frame_radius: 0.0,
            frame_opacity: 0.0,
            frame_shadow: 0.0,
            backdrop_opacity: 0.0,
            image_scale: 1.0,
            caption_opacity: 0.0,
            caption_offset: CAPTION_RISE,
            button_opacity: 0.0,
            button_scale: BUTTON_REST_SCALE,
        }
    }
}

impl Animatable<OverlayProp> for OverlayStyle {
    fn get(&self, prop: OverlayProp) -> f32 {
        match prop {
            OverlayProp::FrameTop => self.frame.top,
            OverlayProp::FrameLeft => self.frame.left,
            OverlayProp::FrameWidth => self.frame.width,
            OverlayProp::FrameHeight => self.frame.height,
            OverlayProp::FrameRadius => self.frame_radius,
            OverlayProp::FrameOpacity => self.frame_opacity,
            OverlayProp::FrameShadow => self.frame_shadow,
            OverlayProp::BackdropOpacity => self.backdrop_opacity,
            OverlayProp::ImageScale => self.image_scale,
            OverlayProp::CaptionOpacity => self.caption_opacity,
            OverlayProp::CaptionOffset => self.caption_offset,
            OverlayProp::ButtonOpacity => self.button_opacity,
            OverlayProp::ButtonScale => self.button_scale,
        }
    }

    fn set(&mut self, prop: OverlayProp, value: f32) {
        match prop {
            OverlayProp::FrameTop => self.frame.top = value,
            OverlayProp::FrameLeft => self.frame.left = value,
            OverlayProp::FrameWidth => self.frame.width = value,
            OverlayProp::FrameHeight => self.frame.height = value,
            OverlayProp::FrameRadius => self.frame_radius = value,
            // opacities may be driven by overshooting curves
            OverlayProp::FrameOpacity => self.frame_opacity = value.clamp(0.0, 1.0),
            OverlayProp::FrameShadow => self.frame_shadow = value,
            OverlayProp::BackdropOpacity => self.backdrop_opacity = value.clamp(0.0, 1.0),
            OverlayProp::ImageScale => self.image_scale = value,
            OverlayProp::CaptionOpacity => self.caption_opacity = value.clamp(0.0, 1.0),
            OverlayProp::CaptionOffset => self.caption_offset = value,
            OverlayProp::ButtonOpacity => self.button_opacity = value.clamp(0.0, 1.0),
            OverlayProp::ButtonScale => self.button_scale = value,
        }
    }
}

/// Completion signals handed back by the transition timelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cue {
    Settled,
    Teardown,
}

/// Largest rect of the item's aspect ratio that fits inside `fill` of the
/// viewport, centered.
pub fn fit_target(aspect: f32, viewport: Viewport, fill: f32) -> PixelRect {
    let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
    let max_w = viewport.width * fill;
    let max_h = viewport.height * fill;

    let mut width = max_w;
    let mut height = width / aspect;
    if height > max_h {
        height = max_h;
        width = height * aspect;
    }
    PixelRect {
        top: (viewport.height - height) * 0.5,
        left: (viewport.width - width) * 0.5,
        width,
        height,
    }
}

fn frame_tweens(
    timeline: Timeline<OverlayProp, Cue>,
    rect: PixelRect,
    duration: f32,
    ease: Ease,
) -> Timeline<OverlayProp, Cue> {
    timeline
        .to_at(0.0, OverlayProp::FrameTop, rect.top, duration, ease)
        .to_at(0.0, OverlayProp::FrameLeft, rect.left, duration, ease)
        .to_at(0.0, OverlayProp::FrameWidth, rect.width, duration, ease)
        .to_at(0.0, OverlayProp::FrameHeight, rect.height, duration, ease)
}

fn open_timeline(origin: PixelRect, target: PixelRect) -> Timeline<OverlayProp, Cue> {
    // start pose: frame sits exactly on the card, chrome hidden
    let start = Timeline::new()
        .set_at(0.0, OverlayProp::FrameTop, origin.top)
        .set_at(0.0, OverlayProp::FrameLeft, origin.left)
        .set_at(0.0, OverlayProp::FrameWidth, origin.width)
        .set_at(0.0, OverlayProp::FrameHeight, origin.height)
        .set_at(0.0, OverlayProp::FrameRadius, 0.0)
        .set_at(0.0, OverlayProp::FrameOpacity, 1.0)
        .set_at(0.0, OverlayProp::FrameShadow, 0.0)
        .set_at(0.0, OverlayProp::CaptionOpacity, 0.0)
        .set_at(0.0, OverlayProp::CaptionOffset, CAPTION_RISE)
        .set_at(0.0, OverlayProp::ButtonOpacity, 0.0)
        .set_at(0.0, OverlayProp::ButtonScale, BUTTON_REST_SCALE);

    let button = Ease::BackOut(1.7);
    frame_tweens(start, target, OPEN_FRAME_DURATION, Ease::ExpoInOut)
        .to_at(0.0, OverlayProp::FrameRadius, FRAME_RADIUS, OPEN_FRAME_DURATION, Ease::ExpoInOut)
        .to_at(0.0, OverlayProp::FrameShadow, FRAME_SHADOW, OPEN_FRAME_DURATION, Ease::ExpoInOut)
        .to_at(0.0, OverlayProp::BackdropOpacity, 1.0, OPEN_BACKDROP_DURATION, Ease::PowerOut(2))
        .from_to_at(
            0.0,
            OverlayProp::ImageScale,
            OPEN_IMAGE_START_SCALE,
            1.0,
            OPEN_IMAGE_DURATION,
            Ease::ExpoOut,
        )
        .to_at(OPEN_CAPTION_DELAY, OverlayProp::CaptionOpacity, 1.0, OPEN_CAPTION_DURATION, Ease::PowerOut(2))
        .to_at(OPEN_CAPTION_DELAY, OverlayProp::CaptionOffset, 0.0, OPEN_CAPTION_DURATION, Ease::PowerOut(2))
        .to_at(OPEN_BUTTON_DELAY, OverlayProp::ButtonOpacity, 1.0, OPEN_BUTTON_DURATION, button)
        .to_at(OPEN_BUTTON_DELAY, OverlayProp::ButtonScale, 1.0, OPEN_BUTTON_DURATION, button)
        .cue_at_end(Cue::Settled)
}

/// Every close tween starts from the overlay's current values.
fn close_timeline(origin: PixelRect) -> Timeline<OverlayProp, Cue> {
    let chrome = Ease::PowerIn(2);
    let start = Timeline::new()
        .to_at(0.0, OverlayProp::CaptionOpacity, 0.0, CLOSE_CHROME_DURATION, chrome)
        .to_at(0.0, OverlayProp::CaptionOffset, CAPTION_SINK, CLOSE_CHROME_DURATION, chrome)
        .to_at(0.0, OverlayProp::ButtonOpacity, 0.0, CLOSE_CHROME_DURATION, chrome)
        .to_at(0.0, OverlayProp::ButtonScale, BUTTON_REST_SCALE, CLOSE_CHROME_DURATION, chrome)
        .to_at(0.0, OverlayProp::BackdropOpacity, 0.0, CLOSE_BACKDROP_DURATION, Ease::PowerInOut(3));

    frame_tweens(start, origin, CLOSE_FRAME_DURATION, Ease::ExpoInOut)
        .to_at(0.0, OverlayProp::FrameRadius, 0.0, CLOSE_FRAME_DURATION, Ease::ExpoInOut)
        .to_at(0.0, OverlayProp::FrameOpacity, 0.0, CLOSE_FRAME_DURATION, Ease::ExpoInOut)
        .to_at(0.0, OverlayProp::FrameShadow, 0.0, CLOSE_FRAME_DURATION, Ease::ExpoInOut)
        .to_at(0.0, OverlayProp::ImageScale, 1.0, CLOSE_FRAME_DURATION, Ease::ExpoInOut)
        .cue_at_end(Cue::Teardown)
}

// ── LightboxTransitionController ──

#[derive(Debug, Clone)]
pub struct LightboxTransitionController {
    fill: f32,
    state: TransitionState,
    style: OverlayStyle,
    target: Option<PixelRect>,
    timeline: TimelineSlot<OverlayProp, Cue>,
}

impl Default for LightboxTransitionController {
    fn default() -> Self {
        Self::from_config(&OverlayConfig::default())
    }
}

impl LightboxTransitionController {
    pub fn new(fill: f32) -> Self {
        Self {
            fill,
            state: TransitionState::default(),
            style: OverlayStyle::default(),
            target: None,
            timeline: TimelineSlot::new(),
        }
    }

    pub fn from_config(cfg: &OverlayConfig) -> Self {
        Self::new(cfg.fill)
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// True from the moment an item is selected until the close finishes.
    pub fn is_engaged(&self) -> bool {
        self.state.phase != Phase::Closed
    }

    /// Pointer affordance over the overlay.
    pub fn affordance(&self) -> Affordance {
        match self.state.phase {
            Phase::Opening | Phase::Open => Affordance::ZoomOut,
            Phase::Closed | Phase::Closing => Affordance::Default,
        }
    }

    /// Start opening `item` from its on-screen `origin`. Returns false if the
    /// request was ignored.
    pub fn select(&mut self, item: Item, origin: PixelRect, viewport: Viewport) -> bool {
        match self.state.phase {
            Phase::Opening | Phase::Open => {
                log::debug!("lightbox: ignoring select of {} while {:?}", item.id, self.state.phase);
                return false;
            }
            Phase::Closing => {
                log::debug!("lightbox: close of {:?} abandoned for {}", self.active_id(), item.id);
            }
            Phase::Closed => {}
        }

        let target = fit_target(item.aspect(), viewport, self.fill);
        log::debug!("lightbox: opening {} → {:?}", item.id, target);
        self.state = TransitionState {
            phase: Phase::Opening,
            active_item: Some(item),
            origin: Some(origin),
        };
        self.target = Some(target);
        self.timeline.start(open_timeline(origin, target));
        // apply the start pose now, before the first frame is painted
        self.advance(0.0);
        true
    }

    /// Start closing. Returns false if there was nothing to close.
    pub fn close(&mut self) -> bool {
        match self.state.phase {
            Phase::Closed | Phase::Closing => false,
            Phase::Opening | Phase::Open => {
                let Some(origin) = self.state.origin else {
                    self.finish_close();
                    return true;
                };
                log::debug!("lightbox: closing {:?} from {:?}", self.active_id(), self.state.phase);
                self.state.phase = Phase::Closing;
                self.timeline.start(close_timeline(origin));
                true
            }
        }
    }

    /// Keep an open lightbox fitted to a resized viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.state.phase != Phase::Open {
            return;
        }
        if let Some(item) = &self.state.active_item {
            let target = fit_target(item.aspect(), viewport, self.fill);
            self.style.frame = target;
            self.target = Some(target);
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.advance(dt);
    }

    /// Stop everything and return to Closed immediately.
    pub fn teardown(&mut self) {
        self.timeline.cancel();
        self.finish_close();
    }

    fn advance(&mut self, dt: f32) {
        let step = self.timeline.advance(dt, &mut self.style);
        for cue in step.cues {
            match cue {
                Cue::Settled if self.state.phase == Phase::Opening => {
                    log::debug!("lightbox: open");
                    self.state.phase = Phase::Open;
                }
                Cue::Teardown if self.state.phase == Phase::Closing => self.finish_close(),
                _ => {}
            }
        }
    }

    fn finish_close(&mut self) {
        log::debug!("lightbox: closed");
        self.state = TransitionState::default();
        self.target = None;
        self.style.backdrop_opacity = 0.0;
        self.style.frame_opacity = 0.0;
    }

    fn active_id(&self) -> Option<&str> {
        self.state.active_item.as_ref().map(|i| i.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemKind, MediaRef};

    fn item(width: f32, height: f32) -> Item {
        Item {
            id: "photo".to_string(),
            media: MediaRef::Url("https://example.com/a.jpg".to_string()),
            title: "Photo".to_string(),
            kind: ItemKind::Seeded,
            width,
            height,
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(1600.0, 900.0)
    }

    fn origin() -> PixelRect {
        PixelRect::new(400.0, 700.0, 120.0, 90.0)
    }

    fn run(lb: &mut LightboxTransitionController, seconds: f32) {
        let steps = (seconds * 120.0).round() as usize;
        for _ in 0..steps {
            lb.tick(1.0 / 120.0);
        }
    }

    fn assert_rect_near(a: PixelRect, b: PixelRect) {
        assert!((a.top - b.top).abs() < 0.5, "top {} vs {}", a.top, b.top);
        assert!((a.left - b.left).abs() < 0.5, "left {} vs {}", a.left, b.left);
        assert!((a.width - b.width).abs() < 0.5, "width {} vs {}", a.width, b.width);
        assert!((a.height - b.height).abs() < 0.5, "height {} vs {}", a.height, b.height);
    }

    #[test]
    fn fit_target_limits_by_height_for_wide_viewport() {
        let rect = fit_target(4.0 / 3.0, viewport(), 0.9);
        assert_rect_near(rect, PixelRect::new(45.0, 260.0, 1080.0, 810.0));
    }

    #[test]
    fn fit_target_limits_by_width_for_tall_viewport() {
        let rect = fit_target(1.5, Viewport::new(600.0, 1000.0), 0.9);
        assert!((rect.width - 540.0).abs() < 1e-3);
        assert!((rect.height - 360.0).abs() < 1e-3);
        assert!((rect.left - 30.0).abs() < 1e-3);
        assert!((rect.top - 320.0).abs() < 1e-3);
    }

    #[test]
    fn fit_target_survives_degenerate_aspect() {
        let rect = fit_target(0.0, viewport(), 0.9);
        assert!(rect.width.is_finite() && rect.height.is_finite());
        assert!((rect.width - rect.height).abs() < 1e-3);
    }

    #[test]
    fn select_applies_start_pose_immediately() {
        let mut lb = LightboxTransitionController::new(0.9);
        assert!(lb.select(item(1.6, 1.2), origin(), viewport()));
        assert_eq!(lb.phase(), Phase::Opening);
        assert_rect_near(lb.style().frame, origin());
        assert_eq!(lb.style().frame_opacity, 1.0);
        assert!((lb.style().image_scale - OPEN_IMAGE_START_SCALE).abs() < 1e-6);
        assert_eq!(lb.style().caption_opacity, 0.0);
        assert_eq!(lb.affordance(), Affordance::ZoomOut);
    }

    #[test]
    fn open_settles_on_fitted_target() {
        let mut lb = LightboxTransitionController::new(0.9);
        lb.select(item(1.6, 1.2), origin(), viewport());

        run(&mut lb, 0.5);
        assert_eq!(lb.phase(), Phase::Opening);

        run(&mut lb, 0.6);
        assert_eq!(lb.phase(), Phase::Open);
        let style = lb.style();
        assert_rect_near(style.frame, PixelRect::new(45.0, 260.0, 1080.0, 810.0));
        assert!((style.frame_radius - FRAME_RADIUS).abs() < 1e-4);
        assert_eq!(style.backdrop_opacity, 1.0);
        assert!((style.image_scale - 1.0).abs() < 1e-4);
        assert_eq!(style.caption_opacity, 1.0);
        assert!(style.caption_offset.abs() < 1e-4);
        assert!((style.button_scale - 1.0).abs() < 1e-4);
        assert_eq!(lb.state().origin, Some(origin()));
    }

    #[test]
    fn caption_waits_for_its_delay() {
        let mut lb = LightboxTransitionController::new(0.9);
        lb.select(item(1.6, 1.2), origin(), viewport());
        run(&mut lb, 0.35);
        assert_eq!(lb.style().caption_opacity, 0.0);
        assert_eq!(lb.style().button_opacity, 0.0);
        assert!(lb.style().backdrop_opacity > 0.5);
    }

    #[test]
    fn full_round_trip_restores_initial_state() {
        let mut lb = LightboxTransitionController::new(0.9);
        lb.select(item(1.6, 1.2), origin(), viewport());
        run(&mut lb, 1.1);
        assert!(lb.close());
        assert_eq!(lb.phase(), Phase::Closing);

        // frame morph is done before the backdrop; item is still mounted
        run(&mut lb, 0.65);
        assert_eq!(lb.phase(), Phase::Closing);
        assert!(lb.state().active_item.is_some());
        assert_rect_near(lb.style().frame, origin());
        assert!(lb.style().backdrop_opacity > 0.0);

        run(&mut lb, 0.1);
        assert_eq!(*lb.state(), TransitionState::default());
        assert_eq!(lb.style().backdrop_opacity, 0.0);
        assert_eq!(lb.style().frame_opacity, 0.0);
        assert!(!lb.is_engaged());
    }

    #[test]
    fn close_mid_open_reverses_from_current_rect() {
        let mut lb = LightboxTransitionController::new(0.9);
        lb.select(item(1.6, 1.2), origin(), viewport());
        run(&mut lb, 0.4);
        let mid = lb.style().frame;
        assert!(mid.width > origin().width && mid.width < 1080.0);

        assert!(lb.close());
        lb.tick(0.0);
        // no jump: the close starts where the open was
        assert_rect_near(lb.style().frame, mid);

        run(&mut lb, 1.0);
        assert_eq!(*lb.state(), TransitionState::default());
    }

    #[test]
    fn close_is_idempotent() {
        let mut lb = LightboxTransitionController::new(0.9);
        assert!(!lb.close());
        lb.select(item(1.0, 1.0), origin(), viewport());
        assert!(lb.close());
        assert!(!lb.close());
        assert_eq!(lb.phase(), Phase::Closing);
    }

    #[test]
    fn select_while_open_is_ignored() {
        let mut lb = LightboxTransitionController::new(0.9);
        lb.select(item(1.6, 1.2), origin(), viewport());
        let other = PixelRect::new(10.0, 10.0, 50.0, 50.0);
        let mut second = item(1.0, 1.0);
        second.id = "other".to_string();

        assert!(!lb.select(second.clone(), other, viewport()));
        run(&mut lb, 1.1);
        assert!(!lb.select(second, other, viewport()));
        assert_eq!(lb.state().active_item.as_ref().map(|i| i.id.as_str()), Some("photo"));
    }

    #[test]
    fn select_while_closing_restarts_from_new_origin() {
        let mut lb = LightboxTransitionController::new(0.9);
        lb.select(item(1.6, 1.2), origin(), viewport());
        run(&mut lb, 1.1);
        lb.close();
        run(&mut lb, 0.2);

        let other = PixelRect::new(10.0, 10.0, 50.0, 50.0);
        let mut second = item(1.0, 1.0);
        second.id = "other".to_string();
        assert!(lb.select(second, other, viewport()));
        assert_eq!(lb.phase(), Phase::Opening);
        assert_rect_near(lb.style().frame, other);

        // the abandoned close never tears the new item down
        run(&mut lb, 1.1);
        assert_eq!(lb.phase(), Phase::Open);
        assert_eq!(lb.state().origin, Some(other));
        assert_rect_near(lb.style().frame, fit_target(1.0, viewport(), 0.9));
    }

    #[test]
    fn resize_refits_open_frame() {
        let mut lb = LightboxTransitionController::new(0.9);
        lb.select(item(1.6, 1.2), origin(), viewport());
        run(&mut lb, 1.1);
        lb.resize(Viewport::new(800.0, 600.0));
        assert_rect_near(lb.style().frame, fit_target(4.0 / 3.0, Viewport::new(800.0, 600.0), 0.9));
    }

    #[test]
    fn teardown_returns_to_closed() {
        let mut lb = LightboxTransitionController::new(0.9);
        lb.select(item(1.6, 1.2), origin(), viewport());
        run(&mut lb, 0.3);
        lb.teardown();
        assert_eq!(*lb.state(), TransitionState::default());
        run(&mut lb, 1.0);
        assert_eq!(lb.phase(), Phase::Closed);
    }
}
