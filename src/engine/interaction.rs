//! Per-item hover and click handling.
//!
//! Each placed item is a pair of nodes under one static parent:
//!
//! ```text
//! pose (static, hit-tested) ─┬─ hitbox  : never animated
//!                            └─ visual  : depth offset + scale, hover-animated
//! ```
//!
//! Hover feedback moves only the visual, so the region the pointer is tested
//! against stays put and the cursor cannot "fall off" a rising card. Clicks
//! project the static parent, so the lightbox origin does not depend on the
//! hover phase at click time.

use glam::{Mat4, Vec2, Vec3};

use crate::anim::{Animatable, Ease, Timeline, TimelineSlot};
use crate::item::Item;
use crate::render::projector::{PixelRect, ScreenProjector};

/// Forward offset of the risen visual (world units).
pub const HOVER_RISE_Z: f32 = 1.26;
/// Extra scale of the risen visual.
pub const HOVER_SCALE_BOOST: f32 = 0.06;
pub const HOVER_UP_DURATION: f32 = 0.24;
pub const HOVER_HOLD_DURATION: f32 = 0.12;
pub const HOVER_DOWN_DURATION: f32 = 0.66;

/// What the pointer should look like. Consumed by whoever owns the display
/// surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Affordance {
    #[default]
    Default,
    /// Something clickable is under the pointer
    Pointer,
    /// Clicking dismisses the lightbox
    ZoomOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverProp {
    Depth,
    Scale,
}

/// Local transform of the visual node relative to the static pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualOffset {
    pub depth: f32,
    pub scale: f32,
}

impl Default for VisualOffset {
    fn default() -> Self {
        Self {
            depth: 0.0,
            scale: 1.0,
        }
    }
}

impl VisualOffset {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, self.depth))
            * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

impl Animatable<HoverProp> for VisualOffset {
    fn get(&self, prop: HoverProp) -> f32 {
        match prop {
            HoverProp::Depth => self.depth,
            HoverProp::Scale => self.scale,
        }
    }

    fn set(&mut self, prop: HoverProp, value: f32) {
        match prop {
            HoverProp::Depth => self.depth = value,
            HoverProp::Scale => self.scale = value,
        }
    }
}

/// Emitted when an item is clicked: the item and where it sat on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Selected {
    pub item: Item,
    pub origin: PixelRect,
}

/// Rise → hold → settle on both depth and scale.
fn hover_timeline() -> Timeline<HoverProp> {
    let risen_scale = 1.0 + HOVER_SCALE_BOOST;
    let hold_at = HOVER_UP_DURATION;
    let settle_at = HOVER_UP_DURATION + HOVER_HOLD_DURATION;
    Timeline::new()
        .to(HoverProp::Depth, HOVER_RISE_Z, HOVER_UP_DURATION, Ease::PowerOut(3))
        .to(HoverProp::Depth, HOVER_RISE_Z, HOVER_HOLD_DURATION, Ease::Linear)
        .to(HoverProp::Depth, 0.0, HOVER_DOWN_DURATION, Ease::PowerOut(2))
        .to_at(0.0, HoverProp::Scale, risen_scale, HOVER_UP_DURATION, Ease::PowerOut(3))
        .to_at(hold_at, HoverProp::Scale, risen_scale, HOVER_HOLD_DURATION, Ease::Linear)
        .to_at(settle_at, HoverProp::Scale, 1.0, HOVER_DOWN_DURATION, Ease::PowerOut(2))
}

#[derive(Debug, Clone)]
pub struct ItemInteractionController {
    item: Item,
    visual: VisualOffset,
    hover: TimelineSlot<HoverProp>,
    mounted: bool,
}

impl ItemInteractionController {
    pub fn new(item: Item) -> Self {
        Self {
            item,
            visual: VisualOffset::default(),
            hover: TimelineSlot::new(),
            mounted: true,
        }
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn visual(&self) -> VisualOffset {
        self.visual
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The hover timeline owner (at most one live timeline).
    pub fn hover(&self) -> &TimelineSlot<HoverProp> {
        &self.hover
    }

    /// Footprint half extents in the item's local plane.
    pub fn half_extent(&self) -> Vec2 {
        Vec2::new(self.item.width * 0.5, self.item.height * 0.5)
    }

    /// Start the hover feedback, replacing any hover still in flight.
    pub fn pointer_enter(&mut self) -> Affordance {
        if !self.mounted {
            return Affordance::Default;
        }
        if let Some(old) = self.hover.start(hover_timeline()) {
            log::trace!("{}: hover restarted, killed {:?}", self.item.id, old);
        }
        Affordance::Pointer
    }

    /// The running hover is left to settle on its own.
    pub fn pointer_leave(&mut self) -> Affordance {
        Affordance::Default
    }

    /// Project the static hitbox and report the selection.
    ///
    /// `hitbox_world` is `None` when the geometry is gone (e.g. unmounted
    /// mid-gesture); the click is then ignored.
    pub fn click(
        &self,
        hitbox_world: Option<&Mat4>,
        projector: &ScreenProjector,
    ) -> Option<Selected> {
        if !self.mounted {
            return None;
        }
        let world = hitbox_world?;
        let origin = projector.project_footprint(world, self.half_extent());
        Some(Selected {
            item: self.item.clone(),
            origin,
        })
    }

    pub fn tick(&mut self, dt: f32) {
        self.hover.advance(dt, &mut self.visual);
    }

    /// Cancel anything in flight; the controller is inert afterwards.
    pub fn teardown(&mut self) {
        self.hover.cancel();
        self.mounted = false;
    }
}
