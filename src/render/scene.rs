//! The globe: every item placed on the sphere under one rotating container.
//!
//! Per item the scene holds a static pose (from [`SphereLayout`]) and an
//! [`ItemInteractionController`] that owns the hover-animated visual. World
//! transforms are composed on demand:
//!
//! - hitbox = container · pose
//! - visual = hitbox · (translate depth · scale)
//!
//! Picking and click projection only ever look at the hitbox. Painting uses
//! the visual.

use glam::{Mat4, Vec2};

use crate::engine::interaction::{Affordance, ItemInteractionController, Selected};
use crate::item::{Item, ItemSet};
use crate::render::projector::{quad_contains, ScreenProjector};
use crate::render::sphere::{Pose, SphereLayout};

/// One card ready to paint, in overlay pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardDraw {
    pub index: usize,
    /// Bottom-left, bottom-right, top-right, top-left of the card's face
    pub corners: [Vec2; 4],
    /// Mean distance from the camera
    pub depth: f32,
    /// False when the camera sees the card's back
    pub front_facing: bool,
}

#[derive(Debug, Clone)]
struct ItemNode {
    pose: Pose,
    controller: ItemInteractionController,
}

#[derive(Debug, Clone)]
pub struct GlobeScene {
    radius: f32,
    layout: SphereLayout,
    nodes: Vec<ItemNode>,
    /// (revision, len) of the item set the nodes were built from
    synced: Option<(u64, usize)>,
    hovered: Option<usize>,
    interactive: bool,
}

impl GlobeScene {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            layout: SphereLayout::default(),
            nodes: Vec::new(),
            synced: None,
            hovered: None,
            interactive: true,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.nodes.get(index).map(|n| n.controller.item())
    }

    pub fn controller(&self, index: usize) -> Option<&ItemInteractionController> {
        self.nodes.get(index).map(|n| &n.controller)
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Rebuild the per-item nodes if the item set changed since the last
    /// call. Controllers of items that kept their slot survive; the rest are
    /// torn down. Returns true if anything was rebuilt.
    pub fn sync(&mut self, items: &ItemSet) -> bool {
        let key = (items.revision(), items.len());
        if self.synced == Some(key) {
            return false;
        }
        self.synced = Some(key);

        let hovered_id = self
            .hovered
            .and_then(|i| self.item(i))
            .map(|item| item.id.clone());

        self.layout.ensure(items.len(), self.radius);
        let mut old: Vec<Option<ItemNode>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();

        self.nodes = items
            .items()
            .iter()
            .zip(self.layout.poses())
            .enumerate()
            .map(|(i, (item, pose))| {
                let controller = match old.get_mut(i).and_then(Option::take) {
                    Some(node) if node.controller.item().id == item.id => node.controller,
                    Some(mut node) => {
                        node.controller.teardown();
                        ItemInteractionController::new(item.clone())
                    }
                    None => ItemInteractionController::new(item.clone()),
                };
                ItemNode {
                    pose: *pose,
                    controller,
                }
            })
            .collect();

        for node in old.iter_mut().flatten() {
            node.controller.teardown();
        }

        self.hovered = self.hovered.filter(|&i| {
            self.nodes.get(i).map(|n| &n.controller.item().id) == hovered_id.as_ref()
        });
        log::debug!("globe scene: {} items (revision {})", key.1, key.0);
        true
    }

    /// While not interactive (lightbox engaged) pointer input is ignored and
    /// any hover is released.
    pub fn set_interactive(&mut self, interactive: bool) {
        if self.interactive == interactive {
            return;
        }
        self.interactive = interactive;
        if !interactive {
            self.set_hovered(None);
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    // ── Transforms ──

    pub fn hitbox_world(&self, index: usize, container: Mat4) -> Option<Mat4> {
        self.nodes.get(index).map(|n| container * n.pose.matrix())
    }

    pub fn visual_world(&self, index: usize, container: Mat4) -> Option<Mat4> {
        self.nodes
            .get(index)
            .map(|n| container * n.pose.matrix() * n.controller.visual().matrix())
    }

    // ── Pointer ──

    /// Nearest item whose hitbox covers `pointer`.
    pub fn pick(&self, projector: &ScreenProjector, container: Mat4, pointer: Vec2) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| {
                let world = container * node.pose.matrix();
                let quad = projector.project_quad(&world, node.controller.half_extent())?;
                let corners = quad.map(|p| p.pos);
                if !quad_contains(&corners, pointer) {
                    return None;
                }
                let depth = quad.iter().map(|p| p.depth).sum::<f32>() * 0.25;
                Some((i, depth))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Route a pointer move. `None` means the pointer left the surface.
    /// Returns the affordance the host should show.
    pub fn pointer_move(
        &mut self,
        projector: &ScreenProjector,
        container: Mat4,
        pointer: Option<Vec2>,
    ) -> Affordance {
        if !self.interactive {
            return Affordance::Default;
        }
        let target = pointer.and_then(|p| self.pick(projector, container, p));
        self.set_hovered(target)
    }

    /// Route a click. Emits the selection with the item's on-screen rect.
    pub fn click(
        &mut self,
        projector: &ScreenProjector,
        container: Mat4,
        pointer: Vec2,
    ) -> Option<Selected> {
        if !self.interactive {
            return None;
        }
        let index = self.pick(projector, container, pointer)?;
        let world = self.hitbox_world(index, container);
        let selected = self.nodes[index].controller.click(world.as_ref(), projector)?;
        log::debug!(
            "selected {} at {:.0},{:.0} {:.0}x{:.0}",
            selected.item.id,
            selected.origin.left,
            selected.origin.top,
            selected.origin.width,
            selected.origin.height
        );
        Some(selected)
    }

    fn set_hovered(&mut self, target: Option<usize>) -> Affordance {
        if target == self.hovered {
            return if target.is_some() {
                Affordance::Pointer
            } else {
                Affordance::Default
            };
        }
        let mut affordance = Affordance::Default;
        if let Some(node) = self.hovered.and_then(|i| self.nodes.get_mut(i)) {
            affordance = node.controller.pointer_leave();
        }
        if let Some(node) = target.and_then(|i| self.nodes.get_mut(i)) {
            affordance = node.controller.pointer_enter();
        }
        self.hovered = target;
        affordance
    }

    // ── Frame ──

    pub fn tick(&mut self, dt: f32) {
        for node in &mut self.nodes {
            node.controller.tick(dt);
        }
    }

    /// Visible cards sorted back to front.
    pub fn draw_list(&self, projector: &ScreenProjector, container: Mat4) -> Vec<CardDraw> {
        let mut cards: Vec<CardDraw> = self
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let world = container * node.pose.matrix() * node.controller.visual().matrix();
                let quad = projector.project_quad(&world, node.controller.half_extent())?;
                let corners = quad.map(|p| p.pos);
                Some(CardDraw {
                    index,
                    corners,
                    depth: quad.iter().map(|p| p.depth).sum::<f32>() * 0.25,
                    // screen Y points down, so a face seen from the front winds clockwise
                    front_facing: signed_area(&corners) < 0.0,
                })
            })
            .collect();
        cards.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        cards
    }

    /// Cancel every item's timelines; the scene is inert afterwards.
    pub fn teardown(&mut self) {
        for node in &mut self.nodes {
            node.controller.teardown();
        }
        self.hovered = None;
        self.interactive = false;
    }
}

fn signed_area(corners: &[Vec2; 4]) -> f32 {
    let mut sum = 0.0;
    for i in 0..4 {
        sum += corners[i].perp_dot(corners[(i + 1) % 4]);
    }
    sum * 0.5
}
