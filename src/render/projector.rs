//! World → viewport projection.
//!
//! Bridges the 3D globe and the 2D overlay: a card's footprint under its
//! world transform becomes an axis-aligned [`PixelRect`] in overlay
//! coordinates (origin top-left, Y down).
//!
//! The footprint size comes from projecting the center and one corner and
//! doubling the offset. This assumes zero camera roll and symmetric
//! foreshortening about the center. It is an approximation, not an exact
//! oriented-box projection; the overlay rect is axis-aligned anyway.

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Overlay surface size in pixels (logical points on HiDPI hosts).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Axis-aligned rectangle in overlay pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left
            && p.x <= self.left + self.width
            && p.y >= self.top
            && p.y <= self.top + self.height
    }
}

/// Camera/viewport collaborator: whatever owns the active camera supplies
/// its matrices and the current overlay size on demand.
pub trait CameraView {
    fn view_matrix(&self) -> Mat4;
    fn projection_matrix(&self) -> Mat4;
    fn viewport(&self) -> Viewport;

    fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// A projected point: overlay pixel position plus view-space depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub pos: Vec2,
    /// Distance in front of the camera (clip-space w)
    pub depth: f32,
}

/// Projection snapshot for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ScreenProjector {
    view_proj: Mat4,
    viewport: Viewport,
}

impl ScreenProjector {
    pub fn new(camera: &impl CameraView) -> Self {
        Self {
            view_proj: camera.view_projection(),
            viewport: camera.viewport(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Device coordinates ([−1, 1], Y up) → overlay pixels (Y down).
    pub fn ndc_to_pixel(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x * 0.5 + 0.5) * self.viewport.width,
            (-ndc.y * 0.5 + 0.5) * self.viewport.height,
        )
    }

    /// Overlay pixels → device coordinates.
    pub fn pixel_to_ndc(&self, pixel: Vec2) -> Vec2 {
        Vec2::new(
            pixel.x / self.viewport.width * 2.0 - 1.0,
            1.0 - pixel.y / self.viewport.height * 2.0,
        )
    }

    /// Project a world point. `None` when it is at or behind the camera.
    pub fn project_point(&self, world: Vec3) -> Option<ScreenPoint> {
        let clip = self.view_proj * Vec4::new(world.x, world.y, world.z, 1.0);
        if clip.w <= 1e-5 {
            return None;
        }
        let ndc = Vec2::new(clip.x, clip.y) / clip.w;
        Some(ScreenPoint {
            pos: self.ndc_to_pixel(ndc),
            depth: clip.w,
        })
    }

    /// Pixel rectangle covered by a `2·half_extent` footprint centered on the
    /// local origin of `world`.
    ///
    /// Pass the item's static hitbox transform here, never the hover-animated
    /// visual, or the rect would depend on the hover phase at click time.
    pub fn project_footprint(&self, world: &Mat4, half_extent: Vec2) -> PixelRect {
        let center = world.transform_point3(Vec3::ZERO);
        let corner = world.transform_point3(Vec3::new(half_extent.x, half_extent.y, 0.0));

        let c = self.ndc_to_pixel(self.view_proj.project_point3(center).truncate());
        let k = self.ndc_to_pixel(self.view_proj.project_point3(corner).truncate());

        let width = (k.x - c.x).abs() * 2.0;
        let height = (k.y - c.y).abs() * 2.0;
        PixelRect {
            top: c.y - height * 0.5,
            left: c.x - width * 0.5,
            width,
            height,
        }
    }

    /// Project the four corners of a footprint (counter-clockwise from
    /// bottom-left in local space). `None` if any corner is behind the camera.
    pub fn project_quad(&self, world: &Mat4, half_extent: Vec2) -> Option<[ScreenPoint; 4]> {
        let (hx, hy) = (half_extent.x, half_extent.y);
        let local = [
            Vec3::new(-hx, -hy, 0.0),
            Vec3::new(hx, -hy, 0.0),
            Vec3::new(hx, hy, 0.0),
            Vec3::new(-hx, hy, 0.0),
        ];
        let mut out = [ScreenPoint {
            pos: Vec2::ZERO,
            depth: 0.0,
        }; 4];
        for (slot, p) in out.iter_mut().zip(local) {
            *slot = self.project_point(world.transform_point3(p))?;
        }
        Some(out)
    }
}

/// True if `p` lies inside the convex quad `corners` (either winding).
pub fn quad_contains(corners: &[Vec2; 4], p: Vec2) -> bool {
    let mut sign = 0.0f32;
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        let cross = (b - a).perp_dot(p - a);
        if cross.abs() < 1e-6 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCamera {
        eye: Vec3,
        fov_y: f32,
        viewport: Viewport,
    }

    impl CameraView for FixedCamera {
        fn view_matrix(&self) -> Mat4 {
            Mat4::look_at_rh(self.eye, Vec3::ZERO, Vec3::Y)
        }

        fn projection_matrix(&self) -> Mat4 {
            Mat4::perspective_rh_gl(self.fov_y, self.viewport.aspect(), 0.1, 200.0)
        }

        fn viewport(&self) -> Viewport {
            self.viewport
        }
    }

    fn camera() -> FixedCamera {
        FixedCamera {
            eye: Vec3::new(0.0, 0.0, 44.0),
            fov_y: 38f32.to_radians(),
            viewport: Viewport::new(1600.0, 900.0),
        }
    }

    #[test]
    fn footprint_at_look_target_is_centered() {
        let projector = ScreenProjector::new(&camera());
        let rect = projector.project_footprint(&Mat4::IDENTITY, Vec2::new(1.2, 0.8));
        let c = rect.center();
        assert!((c.x - 800.0).abs() <= 1.0, "center x {}", c.x);
        assert!((c.y - 450.0).abs() <= 1.0, "center y {}", c.y);
    }

    #[test]
    fn frontal_footprint_keeps_aspect_and_scale() {
        let cam = camera();
        let projector = ScreenProjector::new(&cam);
        let rect = projector.project_footprint(&Mat4::IDENTITY, Vec2::new(1.2, 0.8));
        assert!((rect.width / rect.height - 1.5).abs() < 1e-3);

        // pixel height of 1.6 world units at distance 44
        let expected_h = 1.6 / (2.0 * 44.0 * (cam.fov_y * 0.5).tan()) * 900.0;
        assert!((rect.height - expected_h).abs() < 0.5, "{} vs {}", rect.height, expected_h);
    }

    #[test]
    fn translated_footprint_moves_right_and_up() {
        let projector = ScreenProjector::new(&camera());
        let world = Mat4::from_translation(Vec3::new(5.0, 3.0, 0.0));
        let rect = projector.project_footprint(&world, Vec2::new(1.0, 1.0));
        let c = rect.center();
        assert!(c.x > 800.0);
        assert!(c.y < 450.0, "screen Y grows downward");
    }

    #[test]
    fn ndc_pixel_round_trip_corners() {
        let projector = ScreenProjector::new(&camera());
        assert_eq!(projector.ndc_to_pixel(Vec2::new(-1.0, 1.0)), Vec2::ZERO);
        assert_eq!(projector.ndc_to_pixel(Vec2::new(1.0, -1.0)), Vec2::new(1600.0, 900.0));
        let ndc = projector.pixel_to_ndc(Vec2::new(400.0, 225.0));
        assert!((ndc - Vec2::new(-0.5, 0.5)).length() < 1e-6);
    }

    #[test]
    fn point_behind_camera_is_rejected() {
        let projector = ScreenProjector::new(&camera());
        assert!(projector.project_point(Vec3::new(0.0, 0.0, 50.0)).is_none());
        let p = projector.project_point(Vec3::ZERO).unwrap();
        assert!((p.depth - 44.0).abs() < 1e-3);
    }

    #[test]
    fn quad_contains_handles_both_windings() {
        let ccw = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let mut cw = ccw;
        cw.reverse();
        for quad in [ccw, cw] {
            assert!(quad_contains(&quad, Vec2::new(5.0, 5.0)));
            assert!(!quad_contains(&quad, Vec2::new(11.0, 5.0)));
        }
    }

    #[test]
    fn projected_quad_contains_its_center() {
        let projector = ScreenProjector::new(&camera());
        let quad = projector
            .project_quad(&Mat4::IDENTITY, Vec2::new(1.0, 1.0))
            .unwrap();
        let corners = quad.map(|p| p.pos);
        assert!(quad_contains(&corners, Vec2::new(800.0, 450.0)));
    }
}
