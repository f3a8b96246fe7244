//! Fixed perspective camera and the per-frame camera rig.
//!
//! The rig has three jobs each frame:
//! - ease the camera toward a small pointer-driven offset (parallax),
//! - re-aim at the globe center,
//! - spin the globe container a little (idle rotation) plus whatever drag
//!   velocity the user left on it.
//!
//! All per-frame constants are defined against a 60 Hz frame and scaled by
//! `dt`, so the motion rate does not depend on the host's frame rate.

use glam::{Mat4, Vec2, Vec3};

use crate::anim::smoothing_factor;
use crate::config::CameraConfig;
use crate::render::projector::{CameraView, Viewport};

/// Perspective camera aimed at a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub viewport: Viewport,
}

impl PerspectiveCamera {
    pub fn from_config(cfg: &CameraConfig, viewport: Viewport) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, cfg.distance),
            target: Vec3::ZERO,
            fov_y: cfg.fov_deg.to_radians(),
            near: cfg.near,
            far: cfg.far,
            viewport,
        }
    }
}

impl CameraView for PerspectiveCamera {
    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.viewport.aspect(), self.near, self.far)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

// ── Globe container orientation ──

/// Orientation of the globe container that all item poses hang from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    /// Rotation about +Y (radians), unbounded
    pub yaw: f32,
    /// Rotation about +X (radians), clamped by the rig
    pub pitch: f32,
}

impl Orientation {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.pitch) * Mat4::from_rotation_y(self.yaw)
    }
}

// ── CameraRig ──

#[derive(Debug, Clone)]
pub struct CameraRig {
    cfg: CameraConfig,
    camera: PerspectiveCamera,
    container: Orientation,
    /// Drag-imparted angular velocity (radians per second): x = yaw, y = pitch
    spin: Vec2,
    dragging: bool,
}

impl CameraRig {
    pub fn new(cfg: CameraConfig, viewport: Viewport) -> Self {
        let camera = PerspectiveCamera::from_config(&cfg, viewport);
        Self {
            cfg,
            camera,
            container: Orientation::default(),
            spin: Vec2::ZERO,
            dragging: false,
        }
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn container(&self) -> Orientation {
        self.container
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.camera.viewport = viewport;
    }

    /// Advance one frame.
    ///
    /// `pointer_ndc` is the pointer in device coordinates (±1, Y up), or
    /// `None` when the pointer is outside the surface; the camera then drifts
    /// back toward rest.
    pub fn tick(&mut self, dt: f32, pointer_ndc: Option<Vec2>) {
        let dt = dt.clamp(0.0, 0.1);
        let frames = dt * 60.0;

        // Parallax
        let goal = pointer_ndc.unwrap_or(Vec2::ZERO) * self.cfg.parallax;
        let k = smoothing_factor(self.cfg.parallax_smoothing, dt);
        self.camera.position.x += (goal.x - self.camera.position.x) * k;
        self.camera.position.y += (goal.y - self.camera.position.y) * k;
        self.camera.target = Vec3::ZERO;

        // Idle rotation + drag inertia
        self.container.yaw += self.cfg.idle_rotation * frames;
        if !self.dragging {
            self.container.yaw += self.spin.x * dt;
            self.container.pitch += self.spin.y * dt;
            let keep = 1.0 - smoothing_factor(self.cfg.drag_damping, dt);
            self.spin *= keep;
            if self.spin.length_squared() < 1e-8 {
                self.spin = Vec2::ZERO;
            }
        }
        self.clamp_pitch();
    }

    /// Apply a pointer drag of `delta` points over `dt` seconds.
    pub fn drag(&mut self, delta: Vec2, dt: f32) {
        self.dragging = true;
        let yaw = delta.x * self.cfg.drag_sensitivity;
        let pitch = delta.y * self.cfg.drag_sensitivity;
        self.container.yaw += yaw;
        self.container.pitch += pitch;
        self.clamp_pitch();
        if dt > 0.0 {
            self.spin = Vec2::new(yaw, pitch) / dt;
        }
    }

    /// End a drag; the remaining velocity decays under damping.
    pub fn release(&mut self) {
        self.dragging = false;
    }

    fn clamp_pitch(&mut self) {
        let max = self.cfg.max_pitch_deg.to_radians();
        self.container.pitch = self.container.pitch.clamp(-max, max);
    }
}
