//! Fibonacci-lattice sphere layout.
//!
//! Item i of N sits at latitude `y = 1 − 2i/(N−1)` and azimuth `i·φ`, where
//! φ = π(3 − √5) is the golden angle. Consecutive indices land ~137.5° apart
//! in azimuth, which keeps the lattice free of clusters and seams.
//!
//! Every item faces outward: its local +Z axis points away from the center
//! through its own position.

use glam::{Mat3, Mat4, Quat, Vec3};

/// Golden angle in radians.
pub const GOLDEN_ANGLE: f32 = 2.399_963_2; // π·(3 − √5)

/// Placement of one item on the sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    /// Local → container transform.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// Outward-facing unit normal.
    pub fn normal(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

/// Poses for `count` items on a sphere of `radius`.
///
/// `count == 1` places the single item at the north pole instead of dividing
/// by `count − 1`.
pub fn fibonacci_sphere(count: usize, radius: f32) -> Vec<Pose> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![pose_at(Vec3::new(0.0, radius, 0.0))];
    }

    let inv_span = 1.0 / (count - 1) as f32;
    (0..count)
        .map(|i| {
            let y = 1.0 - 2.0 * i as f32 * inv_span;
            let r = (1.0 - y * y).max(0.0).sqrt();
            let theta = i as f32 * GOLDEN_ANGLE;
            pose_at(Vec3::new(theta.cos() * r, y, theta.sin() * r) * radius)
        })
        .collect()
}

/// Pose at `position`, oriented to look at `2 · position` (away from the
/// center). Up is +Y; at the poles, where that is parallel to the facing
/// direction, +X is used as the side axis.
fn pose_at(position: Vec3) -> Pose {
    let forward = position.try_normalize().unwrap_or(Vec3::Z);
    let side = Vec3::Y.cross(forward);
    let x_axis = if side.length_squared() < 1e-8 {
        Vec3::X
    } else {
        side.normalize()
    };
    let y_axis = forward.cross(x_axis);
    let rotation = Quat::from_mat3(&Mat3::from_cols(x_axis, y_axis, forward)).normalize();
    Pose { position, rotation }
}

// ── Cached layout ──

/// Layout cache: poses are recomputed only when the item count or radius
/// changes, never per frame.
#[derive(Debug, Clone, Default)]
pub struct SphereLayout {
    count: usize,
    radius: f32,
    poses: Vec<Pose>,
}

impl SphereLayout {
    pub fn new(count: usize, radius: f32) -> Self {
        Self {
            count,
            radius,
            poses: fibonacci_sphere(count, radius),
        }
    }

    /// Bring the cache up to date. Returns true if the poses were recomputed.
    pub fn ensure(&mut self, count: usize, radius: f32) -> bool {
        if count == self.count && radius == self.radius && self.poses.len() == count {
            return false;
        }
        log::debug!("sphere layout: {} items, radius {}", count, radius);
        *self = Self::new(count, radius);
        true
    }

    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nearest_neighbor_distances(poses: &[Pose]) -> Vec<f32> {
        poses
            .iter()
            .enumerate()
            .map(|(i, a)| {
                poses
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, b)| a.position.distance(b.position))
                    .fold(f32::MAX, f32::min)
            })
            .collect()
    }

    /// Spacing of a hexagonal packing with N points on the sphere.
    fn lattice_spacing(count: usize, radius: f32) -> f32 {
        radius * (8.0 * std::f32::consts::PI / (3f32.sqrt() * count as f32)).sqrt()
    }

    #[test]
    fn golden_angle_constant() {
        let phi = std::f32::consts::PI * (3.0 - 5f32.sqrt());
        assert!((GOLDEN_ANGLE - phi).abs() < 1e-5);
    }

    #[test]
    fn all_points_lie_on_sphere() {
        for &(n, r) in &[(2usize, 1.0f32), (7, 3.0), (140, 13.5), (500, 0.5)] {
            let poses = fibonacci_sphere(n, r);
            assert_eq!(poses.len(), n);
            for p in &poses {
                assert!(
                    (p.position.length() - r).abs() < r * 1e-4,
                    "n={} r={} |p|={}",
                    n,
                    r,
                    p.position.length()
                );
            }
        }
    }

    #[test]
    fn sweep_runs_pole_to_pole() {
        let poses = fibonacci_sphere(10, 2.0);
        assert!((poses[0].position.y - 2.0).abs() < 1e-5);
        assert!((poses[9].position.y + 2.0).abs() < 1e-5);
    }

    #[test]
    fn single_item_sits_at_pole() {
        let poses = fibonacci_sphere(1, 5.0);
        assert_eq!(poses.len(), 1);
        let p = poses[0].position;
        assert!(p.is_finite());
        assert!((p - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn empty_set_yields_no_poses() {
        assert!(fibonacci_sphere(0, 5.0).is_empty());
    }

    #[test]
    fn spacing_is_uniform() {
        for &n in &[10usize, 50, 140, 500] {
            let radius = 13.5;
            let poses = fibonacci_sphere(n, radius);
            let nn = nearest_neighbor_distances(&poses);
            let spacing = lattice_spacing(n, radius);

            let min = nn.iter().copied().fold(f32::MAX, f32::min);
            assert!(min > 0.45 * spacing, "n={} min nn {} vs spacing {}", n, min, spacing);

            let mean = nn.iter().sum::<f32>() / n as f32;
            let var = nn.iter().map(|d| (d - mean) * (d - mean)).sum::<f32>() / n as f32;
            let cv = var.sqrt() / mean;
            assert!(cv < 0.25, "n={} nearest-neighbor cv {}", n, cv);
        }
    }

    #[test]
    fn adjacent_indices_are_not_coincident() {
        let n = 140;
        let poses = fibonacci_sphere(n, 13.5);
        let spacing = lattice_spacing(n, 13.5);
        for pair in poses.windows(2) {
            assert!(pair[0].position.distance(pair[1].position) > 0.45 * spacing);
        }
    }

    #[test]
    fn items_face_outward() {
        for p in fibonacci_sphere(60, 4.0) {
            let outward = p.position.normalize();
            assert!(p.normal().dot(outward) > 0.999, "normal {:?}", p.normal());
            // rotation is orthonormal: local X stays perpendicular to the normal
            assert!((p.rotation * Vec3::X).dot(p.normal()).abs() < 1e-4);
        }
    }

    #[test]
    fn cache_recomputes_only_on_change() {
        let mut layout = SphereLayout::new(20, 3.0);
        assert!(!layout.ensure(20, 3.0));
        assert!(layout.ensure(21, 3.0));
        assert_eq!(layout.len(), 21);
        assert!(layout.ensure(21, 4.0));
        assert!(!layout.ensure(21, 4.0));
        assert!((layout.radius() - 4.0).abs() < 1e-6);
    }
}
