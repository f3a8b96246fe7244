//! Globe geometry: layout, camera, projection and the placed scene.
//!
//! - `sphere`   : Fibonacci-lattice poses, cached per item count and radius
//! - `camera`   : perspective camera and the per-frame rig
//! - `projector`: world → overlay pixel mapping
//! - `scene`    : placed items, picking, hover/click routing

pub mod camera;
pub mod projector;
pub mod scene;
pub mod sphere;

pub use camera::{CameraRig, Orientation, PerspectiveCamera};
pub use projector::{CameraView, PixelRect, ScreenProjector, Viewport};
pub use scene::{CardDraw, GlobeScene};
pub use sphere::{fibonacci_sphere, Pose, SphereLayout};
