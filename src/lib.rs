//! Orbit gallery: media cards on a rotating globe with a lightbox that grows
//! out of the clicked card.
//!
//! The library has no windowing dependency. Hosts drive it once per frame:
//! feed pointer input into [`render::scene::GlobeScene`], tick the
//! [`render::camera::CameraRig`] and the controllers, then paint what they
//! report.

pub mod anim;
pub mod config;
pub mod engine;
pub mod error;
pub mod item;
pub mod net;
pub mod render;
