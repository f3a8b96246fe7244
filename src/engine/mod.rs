//! Interaction and transition state machines.
//!
//! - `interaction`: per-item hover feedback and click projection
//! - `lightbox`   : open/close transition of the selected item
//! - `host`       : recede effect of the layer behind the lightbox

pub mod host;
pub mod interaction;
pub mod lightbox;

pub use host::{HostLook, HostRecede};
pub use interaction::{Affordance, ItemInteractionController, Selected};
pub use lightbox::{fit_target, LightboxTransitionController, OverlayStyle, Phase, TransitionState};
