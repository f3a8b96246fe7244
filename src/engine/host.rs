//! Host recede effect.
//!
//! While the lightbox is engaged the globe layer behind it shrinks a little,
//! fades and loses its color; it comes back the same way once the lightbox
//! is fully closed. Purely cosmetic: nothing here blocks input.

use crate::anim::{Animatable, Ease, Timeline, TimelineSlot};

pub const RECEDE_DURATION: f32 = 0.7;
pub const RECEDED_SCALE: f32 = 0.95;
pub const RECEDED_OPACITY: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecedeProp {
    Scale,
    Opacity,
    Saturation,
}

/// How the host layer should be drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostLook {
    /// Uniform scale about the layer center
    pub scale: f32,
    pub opacity: f32,
    /// 1 = full color, 0 = grayscale
    pub saturation: f32,
}

impl Default for HostLook {
    fn default() -> Self {
        Self {
            scale: 1.0,
            opacity: 1.0,
            saturation: 1.0,
        }
    }
}

impl HostLook {
    fn receded() -> Self {
        Self {
            scale: RECEDED_SCALE,
            opacity: RECEDED_OPACITY,
            saturation: 0.0,
        }
    }
}

impl Animatable<RecedeProp> for HostLook {
    fn get(&self, prop: RecedeProp) -> f32 {
        match prop {
            RecedeProp::Scale => self.scale,
            RecedeProp::Opacity => self.opacity,
            RecedeProp::Saturation => self.saturation,
        }
    }

    fn set(&mut self, prop: RecedeProp, value: f32) {
        match prop {
            RecedeProp::Scale => self.scale = value,
            RecedeProp::Opacity => self.opacity = value,
            RecedeProp::Saturation => self.saturation = value,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HostRecede {
    look: HostLook,
    receded: bool,
    timeline: TimelineSlot<RecedeProp>,
}

impl HostRecede {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn look(&self) -> HostLook {
        self.look
    }

    pub fn is_receded(&self) -> bool {
        self.receded
    }

    /// Follow the lightbox: recede while `engaged`, return otherwise.
    /// Only a change of `engaged` starts a new tween.
    pub fn follow(&mut self, engaged: bool) {
        if engaged == self.receded {
            return;
        }
        self.receded = engaged;
        let goal = if engaged {
            HostLook::receded()
        } else {
            HostLook::default()
        };
        let ease = Ease::PowerOut(2);
        self.timeline.start(
            Timeline::new()
                .to_at(0.0, RecedeProp::Scale, goal.scale, RECEDE_DURATION, ease)
                .to_at(0.0, RecedeProp::Opacity, goal.opacity, RECEDE_DURATION, ease)
                .to_at(0.0, RecedeProp::Saturation, goal.saturation, RECEDE_DURATION, ease),
        );
    }

    pub fn tick(&mut self, dt: f32) {
        self.timeline.advance(dt, &mut self.look);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(host: &mut HostRecede, seconds: f32) {
        for _ in 0..(seconds * 60.0).round() as usize {
            host.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn recedes_and_returns() {
        let mut host = HostRecede::new();
        host.follow(true);
        run(&mut host, 0.35);
        let mid = host.look();
        assert!(mid.scale < 1.0 && mid.scale > RECEDED_SCALE);

        run(&mut host, 0.5);
        assert_eq!(host.look(), HostLook::receded());

        host.follow(false);
        run(&mut host, 0.8);
        assert_eq!(host.look(), HostLook::default());
    }

    #[test]
    fn repeated_follow_does_not_restart() {
        let mut host = HostRecede::new();
        host.follow(true);
        run(&mut host, 0.35);
        let mid = host.look();
        host.follow(true);
        host.tick(0.0);
        assert_eq!(host.look(), mid);
    }

    #[test]
    fn reversal_mid_recede_starts_from_current_look() {
        let mut host = HostRecede::new();
        host.follow(true);
        run(&mut host, 0.2);
        let mid = host.look();
        host.follow(false);
        host.tick(0.0);
        assert_eq!(host.look(), mid);
        assert!(!host.is_receded());
    }
}
