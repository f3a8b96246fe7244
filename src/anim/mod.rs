//! Frame-driven animation: easing curves and owned, cancellable timelines.
//!
//! There are no timers or threads here. Hosts call `tick(dt)` on whatever
//! owns a timeline, once per rendered frame.

pub mod ease;
pub mod timeline;

pub use ease::Ease;
pub use timeline::{Advance, Animatable, Timeline, TimelineId, TimelineSlot, TimelineState};

/// Frame-rate independent form of a "close `fraction` of the gap per 60 Hz
/// frame" smoothing factor.
pub fn smoothing_factor(fraction_per_frame: f32, dt: f32) -> f32 {
    let keep = (1.0 - fraction_per_frame.clamp(0.0, 1.0)).max(0.0);
    1.0 - keep.powf(dt.max(0.0) * 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothing_matches_one_frame_at_60hz() {
        let f = smoothing_factor(0.05, 1.0 / 60.0);
        assert!((f - 0.05).abs() < 1e-5);
    }

    #[test]
    fn smoothing_compounds_over_two_frames() {
        let two = smoothing_factor(0.05, 2.0 / 60.0);
        let expected = 1.0 - 0.95f32 * 0.95;
        assert!((two - expected).abs() < 1e-5);
        assert_eq!(smoothing_factor(0.05, 0.0), 0.0);
    }
}
