//! Easing curves.
//!
//! Named after the tweening vocabulary the motion was designed in:
//! `PowerOut(2)` is "power2.out", i.e. a cubic ease-out. Every curve maps
//! 0 → 0 and 1 → 1; `BackOut` overshoots in between.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Ease {
    #[default]
    Linear,
    /// Accelerating, exponent `n + 1`
    PowerIn(u8),
    /// Decelerating, exponent `n + 1`
    PowerOut(u8),
    /// Accelerate then decelerate, exponent `n + 1`
    PowerInOut(u8),
    ExpoIn,
    ExpoOut,
    /// Slow start, fast middle, slow landing
    ExpoInOut,
    /// Decelerating with an overshoot of the given strength
    BackOut(f32),
}

impl Ease {
    /// Map linear progress `t` (clamped to `[0, 1]`) through the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Ease::Linear => t,
            Ease::PowerIn(n) => t.powi(n as i32 + 1),
            Ease::PowerOut(n) => 1.0 - (1.0 - t).powi(n as i32 + 1),
            Ease::PowerInOut(n) => {
                let e = n as i32 + 1;
                if t < 0.5 {
                    0.5 * (2.0 * t).powi(e)
                } else {
                    1.0 - 0.5 * (2.0 * (1.0 - t)).powi(e)
                }
            }
            Ease::ExpoIn => 2f32.powf(10.0 * (t - 1.0)),
            Ease::ExpoOut => 1.0 - 2f32.powf(-10.0 * t),
            Ease::ExpoInOut => {
                if t < 0.5 {
                    0.5 * 2f32.powf(20.0 * t - 10.0)
                } else {
                    1.0 - 0.5 * 2f32.powf(-20.0 * t + 10.0)
                }
            }
            Ease::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u * u * u + s * u * u
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 8] = [
        Ease::Linear,
        Ease::PowerIn(2),
        Ease::PowerOut(3),
        Ease::PowerInOut(3),
        Ease::ExpoIn,
        Ease::ExpoOut,
        Ease::ExpoInOut,
        Ease::BackOut(1.7),
    ];

    #[test]
    fn endpoints_are_exact() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0, "{:?} at 0", ease);
            assert_eq!(ease.apply(1.0), 1.0, "{:?} at 1", ease);
            assert_eq!(ease.apply(-3.0), 0.0, "{:?} below range", ease);
            assert_eq!(ease.apply(7.0), 1.0, "{:?} above range", ease);
        }
    }

    #[test]
    fn out_curves_lead_linear() {
        for ease in [Ease::PowerOut(2), Ease::PowerOut(3), Ease::ExpoOut] {
            assert!(ease.apply(0.25) > 0.25, "{:?}", ease);
        }
        assert!(Ease::PowerIn(2).apply(0.25) < 0.25);
    }

    #[test]
    fn in_out_is_symmetric() {
        for ease in [Ease::PowerInOut(3), Ease::ExpoInOut] {
            assert!((ease.apply(0.5) - 0.5).abs() < 1e-4, "{:?}", ease);
            let a = ease.apply(0.2);
            let b = ease.apply(0.8);
            assert!((a + b - 1.0).abs() < 1e-4, "{:?}", ease);
        }
    }

    #[test]
    fn back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Ease::BackOut(1.7).apply(i as f32 / 100.0))
            .fold(0.0f32, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn power2_out_is_cubic() {
        let t = 0.3f32;
        let expected = 1.0 - (1.0 - t).powi(3);
        assert!((Ease::PowerOut(2).apply(t) - expected).abs() < 1e-6);
    }
}
