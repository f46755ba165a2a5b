//! Easing curves for snap animations
//!
//! Every curve maps progress in [0, 1] to eased progress in [0, 1], is
//! monotonic, and lands exactly on 1 so the last frame hits the snap target.

pub use crate::config::EasingType;

/// Exponent of the default glide curve
const GLIDE_POWER: f64 = 3.5;

pub trait EasingTypeExt {
    /// Eased progress for `t`; input outside [0, 1] is clamped
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::Glide => ease_out(t, GLIDE_POWER),
            EasingType::Cubic => ease_out(t, 3.0),
            EasingType::Quintic => ease_out(t, 5.0),
            EasingType::EaseOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f64.powf(-10.0 * t)
                }
            }
        }
    }
}

/// `1 - (1 - t)^power`
#[inline]
fn ease_out(t: f64, power: f64) -> f64 {
    1.0 - (1.0 - t).powf(power)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 6] = [
        EasingType::None,
        EasingType::Linear,
        EasingType::Glide,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            if easing != EasingType::None {
                assert!(easing.apply(0.0).abs() < 0.001, "{:?} at t=0", easing);
            }
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = easing.apply(i as f64 / 100.0);
                assert!(v >= prev, "{:?} not monotonic at step {}", easing, i);
                prev = v;
            }
        }
    }

    #[test]
    fn test_glide_sits_between_cubic_and_quintic() {
        let glide = EasingType::Glide.apply(0.5);
        assert!((glide - (1.0 - 0.5_f64.powf(3.5))).abs() < 1e-12);
        assert!(glide > EasingType::Cubic.apply(0.5));
        assert!(glide < EasingType::Quintic.apply(0.5));
        assert_eq!(EasingType::default(), EasingType::Glide);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(EasingType::Glide.apply(-1.0), 0.0);
        assert_eq!(EasingType::Glide.apply(2.0), 1.0);
    }
}
