//! Easing curves for the choreographed animations.
//!
//! Most motion in the greeting uses a long "expo-out" style cubic bezier
//! (`0.16, 1, 0.3, 1`) which settles slowly; drops use an accelerating curve.

/// Named easing curve applied to a normalized time `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Ease {
    Linear,
    OutCubic,
    #[default]
    InOutSine,
    /// Cubic bezier with control points `(x1, y1)` and `(x2, y2)`.
    Bezier(f32, f32, f32, f32),
}

impl Ease {
    /// Slow-settling curve used by the cloud journey and reveals.
    pub const DREAMY: Ease = Ease::Bezier(0.16, 1.0, 0.3, 1.0);
    /// Accelerating curve used when books fall off the shelf.
    pub const FALL: Ease = Ease::Bezier(0.6, 0.01, 0.9, 0.9);
    /// Gentle curve for prompts.
    pub const SOFT: Ease = Ease::Bezier(0.25, 0.46, 0.45, 0.94);

    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::OutCubic => 1.0 - (1.0 - t).powi(3),
            Ease::InOutSine => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
            Ease::Bezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn bezier_axis(a1: f32, a2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
}

fn bezier_axis_slope(a1: f32, a2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
}

/// Evaluates a CSS-style cubic bezier timing function at `x`.
///
/// Solves the curve parameter for `x` with a few Newton steps, falling back
/// to bisection where the slope is too flat.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let mut s = x;
    for _ in 0..8 {
        let err = bezier_axis(x1, x2, s) - x;
        if err.abs() < 1e-5 {
            return bezier_axis(y1, y2, s);
        }
        let slope = bezier_axis_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s = (s - err / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let v = bezier_axis(x1, x2, s);
        if (v - x).abs() < 1e-5 {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier_axis(y1, y2, s)
}

/// Linear interpolation helper shared by the animation systems.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Samples evenly spaced keyframes (like `[0, 1, 1, 0]`) at progress `t`.
pub fn keyframes(frames: &[f32], t: f32) -> f32 {
    match frames.len() {
        0 => 0.0,
        1 => frames[0],
        n => {
            let t = t.clamp(0.0, 1.0) * (n - 1) as f32;
            let i = (t.floor() as usize).min(n - 2);
            lerp(frames[i], frames[i + 1], t - i as f32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 6] = [
        Ease::Linear,
        Ease::OutCubic,
        Ease::InOutSine,
        Ease::DREAMY,
        Ease::FALL,
        Ease::SOFT,
    ];

    #[test]
    fn endpoints_are_stable() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-4, "{:?}", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-4, "{:?}", ease);
        }
    }

    #[test]
    fn monotonic_spot_check() {
        for ease in ALL {
            let a = ease.apply(0.25);
            let b = ease.apply(0.5);
            let c = ease.apply(0.75);
            assert!(a < b, "{:?}", ease);
            assert!(b < c, "{:?}", ease);
        }
    }

    #[test]
    fn dreamy_settles_early() {
        // Most of the motion happens in the first half.
        assert!(Ease::DREAMY.apply(0.5) > 0.85);
    }

    #[test]
    fn keyframes_interpolate() {
        let frames = [0.0, 1.0, 1.0, 0.0];
        assert_eq!(keyframes(&frames, 0.0), 0.0);
        assert!((keyframes(&frames, 1.0 / 6.0) - 0.5).abs() < 1e-5);
        assert_eq!(keyframes(&frames, 0.5), 1.0);
        assert_eq!(keyframes(&frames, 1.0), 0.0);
    }
}
