//! Animation components for decorative shapes.

use bevy::prelude::*;

use crate::utils::easing::{keyframes, lerp, Ease};

/// What happens when a [`Motion`] reaches the end of its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    /// Hold the final pose.
    #[default]
    Once,
    /// Despawn the entity.
    Despawn,
    /// Restart from the beginning.
    Loop,
    /// Play forward, then backward.
    PingPong,
}

/// Keyframed translation, scale, rotation and opacity for one entity.
#[derive(Component, Debug, Clone)]
pub struct Motion {
    pub from: Vec2,
    pub to: Vec2,
    pub scale_from: f32,
    pub scale_to: f32,
    /// Total rotation in degrees over one cycle.
    pub spin: f32,
    /// Evenly spaced opacity keyframes across one cycle.
    pub opacity: Vec<f32>,
    pub delay: f32,
    pub duration: f32,
    pub ease: Ease,
    pub repeat: Repeat,
    pub elapsed: f32,
}

/// Pose sampled from a [`Motion`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub translation: Vec2,
    pub scale: f32,
    /// Rotation in radians.
    pub rotation: f32,
    pub alpha: f32,
}

impl Motion {
    /// Moves from `from` to `to` over `duration` seconds, fully opaque.
    pub fn between(from: Vec2, to: Vec2, duration: f32) -> Self {
        Self {
            from,
            to,
            scale_from: 1.0,
            scale_to: 1.0,
            spin: 0.0,
            opacity: vec![1.0],
            delay: 0.0,
            duration,
            ease: Ease::Linear,
            repeat: Repeat::Once,
            elapsed: 0.0,
        }
    }

    pub fn with_scale(mut self, from: f32, to: f32) -> Self {
        self.scale_from = from;
        self.scale_to = to;
        self
    }

    pub fn with_spin(mut self, degrees: f32) -> Self {
        self.spin = degrees;
        self
    }

    pub fn with_opacity(mut self, frames: &[f32]) -> Self {
        self.opacity = frames.to_vec();
        self
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Raw cycle progress in `[0, 1]`, honoring delay and repeat mode.
    pub fn progress(&self) -> f32 {
        let active = self.elapsed - self.delay;
        if active <= 0.0 {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }
        let cycles = active / self.duration;
        match self.repeat {
            Repeat::Once | Repeat::Despawn => cycles.min(1.0),
            Repeat::Loop => cycles.fract(),
            Repeat::PingPong => {
                let phase = cycles % 2.0;
                if phase <= 1.0 {
                    phase
                } else {
                    2.0 - phase
                }
            }
        }
    }

    /// True once a one-shot motion has played through.
    pub fn is_finished(&self) -> bool {
        matches!(self.repeat, Repeat::Once | Repeat::Despawn)
            && self.elapsed - self.delay >= self.duration
    }

    pub fn sample(&self) -> MotionSample {
        let raw = self.progress();
        let t = self.ease.apply(raw);
        MotionSample {
            translation: self.from.lerp(self.to, t),
            scale: lerp(self.scale_from, self.scale_to, t),
            rotation: (self.spin * t).to_radians(),
            alpha: keyframes(&self.opacity, raw),
        }
    }
}

/// Gentle noise-driven floating around a resting position.
#[derive(Component, Debug, Clone)]
pub struct FloatBob {
    pub base: Vec2,
    /// Maximum displacement in pixels.
    pub amplitude: f32,
    /// Noise samples per second.
    pub speed: f32,
    /// Offset into the noise field so neighbours move independently.
    pub phase: f64,
}

/// Scroll-linked drift for background floaters.
#[derive(Component, Debug, Clone)]
pub struct Parallax {
    pub base: Vec2,
    /// Pixels moved (and half the degrees rotated) per unit of scroll progress.
    pub speed: f32,
}

impl Parallax {
    /// Offset and rotation (radians) at scroll `progress`.
    pub fn at(&self, progress: f32) -> (Vec2, f32) {
        let translation = self.base - Vec2::new(0.0, progress * self.speed);
        let rotation = (progress * self.speed * 2.0).to_radians();
        (translation, rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_holds_start_pose() {
        let mut m = Motion::between(Vec2::ZERO, Vec2::new(100.0, 0.0), 1.0).with_delay(0.5);
        m.tick(0.4);
        assert_eq!(m.sample().translation, Vec2::ZERO);
        m.tick(0.6);
        assert!((m.sample().translation.x - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_once_holds_end_pose() {
        let mut m = Motion::between(Vec2::ZERO, Vec2::new(0.0, -600.0), 0.8)
            .with_spin(12.0)
            .with_scale(1.0, 0.95);
        m.tick(5.0);
        let s = m.sample();
        assert_eq!(s.translation, Vec2::new(0.0, -600.0));
        assert!((s.rotation - 12f32.to_radians()).abs() < 1e-5);
        assert!((s.scale - 0.95).abs() < 1e-6);
        assert!(m.is_finished());
    }

    #[test]
    fn test_loop_wraps() {
        let mut m = Motion::between(Vec2::ZERO, Vec2::X * 10.0, 2.0).with_repeat(Repeat::Loop);
        m.tick(2.5);
        assert!((m.progress() - 0.25).abs() < 1e-5);
        assert!(!m.is_finished());
    }

    #[test]
    fn test_ping_pong_reverses() {
        let mut m = Motion::between(Vec2::ZERO, Vec2::X, 1.0).with_repeat(Repeat::PingPong);
        m.tick(1.5);
        assert!((m.progress() - 0.5).abs() < 1e-5);
        m.tick(0.25);
        assert!((m.progress() - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_opacity_keyframes() {
        let mut m = Motion::between(Vec2::ZERO, Vec2::ZERO, 3.0).with_opacity(&[0.0, 1.0, 1.0, 0.0]);
        m.tick(1.5);
        assert!((m.sample().alpha - 1.0).abs() < 1e-5);
        m.tick(1.5);
        assert!(m.sample().alpha.abs() < 1e-5);
    }

    #[test]
    fn test_parallax_moves_with_progress() {
        let p = Parallax { base: Vec2::new(10.0, 20.0), speed: 40.0 };
        let (t0, r0) = p.at(0.0);
        assert_eq!(t0, Vec2::new(10.0, 20.0));
        assert_eq!(r0, 0.0);
        let (t1, r1) = p.at(1.0);
        assert_eq!(t1, Vec2::new(10.0, -20.0));
        assert!((r1 - 80f32.to_radians()).abs() < 1e-5);
    }
}
