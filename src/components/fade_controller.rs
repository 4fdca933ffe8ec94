//! FadeController component for reveal-style transitions.
//!
//! Elements fade in while rising from slightly below their resting place, the
//! way letter paragraphs and panels appear. Apply systems read
//! `current_alpha` and `offset()` each frame.

use bevy::prelude::*;

/// Controls alpha and rise animation for an entity.
#[derive(Component, Debug, Clone)]
pub struct FadeController {
    /// Desired alpha value (0.0 = invisible, 1.0 = fully visible).
    pub target_alpha: f32,
    /// Interpolated alpha value, updated each frame by `animate_fades`.
    pub current_alpha: f32,
    /// Alpha change rate in units per second.
    pub fade_speed: f32,
    /// Pixels the element sits below its resting place while hidden.
    pub rise: f32,
    /// Seconds left before the fade starts moving.
    pub delay: f32,
}

impl Default for FadeController {
    fn default() -> Self {
        Self::visible()
    }
}

impl FadeController {
    pub fn visible() -> Self {
        Self {
            target_alpha: 1.0,
            current_alpha: 1.0,
            fade_speed: 2.0,
            rise: 0.0,
            delay: 0.0,
        }
    }

    pub fn hidden() -> Self {
        Self {
            target_alpha: 0.0,
            current_alpha: 0.0,
            fade_speed: 2.0,
            rise: 0.0,
            delay: 0.0,
        }
    }

    /// Hidden element that rises by `rise` pixels as it fades in.
    pub fn hidden_below(rise: f32) -> Self {
        Self {
            rise,
            ..Self::hidden()
        }
    }

    /// Fades in over `duration` seconds.
    pub fn fade_in(&mut self, duration: f32) {
        self.target_alpha = 1.0;
        self.fade_speed = speed_for(duration);
    }

    /// Fades in over `duration` seconds after waiting `delay` seconds.
    pub fn fade_in_after(&mut self, delay: f32, duration: f32) {
        self.delay = delay.max(0.0);
        self.fade_in(duration);
    }

    pub fn fade_out(&mut self, duration: f32) {
        self.target_alpha = 0.0;
        self.fade_speed = speed_for(duration);
    }

    /// Advances the fade by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        if !self.is_fading() {
            return;
        }
        if self.delay > 0.0 {
            self.delay -= dt;
            if self.delay > 0.0 {
                return;
            }
        }

        let delta = self.fade_speed * dt;
        self.current_alpha = if self.target_alpha > self.current_alpha {
            (self.current_alpha + delta).min(self.target_alpha)
        } else {
            (self.current_alpha - delta).max(self.target_alpha)
        };
    }

    /// Vertical offset below the resting position for the current alpha.
    pub fn offset(&self) -> f32 {
        self.rise * (1.0 - self.current_alpha)
    }

    pub fn is_fading(&self) -> bool {
        (self.target_alpha - self.current_alpha).abs() > 0.001
    }

    pub fn is_visible(&self) -> bool {
        self.current_alpha > 0.999
    }

    pub fn is_hidden(&self) -> bool {
        self.current_alpha < 0.001
    }
}

fn speed_for(duration: f32) -> f32 {
    if duration > 0.0 {
        1.0 / duration
    } else {
        100.0
    }
}
