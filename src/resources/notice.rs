use bevy::prelude::*;

/// A short message shown over the scene for a few seconds.
#[derive(Debug, Clone, PartialEq)]
struct ActiveNotice {
    text: String,
    remaining: f32,
}

/// Holds at most one transient notice; showing a new one replaces the old.
#[derive(Resource, Debug, Default)]
pub struct Notice {
    current: Option<ActiveNotice>,
}

impl Notice {
    pub fn show(&mut self, text: impl Into<String>, seconds: f32) {
        let text = text.into();
        info!("Notice: {}", text);
        self.current = Some(ActiveNotice {
            text,
            remaining: seconds.max(0.0),
        });
    }

    /// Counts down and clears the notice once its time is up.
    pub fn tick(&mut self, delta_seconds: f32) {
        let Some(active) = self.current.as_mut() else {
            return;
        };
        active.remaining -= delta_seconds;
        if active.remaining <= 0.0 {
            self.current = None;
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|n| n.text.as_str())
    }

    pub fn remaining(&self) -> f32 {
        self.current.as_ref().map_or(0.0, |n| n.remaining)
    }
}
