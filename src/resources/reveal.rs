//! Scroll position of the love letter page and the paragraphs it reveals.

use bevy::prelude::*;

use crate::resources::config::ConfigError;

/// Offset in pixels after which the reader counts as having scrolled.
pub const SCROLLED_OFFSET: f32 = 50.0;

/// Scroll state of a page taller than the window.
#[derive(Resource, Debug, Clone, Default)]
pub struct ScrollView {
    /// Distance scrolled from the top, in pixels.
    pub offset: f32,
    pub content_height: f32,
    pub viewport_height: f32,
}

impl ScrollView {
    pub fn new(content_height: f32, viewport_height: f32) -> Self {
        Self {
            offset: 0.0,
            content_height,
            viewport_height,
        }
    }

    /// Largest valid offset (zero when the page fits on screen).
    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Scrolls by `delta` pixels (positive scrolls down), clamped to the page.
    pub fn scroll_by(&mut self, delta: f32) {
        self.offset = (self.offset + delta).clamp(0.0, self.max_offset());
    }

    /// Updates the viewport height, keeping the offset in range.
    pub fn resize(&mut self, content_height: f32, viewport_height: f32) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    /// Scroll progress in `[0, 1]`; zero when the page cannot scroll.
    pub fn progress(&self) -> f32 {
        let max = self.max_offset();
        if max <= 0.0 {
            return 0.0;
        }
        (self.offset / max).clamp(0.0, 1.0)
    }
}

/// Ensures thresholds are ascending and inside `[0, 1]`.
pub fn validate_thresholds(thresholds: &[f32]) -> Result<(), ConfigError> {
    if thresholds.iter().any(|t| !(0.0..=1.0).contains(t)) {
        return Err(ConfigError::invalid("reveal thresholds must lie in [0, 1]"));
    }
    if thresholds.windows(2).any(|w| w[0] > w[1]) {
        return Err(ConfigError::invalid("reveal thresholds must be ascending"));
    }
    Ok(())
}

/// Monotonic visibility flags for the letter paragraphs.
#[derive(Resource, Debug, Clone, Default)]
pub struct LetterReveal {
    thresholds: Vec<f32>,
    revealed: Vec<bool>,
    has_scrolled: bool,
}

impl LetterReveal {
    pub fn new(thresholds: Vec<f32>) -> Result<Self, ConfigError> {
        validate_thresholds(&thresholds)?;
        let revealed = vec![false; thresholds.len()];
        Ok(Self {
            thresholds,
            revealed,
            has_scrolled: false,
        })
    }

    /// Applies a scroll sample. Paragraph `i` turns visible once `progress`
    /// exceeds its threshold and stays visible. Returns the indices revealed
    /// by this sample.
    pub fn observe(&mut self, progress: f32) -> Vec<usize> {
        let mut newly = Vec::new();
        for (i, (threshold, revealed)) in self.thresholds.iter().zip(self.revealed.iter_mut()).enumerate() {
            if !*revealed && progress > *threshold {
                *revealed = true;
                newly.push(i);
            }
        }
        newly
    }

    /// Records the raw scroll offset; flips the one-way "has scrolled" flag.
    pub fn observe_offset(&mut self, offset: f32) -> bool {
        if !self.has_scrolled && offset > SCROLLED_OFFSET {
            self.has_scrolled = true;
            return true;
        }
        false
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|r| **r).count()
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    pub fn has_scrolled(&self) -> bool {
        self.has_scrolled
    }

    pub fn all_revealed(&self) -> bool {
        self.revealed.iter().all(|r| *r)
    }
}
