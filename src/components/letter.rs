use bevy::prelude::*;

/// Scrolls with the page; parents every letter paragraph.
#[derive(Component, Debug, Clone, Copy)]
pub struct LetterColumn;

/// One paragraph of the letter.
#[derive(Component, Debug, Clone, Copy)]
pub struct LetterParagraph {
    pub index: usize,
    /// Resting y inside the column, before the reveal rise is applied.
    pub rest_y: f32,
}

/// Closing line under the last paragraph; appears with it.
#[derive(Component, Debug, Clone, Copy)]
pub struct LetterSignature {
    pub rest_y: f32,
}

/// Thin bar along the top edge whose width follows scroll progress.
#[derive(Component, Debug, Clone, Copy)]
pub struct ScrollProgressBar;

/// A short-lived particle from a click burst.
#[derive(Component, Debug, Clone, Copy)]
pub struct BurstParticleTag;
