//! Bookshelf layout: which books exist, how they look, and which one is the
//! target.

use bevy::prelude::*;

use crate::utils::seeded_rng::XorShift32;

/// Deep leather and cloth cover colors, assigned cyclically.
pub const BOOK_PALETTE: [u32; 18] = [
    0x8B4513, 0x2F4F4F, 0x8B0000, 0x2E5C3F, 0x4A3728, 0x6B4423, 0x1C3D5A, 0x704214, 0x4B3621,
    0x5C4033, 0x556B2F, 0x8B4726, 0x3B3C36, 0x654321, 0x4A235A, 0x7B3F00, 0x483C32, 0x1F4788,
];

/// Books per shelf row.
pub const BOOKS_PER_ROW: usize = 6;

/// Label painted on the target book's spine.
pub const TARGET_LABEL: &str = "Pick me";

/// One book on the shelf.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: usize,
    /// Cover color as `0xRRGGBB`.
    pub color: u32,
    /// Height as a percentage of the shelf slot (70..=95).
    pub height_pct: f32,
    /// Resting lean in degrees.
    pub tilt: f32,
    /// Rotation in degrees used when the book falls.
    pub drop_rot: f32,
    pub label: Option<&'static str>,
}

impl Book {
    /// Shelf row and slot within the row.
    pub fn slot(&self) -> (usize, usize) {
        (self.id / BOOKS_PER_ROW, self.id % BOOKS_PER_ROW)
    }

    /// Seconds to wait before falling; books drop from the center of their
    /// row outward.
    pub fn drop_delay(&self) -> f32 {
        let center = (BOOKS_PER_ROW as f32 - 1.0) / 2.0;
        let (_, slot) = self.slot();
        0.05 * (slot as f32 - center).abs()
    }
}

/// Result of clicking a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// Not the target; show a hint.
    Wrong,
    /// The target; the journey begins.
    Correct,
    /// A book was already chosen, or the id does not exist.
    Ignored,
}

/// The generated shelf and the selection state.
#[derive(Resource, Debug, Clone)]
pub struct ShelfLayout {
    pub books: Vec<Book>,
    pub target_id: usize,
    selected: Option<usize>,
}

impl ShelfLayout {
    /// Generates `count` books from `seed`. Identical inputs always produce an
    /// identical shelf and target.
    pub fn generate(seed: u32, count: usize) -> Self {
        let count = count.max(1);
        let mut rng = XorShift32::new(seed);
        let mut books: Vec<Book> = (0..count)
            .map(|id| {
                let height_pct = 70.0 + (rng.next_unit() * 25.0).round();
                let tilt = (rng.next_unit() - 0.5) * 1.2;
                let drop_rot = (rng.next_unit() - 0.5) * 12.0;
                Book {
                    id,
                    color: BOOK_PALETTE[id % BOOK_PALETTE.len()],
                    height_pct,
                    tilt,
                    drop_rot,
                    label: None,
                }
            })
            .collect();

        let target_id = ((rng.next_unit() * count as f32).floor() as usize).min(count - 1);
        books[target_id].label = Some(TARGET_LABEL);

        Self {
            books,
            target_id,
            selected: None,
        }
    }

    pub fn rows(&self) -> usize {
        self.books.len().div_ceil(BOOKS_PER_ROW)
    }

    pub fn book(&self, id: usize) -> Option<&Book> {
        self.books.get(id)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_opened(&self) -> bool {
        self.selected.is_some()
    }

    /// Resolves a click on book `id`.
    pub fn pick(&mut self, id: usize) -> PickOutcome {
        if self.selected.is_some() || id >= self.books.len() {
            return PickOutcome::Ignored;
        }
        if id == self.target_id {
            self.selected = Some(id);
            PickOutcome::Correct
        } else {
            PickOutcome::Wrong
        }
    }
}
