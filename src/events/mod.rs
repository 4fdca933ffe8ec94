use bevy::prelude::*;

use crate::resources::CloudPhase;

/// Event emitted when the reader clicks a book.
#[derive(Event, Debug, Clone, Copy)]
pub struct BookPicked {
    pub id: usize,
}

/// Event emitted once, when the target book is chosen and the clouds start.
#[derive(Event, Debug, Clone, Copy)]
pub struct JourneyStarted {
    pub book_id: usize,
}

/// Event emitted each time the sequencer moves to a later phase.
#[derive(Event, Debug, Clone, Copy)]
pub struct PhaseAdvanced {
    pub phase: CloudPhase,
}

/// Request to start the background music.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct MusicRequested;

/// Request to stop the background music.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct MusicStopRequested;

/// Request to spawn a love burst at a world position.
#[derive(Event, Debug, Clone, Copy)]
pub struct BurstRequested {
    pub position: Vec2,
}

/// Event emitted when a letter paragraph becomes visible.
#[derive(Event, Debug, Clone, Copy)]
pub struct ParagraphRevealed {
    pub index: usize,
}
