//! Scene marker components for entity lifecycle management.
//!
//! Entities tagged with these markers are despawned when their scene ends
//! via the generic `despawn_scene_entities<T>` system in CorePlugin.

use bevy::prelude::*;

/// Marker for the room and bookshelf.
/// Despawned when the clouds start travelling.
#[derive(Component, Default)]
pub struct RoomEntity;

/// Marker for the blooming clouds.
/// Despawned on `CloudPhase::Filling` exit.
#[derive(Component, Default)]
pub struct FillingEntity;

/// Marker for the travelling cloud streams.
/// Despawned on `CloudPhase::Traveling` exit.
#[derive(Component, Default)]
pub struct TravelingEntity;

/// Marker for the dream world backdrop and parting clouds.
/// Despawned when the love letter opens.
#[derive(Component, Default)]
pub struct DreamWorldEntity;

/// Marker for everything on the love letter page.
#[derive(Component, Default)]
pub struct LetterEntity;
