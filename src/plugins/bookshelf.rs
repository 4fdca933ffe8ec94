//! The room and its bookshelf.
//!
//! Drawn entirely with Lyon shapes: wall and floor, framed pictures, a potted
//! plant and the wooden shelf with three rows of books. The shelf leans toward
//! the cursor and its books are clickable until the target is found.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_prototype_lyon::prelude::*;

use crate::components::book::{BookSpine, PickMeLabel, ShelfFrame, ShelfTilt};
use crate::components::decor::{Motion, Repeat};
use crate::components::scene::RoomEntity;
use crate::plugins::core::viewport_size;
use crate::resources::{CloudPhase, ShelfLayout, BOOKS_PER_ROW};
use crate::systems::bookshelf::{drop_books, pick_book_on_click, resolve_book_picks, tilt_shelf};
use crate::systems::decor::{glyph_shape, rect_shape};
use crate::utils::easing::Ease;
use crate::utils::geometry::{normalized_to_world, rounded_rect};
use crate::utils::procgen::{hex_color, Glyph};

// Shelf geometry
const BOOK_WIDTH: f32 = 44.0;
const BOOK_GAP: f32 = 6.0;
const ROW_HEIGHT: f32 = 150.0;
const BOARD_THICKNESS: f32 = 12.0;
const FRAME_PADDING: f32 = 18.0;

const COLOR_WALL: u32 = 0xebe4d8;
const COLOR_FLOOR: u32 = 0x7d6343;
const COLOR_BASEBOARD: u32 = 0xf8f6f3;
const COLOR_WOOD: u32 = 0x5c3a21;
const COLOR_WOOD_DARK: u32 = 0x3d2614;
const COLOR_PICTURE_FRAME: u32 = 0x2d2420;
const COLOR_LABEL: u32 = 0xfef3c7;

pub struct BookshelfPlugin;

impl Plugin for BookshelfPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(CloudPhase::Idle), (spawn_room, spawn_bookshelf))
            .add_systems(
                Update,
                (
                    pick_book_on_click,
                    resolve_book_picks.after(pick_book_on_click),
                    drop_books.after(resolve_book_picks),
                    tilt_shelf.run_if(shelf_is_closed),
                )
                    .run_if(in_state(CloudPhase::Idle)),
            );
    }
}

fn shelf_is_closed(shelf: Res<ShelfLayout>) -> bool {
    !shelf.is_opened()
}

/// Size of the shelf frame holding `rows` rows.
pub fn frame_size(rows: usize) -> Vec2 {
    let width = BOOKS_PER_ROW as f32 * BOOK_WIDTH + (BOOKS_PER_ROW as f32 - 1.0) * BOOK_GAP + 2.0 * FRAME_PADDING;
    let height = rows as f32 * ROW_HEIGHT + 2.0 * FRAME_PADDING;
    Vec2::new(width, height)
}

/// Center of a book in frame-local coordinates.
pub fn book_position(frame: Vec2, row: usize, slot: usize, height: f32) -> Vec2 {
    let x = -frame.x / 2.0 + FRAME_PADDING + slot as f32 * (BOOK_WIDTH + BOOK_GAP) + BOOK_WIDTH / 2.0;
    let row_bottom = frame.y / 2.0 - FRAME_PADDING - (row + 1) as f32 * ROW_HEIGHT;
    let y = row_bottom + BOARD_THICKNESS + height / 2.0;
    Vec2::new(x, y)
}

fn spawn_room(mut commands: Commands, window_query: Query<&Window, With<PrimaryWindow>>) {
    let viewport = viewport_size(window_query.get_single().ok());
    let floor_height = viewport.y * 0.38;

    commands.spawn((
        Name::new("Wall"),
        rect_shape(viewport * 1.2, hex_color(COLOR_WALL), Vec3::new(0.0, 0.0, 0.0)),
        RoomEntity,
    ));

    let floor_center = normalized_to_world(Vec2::new(0.5, 1.0 - 0.19), viewport);
    commands.spawn((
        Name::new("Floor"),
        rect_shape(
            Vec2::new(viewport.x * 1.2, floor_height),
            hex_color(COLOR_FLOOR),
            floor_center.extend(0.1),
        ),
        RoomEntity,
    ));

    let baseboard = normalized_to_world(Vec2::new(0.5, 0.62), viewport);
    commands.spawn((
        Name::new("Baseboard"),
        rect_shape(Vec2::new(viewport.x * 1.2, 16.0), hex_color(COLOR_BASEBOARD), baseboard.extend(0.2)),
        RoomEntity,
    ));

    // Soft window light falling on the wall.
    let light = normalized_to_world(Vec2::new(0.27, 0.2), viewport);
    commands.spawn((
        Name::new("Window Light"),
        rect_shape(
            Vec2::new(viewport.x * 0.35, viewport.y * 0.55),
            hex_color(0xfffbeb).with_alpha(0.5),
            light.extend(0.15),
        ),
        RoomEntity,
    ));

    // Framed pictures: (normalized center, size, glyph inside).
    let pictures = [
        (Vec2::new(0.86, 0.2), 180.0, Glyph::Heart),
        (Vec2::new(0.16, 0.24), 160.0, Glyph::Blossom),
        (Vec2::new(0.88, 0.56), 140.0, Glyph::Sparkle),
        (Vec2::new(0.14, 0.6), 150.0, Glyph::Heart),
    ];
    for (center, size, glyph) in pictures {
        let at = normalized_to_world(center, viewport);
        commands
            .spawn((
                Name::new("Picture"),
                ShapeBundle {
                    path: rounded_rect(size, size, 3.0),
                    transform: Transform::from_translation(at.extend(0.3)),
                    ..default()
                },
                Fill::color(hex_color(COLOR_PICTURE_FRAME)),
                RoomEntity,
            ))
            .with_children(|frame| {
                frame.spawn(rect_shape(Vec2::splat(size - 12.0), hex_color(0xfafaf9), Vec3::new(0.0, 0.0, 0.1)));
                frame.spawn(glyph_shape(glyph, size * 0.45, hex_color(0xfda4af), Vec3::new(0.0, 0.0, 0.2)));
            });
    }

    // Potted plant by the shelf.
    let pot = normalized_to_world(Vec2::new(0.3, 0.66), viewport);
    commands
        .spawn((
            Name::new("Plant"),
            ShapeBundle {
                path: rounded_rect(64.0, 44.0, 8.0),
                transform: Transform::from_translation(pot.extend(0.4)),
                ..default()
            },
            Fill::color(hex_color(0xa67c52)),
            RoomEntity,
        ))
        .with_children(|plant| {
            for (i, offset) in [-18.0_f32, 0.0, 18.0].iter().enumerate() {
                plant.spawn(glyph_shape(
                    Glyph::Blossom,
                    46.0,
                    hex_color(0x4d7c0f),
                    Vec3::new(*offset, 44.0 + (i % 2) as f32 * 14.0, -0.1),
                ));
            }
        });
}

fn spawn_bookshelf(
    mut commands: Commands,
    window_query: Query<&Window, With<PrimaryWindow>>,
    shelf: Res<ShelfLayout>,
) {
    let viewport = viewport_size(window_query.get_single().ok());
    let rows = shelf.rows();
    let size = frame_size(rows);
    let center = Vec2::new(0.0, -viewport.y * 0.03);

    commands
        .spawn((
            Name::new("Bookshelf"),
            ShapeBundle {
                path: rounded_rect(size.x, size.y, 6.0),
                transform: Transform::from_translation(center.extend(1.0)),
                ..default()
            },
            Fill::color(hex_color(COLOR_WOOD)),
            Stroke::new(hex_color(COLOR_WOOD_DARK), 3.0),
            ShelfFrame { size },
            ShelfTilt::default(),
            RoomEntity,
        ))
        .with_children(|frame| {
            // Back panel and boards.
            frame.spawn(rect_shape(
                size - Vec2::splat(FRAME_PADDING * 2.0),
                hex_color(COLOR_WOOD_DARK),
                Vec3::new(0.0, 0.0, 0.05),
            ));
            for row in 0..rows {
                let y = size.y / 2.0 - FRAME_PADDING - (row + 1) as f32 * ROW_HEIGHT + BOARD_THICKNESS / 2.0;
                frame.spawn(rect_shape(
                    Vec2::new(size.x - FRAME_PADDING, BOARD_THICKNESS),
                    hex_color(COLOR_WOOD),
                    Vec3::new(0.0, y, 0.1),
                ));
            }

            let book_area = ROW_HEIGHT - BOARD_THICKNESS - 8.0;
            for book in &shelf.books {
                let (row, slot) = book.slot();
                let height = book_area * book.height_pct / 100.0;
                let at = book_position(size, row, slot, height);
                let spine_size = Vec2::new(BOOK_WIDTH, height);

                frame
                    .spawn((
                        Name::new(format!("Book {}", book.id)),
                        ShapeBundle {
                            path: rounded_rect(BOOK_WIDTH, height, 3.0),
                            transform: Transform::from_translation(at.extend(0.2))
                                .with_rotation(Quat::from_rotation_z(book.tilt.to_radians())),
                            ..default()
                        },
                        Fill::color(hex_color(book.color)),
                        Stroke::new(Color::BLACK.with_alpha(0.25), 1.0),
                        BookSpine {
                            id: book.id,
                            size: spine_size,
                        },
                    ))
                    .with_children(|spine| {
                        // Gilded bands near the top and bottom of the spine.
                        for band in [0.32_f32, -0.32] {
                            spine.spawn(rect_shape(
                                Vec2::new(BOOK_WIDTH - 8.0, 3.0),
                                hex_color(0xd4a017).with_alpha(0.7),
                                Vec3::new(0.0, height * band, 0.05),
                            ));
                        }

                        if let Some(label) = book.label {
                            spine
                                .spawn((
                                    ShapeBundle {
                                        path: rounded_rect(BOOK_WIDTH - 6.0, 46.0, 4.0),
                                        transform: Transform::from_xyz(0.0, 0.0, 0.1),
                                        ..default()
                                    },
                                    Fill::color(hex_color(COLOR_LABEL)),
                                    Stroke::new(hex_color(0xe11d48), 1.5),
                                    Motion::between(Vec2::new(0.0, 0.0), Vec2::new(0.0, 3.0), 0.9)
                                        .with_scale(1.0, 1.08)
                                        .with_ease(Ease::InOutSine)
                                        .with_repeat(Repeat::PingPong),
                                    PickMeLabel,
                                ))
                                .with_children(|tag| {
                                    tag.spawn((
                                        Text2d::new(label.replace(' ', "\n")),
                                        TextFont {
                                            font_size: 11.0,
                                            ..default()
                                        },
                                        TextColor(hex_color(0x9f1239)),
                                        TextLayout::new_with_justify(JustifyText::Center),
                                        Transform::from_xyz(0.0, 0.0, 0.1),
                                    ));
                                });
                        }
                    });
            }
        });

    info!("Spawned bookshelf with {} books in {} rows", shelf.books.len(), rows);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_fits_six_books() {
        let size = frame_size(3);
        assert_eq!(size.x, 6.0 * 44.0 + 5.0 * 6.0 + 36.0);
        assert_eq!(size.y, 3.0 * 150.0 + 36.0);
    }

    #[test]
    fn test_books_sit_inside_frame() {
        let frame = frame_size(3);
        for row in 0..3 {
            for slot in 0..BOOKS_PER_ROW {
                let height = 120.0;
                let at = book_position(frame, row, slot, height);
                assert!(at.x - BOOK_WIDTH / 2.0 >= -frame.x / 2.0);
                assert!(at.x + BOOK_WIDTH / 2.0 <= frame.x / 2.0);
                assert!(at.y - height / 2.0 >= -frame.y / 2.0);
                assert!(at.y + height / 2.0 <= frame.y / 2.0);
            }
        }
    }

    #[test]
    fn test_rows_stack_downward() {
        let frame = frame_size(3);
        let top = book_position(frame, 0, 0, 100.0);
        let bottom = book_position(frame, 2, 0, 100.0);
        assert!((top.y - bottom.y - 2.0 * ROW_HEIGHT).abs() < 1e-4);
        let left = book_position(frame, 0, 0, 100.0);
        let right = book_position(frame, 0, 5, 100.0);
        assert!(right.x > left.x);
    }
}
