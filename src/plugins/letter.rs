//! The love letter page.
//!
//! A page several viewports tall. Scrolling moves the letter column up,
//! paragraphs fade in once scroll progress passes their threshold, and the
//! background is full of floating hearts and flowers.

use bevy::prelude::*;
use bevy::text::TextBounds;
use bevy::window::PrimaryWindow;
use bevy_egui::{egui, EguiContexts};

use crate::components::decor::{FloatBob, Motion, Parallax, Repeat};
use crate::components::fade_controller::FadeController;
use crate::components::letter::{LetterColumn, LetterParagraph, LetterSignature, ScrollProgressBar};
use crate::components::scene::{DreamWorldEntity, LetterEntity};
use crate::plugins::core::{despawn_scene_entities, viewport_size, LetterState};
use crate::plugins::ui_theme::{COLOR_CREAM, COLOR_ROSE, ROSE};
use crate::resources::{GreetingConfig, LetterReveal, ScrollView};
use crate::systems::decor::{glyph_shape, rect_shape};
use crate::systems::scroll::{fade_in_revealed, reveal_paragraphs, scroll_letter, sync_scroll_viewport};
use crate::utils::geometry::normalized_to_world;
use crate::utils::procgen::{field_rng, generate_field, hex_color, FieldSpec};

const SALT_PARALLAX: u64 = 30;
const SALT_HEARTS: u64 = 31;
const SALT_FLOWERS: u64 = 32;
const SALT_WANDERERS: u64 = 33;

/// Pixels a hidden paragraph sits below its resting place.
const PARAGRAPH_RISE: f32 = 50.0;
/// Where on screen (fraction from the top) a paragraph rests when it reveals.
const REVEAL_LINE: f32 = 0.6;
const MAX_TEXT_WIDTH: f32 = 720.0;
const PROGRESS_BAR_HEIGHT: f32 = 4.0;

const PAGE_Z: f32 = 0.0;
const DECOR_Z: f32 = 2.0;
const TEXT_Z: f32 = 10.0;
const BAR_Z: f32 = 20.0;

pub struct LetterPlugin;

impl Plugin for LetterPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(LetterState::Open),
            (despawn_scene_entities::<DreamWorldEntity>, spawn_letter_page, spawn_letter_decor),
        )
        .add_systems(OnExit(LetterState::Open), despawn_scene_entities::<LetterEntity>)
        .add_systems(
            Update,
            (
                sync_scroll_viewport,
                scroll_letter,
                reveal_paragraphs,
                fade_in_revealed,
                layout_letter,
                update_progress_bar,
            )
                .chain()
                .run_if(in_state(LetterState::Open)),
        )
        .add_systems(Update, scroll_prompt_ui.run_if(in_state(LetterState::Open)));
    }
}

/// Resting y (column-local) of paragraph `index`, placed so that it sits on
/// the reveal line at the moment its threshold is crossed.
pub fn paragraph_rest_y(threshold: f32, viewport_height: f32, letter_viewports: f32) -> f32 {
    let max_offset = viewport_height * (letter_viewports - 1.0).max(0.0);
    let page_y = threshold * max_offset + REVEAL_LINE * viewport_height;
    viewport_height / 2.0 - page_y
}

fn spawn_letter_page(
    mut commands: Commands,
    window_query: Query<&Window, With<PrimaryWindow>>,
    config: Res<GreetingConfig>,
    mut scroll: ResMut<ScrollView>,
) {
    let viewport = viewport_size(window_query.get_single().ok());
    *scroll = ScrollView::new(viewport.y * config.letter_viewports, viewport.y);

    commands.spawn((
        Name::new("Letter Page"),
        rect_shape(viewport * 1.2, COLOR_CREAM, Vec3::new(0.0, 0.0, PAGE_Z)),
        LetterEntity,
    ));

    let text_width = (viewport.x * 0.7).min(MAX_TEXT_WIDTH);
    let mut last_rest = 0.0;

    commands
        .spawn((
            Name::new("Letter Column"),
            Transform::from_xyz(0.0, 0.0, TEXT_Z),
            Visibility::default(),
            LetterColumn,
            LetterEntity,
        ))
        .with_children(|column| {
            for (index, (text, threshold)) in config
                .letter_paragraphs
                .iter()
                .zip(config.reveal_thresholds.iter())
                .enumerate()
            {
                let rest_y = paragraph_rest_y(*threshold, viewport.y, config.letter_viewports);
                last_rest = rest_y;
                column.spawn((
                    Text2d::new(text.clone()),
                    TextFont {
                        font_size: 26.0,
                        ..default()
                    },
                    TextColor(COLOR_ROSE.with_alpha(0.0)),
                    TextLayout::new_with_justify(JustifyText::Center),
                    TextBounds::new_horizontal(text_width),
                    Transform::from_xyz(0.0, rest_y - PARAGRAPH_RISE, 0.0),
                    FadeController::hidden_below(PARAGRAPH_RISE),
                    LetterParagraph { index, rest_y },
                ));
            }

            let rest_y = last_rest - viewport.y * 0.25;
            column.spawn((
                Text2d::new(config.letter_signature.clone()),
                TextFont {
                    font_size: 34.0,
                    ..default()
                },
                TextColor(hex_color(0xe11d48).with_alpha(0.0)),
                TextLayout::new_with_justify(JustifyText::Center),
                Transform::from_xyz(0.0, rest_y - PARAGRAPH_RISE, 0.0),
                FadeController::hidden_below(PARAGRAPH_RISE),
                LetterSignature { rest_y },
            ));
        });

    commands.spawn((
        Name::new("Scroll Progress"),
        rect_shape(
            Vec2::new(viewport.x, PROGRESS_BAR_HEIGHT),
            hex_color(0xf43f5e),
            Vec3::new(-viewport.x / 2.0, viewport.y / 2.0 - PROGRESS_BAR_HEIGHT / 2.0, BAR_Z),
        ),
        ScrollProgressBar,
        LetterEntity,
    ));

    info!("Letter opened with {} paragraphs", config.letter_paragraphs.len());
}

fn spawn_letter_decor(
    mut commands: Commands,
    window_query: Query<&Window, With<PrimaryWindow>>,
    config: Res<GreetingConfig>,
) {
    let viewport = viewport_size(window_query.get_single().ok());
    let seed = config.decor_seed;

    let floaters = generate_field(&FieldSpec::parallax_floaters(), &mut field_rng(seed, SALT_PARALLAX));
    for item in &floaters {
        let base = normalized_to_world(item.position, viewport);
        commands.spawn((
            glyph_shape(item.glyph, item.size, item.color.with_alpha(0.45), base.extend(DECOR_Z)),
            Parallax { base, speed: item.speed },
            LetterEntity,
        ));
    }

    let hearts = generate_field(&FieldSpec::floating_hearts(), &mut field_rng(seed, SALT_HEARTS));
    for (i, heart) in hearts.iter().enumerate() {
        let base = normalized_to_world(heart.position, viewport);
        let mut shape = glyph_shape(heart.glyph, heart.size, heart.color.with_alpha(0.6), base.extend(DECOR_Z + 0.5));
        shape.0.transform.scale = Vec3::new(heart.scale, heart.scale, 1.0);
        commands.spawn((
            shape,
            FloatBob {
                base,
                amplitude: 24.0,
                speed: 1.0 / heart.duration,
                phase: i as f64 * 3.7,
            },
            LetterEntity,
        ));
    }

    let wanderers = [
        generate_field(&FieldSpec::floating_flowers(), &mut field_rng(seed, SALT_FLOWERS)),
        generate_field(&FieldSpec::wandering_hearts(), &mut field_rng(seed, SALT_WANDERERS)),
    ];
    for item in wanderers.iter().flatten() {
        let from = normalized_to_world(item.position, viewport);
        commands.spawn((
            glyph_shape(item.glyph, item.size, item.color, from.extend(DECOR_Z + 1.0)),
            Motion::between(from, from + item.drift, item.duration / 2.0)
                .with_scale(1.0, item.scale)
                .with_spin(item.spin)
                .with_opacity(&[0.5, 0.8, 0.5])
                .with_delay(item.delay)
                .with_repeat(Repeat::PingPong),
            LetterEntity,
        ));
    }
}

/// Moves the column with the scroll offset and applies each paragraph's rise.
fn layout_letter(
    scroll: Res<ScrollView>,
    mut column: Query<&mut Transform, With<LetterColumn>>,
    mut paragraphs: Query<
        (&mut Transform, &FadeController, Option<&LetterParagraph>, Option<&LetterSignature>),
        Without<LetterColumn>,
    >,
) {
    for mut transform in &mut column {
        transform.translation.y = scroll.offset;
    }
    for (mut transform, fade, paragraph, signature) in &mut paragraphs {
        let rest_y = match (paragraph, signature) {
            (Some(p), _) => p.rest_y,
            (None, Some(s)) => s.rest_y,
            (None, None) => continue,
        };
        transform.translation.y = rest_y - fade.offset();
    }
}

fn update_progress_bar(
    scroll: Res<ScrollView>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut bars: Query<&mut Transform, With<ScrollProgressBar>>,
) {
    let viewport = viewport_size(window_query.get_single().ok());
    let progress = scroll.progress();
    for mut transform in &mut bars {
        transform.scale.x = progress.max(0.0001);
        transform.translation.x = -viewport.x / 2.0 + viewport.x * progress / 2.0;
        transform.translation.y = viewport.y / 2.0 - PROGRESS_BAR_HEIGHT / 2.0;
    }
}

fn scroll_prompt_ui(mut contexts: EguiContexts, reveal: Res<LetterReveal>) {
    if reveal.has_scrolled() {
        return;
    }
    egui::Area::new(egui::Id::new("scroll_prompt"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -36.0))
        .interactable(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("SCROLL DOWN BABY").size(22.0).strong().color(ROSE));
                ui.label(egui::RichText::new("⬇").size(26.0).color(ROSE));
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_rests_on_reveal_line() {
        let vh = 800.0;
        let viewports = 4.0;
        for threshold in [0.01, 0.2, 0.38] {
            let rest = paragraph_rest_y(threshold, vh, viewports);
            // Column sits at the offset where the threshold is crossed.
            let offset = threshold * vh * (viewports - 1.0);
            let screen_y = rest + offset;
            assert!((screen_y - (vh / 2.0 - REVEAL_LINE * vh)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_later_paragraphs_sit_lower() {
        let a = paragraph_rest_y(0.05, 800.0, 4.0);
        let b = paragraph_rest_y(0.1, 800.0, 4.0);
        assert!(b < a);
    }
}
