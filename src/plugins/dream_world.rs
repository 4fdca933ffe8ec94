//! Arrival in the dream world: parting clouds, the backdrop and the welcome
//! panel with the button that opens the letter.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{egui, EguiContexts};

use crate::components::decor::{Motion, Repeat};
use crate::components::fade_controller::FadeController;
use crate::components::scene::DreamWorldEntity;
use crate::events::MusicRequested;
use crate::plugins::core::{viewport_size, LetterState};
use crate::plugins::ui_theme::{INK, ROSE};
use crate::resources::{CloudPhase, GreetingConfig};
use crate::systems::decor::{glyph_shape, rect_shape};
use crate::utils::easing::Ease;
use crate::utils::geometry::normalized_to_world;
use crate::utils::procgen::{field_rng, generate_field, hex_color, radial_clouds, spiral_clouds, FieldSpec, Glyph};

const SALT_RADIAL: u64 = 20;
const SALT_SPIRAL: u64 = 21;
const SALT_FIREFLIES: u64 = 22;

/// Seconds after arrival before the welcome panel appears.
pub const WELCOME_DELAY: f32 = 4.5;
const BACKDROP_FADE: f32 = 2.0;

const BACKDROP_Z: f32 = 30.0;
const PARTING_Z: f32 = 60.0;

/// Counts down to the welcome panel.
#[derive(Resource, Debug)]
pub struct WelcomePanel {
    pub timer: Timer,
}

impl WelcomePanel {
    pub fn is_ready(&self) -> bool {
        self.timer.finished()
    }
}

pub struct DreamWorldPlugin;

impl Plugin for DreamWorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(CloudPhase::Arrived), (spawn_dream_world, spawn_parting_clouds))
            .add_systems(
                Update,
                (tick_welcome_panel, welcome_panel_ui.after(tick_welcome_panel))
                    .run_if(in_state(CloudPhase::Arrived).and(in_state(LetterState::Sealed))),
            );
    }
}

fn fading_in(delay: f32) -> FadeController {
    let mut fade = FadeController::hidden();
    fade.fade_in_after(delay, BACKDROP_FADE);
    fade
}

fn spawn_dream_world(
    mut commands: Commands,
    window_query: Query<&Window, With<PrimaryWindow>>,
    config: Res<GreetingConfig>,
) {
    let viewport = viewport_size(window_query.get_single().ok());
    commands.insert_resource(WelcomePanel {
        timer: Timer::from_seconds(WELCOME_DELAY, TimerMode::Once),
    });

    // Sky in three bands, lightest at the horizon.
    let bands: [(u32, f32); 3] = [(0xbfdbfe, 0.0), (0xfbcfe8, 0.4), (0xfef3c7, 0.7)];
    for (i, (color, top)) in bands.iter().enumerate() {
        let height = viewport.y * (1.0 - top) + 40.0;
        let center = normalized_to_world(Vec2::new(0.5, top + (1.0 - top) / 2.0), viewport);
        commands.spawn((
            Name::new("Dream Sky"),
            rect_shape(
                Vec2::new(viewport.x * 1.2, height),
                hex_color(*color).with_alpha(0.0),
                center.extend(BACKDROP_Z + i as f32 * 0.1),
            ),
            fading_in(0.0),
            DreamWorldEntity,
        ));
    }

    let sun = normalized_to_world(Vec2::new(0.78, 0.22), viewport);
    commands.spawn((
        Name::new("Dream Sun"),
        glyph_shape(Glyph::Mote, 140.0, hex_color(0xfde68a).with_alpha(0.0), sun.extend(BACKDROP_Z + 1.0)),
        fading_in(0.5),
        DreamWorldEntity,
    ));

    let hills: [(f32, u32, f32); 3] = [(0.2, 0x86efac, 900.0), (0.75, 0x4ade80, 1100.0), (0.45, 0x22c55e, 800.0)];
    for (i, (x, color, size)) in hills.iter().enumerate() {
        let mut at = normalized_to_world(Vec2::new(*x, 1.0), viewport);
        at.y -= size * 0.25;
        commands.spawn((
            Name::new("Dream Hill"),
            glyph_shape(Glyph::Mote, *size, hex_color(*color).with_alpha(0.0), at.extend(BACKDROP_Z + 2.0 + i as f32 * 0.1)),
            fading_in(1.0),
            DreamWorldEntity,
        ));
    }

    let fireflies = generate_field(&FieldSpec::fireflies(), &mut field_rng(config.decor_seed, SALT_FIREFLIES));
    for fly in &fireflies {
        let at = normalized_to_world(Vec2::new(fly.position.x, 0.5 + fly.position.y * 0.4), viewport);
        commands.spawn((
            glyph_shape(fly.glyph, fly.size, fly.color, at.extend(BACKDROP_Z + 3.0)),
            Motion::between(at, at + fly.drift + Vec2::new(0.0, 40.0), fly.duration / 4.0)
                .with_opacity(&[0.0, 1.0, 0.2, 1.0, 0.0])
                .with_delay(fly.delay + 2.0)
                .with_repeat(Repeat::PingPong),
            DreamWorldEntity,
        ));
    }
}

fn spawn_parting_clouds(
    mut commands: Commands,
    window_query: Query<&Window, With<PrimaryWindow>>,
    config: Res<GreetingConfig>,
) {
    let viewport = viewport_size(window_query.get_single().ok());

    let radial = radial_clouds(18, &mut field_rng(config.decor_seed, SALT_RADIAL));
    for (i, cloud) in radial.iter().enumerate() {
        let at = normalized_to_world(cloud.position, viewport);
        commands.spawn((
            glyph_shape(cloud.glyph, cloud.size, cloud.color, at.extend(PARTING_Z + i as f32 * 0.01)),
            Motion::between(at, at + cloud.drift, cloud.duration)
                .with_scale(cloud.scale, cloud.scale * 0.6)
                .with_opacity(&[1.0, 1.0, 0.0])
                .with_ease(Ease::DREAMY)
                .with_repeat(Repeat::Despawn),
            DreamWorldEntity,
        ));
    }

    let spiral = spiral_clouds(8, &mut field_rng(config.decor_seed, SALT_SPIRAL));
    for cloud in &spiral {
        let at = normalized_to_world(cloud.position, viewport);
        commands.spawn((
            glyph_shape(cloud.glyph, cloud.size, cloud.color, at.extend(PARTING_Z + 1.0)),
            Motion::between(at, at + cloud.drift, cloud.duration)
                .with_scale(cloud.scale, 0.2)
                .with_spin(cloud.spin)
                .with_opacity(&[1.0, 0.8, 0.0])
                .with_delay(cloud.delay)
                .with_repeat(Repeat::Despawn),
            DreamWorldEntity,
        ));
    }

    info!("Clouds parting: {} radial, {} spiral", radial.len(), spiral.len());
}

fn tick_welcome_panel(time: Res<Time>, panel: Option<ResMut<WelcomePanel>>) {
    if let Some(mut panel) = panel {
        panel.timer.tick(time.delta());
    }
}

fn welcome_panel_ui(
    mut contexts: EguiContexts,
    panel: Option<Res<WelcomePanel>>,
    mut next_letter: ResMut<NextState<LetterState>>,
    mut music: EventWriter<MusicRequested>,
) {
    let Some(panel) = panel else { return; };
    if !panel.is_ready() {
        return;
    }

    egui::Window::new("welcome")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .max_width(520.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new("Welcome to Your Dream")
                        .size(40.0)
                        .strong()
                        .color(INK),
                );
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new(
                        "You've journeyed through the clouds and arrived in a magical realm where dreams come alive. \
                         This is your sanctuary of imagination and wonder.",
                    )
                    .size(17.0),
                );
                ui.add_space(20.0);

                let explore = ui.add(
                    egui::Button::new(
                        egui::RichText::new("Explore This World ✨")
                            .size(20.0)
                            .strong()
                            .color(egui::Color32::WHITE),
                    )
                    .min_size(egui::vec2(240.0, 48.0))
                    .fill(ROSE),
                );

                if explore.clicked() {
                    info!("Explore pressed, opening the letter");
                    music.send(MusicRequested);
                    next_letter.set(LetterState::Open);
                }
                ui.add_space(12.0);
            });
        });
}
