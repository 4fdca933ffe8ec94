//! Cloud journey: the choreography for the filling and traveling phases.
//!
//! Each phase spawns its own clouds on entry. The room goes away once the
//! clouds have covered it, and each phase's clouds are cleared when a later
//! phase begins, so a frame that skips a phase still leaves a clean scene.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::components::decor::{Motion, Repeat};
use crate::components::fade_controller::FadeController;
use crate::components::scene::{FillingEntity, RoomEntity, TravelingEntity};
use crate::plugins::core::{despawn_scene_entities, viewport_size};
use crate::resources::{CloudPhase, GreetingConfig};
use crate::systems::decor::{glyph_shape, rect_shape};
use crate::systems::phase::advance_cloud_phase;
use crate::utils::easing::Ease;
use crate::utils::geometry::normalized_to_world;
use crate::utils::procgen::{field_rng, generate_field, hex_color, layered_clouds, FieldSpec};

// Field salts keep each cloud set independent under one decor seed.
const SALT_FILLING: u64 = 10;
const SALT_LAYERS: u64 = 11;
const SALT_STREAKS: u64 = 12;
const SALT_MOTES: u64 = 13;

const VEIL_Z: f32 = 40.0;
const CLOUD_Z: f32 = 41.0;

pub struct CloudJourneyPlugin;

impl Plugin for CloudJourneyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, advance_cloud_phase)
            .add_systems(OnEnter(CloudPhase::Filling), spawn_filling_clouds)
            .add_systems(
                OnEnter(CloudPhase::Traveling),
                (
                    despawn_scene_entities::<RoomEntity>,
                    despawn_scene_entities::<FillingEntity>,
                    spawn_traveling_clouds,
                ),
            )
            .add_systems(
                OnEnter(CloudPhase::Arrived),
                (
                    despawn_scene_entities::<RoomEntity>,
                    despawn_scene_entities::<FillingEntity>,
                    despawn_scene_entities::<TravelingEntity>,
                ),
            );
    }
}

/// Full-screen rectangle that fades in over `duration` seconds.
fn veil(viewport: Vec2, color: Color, duration: f32, z: f32) -> impl Bundle {
    let mut fade = FadeController::hidden();
    fade.fade_in(duration);
    (rect_shape(viewport * 1.2, color.with_alpha(0.0), Vec3::new(0.0, 0.0, z)), fade)
}

fn spawn_filling_clouds(
    mut commands: Commands,
    window_query: Query<&Window, With<PrimaryWindow>>,
    config: Res<GreetingConfig>,
) {
    let viewport = viewport_size(window_query.get_single().ok());
    let fill_time = (config.phases.traveling - config.phases.filling).max(0.1);

    commands.spawn((
        Name::new("Cloud Veil"),
        veil(viewport, Color::WHITE, fill_time, VEIL_Z),
        FillingEntity,
    ));

    let clouds = generate_field(&FieldSpec::filling_clouds(), &mut field_rng(config.decor_seed, SALT_FILLING));
    for (i, cloud) in clouds.iter().enumerate() {
        let at = normalized_to_world(cloud.position, viewport);
        commands.spawn((
            glyph_shape(cloud.glyph, cloud.size, cloud.color.with_alpha(0.0), at.extend(CLOUD_Z + i as f32 * 0.01)),
            Motion::between(at, at + cloud.drift, cloud.duration)
                .with_scale(0.0, cloud.scale)
                .with_opacity(&[0.0, 0.9, 1.0])
                .with_delay(cloud.delay)
                .with_ease(Ease::SOFT),
            FillingEntity,
        ));
    }
    info!("Spawned {} filling clouds", clouds.len());
}

fn spawn_traveling_clouds(
    mut commands: Commands,
    window_query: Query<&Window, With<PrimaryWindow>>,
    config: Res<GreetingConfig>,
) {
    let viewport = viewport_size(window_query.get_single().ok());

    commands.spawn((
        Name::new("Travel Sky"),
        rect_shape(viewport * 1.2, hex_color(0xfce7f3), Vec3::new(0.0, 0.0, VEIL_Z)),
        TravelingEntity,
    ));

    let layers = layered_clouds(24, 8, 90.0, &mut field_rng(config.decor_seed, SALT_LAYERS));
    for (i, cloud) in layers.iter().enumerate() {
        let from = normalized_to_world(cloud.position, viewport);
        let to = normalized_to_world(cloud.position + cloud.drift, viewport);
        commands.spawn((
            glyph_shape(cloud.glyph, cloud.size, cloud.color, from.extend(CLOUD_Z + 1.0 - i as f32 * 0.01)),
            Motion::between(from, to, cloud.duration)
                .with_scale(cloud.scale * 0.6, cloud.scale)
                .with_opacity(&[0.0, 0.9, 0.9, 0.0])
                .with_delay(cloud.delay)
                .with_repeat(Repeat::Loop),
            TravelingEntity,
        ));
    }

    let streaks = generate_field(&FieldSpec::falling_streaks(), &mut field_rng(config.decor_seed, SALT_STREAKS));
    for cloud in &streaks {
        let from = normalized_to_world(Vec2::new(cloud.position.x, -0.15), viewport);
        let to = normalized_to_world(Vec2::new(cloud.position.x, 1.15), viewport) + cloud.drift;
        commands.spawn((
            glyph_shape(cloud.glyph, cloud.size, cloud.color, from.extend(CLOUD_Z + 2.0)),
            Motion::between(from, to, cloud.duration)
                .with_scale(cloud.scale, cloud.scale)
                .with_opacity(&[0.0, 0.6, 0.0])
                .with_delay(cloud.delay)
                .with_repeat(Repeat::Loop),
            TravelingEntity,
        ));
    }

    let motes = generate_field(&FieldSpec::dust_motes(), &mut field_rng(config.decor_seed, SALT_MOTES));
    for mote in &motes {
        let from = normalized_to_world(Vec2::new(mote.position.x, 1.05), viewport);
        let to = normalized_to_world(Vec2::new(mote.position.x, -0.05), viewport) + mote.drift;
        commands.spawn((
            glyph_shape(mote.glyph, mote.size, mote.color, from.extend(CLOUD_Z + 3.0)),
            Motion::between(from, to, mote.duration)
                .with_opacity(&[0.0, 0.8, 0.8, 0.0])
                .with_delay(mote.delay)
                .with_repeat(Repeat::Loop),
            TravelingEntity,
        ));
    }

    info!(
        "Spawned {} layered clouds, {} streaks, {} motes",
        layers.len(),
        streaks.len(),
        motes.len()
    );
}
