use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;
use leafwing_input_manager::prelude::*;
use rand::rngs::StdRng;

use crate::components::decor::{Motion, Repeat};
use crate::components::letter::BurstParticleTag;
use crate::components::scene::LetterEntity;
use crate::events::BurstRequested;
use crate::plugins::core::{cursor_world_position, LetterState};
use crate::plugins::input::GreetingAction;
use crate::resources::GreetingConfig;
use crate::systems::decor::glyph_shape;
use crate::utils::easing::Ease;
use crate::utils::procgen::{field_rng, love_burst};

const SALT_BURSTS: u64 = 40;
const BURST_Z: f32 = 30.0;

/// Random stream shared by every burst of the session.
#[derive(Resource)]
pub struct BurstRng(pub StdRng);

pub struct LoveBurstsPlugin;

impl Plugin for LoveBurstsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, seed_burst_rng).add_systems(
            Update,
            (
                request_burst_on_click.run_if(in_state(LetterState::Open)),
                spawn_love_bursts,
            )
                .chain(),
        );
    }
}

pub fn seed_burst_rng(mut commands: Commands, config: Res<GreetingConfig>) {
    commands.insert_resource(BurstRng(field_rng(config.decor_seed, SALT_BURSTS)));
}

fn request_burst_on_click(
    mut contexts: EguiContexts,
    action_query: Query<&ActionState<GreetingAction>, With<Camera2d>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    mut bursts: EventWriter<BurstRequested>,
) {
    let Ok(action_state) = action_query.get_single() else { return; };
    if !action_state.just_pressed(&GreetingAction::Select) {
        return;
    }
    // Clicks on the CD player or toasts belong to egui.
    if contexts.ctx_mut().wants_pointer_input() {
        return;
    }
    if let Some(position) = cursor_world_position(&window_query, &camera_query) {
        bursts.send(BurstRequested { position });
    }
}

/// Spawns a ring of hearts and flowers for each burst request.
pub fn spawn_love_bursts(
    mut commands: Commands,
    mut requests: EventReader<BurstRequested>,
    rng: Option<ResMut<BurstRng>>,
) {
    let Some(mut rng) = rng else {
        requests.clear();
        return;
    };
    for request in requests.read() {
        for particle in love_burst(&mut rng.0) {
            commands.spawn((
                glyph_shape(particle.glyph, particle.size, particle.color, request.position.extend(BURST_Z)),
                Motion::between(request.position, request.position + particle.offset, particle.duration)
                    .with_scale(0.4, 1.0)
                    .with_spin(particle.spin)
                    .with_opacity(&[1.0, 1.0, 0.0])
                    .with_ease(Ease::OutCubic)
                    .with_repeat(Repeat::Despawn),
                BurstParticleTag,
                LetterEntity,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::systems::decor::animate_motions;
    use crate::utils::procgen::BURST_SIZE;

    fn count_particles(app: &mut App) -> usize {
        let mut query = app.world_mut().query::<&BurstParticleTag>();
        query.iter(app.world()).count()
    }

    #[test]
    fn test_burst_spawns_and_clears() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        app.insert_resource(GreetingConfig::default());
        app.add_event::<BurstRequested>();
        app.add_systems(Startup, seed_burst_rng);
        app.add_systems(Update, (spawn_love_bursts, animate_motions).chain());
        app.update();

        app.world_mut().send_event(BurstRequested { position: Vec2::new(10.0, 20.0) });
        app.update();
        assert_eq!(count_particles(&mut app), BURST_SIZE);

        for _ in 0..15 {
            app.update();
        }
        assert_eq!(count_particles(&mut app), 0);
    }

    #[test]
    fn test_two_bursts_differ() {
        let config = GreetingConfig::default();
        let mut rng = field_rng(config.decor_seed, SALT_BURSTS);
        let first = love_burst(&mut rng);
        let second = love_burst(&mut rng);
        assert_ne!(first, second);
    }
}
