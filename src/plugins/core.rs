use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use leafwing_input_manager::prelude::*;

use crate::events::*;
use crate::plugins::input::{get_default_input_map, GreetingAction};
use crate::resources::{
    CloudPhase, GreetingConfig, LetterReveal, MusicPlayer, Notice, PhaseSequencer, ScrollView, ShelfLayout,
};

/// Window size used when no primary window exists (headless runs and tests).
pub const FALLBACK_VIEWPORT: Vec2 = Vec2::new(1200.0, 800.0);

/// Whether the love letter page is showing.
#[derive(States, Default, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum LetterState {
    #[default]
    Sealed,
    Open,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<GreetingConfig>()
            .cloned()
            .unwrap_or_default();
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                error!("{}, using default config", e);
                GreetingConfig::default()
            }
        };

        let shelf = ShelfLayout::generate(config.shelf_seed, config.book_count);
        info!(
            "Shelf generated from seed {}: {} books, target #{}",
            config.shelf_seed,
            shelf.books.len(),
            shelf.target_id
        );
        let reveal = LetterReveal::new(config.reveal_thresholds.clone()).unwrap_or_default();

        app.init_state::<CloudPhase>()
            .init_state::<LetterState>()
            .add_event::<BookPicked>()
            .add_event::<JourneyStarted>()
            .add_event::<PhaseAdvanced>()
            .add_event::<MusicRequested>()
            .add_event::<MusicStopRequested>()
            .add_event::<BurstRequested>()
            .add_event::<ParagraphRevealed>()
            .insert_resource(PhaseSequencer::new(config.phases))
            .insert_resource(shelf)
            .insert_resource(reveal)
            .insert_resource(ScrollView::default())
            .init_resource::<Notice>()
            .init_resource::<MusicPlayer>()
            .insert_resource(config)
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, (log_phase_advances, log_letter_transitions));
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb_u8(0xeb, 0xe4, 0xd8)),
            ..default()
        },
        OrthographicProjection {
            near: -1000.0,
            far: 1000.0,
            scale: 1.0,
            ..OrthographicProjection::default_2d()
        },
        Transform::from_xyz(0.0, 0.0, 100.0),
        InputManagerBundle::<GreetingAction>::with_map(get_default_input_map()),
    ));
}

fn log_phase_advances(
    time: Res<Time>,
    sequencer: Res<PhaseSequencer>,
    mut advanced: EventReader<PhaseAdvanced>,
) {
    for event in advanced.read() {
        let since = sequencer.elapsed(time.elapsed_secs()).unwrap_or_default();
        info!("Cloud phase: {:?} ({:.1}s after the pick)", event.phase, since);
    }
}

fn log_letter_transitions(state: Res<State<LetterState>>) {
    if state.is_changed() {
        info!("Letter: {:?}", state.get());
    }
}

/// Generic cleanup system: despawns every entity tagged with scene marker `T`.
pub fn despawn_scene_entities<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    let count = query.iter().count();
    if count > 0 {
        info!("Despawning {} {} entities", count, std::any::type_name::<T>());
    }
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

/// Size of the primary window in logical pixels.
pub fn viewport_size(window: Option<&Window>) -> Vec2 {
    window.map_or(FALLBACK_VIEWPORT, |w| Vec2::new(w.width(), w.height()))
}

/// Cursor position in world coordinates, if the cursor is over the window.
pub fn cursor_world_position(
    window_query: &Query<&Window, With<PrimaryWindow>>,
    camera_query: &Query<(&Camera, &GlobalTransform), With<Camera2d>>,
) -> Option<Vec2> {
    let window = window_query.get_single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = camera_query.get_single().ok()?;
    camera.viewport_to_world_2d(camera_transform, cursor).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Component)]
    struct Marker;

    fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::state::app::StatesPlugin);
        app
    }

    #[test]
    fn test_core_inserts_session_resources() {
        let mut app = headless_app();
        app.insert_resource(GreetingConfig {
            shelf_seed: 7,
            ..default()
        });
        app.add_plugins(CorePlugin);
        app.update();

        let world = app.world();
        let shelf = world.resource::<ShelfLayout>();
        assert_eq!(shelf.books, ShelfLayout::generate(7, 18).books);
        assert_eq!(world.resource::<LetterReveal>().len(), 7);
        assert!(!world.resource::<PhaseSequencer>().is_triggered());
        assert_eq!(*world.resource::<State<CloudPhase>>().get(), CloudPhase::Idle);
        assert_eq!(*world.resource::<State<LetterState>>().get(), LetterState::Sealed);
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let mut app = headless_app();
        app.insert_resource(GreetingConfig {
            book_count: 0,
            ..default()
        });
        app.add_plugins(CorePlugin);
        assert_eq!(*app.world().resource::<GreetingConfig>(), GreetingConfig::default());
        assert_eq!(app.world().resource::<ShelfLayout>().books.len(), 18);
    }

    #[test]
    fn test_despawn_scene_entities() {
        let mut app = headless_app();
        app.world_mut().spawn(Marker);
        app.world_mut().spawn(Marker);
        let keep = app.world_mut().spawn_empty().id();
        app.add_systems(Update, despawn_scene_entities::<Marker>);
        app.update();

        let mut query = app.world_mut().query::<&Marker>();
        assert_eq!(query.iter(app.world()).count(), 0);
        assert!(app.world().get_entity(keep).is_ok());
    }

    #[test]
    fn test_viewport_fallback() {
        assert_eq!(viewport_size(None), FALLBACK_VIEWPORT);
    }
}
