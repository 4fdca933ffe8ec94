//! Book picking, shelf tilt and the drop animation.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use leafwing_input_manager::prelude::*;

use crate::components::book::{BookSpine, ShelfFrame, ShelfTilt};
use crate::components::decor::Motion;
use crate::events::{BookPicked, JourneyStarted};
use crate::plugins::core::cursor_world_position;
use crate::plugins::input::GreetingAction;
use crate::resources::{GreetingConfig, Notice, PhaseSequencer, PickOutcome, ShelfLayout};
use crate::utils::easing::Ease;
use crate::utils::geometry::normalized_within;

/// Distance the unchosen books fall, in pixels.
pub const DROP_DISTANCE: f32 = 600.0;
/// Seconds each falling book takes.
pub const DROP_DURATION: f32 = 0.8;

const TILT_STIFFNESS: f32 = 8.0;

/// True if `point` (world space) lies on the book drawn with `transform`.
pub fn hit_book(spine: &BookSpine, transform: &GlobalTransform, point: Vec2) -> bool {
    let local = transform.affine().inverse().transform_point3(point.extend(0.0));
    local.x.abs() <= spine.size.x / 2.0 && local.y.abs() <= spine.size.y / 2.0
}

/// Turns a left click over a book into a [`BookPicked`] event.
pub fn pick_book_on_click(
    action_query: Query<&ActionState<GreetingAction>, With<Camera2d>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    books: Query<(&BookSpine, &GlobalTransform)>,
    mut picks: EventWriter<BookPicked>,
) {
    let Ok(action_state) = action_query.get_single() else { return; };
    if !action_state.just_pressed(&GreetingAction::Select) {
        return;
    }
    let Some(cursor) = cursor_world_position(&window_query, &camera_query) else { return; };

    if let Some((spine, _)) = books.iter().find(|(spine, transform)| hit_book(spine, transform, cursor)) {
        picks.send(BookPicked { id: spine.id });
    }
}

/// Resolves picks against the shelf: wrong books show a hint, the target
/// starts the cloud journey.
pub fn resolve_book_picks(
    mut picks: EventReader<BookPicked>,
    mut shelf: ResMut<ShelfLayout>,
    mut notice: ResMut<Notice>,
    mut sequencer: ResMut<PhaseSequencer>,
    mut journeys: EventWriter<JourneyStarted>,
    config: Res<GreetingConfig>,
    time: Res<Time>,
) {
    for pick in picks.read() {
        match shelf.pick(pick.id) {
            PickOutcome::Wrong => {
                info!("Book #{} is not the one", pick.id);
                notice.show(config.wrong_pick_message.clone(), config.notices.wrong_pick);
            }
            PickOutcome::Correct => {
                info!("Book #{} chosen, starting the journey", pick.id);
                if sequencer.trigger(time.elapsed_secs()) {
                    journeys.send(JourneyStarted { book_id: pick.id });
                }
            }
            PickOutcome::Ignored => {
                debug!("Ignoring pick of book #{}", pick.id);
            }
        }
    }
}

/// Drops every unchosen book off the shelf and lifts the chosen one.
pub fn drop_books(
    mut commands: Commands,
    mut journeys: EventReader<JourneyStarted>,
    shelf: Res<ShelfLayout>,
    books: Query<(Entity, &BookSpine, &Transform)>,
) {
    let Some(started) = journeys.read().last() else { return; };

    for (entity, spine, transform) in &books {
        let Some(book) = shelf.book(spine.id) else { continue; };
        let from = transform.translation.truncate();

        let motion = if spine.id == started.book_id {
            Motion::between(from, from + Vec2::new(0.0, 40.0), 0.6)
                .with_scale(1.0, 1.15)
                .with_ease(Ease::DREAMY)
        } else {
            Motion::between(from, from - Vec2::new(0.0, DROP_DISTANCE), DROP_DURATION)
                .with_spin(book.drop_rot * 2.0)
                .with_delay(book.drop_delay())
                .with_ease(Ease::FALL)
        };
        commands.entity(entity).insert(motion);
    }
}

/// Leans the shelf toward the cursor while it hovers over the frame.
pub fn tilt_shelf(
    time: Res<Time>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    mut frames: Query<(&ShelfFrame, &GlobalTransform, &mut ShelfTilt, &mut Transform)>,
) {
    let cursor = cursor_world_position(&window_query, &camera_query);
    for (frame, global, mut tilt, mut transform) in &mut frames {
        let rect = Rect::from_center_size(global.translation().truncate(), frame.size);
        tilt.aim(cursor.and_then(|c| normalized_within(rect, c)));
        tilt.settle(time.delta_secs(), TILT_STIFFNESS);
        transform.rotation = tilt.rotation();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::plugins::core::CorePlugin;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::state::app::StatesPlugin);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        app.add_plugins(CorePlugin);
        app.add_systems(Update, (resolve_book_picks, drop_books.after(resolve_book_picks)));
        app.update();
        app
    }

    fn pick(app: &mut App, id: usize) {
        app.world_mut().send_event(BookPicked { id });
        app.update();
    }

    #[test]
    fn test_hit_book() {
        let spine = BookSpine { id: 0, size: Vec2::new(30.0, 100.0) };
        let transform = GlobalTransform::from_xyz(100.0, 0.0, 0.0);
        assert!(hit_book(&spine, &transform, Vec2::new(110.0, 40.0)));
        assert!(!hit_book(&spine, &transform, Vec2::new(120.0, 0.0)));
        assert!(!hit_book(&spine, &transform, Vec2::new(100.0, 60.0)));
    }

    #[test]
    fn test_wrong_pick_shows_notice() {
        let mut app = app();
        let target = app.world().resource::<ShelfLayout>().target_id;
        pick(&mut app, (target + 1) % 18);

        let notice = app.world().resource::<Notice>();
        assert_eq!(notice.text(), Some("Not this one ✋"));
        assert!(!app.world().resource::<PhaseSequencer>().is_triggered());
        assert!(!app.world().resource::<ShelfLayout>().is_opened());
    }

    #[test]
    fn test_correct_pick_triggers_sequence_and_drop() {
        let mut app = app();
        let target = app.world().resource::<ShelfLayout>().target_id;
        let other = (target + 1) % 18;
        let falling = app
            .world_mut()
            .spawn((BookSpine { id: other, size: Vec2::new(30.0, 100.0) }, Transform::default()))
            .id();
        let chosen = app
            .world_mut()
            .spawn((BookSpine { id: target, size: Vec2::new(30.0, 100.0) }, Transform::default()))
            .id();

        pick(&mut app, target);

        let world = app.world();
        assert!(world.resource::<PhaseSequencer>().is_triggered());
        assert_eq!(world.resource::<ShelfLayout>().selected(), Some(target));
        assert_eq!(world.resource::<Notice>().text(), None);

        let drop = world.get::<Motion>(falling).unwrap();
        assert_eq!(drop.to, Vec2::new(0.0, -DROP_DISTANCE));
        assert_eq!(drop.duration, DROP_DURATION);
        let rise = world.get::<Motion>(chosen).unwrap();
        assert!(rise.to.y > 0.0);
    }

    #[test]
    fn test_picks_after_selection_are_ignored() {
        let mut app = app();
        let target = app.world().resource::<ShelfLayout>().target_id;
        pick(&mut app, target);
        pick(&mut app, (target + 2) % 18);

        assert_eq!(app.world().resource::<Notice>().text(), None);
        assert_eq!(app.world().resource::<ShelfLayout>().selected(), Some(target));
    }
}
