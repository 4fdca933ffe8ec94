use bevy::prelude::*;

use crate::events::PhaseAdvanced;
use crate::resources::{CloudPhase, PhaseSequencer};

/// Polls the sequencer against the virtual clock and pushes any newly reached
/// phase into the `CloudPhase` state.
pub fn advance_cloud_phase(
    time: Res<Time>,
    mut sequencer: ResMut<PhaseSequencer>,
    mut next_phase: ResMut<NextState<CloudPhase>>,
    mut advanced: EventWriter<PhaseAdvanced>,
) {
    if !sequencer.is_triggered() {
        return;
    }
    if let Some(phase) = sequencer.poll(time.elapsed_secs()) {
        next_phase.set(phase);
        advanced.send(PhaseAdvanced { phase });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::events::BookPicked;
    use crate::plugins::core::CorePlugin;
    use crate::resources::ShelfLayout;
    use crate::systems::bookshelf::resolve_book_picks;

    const STEP_MS: u64 = 100;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::state::app::StatesPlugin);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(STEP_MS)));
        app.add_plugins(CorePlugin);
        app.add_systems(Update, (resolve_book_picks, advance_cloud_phase).chain());
        app.update();
        app
    }

    #[derive(Resource, Default)]
    struct Advances(Vec<CloudPhase>);

    fn record_advances(mut advanced: EventReader<PhaseAdvanced>, mut seen: ResMut<Advances>) {
        seen.0.extend(advanced.read().map(|event| event.phase));
    }

    fn phase(app: &App) -> CloudPhase {
        *app.world().resource::<State<CloudPhase>>().get()
    }

    fn run_for(app: &mut App, seconds: f32) {
        let frames = (seconds * 1000.0 / STEP_MS as f32).round() as usize;
        for _ in 0..frames {
            app.update();
        }
    }

    #[test]
    fn test_stays_idle_without_trigger() {
        let mut app = app();
        run_for(&mut app, 12.0);
        assert_eq!(phase(&app), CloudPhase::Idle);
    }

    #[test]
    fn test_phases_follow_schedule() {
        let mut app = app();
        let target = app.world().resource::<ShelfLayout>().target_id;
        app.world_mut().send_event(BookPicked { id: target });
        app.update();
        assert_eq!(phase(&app), CloudPhase::Idle);

        run_for(&mut app, 0.5);
        assert_eq!(phase(&app), CloudPhase::Idle);

        run_for(&mut app, 1.0);
        assert_eq!(phase(&app), CloudPhase::Filling);

        run_for(&mut app, 3.0);
        assert_eq!(phase(&app), CloudPhase::Traveling);

        run_for(&mut app, 5.0);
        assert_eq!(phase(&app), CloudPhase::Arrived);

        run_for(&mut app, 5.0);
        assert_eq!(phase(&app), CloudPhase::Arrived);
    }

    #[test]
    fn test_each_phase_announced_once_in_order() {
        let mut app = app();
        app.init_resource::<Advances>();
        app.add_systems(Update, record_advances.after(advance_cloud_phase));
        let target = app.world().resource::<ShelfLayout>().target_id;
        app.world_mut().send_event(BookPicked { id: target });
        app.update();

        run_for(&mut app, 12.0);
        assert_eq!(
            app.world().resource::<Advances>().0,
            vec![CloudPhase::Filling, CloudPhase::Traveling, CloudPhase::Arrived]
        );
    }

    #[test]
    fn test_second_correct_pick_does_not_restart() {
        let mut app = app();
        let target = app.world().resource::<ShelfLayout>().target_id;
        app.world_mut().send_event(BookPicked { id: target });
        app.update();
        run_for(&mut app, 2.0);
        assert_eq!(phase(&app), CloudPhase::Filling);

        app.world_mut().send_event(BookPicked { id: target });
        app.update();
        run_for(&mut app, 2.5);
        assert_eq!(phase(&app), CloudPhase::Traveling);
    }
}
