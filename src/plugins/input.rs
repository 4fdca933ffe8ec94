use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

#[derive(Actionlike, PartialEq, Eq, Clone, Copy, Hash, Debug, Reflect)]
pub enum GreetingAction {
    /// Pick a book, or burst hearts on the letter page.
    Select,
    #[actionlike(Axis)]
    Scroll,
    ScrollUp,
    ScrollDown,
    StopMusic,
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<GreetingAction>::default());
    }
}

pub fn get_default_input_map() -> InputMap<GreetingAction> {
    let mut input_map = InputMap::default();

    input_map.insert(GreetingAction::Select, MouseButton::Left);

    // Wheel up is positive, so the scroll system negates it.
    input_map.insert_axis(GreetingAction::Scroll, MouseScrollAxis::Y);
    input_map.insert(GreetingAction::ScrollUp, KeyCode::ArrowUp);
    input_map.insert(GreetingAction::ScrollUp, KeyCode::PageUp);
    input_map.insert(GreetingAction::ScrollDown, KeyCode::ArrowDown);
    input_map.insert(GreetingAction::ScrollDown, KeyCode::PageDown);
    input_map.insert(GreetingAction::ScrollDown, KeyCode::Space);

    input_map.insert(GreetingAction::StopMusic, KeyCode::KeyM);

    input_map
}
