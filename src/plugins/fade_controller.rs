//! FadeController plugin - provides smooth alpha fade animations.
//!
//! Registers `animate_fades`, which steps every FadeController toward its
//! target, and `apply_fade_alpha`, which copies the alpha onto the entity's
//! text color, fill and stroke.

use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;

use crate::components::fade_controller::FadeController;

pub struct FadeControllerPlugin;

impl Plugin for FadeControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (animate_fades, apply_fade_alpha.after(animate_fades)));
    }
}

/// Steps all FadeController components by the frame delta.
pub fn animate_fades(time: Res<Time>, mut query: Query<&mut FadeController>) {
    let dt = time.delta_secs();
    for mut fade in &mut query {
        if fade.is_fading() {
            fade.step(dt);
        }
    }
}

/// Applies the current alpha of changed controllers to what they draw.
pub fn apply_fade_alpha(
    mut query: Query<
        (
            &FadeController,
            Option<&mut TextColor>,
            Option<&mut Fill>,
            Option<&mut Stroke>,
        ),
        Changed<FadeController>,
    >,
) {
    for (fade, text, fill, stroke) in &mut query {
        let alpha = fade.current_alpha;
        if let Some(mut color) = text {
            color.0 = color.0.with_alpha(alpha);
        }
        if let Some(mut fill) = fill {
            fill.color = fill.color.with_alpha(alpha);
        }
        if let Some(mut stroke) = stroke {
            stroke.color = stroke.color.with_alpha(alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;

    #[test]
    fn test_fade_reaches_text_color() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        app.add_plugins(FadeControllerPlugin);

        let mut fade = FadeController::hidden();
        fade.fade_in(0.5);
        let entity = app
            .world_mut()
            .spawn((fade, TextColor(Color::srgba(1.0, 0.0, 0.0, 0.0))))
            .id();

        for _ in 0..10 {
            app.update();
        }

        let world = app.world();
        assert!(world.get::<FadeController>(entity).unwrap().is_visible());
        let color = world.get::<TextColor>(entity).unwrap().0;
        assert!((color.alpha() - 1.0).abs() < 1e-4);
    }
}
