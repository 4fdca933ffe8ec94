use bevy::prelude::*;

use crate::resources::GreetingConfig;
use crate::systems::decor::{animate_motions, drift_parallax, float_bobbers, BobNoise};

/// Animates every decorative shape, whatever scene it belongs to.
pub struct DecorPlugin;

impl Plugin for DecorPlugin {
    fn build(&self, app: &mut App) {
        let seed = app
            .world()
            .get_resource::<GreetingConfig>()
            .map_or(0, |config| config.decor_seed as u32);

        app.insert_resource(BobNoise::new(seed))
            .add_systems(Update, (animate_motions, float_bobbers, drift_parallax));
    }
}
