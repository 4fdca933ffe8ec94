//! Per-frame animation of decorative shapes.

use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;
use noise::{NoiseFn, Perlin};

use crate::components::decor::{FloatBob, Motion, Parallax, Repeat};
use crate::resources::ScrollView;
use crate::utils::geometry::{centered_rect, glyph_path};
use crate::utils::procgen::Glyph;

/// Shared noise field for floating decorations.
#[derive(Resource, Clone)]
pub struct BobNoise(pub Perlin);

impl BobNoise {
    pub fn new(seed: u32) -> Self {
        Self(Perlin::new(seed))
    }

    /// Roughly unit displacement per axis at time `t` for a bobber at `phase`.
    pub fn sample(&self, t: f64, phase: f64) -> Vec2 {
        Vec2::new(
            self.0.get([t, phase]) as f32,
            self.0.get([phase + 17.0, t]) as f32,
        )
    }
}

impl Default for BobNoise {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Filled vector shape for a decorative glyph.
pub fn glyph_shape(glyph: Glyph, size: f32, color: Color, translation: Vec3) -> (ShapeBundle, Fill) {
    (
        ShapeBundle {
            path: glyph_path(glyph, size),
            transform: Transform::from_translation(translation),
            ..default()
        },
        Fill::color(color),
    )
}

/// Filled axis-aligned rectangle centered on `translation`.
pub fn rect_shape(size: Vec2, color: Color, translation: Vec3) -> (ShapeBundle, Fill) {
    (
        ShapeBundle {
            path: centered_rect(size.x, size.y),
            transform: Transform::from_translation(translation),
            ..default()
        },
        Fill::color(color),
    )
}

/// Advances every [`Motion`] and writes its pose and opacity.
pub fn animate_motions(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(
        Entity,
        &mut Motion,
        &mut Transform,
        Option<&mut Fill>,
        Option<&mut Stroke>,
        Option<&mut TextColor>,
    )>,
) {
    let dt = time.delta_secs();
    for (entity, mut motion, mut transform, fill, stroke, text) in &mut query {
        motion.tick(dt);

        if motion.repeat == Repeat::Despawn && motion.is_finished() {
            commands.entity(entity).despawn_recursive();
            continue;
        }

        let pose = motion.sample();
        transform.translation.x = pose.translation.x;
        transform.translation.y = pose.translation.y;
        transform.rotation = Quat::from_rotation_z(pose.rotation);
        transform.scale = Vec3::new(pose.scale, pose.scale, 1.0);

        if let Some(mut fill) = fill {
            fill.color = fill.color.with_alpha(pose.alpha);
        }
        if let Some(mut stroke) = stroke {
            stroke.color = stroke.color.with_alpha(pose.alpha);
        }
        if let Some(mut text) = text {
            text.0 = text.0.with_alpha(pose.alpha);
        }
    }
}

pub fn float_bobbers(time: Res<Time>, noise: Res<BobNoise>, mut query: Query<(&FloatBob, &mut Transform)>) {
    let t = time.elapsed_secs_f64();
    for (bob, mut transform) in &mut query {
        let offset = noise.sample(t * bob.speed as f64, bob.phase) * bob.amplitude;
        transform.translation.x = bob.base.x + offset.x;
        transform.translation.y = bob.base.y + offset.y;
    }
}

pub fn drift_parallax(scroll: Res<ScrollView>, mut query: Query<(&Parallax, &mut Transform)>) {
    let progress = scroll.progress();
    for (parallax, mut transform) in &mut query {
        let (position, rotation) = parallax.at(progress);
        transform.translation.x = position.x;
        transform.translation.y = position.y;
        transform.rotation = Quat::from_rotation_z(rotation);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        app.add_systems(Update, animate_motions);
        app
    }

    #[test]
    fn test_despawn_motion_removes_entity() {
        let mut app = app();
        let entity = app
            .world_mut()
            .spawn((
                Motion::between(Vec2::ZERO, Vec2::X * 50.0, 0.3).with_repeat(Repeat::Despawn),
                Transform::default(),
            ))
            .id();

        app.update();
        assert!(app.world().get_entity(entity).is_ok());

        for _ in 0..6 {
            app.update();
        }
        assert!(app.world().get_entity(entity).is_err());
    }

    #[test]
    fn test_once_motion_writes_transform() {
        let mut app = app();
        let entity = app
            .world_mut()
            .spawn((
                Motion::between(Vec2::ZERO, Vec2::new(0.0, -600.0), 0.2).with_spin(90.0),
                Transform::from_xyz(0.0, 0.0, 3.0),
            ))
            .id();

        for _ in 0..5 {
            app.update();
        }

        let transform = app.world().get::<Transform>(entity).unwrap();
        assert_eq!(transform.translation, Vec3::new(0.0, -600.0, 3.0));
        let (_, _, z) = transform.rotation.to_euler(EulerRot::XYZ);
        assert!((z - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn test_parallax_follows_scroll() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        let mut view = ScrollView::new(3200.0, 800.0);
        view.scroll_by(2400.0);
        app.insert_resource(view);
        app.add_systems(Update, drift_parallax);
        let entity = app
            .world_mut()
            .spawn((Parallax { base: Vec2::ZERO, speed: 30.0 }, Transform::default()))
            .id();

        app.update();
        let transform = app.world().get::<Transform>(entity).unwrap();
        assert!((transform.translation.y + 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_bob_noise_is_deterministic() {
        let a = BobNoise::new(3);
        let b = BobNoise::new(3);
        for i in 0..20 {
            let t = i as f64 * 0.37;
            assert_eq!(a.sample(t, 1.5), b.sample(t, 1.5));
        }
    }
}
