//! Seeded generation of decorative particles.
//!
//! Every decorative field (floating hearts, drifting flowers, clouds, dust
//! motes) is generated once when its scene mounts. Generation is driven by a
//! `StdRng` seeded from the configured decor seed plus a per-field salt, so the
//! same seed always reproduces the same set of items.

use std::ops::Range;

use bevy::prelude::*;
use rand::prelude::*;

/// Shape drawn for a decorative item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Heart,
    Blossom,
    Sparkle,
    Cloud,
    Mote,
}

/// A single immutable decorative item.
#[derive(Debug, Clone, PartialEq)]
pub struct DecorItem {
    pub glyph: Glyph,
    pub color: Color,
    /// Normalized screen position, (0,0) top-left and (1,1) bottom-right.
    pub position: Vec2,
    /// Nominal size in pixels.
    pub size: f32,
    /// Seconds before the item starts animating.
    pub delay: f32,
    /// Seconds for one animation cycle.
    pub duration: f32,
    /// Pixel offset travelled over one cycle.
    pub drift: Vec2,
    /// Parallax speed in pixels per unit of scroll progress.
    pub speed: f32,
    /// Target scale reached during the animation.
    pub scale: f32,
    /// Rotation in degrees applied over one cycle.
    pub spin: f32,
}

/// Recipe for a uniformly sampled decorative field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub count: usize,
    /// Glyphs are assigned cyclically by index.
    pub glyphs: Vec<Glyph>,
    /// Colors are assigned cyclically by index.
    pub palette: Vec<u32>,
    pub size: Range<f32>,
    pub duration: Range<f32>,
    /// Delay grows by this step per item index.
    pub delay_step: f32,
    /// Extra random delay in `0..delay_jitter`.
    pub delay_jitter: f32,
    /// Maximum absolute drift per axis.
    pub drift: Vec2,
    pub speed: Range<f32>,
    pub scale: Range<f32>,
    /// Maximum absolute spin in degrees.
    pub spin: f32,
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self {
            count: 0,
            glyphs: vec![Glyph::Heart],
            palette: vec![0xff4d6d],
            size: 16.0..32.0,
            duration: 3.0..6.0,
            delay_step: 0.0,
            delay_jitter: 0.0,
            drift: Vec2::ZERO,
            speed: 0.0..0.0,
            scale: 1.0..1.0,
            spin: 0.0,
        }
    }
}

pub const HEART_PALETTE: [u32; 6] = [0xff1744, 0xff4081, 0xf50057, 0xff6090, 0xc51162, 0xe91e63];
pub const FLOWER_PALETTE: [u32; 6] = [0xffb7c5, 0xff7eb9, 0xffd166, 0xf9a8d4, 0xe11d48, 0xfb7185];
const CLOUD_WHITE: u32 = 0xffffff;
const CLOUD_BLUSH: u32 = 0xfdf2f8;
const MOTE_GOLD: u32 = 0xfde68a;

impl FieldSpec {
    /// Scroll-linked floaters behind the love letter.
    pub fn parallax_floaters() -> Self {
        Self {
            count: 18,
            glyphs: vec![
                Glyph::Heart,
                Glyph::Blossom,
                Glyph::Blossom,
                Glyph::Heart,
                Glyph::Blossom,
                Glyph::Blossom,
            ],
            palette: FLOWER_PALETTE.to_vec(),
            size: 16.0..32.0,
            speed: 10.0..50.0,
            ..default()
        }
    }

    /// Large bobbing hearts that float in the letter background.
    pub fn floating_hearts() -> Self {
        Self {
            count: 6,
            glyphs: vec![Glyph::Heart],
            palette: HEART_PALETTE.to_vec(),
            size: 48.0..48.0,
            scale: 0.8..1.6,
            duration: 3.0..5.0,
            ..default()
        }
    }

    /// Slow flowers wandering across the letter.
    pub fn floating_flowers() -> Self {
        Self {
            count: 4,
            glyphs: vec![Glyph::Blossom],
            palette: FLOWER_PALETTE.to_vec(),
            size: 36.0..36.0,
            duration: 25.0..35.0,
            delay_step: 0.5,
            drift: Vec2::new(60.0, 80.0),
            scale: 0.8..1.2,
            spin: 360.0,
            ..default()
        }
    }

    /// A few hearts that wander even when nothing else is animating.
    pub fn wandering_hearts() -> Self {
        Self {
            count: 3,
            glyphs: vec![Glyph::Heart],
            palette: vec![0xff4d8d],
            size: 40.0..40.0,
            duration: 20.0..28.0,
            delay_step: 0.3,
            drift: Vec2::new(40.0, 80.0),
            scale: 0.9..1.1,
            spin: 360.0,
            ..default()
        }
    }

    /// Clouds that bloom until the room is hidden.
    pub fn filling_clouds() -> Self {
        Self {
            count: 24,
            glyphs: vec![Glyph::Cloud],
            palette: vec![CLOUD_WHITE, CLOUD_BLUSH],
            size: 180.0..330.0,
            duration: 2.5..4.0,
            delay_jitter: 1.0,
            drift: Vec2::new(0.0, 30.0),
            scale: 2.0..4.0,
            ..default()
        }
    }

    /// Cloud streaks that rain down while travelling.
    pub fn falling_streaks() -> Self {
        Self {
            count: 10,
            glyphs: vec![Glyph::Cloud],
            palette: vec![CLOUD_WHITE],
            size: 60.0..140.0,
            duration: 4.0..6.0,
            delay_step: 0.4,
            drift: Vec2::new(150.0, 0.0),
            scale: 0.5..2.0,
            ..default()
        }
    }

    /// Specks of light drifting upward.
    pub fn dust_motes() -> Self {
        Self {
            count: 20,
            glyphs: vec![Glyph::Mote],
            palette: vec![MOTE_GOLD, CLOUD_WHITE],
            size: 2.0..5.0,
            duration: 15.0..25.0,
            delay_jitter: 3.0,
            drift: Vec2::new(25.0, 0.0),
            ..default()
        }
    }

    /// Fireflies over the dream world hills.
    pub fn fireflies() -> Self {
        Self {
            count: 14,
            glyphs: vec![Glyph::Sparkle, Glyph::Mote],
            palette: vec![MOTE_GOLD, 0xfff7d6],
            size: 3.0..6.0,
            duration: 20.0..35.0,
            delay_jitter: 4.0,
            drift: Vec2::new(30.0, 0.0),
            ..default()
        }
    }
}

/// Derives an independent RNG for one field from the decor seed.
pub fn field_rng(seed: u64, salt: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Converts a `0xRRGGBB` value into a color.
pub fn hex_color(rgb: u32) -> Color {
    Color::srgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Samples a range, tolerating empty ranges (returns the start).
fn sample(rng: &mut impl Rng, range: &Range<f32>) -> f32 {
    if range.end > range.start {
        rng.gen_range(range.clone())
    } else {
        range.start
    }
}

fn symmetric(rng: &mut impl Rng, max: f32) -> f32 {
    if max > 0.0 {
        rng.gen_range(-max..max)
    } else {
        0.0
    }
}

/// Generates a uniformly sampled field.
pub fn generate_field(spec: &FieldSpec, rng: &mut impl Rng) -> Vec<DecorItem> {
    (0..spec.count)
        .map(|i| {
            let glyph = spec.glyphs[i % spec.glyphs.len().max(1)];
            let color = hex_color(spec.palette[i % spec.palette.len().max(1)]);
            let position = Vec2::new(rng.gen::<f32>(), rng.gen::<f32>());
            let size = sample(rng, &spec.size);
            let duration = sample(rng, &spec.duration);
            let jitter = if spec.delay_jitter > 0.0 {
                rng.gen_range(0.0..spec.delay_jitter)
            } else {
                0.0
            };
            let drift = Vec2::new(symmetric(rng, spec.drift.x), symmetric(rng, spec.drift.y));
            let speed = sample(rng, &spec.speed);
            let scale = sample(rng, &spec.scale);
            let spin = symmetric(rng, spec.spin);

            DecorItem {
                glyph,
                color,
                position,
                size,
                delay: i as f32 * spec.delay_step + jitter,
                duration,
                drift,
                speed,
                scale,
                spin,
            }
        })
        .collect()
}

/// Clouds streaming past in parallax layers of `per_layer` clouds each.
/// Deeper layers are larger and slower to cross.
pub fn layered_clouds(count: usize, per_layer: usize, base_size: f32, rng: &mut impl Rng) -> Vec<DecorItem> {
    let per_layer = per_layer.max(1);
    (0..count)
        .map(|i| {
            let layer = (i / per_layer) as f32;
            DecorItem {
                glyph: Glyph::Cloud,
                color: hex_color(if i % 3 == 0 { CLOUD_BLUSH } else { CLOUD_WHITE }),
                position: Vec2::new(1.1, rng.gen::<f32>()),
                size: base_size + layer * 30.0 + rng.gen_range(0.0..40.0),
                delay: (i % per_layer) as f32 * 0.35,
                duration: 3.0 + layer * 0.8,
                drift: Vec2::new(-1.4, 0.0),
                speed: 0.0,
                scale: 1.8,
                spin: 0.0,
            }
        })
        .collect()
}

/// Clouds parting outward from the screen center, `count` evenly spaced angles.
/// `drift` holds the pixel offset each cloud travels.
pub fn radial_clouds(count: usize, rng: &mut impl Rng) -> Vec<DecorItem> {
    (0..count)
        .map(|i| {
            let angle = (i as f32 * 360.0 / count.max(1) as f32).to_radians();
            let distance = rng.gen_range(600.0..1000.0);
            DecorItem {
                glyph: Glyph::Cloud,
                color: hex_color(CLOUD_WHITE),
                position: Vec2::splat(0.5),
                size: rng.gen_range(150.0..270.0),
                delay: 0.0,
                duration: rng.gen_range(3.5..5.0),
                drift: Vec2::new(angle.cos(), angle.sin()) * distance,
                speed: 0.0,
                scale: 2.0,
                spin: 0.0,
            }
        })
        .collect()
}

/// Clouds spiralling away at 45 degree steps with growing radius.
pub fn spiral_clouds(count: usize, rng: &mut impl Rng) -> Vec<DecorItem> {
    (0..count)
        .map(|i| {
            let angle = (i as f32 * 45.0).to_radians();
            let radius = 200.0 + i as f32 * 30.0;
            DecorItem {
                glyph: Glyph::Cloud,
                color: hex_color(CLOUD_BLUSH),
                position: Vec2::splat(0.5),
                size: rng.gen_range(80.0..150.0),
                delay: i as f32 * 0.1,
                duration: rng.gen_range(3.0..4.0),
                drift: Vec2::new(angle.cos(), angle.sin()) * radius,
                speed: 0.0,
                scale: 1.5,
                spin: 180.0,
            }
        })
        .collect()
}

/// One particle of a click burst.
#[derive(Debug, Clone, PartialEq)]
pub struct BurstParticle {
    pub glyph: Glyph,
    pub color: Color,
    /// Pixel offset from the click point reached at the end of the animation.
    pub offset: Vec2,
    pub size: f32,
    pub duration: f32,
    /// Rotation in degrees.
    pub spin: f32,
}

/// Number of particles in one love burst.
pub const BURST_SIZE: usize = 14;

/// Generates a ring of particles for a click burst.
pub fn love_burst(rng: &mut impl Rng) -> Vec<BurstParticle> {
    let glyphs = [Glyph::Heart, Glyph::Blossom, Glyph::Heart, Glyph::Sparkle];
    (0..BURST_SIZE)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / BURST_SIZE as f32 + rng.gen_range(0.0..0.6);
            let distance = rng.gen_range(40.0..130.0);
            let palette = if i % 2 == 0 { &HEART_PALETTE } else { &FLOWER_PALETTE };
            BurstParticle {
                glyph: glyphs[rng.gen_range(0..glyphs.len())],
                color: hex_color(palette[rng.gen_range(0..palette.len())]),
                offset: Vec2::new(angle.cos(), angle.sin()) * distance,
                size: rng.gen_range(18.0..34.0),
                duration: rng.gen_range(0.9..1.3),
                spin: rng.gen_range(-30.0..30.0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_produces_same_field() {
        let spec = FieldSpec::parallax_floaters();
        let a = generate_field(&spec, &mut field_rng(2024, 1));
        let b = generate_field(&spec, &mut field_rng(2024, 1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_salt_changes_field() {
        let spec = FieldSpec::parallax_floaters();
        let a = generate_field(&spec, &mut field_rng(2024, 1));
        let b = generate_field(&spec, &mut field_rng(2024, 2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_field_counts_and_ranges() {
        let spec = FieldSpec::parallax_floaters();
        let items = generate_field(&spec, &mut field_rng(7, 0));
        assert_eq!(items.len(), 18);
        for item in &items {
            assert!((16.0..32.0).contains(&item.size));
            assert!((10.0..50.0).contains(&item.speed));
            assert!((0.0..1.0).contains(&item.position.x));
            assert!((0.0..1.0).contains(&item.position.y));
        }
        // Glyphs cycle heart, blossom, blossom.
        assert_eq!(items[0].glyph, Glyph::Heart);
        assert_eq!(items[1].glyph, Glyph::Blossom);
        assert_eq!(items[3].glyph, Glyph::Heart);
    }

    #[test]
    fn test_fixed_sizes_from_empty_ranges() {
        let items = generate_field(&FieldSpec::floating_hearts(), &mut field_rng(1, 0));
        assert_eq!(items.len(), 6);
        assert!(items.iter().all(|h| h.size == 48.0));
        assert!(items.iter().all(|h| (0.8..1.6).contains(&h.scale)));
        assert_eq!(items[0].color, hex_color(HEART_PALETTE[0]));
    }

    #[test]
    fn test_delay_steps_by_index() {
        let items = generate_field(&FieldSpec::floating_flowers(), &mut field_rng(1, 0));
        for (i, item) in items.iter().enumerate() {
            assert!((item.delay - i as f32 * 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_layered_clouds_grow_with_depth() {
        let clouds = layered_clouds(24, 8, 120.0, &mut field_rng(3, 0));
        assert_eq!(clouds.len(), 24);
        assert!((clouds[0].duration - 3.0).abs() < 1e-5);
        assert!((clouds[23].duration - 4.6).abs() < 1e-5);
        for (i, cloud) in clouds.iter().enumerate() {
            let layer = (i / 8) as f32;
            let min = 120.0 + layer * 30.0;
            assert!(cloud.size >= min && cloud.size < min + 40.0);
        }
    }

    #[test]
    fn test_radial_clouds_point_outward() {
        let clouds = radial_clouds(18, &mut field_rng(5, 0));
        assert_eq!(clouds.len(), 18);
        for cloud in &clouds {
            let d = cloud.drift.length();
            assert!((600.0..1000.0).contains(&d));
        }
        // First cloud heads straight right.
        assert!(clouds[0].drift.y.abs() < 1e-3);
        assert!(clouds[0].drift.x > 0.0);
    }

    #[test]
    fn test_spiral_radius_grows() {
        let clouds = spiral_clouds(8, &mut field_rng(5, 0));
        assert!((clouds[0].drift.length() - 200.0).abs() < 1e-3);
        assert!((clouds[7].drift.length() - 410.0).abs() < 1e-3);
    }

    #[test]
    fn test_love_burst_shape() {
        let burst = love_burst(&mut field_rng(11, 0));
        assert_eq!(burst.len(), BURST_SIZE);
        for p in &burst {
            let d = p.offset.length();
            assert!(d >= 40.0 - 1e-3 && d < 130.0 + 1e-3);
            assert!((0.9..1.3).contains(&p.duration));
            assert!((18.0..34.0).contains(&p.size));
            assert!(p.spin.abs() <= 30.0);
        }
    }
}
