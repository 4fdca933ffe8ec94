//! Vector outlines for the decorative glyphs and layout hit-testing helpers.

use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;

use crate::utils::procgen::Glyph;

/// Heart outline of roughly `size` pixels across, centered on the origin,
/// tip pointing down.
pub fn heart_path(size: f32) -> Path {
    let k = size / 2.0;
    // Unit heart spans x in [-1, 1] and y in [0, 1.8] with the tip at y = 1.8.
    let p = |x: f32, y: f32| Vec2::new(x * k, (0.9 - y) * k);

    let mut pb = PathBuilder::new();
    pb.move_to(p(0.0, 0.5));
    pb.cubic_bezier_to(p(0.0, 0.5), p(-0.25, 0.0), p(-0.5, 0.0));
    pb.cubic_bezier_to(p(-1.0, 0.0), p(-1.0, 0.6), p(-1.0, 0.6));
    pb.cubic_bezier_to(p(-1.0, 1.1), p(-0.5, 1.4), p(0.0, 1.8));
    pb.cubic_bezier_to(p(0.5, 1.4), p(1.0, 1.1), p(1.0, 0.6));
    pb.cubic_bezier_to(p(1.0, 0.6), p(1.0, 0.0), p(0.5, 0.0));
    pb.cubic_bezier_to(p(0.25, 0.0), p(0.0, 0.5), p(0.0, 0.5));
    pb.close();
    pb.build()
}

/// Five-petal blossom with petals of `size / 2` radius.
pub fn blossom_path(size: f32) -> Path {
    let r = size / 2.0;
    let mut pb = PathBuilder::new();
    let petals = 5;
    for i in 0..petals {
        let a0 = std::f32::consts::TAU * i as f32 / petals as f32;
        let a1 = std::f32::consts::TAU * (i as f32 + 0.5) / petals as f32;
        let a2 = std::f32::consts::TAU * (i + 1) as f32 / petals as f32;
        let inner = r * 0.25;
        let start = Vec2::new(a0.cos(), a0.sin()) * inner;
        let tip = Vec2::new(a1.cos(), a1.sin()) * r;
        let end = Vec2::new(a2.cos(), a2.sin()) * inner;
        if i == 0 {
            pb.move_to(start);
        }
        pb.quadratic_bezier_to(tip + Vec2::new(-a1.sin(), a1.cos()) * r * 0.45, tip);
        pb.quadratic_bezier_to(tip + Vec2::new(a1.sin(), -a1.cos()) * r * 0.45, end);
    }
    pb.close();
    pb.build()
}

/// Four-pointed sparkle star.
pub fn sparkle_path(size: f32) -> Path {
    let r = size / 2.0;
    let w = r * 0.22;
    let mut pb = PathBuilder::new();
    pb.move_to(Vec2::new(0.0, r));
    pb.quadratic_bezier_to(Vec2::new(w, w), Vec2::new(r, 0.0));
    pb.quadratic_bezier_to(Vec2::new(w, -w), Vec2::new(0.0, -r));
    pb.quadratic_bezier_to(Vec2::new(-w, -w), Vec2::new(-r, 0.0));
    pb.quadratic_bezier_to(Vec2::new(-w, w), Vec2::new(0.0, r));
    pb.close();
    pb.build()
}

/// Puffy cloud `width` pixels wide and half as tall.
pub fn cloud_path(width: f32) -> Path {
    let h = width / 2.0;
    let left = -width / 2.0;
    let right = width / 2.0;
    let base = -h / 2.0;

    let mut pb = PathBuilder::new();
    pb.move_to(Vec2::new(left + h * 0.3, base));
    pb.cubic_bezier_to(
        Vec2::new(left - h * 0.2, base),
        Vec2::new(left - h * 0.1, base + h * 0.55),
        Vec2::new(left + h * 0.35, base + h * 0.5),
    );
    pb.cubic_bezier_to(
        Vec2::new(left + h * 0.3, base + h * 1.1),
        Vec2::new(-h * 0.1, base + h * 1.15),
        Vec2::new(0.0, base + h * 0.8),
    );
    pb.cubic_bezier_to(
        Vec2::new(h * 0.2, base + h * 1.2),
        Vec2::new(right - h * 0.2, base + h * 1.0),
        Vec2::new(right - h * 0.35, base + h * 0.55),
    );
    pb.cubic_bezier_to(
        Vec2::new(right + h * 0.15, base + h * 0.55),
        Vec2::new(right + h * 0.1, base),
        Vec2::new(right - h * 0.3, base),
    );
    pb.close();
    pb.build()
}

/// Outline for any decorative glyph.
pub fn glyph_path(glyph: Glyph, size: f32) -> Path {
    match glyph {
        Glyph::Heart => heart_path(size),
        Glyph::Blossom => blossom_path(size),
        Glyph::Sparkle => sparkle_path(size),
        Glyph::Cloud => cloud_path(size),
        Glyph::Mote => GeometryBuilder::build_as(&shapes::Circle {
            radius: size / 2.0,
            center: Vec2::ZERO,
        }),
    }
}

/// Axis-aligned rectangle centered on the origin.
pub fn centered_rect(width: f32, height: f32) -> Path {
    GeometryBuilder::build_as(&shapes::Rectangle {
        extents: Vec2::new(width, height),
        origin: RectangleOrigin::Center,
        ..default()
    })
}

/// Rectangle with rounded corners, centered on the origin.
pub fn rounded_rect(width: f32, height: f32, radius: f32) -> Path {
    let (hw, hh) = (width / 2.0, height / 2.0);
    GeometryBuilder::build_as(&shapes::RoundedPolygon {
        points: vec![
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ],
        radius,
        closed: true,
    })
}

/// Converts a normalized position ((0,0) top-left) into world coordinates
/// for a camera centered on the origin.
pub fn normalized_to_world(normalized: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        (normalized.x - 0.5) * viewport.x,
        (0.5 - normalized.y) * viewport.y,
    )
}

/// Position of `point` inside `rect` as fractions, (0,0) top-left.
/// Returns `None` when the point lies outside.
pub fn normalized_within(rect: Rect, point: Vec2) -> Option<Vec2> {
    if !rect.contains(point) || rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        (point.x - rect.min.x) / rect.width(),
        (rect.max.y - point.y) / rect.height(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_to_world_corners() {
        let viewport = Vec2::new(1200.0, 800.0);
        assert_eq!(normalized_to_world(Vec2::ZERO, viewport), Vec2::new(-600.0, 400.0));
        assert_eq!(normalized_to_world(Vec2::ONE, viewport), Vec2::new(600.0, -400.0));
        assert_eq!(normalized_to_world(Vec2::splat(0.5), viewport), Vec2::ZERO);
    }

    #[test]
    fn test_normalized_within() {
        let rect = Rect::from_center_size(Vec2::ZERO, Vec2::new(200.0, 100.0));
        let top_left = normalized_within(rect, Vec2::new(-100.0, 50.0)).unwrap();
        assert!(top_left.distance(Vec2::ZERO) < 1e-5);
        let center = normalized_within(rect, Vec2::ZERO).unwrap();
        assert!(center.distance(Vec2::splat(0.5)) < 1e-5);
        assert!(normalized_within(rect, Vec2::new(150.0, 0.0)).is_none());
    }
}
