pub mod easing;
pub mod geometry;
pub mod procgen;
pub mod seeded_rng;
