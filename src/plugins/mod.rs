pub mod core;
pub mod input;
pub mod ui_theme;
pub mod fade_controller;
pub mod decor;
pub mod notice;
pub mod music;

pub mod bookshelf;
pub mod cloud_journey;
pub mod dream_world;
pub mod letter;
pub mod love_bursts;
