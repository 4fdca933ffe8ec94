//! Letter page scrolling and the paragraph reveal it drives.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use leafwing_input_manager::prelude::*;

use crate::components::fade_controller::FadeController;
use crate::components::letter::{LetterParagraph, LetterSignature};
use crate::events::ParagraphRevealed;
use crate::plugins::core::viewport_size;
use crate::plugins::input::GreetingAction;
use crate::resources::{GreetingConfig, LetterReveal, ScrollView};

/// Held arrow keys scroll this many steps per second.
const KEY_STEPS_PER_SECOND: f32 = 20.0;
/// Seconds a revealed paragraph takes to fade in.
pub const REVEAL_FADE: f32 = 1.2;

/// Keeps the page height in step with the window.
pub fn sync_scroll_viewport(
    window_query: Query<&Window, With<PrimaryWindow>>,
    config: Res<GreetingConfig>,
    mut scroll: ResMut<ScrollView>,
) {
    let viewport = viewport_size(window_query.get_single().ok());
    let content = viewport.y * config.letter_viewports;
    if scroll.viewport_height != viewport.y || scroll.content_height != content {
        scroll.resize(content, viewport.y);
    }
}

/// Moves the page with the mouse wheel and arrow keys.
pub fn scroll_letter(
    time: Res<Time>,
    config: Res<GreetingConfig>,
    action_query: Query<&ActionState<GreetingAction>, With<Camera2d>>,
    mut scroll: ResMut<ScrollView>,
) {
    let Ok(action_state) = action_query.get_single() else { return; };

    let mut delta = -action_state.value(&GreetingAction::Scroll) * config.scroll_step;
    let key_speed = config.scroll_step * KEY_STEPS_PER_SECOND * time.delta_secs();
    if action_state.pressed(&GreetingAction::ScrollDown) {
        delta += key_speed;
    }
    if action_state.pressed(&GreetingAction::ScrollUp) {
        delta -= key_speed;
    }

    if delta != 0.0 {
        scroll.scroll_by(delta);
    }
}

/// Feeds the scroll position into the reveal flags.
pub fn reveal_paragraphs(
    scroll: Res<ScrollView>,
    mut reveal: ResMut<LetterReveal>,
    mut revealed: EventWriter<ParagraphRevealed>,
) {
    if !scroll.is_changed() {
        return;
    }
    for index in reveal.observe(scroll.progress()) {
        info!("Revealing paragraph {}", index + 1);
        revealed.send(ParagraphRevealed { index });
    }
    if reveal.observe_offset(scroll.offset) {
        info!("Reader started scrolling");
    }
}

/// Starts the fade-in of each newly revealed paragraph. The signature follows
/// the last one.
pub fn fade_in_revealed(
    mut revealed: EventReader<ParagraphRevealed>,
    reveal: Res<LetterReveal>,
    mut paragraphs: Query<(&LetterParagraph, &mut FadeController), Without<LetterSignature>>,
    mut signature: Query<&mut FadeController, With<LetterSignature>>,
) {
    let indices: Vec<usize> = revealed.read().map(|e| e.index).collect();
    if indices.is_empty() {
        return;
    }
    for (paragraph, mut fade) in &mut paragraphs {
        if indices.contains(&paragraph.index) {
            fade.fade_in(REVEAL_FADE);
        }
    }
    if reveal.all_revealed() {
        for mut fade in &mut signature {
            fade.fade_in_after(0.4, REVEAL_FADE);
        }
    }
}
