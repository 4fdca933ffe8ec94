//! Background music and the CD player panel.
//!
//! The track is loaded on request and played looped once the asset server
//! reports it loaded. A failed load is reported once through a notice and is
//! not retried; nothing else in the greeting waits on the music.

use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use bevy_kira_audio::{Audio, AudioControl, AudioSource};
use leafwing_input_manager::prelude::*;

use crate::events::{MusicRequested, MusicStopRequested};
use crate::plugins::input::GreetingAction;
use crate::plugins::ui_theme::{card_frame, ROSE};
use crate::resources::{GreetingConfig, MusicPlayer, MusicStatus, Notice};

/// Handle of the requested track while it loads and plays.
#[derive(Resource, Default)]
pub struct MusicTrack(pub Option<Handle<AudioSource>>);

/// Sent once the requested track is ready to play.
#[derive(Event, Debug, Clone)]
pub struct MusicLoaded(pub Handle<AudioSource>);

pub struct MusicPlugin;

impl Plugin for MusicPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MusicTrack>()
            .add_event::<MusicLoaded>()
            .add_systems(
                Update,
                (
                    request_music,
                    poll_music_load.after(request_music),
                    play_loaded_music.after(poll_music_load),
                    stop_music_on_key,
                    stop_music.after(stop_music_on_key),
                    cd_player_ui,
                ),
            );
    }
}

pub fn request_music(
    mut requests: EventReader<MusicRequested>,
    config: Res<GreetingConfig>,
    asset_server: Res<AssetServer>,
    mut player: ResMut<MusicPlayer>,
    mut track: ResMut<MusicTrack>,
) {
    if requests.read().count() == 0 {
        return;
    }
    if !config.music.enabled {
        info!("Music disabled, skipping playback");
        return;
    }
    if player.request() {
        info!("Loading music from {}", config.music.asset_path);
        track.0 = Some(asset_server.load(config.music.asset_path.clone()));
    }
}

/// Watches the pending load. Success and failure are each reported once.
pub fn poll_music_load(
    asset_server: Res<AssetServer>,
    config: Res<GreetingConfig>,
    mut player: ResMut<MusicPlayer>,
    mut track: ResMut<MusicTrack>,
    mut notice: ResMut<Notice>,
    mut loaded: EventWriter<MusicLoaded>,
) {
    if player.status() != MusicStatus::Loading {
        return;
    }
    let Some(handle) = track.0.clone() else { return; };

    match asset_server.get_load_state(&handle) {
        Some(LoadState::Loaded) => {
            if player.loaded() {
                info!("Music playing: {} - {}", config.music.artist, config.music.title);
                loaded.send(MusicLoaded(handle));
                notice.show(
                    format!("🎵 Playing {} - {}", config.music.artist, config.music.title),
                    config.notices.music_started,
                );
            }
        }
        Some(LoadState::Failed(err)) => {
            if player.failed() {
                warn!("Music unavailable: {}", err);
                track.0 = None;
                notice.show("🎵 Music player unavailable", config.notices.music_failed);
            }
        }
        _ => {}
    }
}

fn play_loaded_music(mut loaded: EventReader<MusicLoaded>, audio: Res<Audio>, config: Res<GreetingConfig>) {
    for MusicLoaded(handle) in loaded.read() {
        audio.play(handle.clone()).looped().with_volume(config.music.volume);
    }
}

fn stop_music_on_key(
    action_query: Query<&ActionState<GreetingAction>, With<Camera2d>>,
    player: Res<MusicPlayer>,
    mut stops: EventWriter<MusicStopRequested>,
) {
    let Ok(action_state) = action_query.get_single() else { return; };
    if action_state.just_pressed(&GreetingAction::StopMusic) && player.is_playing() {
        stops.send(MusicStopRequested);
    }
}

fn stop_music(
    mut stops: EventReader<MusicStopRequested>,
    audio: Res<Audio>,
    mut player: ResMut<MusicPlayer>,
    mut track: ResMut<MusicTrack>,
) {
    if stops.read().count() == 0 {
        return;
    }
    if player.stop() {
        audio.stop();
        track.0 = None;
        info!("Music stopped");
    }
}

fn cd_player_ui(
    mut contexts: EguiContexts,
    player: Res<MusicPlayer>,
    config: Res<GreetingConfig>,
    mut stops: EventWriter<MusicStopRequested>,
) {
    if !player.is_playing() {
        return;
    }

    egui::Area::new(egui::Id::new("cd_player"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-20.0, -20.0))
        .show(contexts.ctx_mut(), |ui| {
            card_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("💿").size(30.0));
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new("Now Playing").small().color(ROSE));
                        ui.label(egui::RichText::new(&config.music.title).strong());
                        ui.label(egui::RichText::new(&config.music.artist).italics());
                    });
                    ui.add_space(8.0);
                    if ui.button(egui::RichText::new("⏹ Stop").color(egui::Color32::WHITE)).clicked() {
                        stops.send(MusicStopRequested);
                    }
                });
            });
        });
}
