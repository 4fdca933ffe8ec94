use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_prototype_lyon::prelude::ShapePlugin;
use clap::Parser;
use dreamshelf::plugins::bookshelf::BookshelfPlugin;
use dreamshelf::plugins::cloud_journey::CloudJourneyPlugin;
use dreamshelf::plugins::core::CorePlugin;
use dreamshelf::plugins::decor::DecorPlugin;
use dreamshelf::plugins::dream_world::DreamWorldPlugin;
use dreamshelf::plugins::fade_controller::FadeControllerPlugin;
use dreamshelf::plugins::input::InputPlugin;
use dreamshelf::plugins::letter::LetterPlugin;
use dreamshelf::plugins::love_bursts::LoveBurstsPlugin;
use dreamshelf::plugins::music::MusicPlugin;
use dreamshelf::plugins::notice::NoticePlugin;
use dreamshelf::plugins::ui_theme::UiThemePlugin;
use dreamshelf::resources::CliArgs;

fn main() {
    let cli = CliArgs::parse();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "dreamshelf".into(),
                        resolution: (1200.0, 800.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                // Audio goes through kira.
                .disable::<bevy::audio::AudioPlugin>(),
        )
        .add_plugins(EguiPlugin)
        .add_plugins(ShapePlugin)
        .add_plugins(bevy_kira_audio::AudioPlugin)
        .insert_resource(cli.resolve_config())
        .insert_resource(cli)
        .add_plugins(UiThemePlugin)
        .add_plugins(CorePlugin)
        .add_plugins(InputPlugin)
        .add_plugins(FadeControllerPlugin)
        .add_plugins(DecorPlugin)
        .add_plugins(NoticePlugin)
        .add_plugins(MusicPlugin)
        .add_plugins(BookshelfPlugin)
        .add_plugins(CloudJourneyPlugin)
        .add_plugins(DreamWorldPlugin)
        .add_plugins(LetterPlugin)
        .add_plugins(LoveBurstsPlugin)
        .run();
}
