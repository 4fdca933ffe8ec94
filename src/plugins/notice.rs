//! Transient toast shown at the top of the screen.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::plugins::ui_theme::card_frame;
use crate::resources::Notice;

pub struct NoticePlugin;

impl Plugin for NoticePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (tick_notice, notice_toast_ui.after(tick_notice)));
    }
}

pub fn tick_notice(time: Res<Time>, mut notice: ResMut<Notice>) {
    if notice.text().is_some() {
        notice.tick(time.delta_secs());
    }
}

fn notice_toast_ui(mut contexts: EguiContexts, notice: Res<Notice>) {
    let Some(text) = notice.text() else { return; };

    egui::Area::new(egui::Id::new("notice_toast"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 24.0))
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(contexts.ctx_mut(), |ui| {
            card_frame().show(ui, |ui| {
                ui.label(egui::RichText::new(text).size(18.0).strong());
            });
        });
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;

    #[test]
    fn test_notice_expires_with_time() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        app.init_resource::<Notice>();
        app.add_systems(Update, tick_notice);
        app.update();

        app.world_mut().resource_mut::<Notice>().show("Not this one ✋", 1.2);
        for _ in 0..10 {
            app.update();
        }
        assert_eq!(app.world().resource::<Notice>().text(), Some("Not this one ✋"));

        for _ in 0..4 {
            app.update();
        }
        assert_eq!(app.world().resource::<Notice>().text(), None);
    }
}
