use bevy::prelude::*;

mod camera;
mod config;
mod counter;
mod input;
mod visual;

use bevy::window::WindowResolution;
use camera::CameraPlugin;
use config::CounterConfig;
use input::InputPlugin;

use crate::visual::plugin::CounterPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Digit Burst".into(),
            resolution: WindowResolution::new(390, 844),
            resizable: true,
            ..default()
        }),
        ..default()
    }));

    // Log plugin is up now, so config problems get reported
    let config = CounterConfig::load().unwrap_or_else(|err| {
        warn!("{}; falling back to defaults", err);
        CounterConfig::default()
    });

    app.insert_resource(config)
        .add_plugins(CameraPlugin)
        .add_plugins(InputPlugin)
        .add_plugins(CounterPlugin);

    app.run();
}
