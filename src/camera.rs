use bevy::prelude::*;

use crate::config::CounterConfig;

/// Scene background: mid gray
const BACKGROUND: Color = Color::srgb(0.5, 0.5, 0.5);

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BACKGROUND))
            .add_systems(Startup, setup_camera);
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Setup an orthographic 2D camera centred on the counter
///
/// Coordinate System (Y-up, origin at screen centre):
/// ```text
///        Y
///        ↑
///        |
///   -----+----→ X
/// ```
///
/// `camera_zoom` below 1.0 magnifies: 0.5 shows every world unit as two pixels.
fn setup_camera(mut commands: Commands, config: Res<CounterConfig>) {
    let projection = Projection::Orthographic(OrthographicProjection {
        scale: config.camera_zoom,
        ..OrthographicProjection::default_2d()
    });
    commands.spawn((Camera2d, projection, MainCamera));

    info!("Camera ready (zoom {})", config.camera_zoom);
}
