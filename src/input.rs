use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::CursorMoved;

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorPos>()
            .add_message::<PointerEvent>()
            .add_systems(
                Update,
                (track_cursor_pos, collect_pointer_events)
                    .chain()
                    .in_set(PointerInputSet),
            );
    }
}

/// Systems that publish `PointerEvent`s; readers run after it
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerInputSet;

/// A mouse press or touch start
#[derive(Message, Debug, Clone)]
pub struct PointerEvent {
    /// Viewport (logical) coordinates: pixels from top-left
    pub position: Vec2,
    /// 0 = mouse, >0 = touch id
    pub id: u64,
}

impl PointerEvent {
    /// Convert viewport coords to 2D world space using a camera
    pub fn to_world_position(
        &self,
        camera: &Camera,
        camera_transform: &GlobalTransform,
    ) -> Option<Vec2> {
        camera
            .viewport_to_world_2d(camera_transform, self.position)
            .ok()
    }
}

#[derive(Resource, Default, Debug, Clone, Copy)]
struct CursorPos(pub Option<Vec2>);

fn track_cursor_pos(mut ev_cursor: MessageReader<CursorMoved>, mut pos: ResMut<CursorPos>) {
    for e in ev_cursor.read() {
        // last event wins
        pos.0 = Some(e.position);
    }
}

fn collect_pointer_events(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    cursor: Res<CursorPos>,
    mut touch_events: MessageReader<TouchInput>,
    mut out: MessageWriter<PointerEvent>,
) {
    if let Some(p) = cursor.0
        && mouse_buttons.just_pressed(MouseButton::Left)
    {
        out.write(PointerEvent {
            position: p,
            id: 0,
        });
    }

    for ev in touch_events.read() {
        if ev.phase != TouchPhase::Started {
            continue;
        }
        out.write(PointerEvent {
            position: ev.position,
            // Offset so touch ids never collide with the mouse
            id: ev.id + 1,
        });
    }
}
