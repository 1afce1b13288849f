use crate::input::PointerInputSet;
use crate::visual::controls::{animate_buttons, handle_counter_input};
use crate::visual::emitters::{emit_particles, prune_missing_glyphs, update_particles};
use crate::visual::labels::animate_labels;
use crate::visual::scene::CounterScene;
use crate::visual::setup::{setup_counter, spawn_counter_entities};
use bevy::prelude::*;

pub struct CounterPlugin;

impl Plugin for CounterPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_counter, spawn_counter_entities).chain())
            .add_systems(
                Update,
                (
                    prune_missing_glyphs,
                    // Input and the render pass
                    handle_counter_input.after(PointerInputSet),
                    // Deferred burst switch-off
                    tick_burst_resets,
                    // Particles
                    emit_particles,
                    update_particles,
                    // Animations
                    animate_labels,
                    animate_buttons,
                )
                    .chain(),
            );
    }
}

/// Stop every burst whose delay has elapsed
fn tick_burst_resets(time: Res<Time>, mut scene: ResMut<CounterScene>) {
    let now = time.elapsed_secs_f64();
    let scene = &mut *scene;
    let stopped = scene.resets.tick(now, &mut scene.pool);
    if stopped > 0 {
        debug!(
            "Stopped {} emitter burst(s), {} reset(s) pending",
            stopped,
            scene.resets.pending()
        );
    }
}
