//! The increment/decrement buttons: hit testing, counter mutation and
//! press feedback.

use bevy::prelude::*;

use crate::camera::MainCamera;
use crate::config::SceneVariant;
use crate::counter::{CounterState, RenderReport, render_pass};
use crate::input::PointerEvent;
use crate::visual::labels::ScalePulse;
use crate::visual::scene::CounterScene;

/// Button edge length in world units
pub const BUTTON_SIZE: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterAction {
    Increment,
    Decrement,
}

/// Rounded rectangle in world space; a corner radius of half the size is a disc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRegion {
    pub center: Vec2,
    pub half_size: Vec2,
    pub corner_radius: f32,
}

impl HitRegion {
    pub fn rounded(center: Vec2, size: f32, corner_radius: f32) -> Self {
        let half_size = Vec2::splat(size * 0.5);
        Self {
            center,
            half_size,
            corner_radius: corner_radius.min(half_size.min_element()),
        }
    }

    /// Boundary counts as inside
    pub fn contains(&self, point: Vec2) -> bool {
        let r = self.corner_radius;
        let q = (point - self.center).abs() - (self.half_size - Vec2::splat(r));
        let outside = q.max(Vec2::ZERO).length();
        let inside = q.x.max(q.y).min(0.0);
        outside + inside - r <= 0.0
    }
}

/// Where the two buttons sit for a scene variant
#[derive(Resource, Debug, Clone, Copy)]
pub struct ControlLayout {
    pub increment: HitRegion,
    pub decrement: HitRegion,
}

impl ControlLayout {
    pub fn for_variant(variant: SceneVariant) -> Self {
        match variant {
            SceneVariant::Split => Self {
                increment: HitRegion::rounded(Vec2::new(35.0, -100.0), BUTTON_SIZE, 12.0),
                decrement: HitRegion::rounded(Vec2::new(-35.0, -100.0), BUTTON_SIZE, 12.0),
            },
            SceneVariant::Classic => Self {
                increment: HitRegion::rounded(Vec2::new(0.0, 100.0), BUTTON_SIZE, BUTTON_SIZE * 0.5),
                decrement: HitRegion::rounded(Vec2::new(0.0, -100.0), BUTTON_SIZE, BUTTON_SIZE * 0.5),
            },
        }
    }

    pub fn region(&self, action: CounterAction) -> HitRegion {
        match action {
            CounterAction::Increment => self.increment,
            CounterAction::Decrement => self.decrement,
        }
    }

    /// Resolve the first of a frame's presses; later ones are ignored even
    /// when the first misses both buttons
    pub fn resolve_first(&self, points: impl IntoIterator<Item = Option<Vec2>>) -> Option<CounterAction> {
        points.into_iter().next().flatten().and_then(|p| self.resolve(p))
    }

    /// At most one action per tap; increment wins when both contain the point
    pub fn resolve(&self, point: Vec2) -> Option<CounterAction> {
        if self.increment.contains(point) {
            Some(CounterAction::Increment)
        } else if self.decrement.contains(point) {
            Some(CounterAction::Decrement)
        } else {
            None
        }
    }
}

/// Marker plus the in-flight press animation of one button entity
#[derive(Component, Debug, Clone)]
pub struct CounterButton {
    pub action: CounterAction,
    press: Option<ScalePulse>,
}

impl CounterButton {
    pub fn new(action: CounterAction) -> Self {
        Self {
            action,
            press: None,
        }
    }

    /// Start a press, replacing any press still running
    pub fn press(&mut self, current_scale: f32) {
        self.press = Some(ScalePulse::press(current_scale));
    }

    /// Advance the press; returns the scale to draw at, if animating
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        let pulse = self.press.as_mut()?;
        let finished = pulse.advance(dt);
        let scale = pulse.sample();
        if finished {
            self.press = None;
        }
        Some(scale)
    }
}

/// Apply `action` to the counter and run the render pass
pub fn apply_action(
    action: CounterAction,
    state: &mut CounterState,
    scene: &mut CounterScene,
    now: f64,
) -> RenderReport {
    match action {
        CounterAction::Increment => state.increment(),
        CounterAction::Decrement => state.decrement(),
    }
    render_pass(state, scene, now)
}

/// System: route the frame's first press to the buttons
pub fn handle_counter_input(
    time: Res<Time>,
    mut pointer_events: MessageReader<PointerEvent>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    layout: Res<ControlLayout>,
    mut state: ResMut<CounterState>,
    mut scene: ResMut<CounterScene>,
    mut buttons: Query<(&mut CounterButton, &Transform)>,
) {
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let presses: Vec<(u64, Option<Vec2>)> = pointer_events
        .read()
        .map(|event| (event.id, event.to_world_position(camera, camera_transform)))
        .collect();
    let Some(&(id, _)) = presses.first() else {
        return;
    };
    let Some(action) = layout.resolve_first(presses.iter().map(|(_, point)| *point)) else {
        return;
    };

    let report = apply_action(action, &mut state, &mut scene, time.elapsed_secs_f64());
    if report.is_noop() {
        debug!("{:?} (pointer {}) at bound {}", action, id, state.value());
    } else {
        info!(
            "{:?} (pointer {}): counter = {}, {} digit(s) changed",
            action,
            id,
            state.value(),
            report.changes.len()
        );
    }
    debug!(
        "{} bursts and {} label animations so far",
        scene.pool.total_bursts(),
        scene.labels.total_animations()
    );

    for (mut button, transform) in &mut buttons {
        if button.action == action {
            button.press(transform.scale.x);
        }
    }
}

/// System: play button press animations
pub fn animate_buttons(time: Res<Time>, mut buttons: Query<(&mut CounterButton, &mut Transform)>) {
    let dt = time.delta_secs();
    for (mut button, mut transform) in &mut buttons {
        if let Some(scale) = button.tick(dt) {
            transform.scale = Vec3::new(scale, scale, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CounterConfig;
    use crate::visual::emitters::EmitterTemplate;

    #[test]
    fn test_rounded_region_corners() {
        let region = HitRegion::rounded(Vec2::ZERO, 60.0, 12.0);
        assert!(region.contains(Vec2::ZERO));
        assert!(region.contains(Vec2::new(30.0, 0.0)));
        assert!(region.contains(Vec2::new(0.0, -29.0)));
        assert!(!region.contains(Vec2::new(31.0, 0.0)));
        // Corner cut away by the radius
        assert!(!region.contains(Vec2::new(29.5, 29.5)));
        assert!(region.contains(Vec2::new(25.0, 25.0)));
    }

    #[test]
    fn test_disc_region() {
        let region = HitRegion::rounded(Vec2::new(0.0, 100.0), 60.0, 30.0);
        assert!(region.contains(Vec2::new(0.0, 129.0)));
        assert!(!region.contains(Vec2::new(25.0, 125.0)));
    }

    #[test]
    fn test_resolve_split_layout() {
        let layout = ControlLayout::for_variant(SceneVariant::Split);
        assert_eq!(layout.resolve(Vec2::new(35.0, -100.0)), Some(CounterAction::Increment));
        assert_eq!(layout.resolve(Vec2::new(-35.0, -90.0)), Some(CounterAction::Decrement));
        assert_eq!(layout.resolve(Vec2::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_only_first_press_of_a_frame_counts() {
        let layout = ControlLayout::for_variant(SceneVariant::Split);
        let inc = Vec2::new(35.0, -100.0);
        let dec = Vec2::new(-35.0, -100.0);
        assert_eq!(
            layout.resolve_first([Some(inc), Some(dec)]),
            Some(CounterAction::Increment)
        );
        // A miss first swallows the frame
        assert_eq!(layout.resolve_first([Some(Vec2::ZERO), Some(dec)]), None);
        assert_eq!(layout.resolve_first([None, Some(dec)]), None);
        assert_eq!(layout.resolve_first(Vec::<Option<Vec2>>::new()), None);
    }

    #[test]
    fn test_increment_checked_first_on_overlap() {
        let region = HitRegion::rounded(Vec2::ZERO, 60.0, 0.0);
        let layout = ControlLayout {
            increment: region,
            decrement: region,
        };
        assert_eq!(layout.resolve(Vec2::ZERO), Some(CounterAction::Increment));
    }

    #[test]
    fn test_press_replaces_running_press() {
        let mut button = CounterButton::new(CounterAction::Increment);
        assert_eq!(button.tick(0.016), None);

        button.press(1.0);
        let scale = button.tick(0.025).unwrap();
        assert!((scale - 0.95).abs() < 1e-4);

        button.press(scale);
        assert!((button.tick(0.0).unwrap() - 0.95).abs() < 1e-4);
        for _ in 0..10 {
            button.tick(0.016);
        }
        assert_eq!(button.tick(0.016), None);
    }

    #[test]
    fn test_apply_action_runs_render_pass() {
        let config = CounterConfig::default();
        let mut state = CounterState::new(0);
        let mut scene = CounterScene::new(
            &config,
            Some(&EmitterTemplate::default()),
            state.previous(),
            |_| true,
        );

        let report = apply_action(CounterAction::Increment, &mut state, &mut scene, 0.0);
        assert_eq!(state.value(), 1);
        assert_eq!(report.bursts.len(), 2);

        let report = apply_action(CounterAction::Decrement, &mut state, &mut scene, 1.0);
        assert_eq!(state.value(), 0);
        assert_eq!(report.changes.len(), 1);
    }
}
