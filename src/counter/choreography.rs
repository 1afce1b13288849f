//! The render pass: turn a counter change into label animations and bursts.

use std::f32::consts::FRAC_PI_2;

use bevy::math::Vec4;

use crate::config::SceneVariant;
use crate::visual::emitters::{ColorSequence, DigitPosition, EmitterRole, SlotKey};
use crate::visual::labels::LabelSet;
use crate::visual::scene::CounterScene;

use super::digit::Digit;
use super::state::{CounterState, Decomposition, Direction};

/// Colour-over-life targets for the classic scene
const INCREMENT_TINT: Vec4 = Vec4::new(0.204, 0.780, 0.349, 1.0);
const DECREMENT_TINT: Vec4 = Vec4::new(1.0, 0.8, 0.0, 1.0);
const TINT_KEY_TIME: f32 = 0.1;

/// One digit position whose glyph changed during a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitChange {
    pub position: DigitPosition,
    pub from: Digit,
    pub to: Digit,
}

/// What a render pass did, for logging and tests
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub direction: Direction,
    pub shown: Decomposition,
    pub changes: Vec<DigitChange>,
    pub bursts: Vec<SlotKey>,
}

impl RenderReport {
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }

    #[cfg(test)]
    pub fn changed(&self, position: DigitPosition) -> bool {
        self.changes.iter().any(|c| c.position == position)
    }
}

fn changes_between(previous: Decomposition, next: Decomposition) -> Vec<DigitChange> {
    let mut changes = Vec::with_capacity(2);
    if next.units != previous.units {
        changes.push(DigitChange {
            position: DigitPosition::Units,
            from: previous.units,
            to: next.units,
        });
    }
    if next.tens != previous.tens {
        changes.push(DigitChange {
            position: DigitPosition::Tens,
            from: previous.tens,
            to: next.tens,
        });
    }
    changes
}

fn emission_angle(direction: Direction) -> f32 {
    match direction {
        Direction::Increment => -FRAC_PI_2,
        Direction::Decrement => FRAC_PI_2,
    }
}

/// Animate whatever changed between the rendered digits and the counter
/// value, then record the new digits as rendered.
///
/// Only positions whose digit differs are touched, so a second pass without
/// a mutation in between does nothing. `now` is the timeline (in seconds)
/// the deferred burst resets are scheduled on.
pub fn render_pass(state: &mut CounterState, scene: &mut CounterScene, now: f64) -> RenderReport {
    let previous = state.previous();
    let next = state.current();
    let direction = state.direction();
    let changes = changes_between(previous, next);

    let bursts = match scene.variant {
        SceneVariant::Split => split_pass(scene, next, direction, &changes, now),
        SceneVariant::Classic => classic_pass(scene, next, direction, &changes, now),
    };

    state.commit(next);

    if !changes.is_empty() {
        log::debug!(
            "counter {} -> {} ({:?}), {} bursts",
            previous.value(),
            next.value(),
            direction,
            bursts.len()
        );
    }

    RenderReport {
        direction,
        shown: next,
        changes,
        bursts,
    }
}

fn split_pass(
    scene: &mut CounterScene,
    next: Decomposition,
    direction: Direction,
    changes: &[DigitChange],
    now: f64,
) -> Vec<SlotKey> {
    let layout = scene.layout;
    let sign = direction.sign();
    let mut bursts = Vec::new();

    if let LabelSet::Split { units, tens } = &mut scene.labels {
        units.text = next.units.to_string();
        tens.text = next.tens.to_string();
    }

    for change in changes {
        if let LabelSet::Split { units, tens } = &mut scene.labels {
            let label = match change.position {
                DigitPosition::Units => units,
                DigitPosition::Tens => tens,
            };
            label.run_slide(direction, layout.label_entry_offset, layout.label_overshoot);
        }

        let outgoing = SlotKey::new(change.position, EmitterRole::Previous, change.from);
        let incoming = SlotKey::new(change.position, EmitterRole::Current, change.to);
        let pair = [
            (outgoing, layout.previous_emitter_y * sign),
            (incoming, layout.current_emitter_y * sign),
        ];
        for (key, y) in pair {
            if fire_split(scene, key, direction, y, now) {
                bursts.push(key);
            }
        }
    }
    bursts
}

fn fire_split(scene: &mut CounterScene, key: SlotKey, direction: Direction, y: f32, now: f64) -> bool {
    let burst = scene.burst;
    // Slot may be absent when its glyph or the template is missing
    let Some(slot) = scene.pool.get_mut(key) else {
        return false;
    };
    slot.position.y = y;
    slot.emission_angle = emission_angle(direction);
    let generation = slot.burst(burst.birth_rate);
    scene
        .resets
        .schedule(key, generation, now + burst.duration as f64);
    true
}

fn classic_pass(
    scene: &mut CounterScene,
    next: Decomposition,
    direction: Direction,
    changes: &[DigitChange],
    now: f64,
) -> Vec<SlotKey> {
    let mut bursts = Vec::new();

    if let LabelSet::Combined(label) = &mut scene.labels {
        label.text = format!("{:02}", next.value());
        if !changes.is_empty() {
            label.run_pop(direction);
        }
    }

    let tint = match direction {
        Direction::Increment => INCREMENT_TINT,
        Direction::Decrement => DECREMENT_TINT,
    };
    let burst = scene.burst;

    for change in changes {
        let key = SlotKey::new(change.position, EmitterRole::Previous, change.from);
        let Some(slot) = scene.pool.get_mut(key) else {
            continue;
        };
        slot.speed = -slot.speed.abs() * direction.sign();
        slot.colors = ColorSequence::new(vec![(0.0, Vec4::ONE), (TINT_KEY_TIME, tint)]);
        let generation = slot.burst(burst.birth_rate);
        scene
            .resets
            .schedule(key, generation, now + burst.duration as f64);
        bursts.push(key);
    }
    bursts
}
