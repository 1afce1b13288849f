pub mod animations;

use bevy::prelude::*;

use crate::counter::Direction;
use crate::visual::scene::CounterScene;

pub use animations::{ScalePulse, SlideTransition};

/// In-flight keyed animation on a label; starting a new one replaces it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelAction {
    Slide(SlideTransition),
    Pop(ScalePulse),
}

/// Text node state mirrored onto a `Text2d` entity every frame
#[derive(Debug, Clone)]
pub struct LabelNode {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub base_y: f32,
    pub alpha: f32,
    pub scale: f32,
    action: Option<LabelAction>,
    animations: u32,
}

impl LabelNode {
    pub fn new(text: impl Into<String>, x: f32, base_y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y: base_y,
            base_y,
            alpha: 1.0,
            scale: 1.0,
            action: None,
            animations: 0,
        }
    }

    #[cfg(test)]
    pub fn action(&self) -> Option<&LabelAction> {
        self.action.as_ref()
    }

    /// How many animations have been started on this label
    pub fn animations(&self) -> u32 {
        self.animations
    }

    /// Replace any running animation and apply its first frame immediately
    pub fn run(&mut self, action: LabelAction) {
        self.action = Some(action);
        self.animations += 1;
        self.apply();
    }

    pub fn run_slide(&mut self, direction: Direction, entry_offset: f32, overshoot: f32) {
        let slide = SlideTransition::new(self.base_y, direction, entry_offset, overshoot);
        self.run(LabelAction::Slide(slide));
    }

    pub fn run_pop(&mut self, direction: Direction) {
        self.run(LabelAction::Pop(ScalePulse::pop(self.scale, direction)));
    }

    pub fn tick(&mut self, dt: f32) {
        let Some(action) = self.action.as_mut() else {
            return;
        };
        let finished = match action {
            LabelAction::Slide(slide) => slide.advance(dt),
            LabelAction::Pop(pulse) => pulse.advance(dt),
        };
        self.apply();
        if finished {
            self.action = None;
        }
    }

    fn apply(&mut self) {
        match self.action {
            Some(LabelAction::Slide(slide)) => {
                let (y, alpha) = slide.sample();
                self.y = y;
                self.alpha = alpha;
            }
            Some(LabelAction::Pop(pulse)) => self.scale = pulse.sample(),
            None => {}
        }
    }
}

/// Identifies which label a `Text2d` entity mirrors
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLabel {
    Units,
    Tens,
    Combined,
}

/// The labels of one scene variant
#[derive(Debug, Clone)]
pub enum LabelSet {
    Split { units: LabelNode, tens: LabelNode },
    Combined(LabelNode),
}

impl LabelSet {
    pub fn get(&self, which: CounterLabel) -> Option<&LabelNode> {
        match (self, which) {
            (LabelSet::Split { units, .. }, CounterLabel::Units) => Some(units),
            (LabelSet::Split { tens, .. }, CounterLabel::Tens) => Some(tens),
            (LabelSet::Combined(label), CounterLabel::Combined) => Some(label),
            _ => None,
        }
    }

    /// Labels paired with the marker their entities carry
    pub fn entries(&self) -> Vec<(CounterLabel, &LabelNode)> {
        match self {
            LabelSet::Split { units, tens } => {
                vec![(CounterLabel::Units, units), (CounterLabel::Tens, tens)]
            }
            LabelSet::Combined(label) => vec![(CounterLabel::Combined, label)],
        }
    }

    pub fn tick(&mut self, dt: f32) {
        match self {
            LabelSet::Split { units, tens } => {
                units.tick(dt);
                tens.tick(dt);
            }
            LabelSet::Combined(label) => label.tick(dt),
        }
    }

    pub fn total_animations(&self) -> u32 {
        self.entries().iter().map(|(_, label)| label.animations()).sum()
    }
}

/// System: advance label animations and push them onto their entities
pub fn animate_labels(
    time: Res<Time>,
    mut scene: ResMut<CounterScene>,
    mut labels: Query<(&CounterLabel, &mut Text2d, &mut Transform, &mut TextColor)>,
) {
    scene.labels.tick(time.delta_secs());

    for (which, mut text, mut transform, mut color) in &mut labels {
        let Some(node) = scene.labels.get(*which) else {
            continue;
        };
        if text.0 != node.text {
            text.0.clone_from(&node.text);
        }
        transform.translation.x = node.x;
        transform.translation.y = node.y;
        transform.scale = Vec3::splat(node.scale);
        color.0 = color.0.with_alpha(node.alpha);
    }
}
