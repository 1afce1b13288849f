use bevy::math::{Vec2, Vec4};

use crate::config::{EmitterOverrides, LayoutConfig};
use crate::counter::Digit;

use super::template::{ColorSequence, EmitterTemplate};

/// Which digit of the counter a slot belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DigitPosition {
    Units = 0,
    Tens = 1,
}

impl DigitPosition {
    pub const ALL: [DigitPosition; 2] = [DigitPosition::Units, DigitPosition::Tens];

    pub fn x(self, layout: &LayoutConfig) -> f32 {
        match self {
            DigitPosition::Units => layout.units_x,
            DigitPosition::Tens => layout.tens_x,
        }
    }
}

/// Outgoing (previous) or incoming (current) glyph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmitterRole {
    Previous = 0,
    Current = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub position: DigitPosition,
    pub role: EmitterRole,
    pub digit: Digit,
}

impl SlotKey {
    pub const fn new(position: DigitPosition, role: EmitterRole, digit: Digit) -> Self {
        Self {
            position,
            role,
            digit,
        }
    }

    fn index(self) -> usize {
        ((self.position as usize) * 2 + self.role as usize) * 10 + self.digit.index()
    }
}

const SLOT_CAPACITY: usize = 2 * 2 * 10;

/// Initial height of incoming emitters, just above the label
const CURRENT_REST_Y: f32 = 10.0;

/// Per-slot particle parameters: the template with per-digit overrides applied
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterSettings {
    pub speed_range: f32,
    pub angle_range: f32,
    pub lifetime: f32,
    pub lifetime_range: f32,
    pub alpha: f32,
    pub alpha_range: f32,
    pub alpha_speed: f32,
    pub scale: f32,
    pub scale_range: f32,
    pub scale_speed: f32,
    pub position_range: Vec2,
    pub acceleration: Vec2,
    pub size: Vec2,
    pub field_mask: u32,
}

impl EmitterSettings {
    fn resolve(
        template: &EmitterTemplate,
        overrides: &EmitterOverrides,
        position: DigitPosition,
        field_mask: u32,
    ) -> Self {
        let scale = match (position, overrides.tens_scale) {
            (DigitPosition::Tens, Some(scale)) => scale,
            _ => template.scale,
        };
        Self {
            speed_range: template.speed_range,
            angle_range: template.emission_angle_range,
            lifetime: overrides.lifetime.unwrap_or(template.lifetime),
            lifetime_range: template.lifetime_range,
            alpha: overrides.alpha.unwrap_or(template.alpha),
            alpha_range: template.alpha_range,
            alpha_speed: overrides.alpha_speed.unwrap_or(template.alpha_speed),
            scale,
            scale_range: template.scale_range,
            scale_speed: overrides.scale_speed.unwrap_or(template.scale_speed),
            position_range: Vec2::from(template.position_range),
            acceleration: Vec2::from(template.acceleration),
            size: Vec2::from(template.size),
            field_mask,
        }
    }
}

/// One pooled emitter. The key and settings never change after setup.
#[derive(Debug, Clone)]
pub struct EmitterSlot {
    key: SlotKey,
    pub settings: EmitterSettings,
    pub position: Vec2,
    /// Particles per second; zero means idle
    pub birth_rate: f32,
    pub emission_angle: f32,
    pub speed: f32,
    pub colors: ColorSequence,
    accumulator: f32,
    generation: u32,
    bursts: u32,
}

impl EmitterSlot {
    pub fn key(&self) -> SlotKey {
        self.key
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// How many times this slot has been fired
    pub fn bursts(&self) -> u32 {
        self.bursts
    }

    pub fn is_bursting(&self) -> bool {
        self.birth_rate > 0.0
    }

    /// Switch emission on and return the new generation token.
    /// Arming an idle slot primes it so the burst releases at least one particle.
    pub fn burst(&mut self, birth_rate: f32) -> u32 {
        if !self.is_bursting() {
            self.accumulator = 1.0;
        }
        self.birth_rate = birth_rate;
        self.generation = self.generation.wrapping_add(1);
        self.bursts += 1;
        self.generation
    }

    pub fn stop(&mut self) {
        self.birth_rate = 0.0;
        self.accumulator = 0.0;
    }

    /// Whole particles due after `dt` seconds of emission
    pub fn take_spawn_count(&mut self, dt: f32) -> u32 {
        if !self.is_bursting() {
            return 0;
        }
        self.accumulator += self.birth_rate * dt;
        let count = self.accumulator.floor();
        self.accumulator -= count;
        count as u32
    }
}

/// Fixed arena of emitter slots indexed by `(position, role, digit)`
#[derive(Debug, Clone)]
pub struct EmitterPool {
    slots: Vec<Option<EmitterSlot>>,
}

impl Default for EmitterPool {
    fn default() -> Self {
        Self {
            slots: vec![None; SLOT_CAPACITY],
        }
    }
}

impl EmitterPool {
    /// Clone `template` into one slot per position, role and digit.
    ///
    /// Without a template the pool stays empty; a digit whose glyph is
    /// unavailable gets no slots.
    pub fn build(
        template: Option<&EmitterTemplate>,
        roles: &[EmitterRole],
        overrides: &EmitterOverrides,
        layout: &LayoutConfig,
        field_mask: u32,
        has_glyph: impl Fn(Digit) -> bool,
    ) -> Self {
        let mut pool = Self::default();
        let Some(template) = template else {
            log::debug!("no emitter template, particle feedback disabled");
            return pool;
        };

        let base_color = Vec4::from(template.color);

        for digit in Digit::ALL {
            if !has_glyph(digit) {
                log::debug!("glyph {} unavailable, skipping its emitters", digit);
                continue;
            }
            for position in DigitPosition::ALL {
                for &role in roles {
                    let key = SlotKey::new(position, role, digit);
                    let y = match role {
                        EmitterRole::Previous => 0.0,
                        EmitterRole::Current => CURRENT_REST_Y,
                    };
                    pool.slots[key.index()] = Some(EmitterSlot {
                        key,
                        settings: EmitterSettings::resolve(template, overrides, position, field_mask),
                        position: Vec2::new(position.x(layout), y),
                        birth_rate: 0.0,
                        emission_angle: template.emission_angle,
                        speed: overrides.speed.unwrap_or(template.speed),
                        colors: ColorSequence::constant(base_color),
                        accumulator: 0.0,
                        generation: 0,
                        bursts: 0,
                    });
                }
            }
        }
        pool
    }

    pub fn get(&self, key: SlotKey) -> Option<&EmitterSlot> {
        self.slots[key.index()].as_ref()
    }

    pub fn get_mut(&mut self, key: SlotKey) -> Option<&mut EmitterSlot> {
        self.slots[key.index()].as_mut()
    }

    /// Drop every slot bound to `digit`; returns how many were removed
    pub fn remove_digit(&mut self, digit: Digit) -> usize {
        let mut removed = 0;
        for slot in self.slots.iter_mut() {
            if slot.as_ref().is_some_and(|s| s.key.digit == digit) {
                *slot = None;
                removed += 1;
            }
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmitterSlot> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut EmitterSlot> {
        self.slots.iter_mut().flatten()
    }

    /// Total bursts fired across the pool
    pub fn total_bursts(&self) -> u32 {
        self.iter().map(EmitterSlot::bursts).sum()
    }
}
