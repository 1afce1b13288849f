use bevy::prelude::*;

use super::digit::Digit;

/// Largest value the two-digit counter can show
pub const MAX_VALUE: u8 = 99;

/// Whether the most recent mutation increased the counter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Increment,
    Decrement,
}

impl Direction {
    /// Strict comparison: an unchanged value resolves to `Decrement`
    pub fn between(previous: u8, current: u8) -> Self {
        if current > previous {
            Direction::Increment
        } else {
            Direction::Decrement
        }
    }

    /// +1.0 for increments, -1.0 for decrements
    pub fn sign(self) -> f32 {
        match self {
            Direction::Increment => 1.0,
            Direction::Decrement => -1.0,
        }
    }
}

/// Tens and units of a counter value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decomposition {
    pub tens: Digit,
    pub units: Digit,
}

impl Decomposition {
    pub fn of(value: u8) -> Self {
        let value = value.min(MAX_VALUE);
        Self {
            tens: Digit::from_remainder(value / 10),
            units: Digit::from_remainder(value % 10),
        }
    }

    /// Rebuild the integer this decomposition was taken from
    pub fn value(self) -> u8 {
        self.tens.to_u8() * 10 + self.units.to_u8()
    }
}

/// Counter value plus the decomposition that was last rendered
#[derive(Resource, Debug, Clone)]
pub struct CounterState {
    value: u8,
    previous: Decomposition,
}

impl Default for CounterState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl CounterState {
    /// Start at `value` (clamped) with the display already showing it
    pub fn new(value: u8) -> Self {
        let value = value.min(MAX_VALUE);
        Self {
            value,
            previous: Decomposition::of(value),
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn previous(&self) -> Decomposition {
        self.previous
    }

    pub fn current(&self) -> Decomposition {
        Decomposition::of(self.value)
    }

    /// Direction of the pending change, derived from the rendered digits
    pub fn direction(&self) -> Direction {
        Direction::between(self.previous.value(), self.value)
    }

    pub fn increment(&mut self) {
        self.set(self.value as i16 + 1);
    }

    pub fn decrement(&mut self) {
        self.set(self.value as i16 - 1);
    }

    /// Saturating assignment; out-of-range values are absorbed silently
    pub fn set(&mut self, value: i16) {
        self.value = value.clamp(0, MAX_VALUE as i16) as u8;
    }

    /// Record the digits that are now on screen
    pub fn commit(&mut self, shown: Decomposition) {
        self.previous = shown;
    }
}
