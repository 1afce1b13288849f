//! Glyph values shown by the counter and addressed by the emitter pool.

use std::fmt;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Digit {
    Zero = 0,
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
}

impl Digit {
    pub const ALL: [Digit; 10] = [
        Digit::Zero,
        Digit::One,
        Digit::Two,
        Digit::Three,
        Digit::Four,
        Digit::Five,
        Digit::Six,
        Digit::Seven,
        Digit::Eight,
        Digit::Nine,
    ];

    /// Build a Digit from the remainder of `n % 10`, which is always in range
    pub fn from_remainder(n: u8) -> Self {
        Self::ALL[(n % 10) as usize]
    }

    /// Convert digit to its numeric value (0-9)
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The character drawn for this digit
    pub const fn glyph(self) -> char {
        (b'0' + self as u8) as char
    }

    /// Asset path of the pre-rendered particle texture for this digit
    pub fn texture_path(self) -> String {
        format!("glyphs/{}.png", self.to_u8())
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
