use std::fmt;

use crate::fault::Fault;

/// Number of distinct counter states (`0..=9`).
pub const DIGIT_COUNT: usize = 10;

/// Current decimal value of the counter register.
///
/// A `Digit` always holds a value in `0..=9`. Construction from raw bytes is
/// checked at the boundary, so arithmetic on an existing value can never
/// produce an out-of-range state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Digit(u8);

impl Digit {
    /// The reset value of the counter register.
    pub const ZERO: Self = Self(0);

    /// Ordered list of all counter states, lowest first.
    pub const ALL: [Self; DIGIT_COUNT] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
        Self(8),
        Self(9),
    ];

    /// Checked construction from a raw byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Decimal value of this digit (`0..=9`).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the array index for this digit (`0..=9`).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Successor in the single counting cycle, wrapping `9` back to `0`.
    #[must_use]
    pub const fn wrapping_next(self) -> Self {
        if self.0 == 9 {
            Self(0)
        } else {
            Self(self.0 + 1)
        }
    }
}

impl TryFrom<u8> for Digit {
    type Error = Fault;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(Fault::DigitOutOfRange { value })
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
