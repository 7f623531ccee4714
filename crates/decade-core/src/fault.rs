use thiserror::Error;

/// Coarse fault classification separating model bugs from caller misuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FaultClass {
    /// Bad input would have put the core into an unrepresentable state.
    Invariant,
    /// An embedding asked for something the pin contract forbids.
    Integration,
}

/// Faults raised at the API boundary.
///
/// The core itself cannot reach an invalid state; every variant reports an
/// attempt to inject one from outside. Invalid input is surfaced loudly
/// instead of being clamped or wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Fault {
    /// A raw byte outside `0..=9` was offered as a counter digit.
    #[error("digit value {value} is outside the counter range 0-9")]
    DigitOutOfRange {
        /// The rejected raw value.
        value: u8,
    },

    /// A raw byte outside `0..=9` was offered to the segment decoder.
    #[error("segment lookup for value {value} has no decoder table row")]
    SegmentLookupOutOfRange {
        /// The rejected raw value.
        value: u8,
    },

    /// An embedding tried to drive the bidirectional bus, which this device
    /// keeps permanently in input mode.
    #[error(
        "bidirectional bus must stay input-only (driven {driven:#04x}, output enables {enabled:#04x})"
    )]
    BidirectionalDriveAttempt {
        /// Value the embedding tried to drive.
        driven: u8,
        /// Output-enable bits the embedding tried to raise.
        enabled: u8,
    },
}

impl Fault {
    /// Returns the diagnostics fault class for this fault.
    #[must_use]
    pub const fn class(self) -> FaultClass {
        match self {
            Self::DigitOutOfRange { .. } | Self::SegmentLookupOutOfRange { .. } => {
                FaultClass::Invariant
            }
            Self::BidirectionalDriveAttempt { .. } => FaultClass::Integration,
        }
    }

    /// Returns `true` when the fault indicates a caller bug rather than an
    /// environment or configuration problem.
    #[must_use]
    pub const fn is_programming_error(self) -> bool {
        matches!(self.class(), FaultClass::Invariant)
    }
}
