//! Pin-level contracts for the fixed device interface.
//!
//! The device exposes three byte-wide buses plus two control lines. Only the
//! output bus ever carries meaningful data; the general-purpose input bus is
//! reserved, and the bidirectional bus stays configured as an input with both
//! its driven value and its output enables held at zero.

use crate::fault::Fault;
use crate::segments::SegmentPattern;

/// Bit position of the decimal point within the output bus.
pub const DECIMAL_POINT_BIT: u8 = 7;

/// Control and bus inputs sampled by one active clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickInputs {
    /// Active-low reset; `false` forces the counter to zero at the edge.
    pub reset_n: bool,
    /// Count enable; the digit advances only while this is set.
    pub enable: bool,
    /// General-purpose input bus. Reserved, sampled but ignored.
    pub input_bus: u8,
    /// Bidirectional bus input view. Sampled but ignored; the bus stays
    /// input-only.
    pub bidir_in: u8,
}

impl TickInputs {
    /// Inputs for a reset edge. Enable is raised deliberately so the
    /// reset-wins priority is exercised rather than assumed.
    #[must_use]
    pub const fn reset() -> Self {
        Self {
            reset_n: false,
            enable: true,
            input_bus: 0,
            bidir_in: 0,
        }
    }

    /// Inputs for a counting edge: reset released, enable high.
    #[must_use]
    pub const fn counting() -> Self {
        Self {
            reset_n: true,
            enable: true,
            input_bus: 0,
            bidir_in: 0,
        }
    }

    /// Inputs for a holding edge: reset released, enable low.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            reset_n: true,
            enable: false,
            input_bus: 0,
            bidir_in: 0,
        }
    }

    /// Returns `true` when the active-low reset line is asserted.
    #[must_use]
    pub const fn is_reset_asserted(self) -> bool {
        !self.reset_n
    }
}

impl Default for TickInputs {
    fn default() -> Self {
        Self::idle()
    }
}

/// Settled output pins for one observation point.
///
/// Values produced by the device always satisfy the pin contract: the
/// decimal point bit is clear and the bidirectional bus is quiescent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PinOutputs {
    /// Output bus byte: decimal point in bit 7, segment pattern in bits 6-0.
    pub output_bus: u8,
    /// Value driven on the bidirectional bus, constant zero.
    pub bidir_out: u8,
    /// Output enables for the bidirectional bus, constant zero (input mode).
    pub bidir_oe: u8,
}

impl PinOutputs {
    /// Assembles the observable bus for a segment pattern, with the decimal
    /// point off and the bidirectional bus quiescent.
    #[must_use]
    pub const fn from_pattern(pattern: SegmentPattern) -> Self {
        Self {
            output_bus: pattern.bits(),
            bidir_out: 0,
            bidir_oe: 0,
        }
    }

    /// Validating constructor for embeddings that reassemble pin state from
    /// raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::BidirectionalDriveAttempt`] when either `bidir_out`
    /// or `bidir_oe` is nonzero.
    pub const fn new(output_bus: u8, bidir_out: u8, bidir_oe: u8) -> Result<Self, Fault> {
        if bidir_out != 0 || bidir_oe != 0 {
            return Err(Fault::BidirectionalDriveAttempt {
                driven: bidir_out,
                enabled: bidir_oe,
            });
        }
        Ok(Self {
            output_bus,
            bidir_out,
            bidir_oe,
        })
    }

    /// Segment portion of the output bus.
    #[must_use]
    pub const fn segments(self) -> SegmentPattern {
        SegmentPattern::from_bits_truncated(self.output_bus)
    }

    /// State of the decimal point bit. Held off by this device.
    #[must_use]
    pub const fn decimal_point(self) -> bool {
        self.output_bus & (1 << DECIMAL_POINT_BIT) != 0
    }

    /// Returns `true` while the bidirectional bus drives nothing and keeps
    /// every line in input mode.
    #[must_use]
    pub const fn bidir_quiescent(self) -> bool {
        self.bidir_out == 0 && self.bidir_oe == 0
    }
}
