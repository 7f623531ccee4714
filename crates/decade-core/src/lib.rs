//! Core device model for the Decade Display counter.
//!
//! Models a synchronous modulo-10 counter whose value is combinationally
//! decoded to a seven-segment pattern and driven on a fixed pin interface.
//! One call to [`DecadeCounter::tick`] is one active clock edge; there is no
//! free-running clock and no hidden state between edges.

/// Counter digit value type and its single counting cycle.
pub mod digit;
pub use digit::{Digit, DIGIT_COUNT};

/// Fault taxonomy for boundary and integration violations.
pub mod fault;
pub use fault::{Fault, FaultClass};

/// Combinational digit-to-segment decoder and pattern table.
pub mod segments;
pub use segments::{
    decode, decode_value, Segment, SegmentPattern, SEGMENT_MASK, SEGMENT_PATTERNS,
};

/// Pin-level input and output bus contracts.
pub mod pins;
pub use pins::{PinOutputs, TickInputs, DECIMAL_POINT_BIT};

/// Synchronous core state machine, tracing, and snapshots.
pub mod device;
pub use device::{
    next_digit, DecadeCounter, DeviceSnapshot, SnapshotVersion, TraceEvent, TraceSink,
};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
