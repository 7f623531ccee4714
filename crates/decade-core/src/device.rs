//! Synchronous core: the counter register, edge stepping, and snapshots.
//!
//! One call to [`DecadeCounter::tick`] is one active clock edge. The register
//! update commits atomically inside the call, so callers only ever observe
//! settled states. The value returned by `tick` is the bus as latched *at*
//! the edge by an edge-synchronized observer, which still sees the state the
//! device carried into the edge; [`DecadeCounter::outputs`] gives the settled
//! view immediately after.

use crate::digit::Digit;
use crate::fault::Fault;
use crate::pins::{PinOutputs, TickInputs};
use crate::segments::decode;

/// Next counter value latched by one active clock edge.
///
/// Reset is active low and takes priority over `enable`. With reset released
/// the digit advances by one while `enable` is set (wrapping `9` to `0`) and
/// holds otherwise.
#[must_use]
pub const fn next_digit(current: Digit, reset_n: bool, enable: bool) -> Digit {
    match (reset_n, enable) {
        (false, _) => Digit::ZERO,
        (true, true) => current.wrapping_next(),
        (true, false) => current,
    }
}

/// Observability events emitted by [`DecadeCounter::tick_traced`].
///
/// Within one edge the sampled bus is reported first, then the register
/// transition the edge committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceEvent {
    /// Bus values latched by an edge-synchronized observer at this edge.
    EdgeSampled {
        /// Index of the edge, counted from power-on.
        edge: u64,
        /// The latched bus values.
        outputs: PinOutputs,
    },
    /// Reset forced the register to zero at this edge.
    ResetApplied {
        /// Index of the edge.
        edge: u64,
    },
    /// The register advanced by one, including the `9` to `0` wrap.
    DigitAdvanced {
        /// Index of the edge.
        edge: u64,
        /// Digit entering the edge.
        from: Digit,
        /// Digit latched by the edge.
        to: Digit,
    },
    /// Enable was low and the register held its value.
    DigitHeld {
        /// Index of the edge.
        edge: u64,
        /// The held digit.
        digit: Digit,
    },
}

/// Sink for deterministic per-edge trace events.
pub trait TraceSink {
    /// Records one event. Called in simulation order.
    fn on_event(&mut self, event: TraceEvent);
}

/// Stable snapshot schema identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u16)]
pub enum SnapshotVersion {
    /// Initial schema revision.
    V1 = 1,
}

impl SnapshotVersion {
    /// Converts a snapshot version to its stable wire value.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Converts a stable wire value back into a snapshot version.
    #[must_use]
    pub const fn from_u16(version: u16) -> Option<Self> {
        match version {
            1 => Some(Self::V1),
            _ => None,
        }
    }
}

/// Serializable device state for export, import, and replay fixtures.
///
/// The digit travels as its raw bus value and is re-validated on restore, so
/// a corrupted or tampered snapshot cannot smuggle an out-of-range digit
/// into a live counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DeviceSnapshot {
    /// Snapshot schema version.
    pub version: SnapshotVersion,
    /// Raw digit value, valid when in `0..=9`.
    pub digit: u8,
    /// Number of active edges applied since power-on.
    pub edges: u64,
}

/// The synchronous decade counter core.
///
/// Owns the digit register exclusively; every mutation happens inside
/// [`tick`](Self::tick), and two devices stepped from equal states with the
/// same inputs stay bit-for-bit identical.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecadeCounter {
    digit: Digit,
    edges: u64,
}

impl DecadeCounter {
    /// Creates a powered-on core with the digit register at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            digit: Digit::ZERO,
            edges: 0,
        }
    }

    /// Digit currently held by the counter register.
    #[must_use]
    pub const fn digit(&self) -> Digit {
        self.digit
    }

    /// Number of active clock edges applied since power-on.
    #[must_use]
    pub const fn edges(&self) -> u64 {
        self.edges
    }

    /// Settled output pins for the current state.
    ///
    /// Recomputed from the digit register on every call; the decoder holds
    /// no state of its own.
    #[must_use]
    pub const fn outputs(&self) -> PinOutputs {
        PinOutputs::from_pattern(decode(self.digit))
    }

    /// Applies one active clock edge.
    ///
    /// Returns the bus values an edge-synchronized observer latches at the
    /// edge, which reflect the digit entering it. The register update
    /// commits before the call returns, so [`outputs`](Self::outputs)
    /// immediately afterwards shows the settled new pattern and no
    /// intermediate state is ever visible.
    pub const fn tick(&mut self, inputs: TickInputs) -> PinOutputs {
        let sampled = self.outputs();
        self.digit = next_digit(self.digit, inputs.reset_n, inputs.enable);
        self.edges = self.edges.wrapping_add(1);
        sampled
    }

    /// Applies one active clock edge while reporting trace events to `sink`.
    ///
    /// Bus sample first, then the committed register transition.
    pub fn tick_traced(&mut self, inputs: TickInputs, sink: &mut dyn TraceSink) -> PinOutputs {
        let edge = self.edges;
        let before = self.digit;
        let sampled = self.tick(inputs);

        sink.on_event(TraceEvent::EdgeSampled {
            edge,
            outputs: sampled,
        });
        match (inputs.reset_n, inputs.enable) {
            (false, _) => sink.on_event(TraceEvent::ResetApplied { edge }),
            (true, true) => sink.on_event(TraceEvent::DigitAdvanced {
                edge,
                from: before,
                to: self.digit,
            }),
            (true, false) => sink.on_event(TraceEvent::DigitHeld {
                edge,
                digit: self.digit,
            }),
        }
        sampled
    }

    /// Returns the device to its power-on state: digit zero, edge counter
    /// cleared.
    pub const fn reset_to_power_on(&mut self) {
        *self = Self::new();
    }

    /// Exports the current state as a versioned snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot {
            version: SnapshotVersion::V1,
            digit: self.digit.value(),
            edges: self.edges,
        }
    }

    /// Restores a device from a snapshot, re-validating the digit range.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::DigitOutOfRange`] when the snapshot carries a digit
    /// outside `0..=9`.
    pub const fn restore(snapshot: DeviceSnapshot) -> Result<Self, Fault> {
        match Digit::from_u8(snapshot.digit) {
            Some(digit) => Ok(Self {
                digit,
                edges: snapshot.edges,
            }),
            None => Err(Fault::DigitOutOfRange {
                value: snapshot.digit,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{next_digit, DecadeCounter, DeviceSnapshot, SnapshotVersion, TraceEvent, TraceSink};
    use crate::digit::Digit;
    use crate::fault::Fault;
    use crate::pins::TickInputs;
    use crate::segments::{decode, SEGMENT_PATTERNS};

    #[derive(Default)]
    struct Recorder {
        events: Vec<TraceEvent>,
    }

    impl TraceSink for Recorder {
        fn on_event(&mut self, event: TraceEvent) {
            self.events.push(event);
        }
    }

    fn digit(value: u8) -> Digit {
        Digit::from_u8(value).expect("test digit in range")
    }

    #[test]
    fn power_on_state_is_digit_zero_with_no_edges() {
        let core = DecadeCounter::new();
        assert_eq!(core.digit(), Digit::ZERO);
        assert_eq!(core.edges(), 0);
        assert_eq!(core.outputs().segments(), decode(Digit::ZERO));
        assert_eq!(DecadeCounter::default(), core);
    }

    #[test]
    fn next_digit_applies_reset_priority_then_enable() {
        assert_eq!(next_digit(digit(7), false, true), Digit::ZERO);
        assert_eq!(next_digit(digit(7), false, false), Digit::ZERO);
        assert_eq!(next_digit(digit(7), true, true), digit(8));
        assert_eq!(next_digit(digit(9), true, true), Digit::ZERO);
        assert_eq!(next_digit(digit(7), true, false), digit(7));
    }

    #[test]
    fn tick_returns_the_bus_entering_the_edge_then_commits() {
        let mut core = DecadeCounter::new();

        let sampled = core.tick(TickInputs::counting());
        assert_eq!(sampled.segments(), SEGMENT_PATTERNS[0]);
        assert_eq!(core.digit(), digit(1));
        assert_eq!(core.outputs().segments(), SEGMENT_PATTERNS[1]);

        let sampled = core.tick(TickInputs::counting());
        assert_eq!(sampled.segments(), SEGMENT_PATTERNS[1]);
        assert_eq!(core.digit(), digit(2));
    }

    #[test]
    fn reset_edges_hold_the_register_at_zero() {
        let mut core = DecadeCounter::new();
        for _ in 0..10 {
            let sampled = core.tick(TickInputs::reset());
            assert_eq!(sampled.segments(), SEGMENT_PATTERNS[0]);
        }
        assert_eq!(core.digit(), Digit::ZERO);
        assert_eq!(core.edges(), 10);
    }

    #[test]
    fn reset_mid_count_wins_over_enable() {
        let mut core = DecadeCounter::new();
        for _ in 0..5 {
            core.tick(TickInputs::counting());
        }
        assert_eq!(core.digit(), digit(5));

        let sampled = core.tick(TickInputs::reset());
        assert_eq!(sampled.segments(), SEGMENT_PATTERNS[5]);
        assert_eq!(core.digit(), Digit::ZERO);
    }

    #[test]
    fn disabled_edges_hold_the_digit_but_still_count_edges() {
        let mut core = DecadeCounter::new();
        for _ in 0..3 {
            core.tick(TickInputs::counting());
        }
        let held = core.digit();

        for _ in 0..4 {
            let sampled = core.tick(TickInputs::idle());
            assert_eq!(sampled.segments(), decode(held));
        }
        assert_eq!(core.digit(), held);
        assert_eq!(core.edges(), 7);
    }

    #[test]
    fn counter_wraps_from_nine_back_to_zero() {
        let mut core = DecadeCounter::new();
        for _ in 0..9 {
            core.tick(TickInputs::counting());
        }
        assert_eq!(core.digit(), digit(9));

        let sampled = core.tick(TickInputs::counting());
        assert_eq!(sampled.segments(), SEGMENT_PATTERNS[9]);
        assert_eq!(core.digit(), Digit::ZERO);
    }

    #[test]
    fn traced_tick_reports_sample_then_transition() {
        let mut recorder = Recorder::default();
        let mut core = DecadeCounter::new();

        core.tick_traced(TickInputs::counting(), &mut recorder);
        core.tick_traced(TickInputs::idle(), &mut recorder);
        core.tick_traced(TickInputs::reset(), &mut recorder);

        assert_eq!(recorder.events.len(), 6);
        assert!(matches!(
            recorder.events[0],
            TraceEvent::EdgeSampled { edge: 0, .. }
        ));
        assert_eq!(
            recorder.events[1],
            TraceEvent::DigitAdvanced {
                edge: 0,
                from: Digit::ZERO,
                to: digit(1),
            }
        );
        assert_eq!(
            recorder.events[3],
            TraceEvent::DigitHeld {
                edge: 1,
                digit: digit(1),
            }
        );
        assert_eq!(recorder.events[5], TraceEvent::ResetApplied { edge: 2 });
    }

    #[test]
    fn power_on_reset_clears_digit_and_edge_count() {
        let mut core = DecadeCounter::new();
        for _ in 0..13 {
            core.tick(TickInputs::counting());
        }
        core.reset_to_power_on();
        assert_eq!(core, DecadeCounter::new());
    }

    #[test]
    fn snapshot_roundtrip_preserves_state() {
        let mut core = DecadeCounter::new();
        for _ in 0..12 {
            core.tick(TickInputs::counting());
        }

        let snapshot = core.snapshot();
        assert_eq!(snapshot.version, SnapshotVersion::V1);
        assert_eq!(snapshot.digit, 2);
        assert_eq!(snapshot.edges, 12);

        let restored = DecadeCounter::restore(snapshot).expect("snapshot restores");
        assert_eq!(restored, core);
    }

    #[test]
    fn restore_rejects_out_of_range_digits() {
        let snapshot = DeviceSnapshot {
            version: SnapshotVersion::V1,
            digit: 11,
            edges: 4,
        };
        assert_eq!(
            DecadeCounter::restore(snapshot),
            Err(Fault::DigitOutOfRange { value: 11 })
        );
    }

    #[test]
    fn snapshot_version_wire_value_roundtrips() {
        assert_eq!(SnapshotVersion::V1.as_u16(), 1);
        assert_eq!(SnapshotVersion::from_u16(1), Some(SnapshotVersion::V1));
        assert_eq!(SnapshotVersion::from_u16(0), None);
        assert_eq!(SnapshotVersion::from_u16(2), None);
    }

    #[test]
    fn restored_devices_replay_identically() {
        let mut original = DecadeCounter::new();
        for _ in 0..7 {
            original.tick(TickInputs::counting());
        }

        let mut replica = DecadeCounter::restore(original.snapshot()).expect("snapshot restores");
        let stimulus = [
            TickInputs::counting(),
            TickInputs::idle(),
            TickInputs::counting(),
            TickInputs::reset(),
            TickInputs::counting(),
        ];
        for inputs in stimulus {
            assert_eq!(original.tick(inputs), replica.tick(inputs));
        }
        assert_eq!(original, replica);
    }
}
