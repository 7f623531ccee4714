use decade_core::{Digit, PinOutputs, TraceEvent, TraceSink};

/// Header line matching the [`format_row`] columns.
pub const TABLE_HEADER: &str = " edge   bus  pattern  activity";

/// Register activity committed by one clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeActivity {
    /// Reset forced the register to zero.
    Reset,
    /// The counter advanced by one, including the wrap.
    Advanced {
        /// Digit entering the edge.
        from: Digit,
        /// Digit latched by the edge.
        to: Digit,
    },
    /// Enable was low and the register held.
    Held {
        /// The held digit.
        digit: Digit,
    },
}

/// One collected row per applied clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRow {
    /// Edge index from power-on.
    pub edge: u64,
    /// Bus values latched at the edge.
    pub sampled: PinOutputs,
    /// Transition the edge committed.
    pub activity: EdgeActivity,
}

/// Sink that pairs per-edge events back into table rows.
///
/// Relies on the emission order of the core: the bus sample for an edge
/// arrives before the transition event for the same edge.
#[derive(Debug, Default)]
pub struct RowCollector {
    pending: Option<(u64, PinOutputs)>,
    rows: Vec<EdgeRow>,
}

impl RowCollector {
    /// Creates an empty collector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: None,
            rows: Vec::new(),
        }
    }

    /// Collected rows in edge order.
    #[must_use]
    pub fn rows(&self) -> &[EdgeRow] {
        &self.rows
    }

    fn commit(&mut self, edge: u64, activity: EdgeActivity) {
        if let Some((sampled_edge, sampled)) = self.pending.take() {
            if sampled_edge == edge {
                self.rows.push(EdgeRow {
                    edge,
                    sampled,
                    activity,
                });
            }
        }
    }
}

impl TraceSink for RowCollector {
    fn on_event(&mut self, event: TraceEvent) {
        match event {
            TraceEvent::EdgeSampled { edge, outputs } => self.pending = Some((edge, outputs)),
            TraceEvent::ResetApplied { edge } => self.commit(edge, EdgeActivity::Reset),
            TraceEvent::DigitAdvanced { edge, from, to } => {
                self.commit(edge, EdgeActivity::Advanced { from, to });
            }
            TraceEvent::DigitHeld { edge, digit } => {
                self.commit(edge, EdgeActivity::Held { digit });
            }
        }
    }
}

/// Formats one row for the run table printed by the `run` command.
#[must_use]
pub fn format_row(row: &EdgeRow) -> String {
    let activity = match row.activity {
        EdgeActivity::Reset => "reset".to_string(),
        EdgeActivity::Advanced { from, to } => format!("count {from} -> {to}"),
        EdgeActivity::Held { digit } => format!("hold {digit}"),
    };

    format!(
        "{:>5}  0x{:02X}  {}  {}",
        row.edge,
        row.sampled.output_bus,
        row.sampled.segments(),
        activity
    )
}
