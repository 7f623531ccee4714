//! Decade Display simulator library.

/// ASCII glyph rendering for seven-segment patterns.
pub mod render;
/// Per-edge trace collection and table formatting.
pub mod trace;
/// VCD waveform export for simulation runs.
pub mod waveform;

#[cfg(test)]
use tempfile as _;
