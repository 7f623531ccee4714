use std::io::{self, Write};

use decade_core::{PinOutputs, TickInputs};
use vcd::{TimescaleUnit, Value, VarType, Writer};

/// Signals captured for one clock edge of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveSample {
    /// Inputs driven into the edge.
    pub inputs: TickInputs,
    /// Bus values latched at the edge.
    pub sampled: PinOutputs,
}

const fn scalar(bit: bool) -> Value {
    if bit {
        Value::V1
    } else {
        Value::V0
    }
}

// MSB first per the VCD vector format.
fn vector(byte: u8) -> [Value; 8] {
    std::array::from_fn(|i| scalar(byte & (0x80 >> i) != 0))
}

/// Writes a VCD waveform of a run, one timestep per clock edge.
///
/// Declares `reset_n`, `enable`, the output bus, and the bidirectional bus
/// signals under a single `decade` scope.
///
/// # Errors
///
/// Propagates I/O failures from the underlying writer.
pub fn write_vcd<W: Write>(out: W, samples: &[WaveSample]) -> io::Result<()> {
    let mut writer = Writer::new(out);
    writer.timescale(1, TimescaleUnit::US)?;
    writer.add_module("decade")?;
    let reset_n = writer.add_var(VarType::Wire, 1, "reset_n", None)?;
    let enable = writer.add_var(VarType::Wire, 1, "enable", None)?;
    let output_bus = writer.add_var(VarType::Wire, 8, "output_bus", None)?;
    let bidir_out = writer.add_var(VarType::Wire, 8, "bidir_out", None)?;
    let bidir_oe = writer.add_var(VarType::Wire, 8, "bidir_oe", None)?;
    writer.upscope()?;
    writer.enddefinitions()?;

    let mut time = 0_u64;
    for sample in samples {
        writer.timestamp(time)?;
        writer.change_scalar(reset_n, scalar(sample.inputs.reset_n))?;
        writer.change_scalar(enable, scalar(sample.inputs.enable))?;
        writer.change_vector(output_bus, vector(sample.sampled.output_bus))?;
        writer.change_vector(bidir_out, vector(sample.sampled.bidir_out))?;
        writer.change_vector(bidir_oe, vector(sample.sampled.bidir_oe))?;
        time += 1;
    }
    writer.timestamp(time)?;
    writer.flush()
}
