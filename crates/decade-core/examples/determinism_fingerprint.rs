//! Deterministic replay fingerprint generator used by CI cross-host comparison.

use decade_core::{DecadeCounter, TickInputs};
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

fn hash_bytes(hash: &mut u64, bytes: &[u8]) {
    for byte in bytes {
        *hash ^= u64::from(*byte);
        *hash = hash.wrapping_mul(0x1000_0000_01B3);
    }
}

fn stimulus(edge: u64) -> TickInputs {
    match edge {
        0..=9 => TickInputs::reset(),
        10..=99 => TickInputs::counting(),
        100..=119 => TickInputs::idle(),
        120 => TickInputs::reset(),
        _ => TickInputs::counting(),
    }
}

fn fingerprint() -> String {
    let mut core = DecadeCounter::new();
    let mut hash = 0xcbf2_9ce4_8422_2325_u64;

    for edge in 0..256 {
        let sampled = core.tick(stimulus(edge));
        let bytes = [
            sampled.output_bus,
            sampled.bidir_out,
            sampled.bidir_oe,
            core.digit().value(),
        ];
        hash_bytes(&mut hash, &bytes);
    }

    let snapshot = core.snapshot();
    hash_bytes(&mut hash, &[snapshot.digit]);
    hash_bytes(&mut hash, &snapshot.edges.to_le_bytes());

    format!("{hash:016x}")
}

fn main() {
    println!("{}", fingerprint());
}
