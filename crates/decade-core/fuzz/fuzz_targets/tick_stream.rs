#![no_main]

use decade_core::{decode_value, DecadeCounter, DeviceSnapshot, SnapshotVersion, TickInputs};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut core = DecadeCounter::new();

    for chunk in data.chunks(3) {
        let controls = chunk[0];
        let inputs = TickInputs {
            reset_n: controls & 0x01 != 0,
            enable: controls & 0x02 != 0,
            input_bus: chunk.get(1).copied().unwrap_or(0),
            bidir_in: chunk.get(2).copied().unwrap_or(0),
        };

        let sampled = core.tick(inputs);
        assert!(!sampled.decimal_point());
        assert!(sampled.bidir_quiescent());
        assert!(core.digit().value() <= 9);

        let _ = decode_value(controls);
        let _ = DecadeCounter::restore(DeviceSnapshot {
            version: SnapshotVersion::V1,
            digit: controls,
            edges: core.edges(),
        });
    }
});
