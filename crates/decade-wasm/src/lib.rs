use decade_core::{DecadeCounter, DeviceSnapshot, TickInputs, SEGMENT_PATTERNS};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&format!($($t)*).into()))
}

/// JS-compatible view of one applied clock edge.
#[derive(Serialize, Deserialize)]
pub struct WasmEdgeSample {
    pub edge: u64,
    pub output_bus: u8,
    pub bidir_out: u8,
    pub bidir_oe: u8,
    pub digit_after: u8,
}

#[wasm_bindgen]
pub struct WasmDecadeCounter {
    core: DecadeCounter,
}

#[wasm_bindgen]
impl WasmDecadeCounter {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self {
            core: DecadeCounter::new(),
        }
    }

    /// Applies one clock edge and returns the output bus byte latched at it.
    pub fn tick(&mut self, reset_n: bool, enable: bool) -> u8 {
        self.core
            .tick(TickInputs {
                reset_n,
                enable,
                input_bus: 0,
                bidir_in: 0,
            })
            .output_bus
    }

    /// Applies one clock edge and returns the full sample as a JS object.
    pub fn tick_sample(&mut self, reset_n: bool, enable: bool) -> JsValue {
        let edge = self.core.edges();
        let sampled = self.core.tick(TickInputs {
            reset_n,
            enable,
            input_bus: 0,
            bidir_in: 0,
        });

        let sample = WasmEdgeSample {
            edge,
            output_bus: sampled.output_bus,
            bidir_out: sampled.bidir_out,
            bidir_oe: sampled.bidir_oe,
            digit_after: self.core.digit().value(),
        };
        serde_wasm_bindgen::to_value(&sample).unwrap()
    }

    /// Current settled digit value.
    #[must_use]
    pub fn digit(&self) -> u8 {
        self.core.digit().value()
    }

    /// Settled output bus byte for the current digit.
    #[must_use]
    pub fn output_bus(&self) -> u8 {
        self.core.outputs().output_bus
    }

    /// Clock edges applied since power-on.
    #[must_use]
    pub fn edges(&self) -> u64 {
        self.core.edges()
    }

    /// Returns the device to its power-on state.
    pub fn power_on_reset(&mut self) {
        self.core.reset_to_power_on();
    }

    /// Exports the device state as a JS object.
    #[must_use]
    pub fn snapshot(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.core.snapshot()).unwrap()
    }

    /// Restores the device from a snapshot object.
    ///
    /// # Errors
    ///
    /// Rejects objects that do not deserialize as a snapshot and snapshots
    /// whose digit is outside 0-9.
    pub fn restore(&mut self, snapshot: JsValue) -> Result<(), JsValue> {
        let snapshot: DeviceSnapshot = serde_wasm_bindgen::from_value(snapshot)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let restored =
            DecadeCounter::restore(snapshot).map_err(|e| JsValue::from_str(&e.to_string()))?;

        self.core = restored;
        console_log!(
            "Restored device at digit {} after {} edges",
            self.core.digit(),
            self.core.edges()
        );
        Ok(())
    }

    /// The ten segment patterns indexed by digit, for building UIs.
    #[must_use]
    pub fn pattern_table(&self) -> js_sys::Uint8Array {
        let bytes: Vec<u8> = SEGMENT_PATTERNS
            .iter()
            .map(|pattern| pattern.bits())
            .collect();
        js_sys::Uint8Array::from(bytes.as_slice())
    }
}

impl Default for WasmDecadeCounter {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::WasmDecadeCounter;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn restore_round_trips_through_js_values() {
        let mut bridge = WasmDecadeCounter::new();
        for _ in 0..3 {
            bridge.tick(true, true);
        }

        let mut replica = WasmDecadeCounter::new();
        replica
            .restore(bridge.snapshot())
            .expect("snapshot restores");
        assert_eq!(replica.digit(), 3);
        assert_eq!(replica.edges(), 3);
    }

    #[wasm_bindgen_test]
    fn tick_sample_exposes_the_sampled_bus() {
        let mut bridge = WasmDecadeCounter::new();
        bridge.tick(false, true);

        let sample = bridge.tick_sample(true, true);
        let output_bus =
            js_sys::Reflect::get(&sample, &"output_bus".into()).expect("sample field");
        assert_eq!(output_bus.as_f64(), Some(f64::from(0x3F)));
        let digit_after =
            js_sys::Reflect::get(&sample, &"digit_after".into()).expect("sample field");
        assert_eq!(digit_after.as_f64(), Some(1.0));
    }
}
