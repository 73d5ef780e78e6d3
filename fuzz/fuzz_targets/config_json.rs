#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = serde_json::from_slice::<framestat::config::types::ConfigFile>(data) {
        let _ = framestat::fuzzing::apply_config_input(&config);
    }
});
