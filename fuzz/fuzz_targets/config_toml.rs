#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(config) = toml::from_str::<framestat::config::types::ConfigFile>(input) {
            let _ = framestat::fuzzing::apply_config_input(&config);
        }
    }
});
