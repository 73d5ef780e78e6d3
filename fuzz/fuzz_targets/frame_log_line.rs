#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        for (index, line) in input.lines().take(256).enumerate() {
            if let Ok(Some(record)) = framestat::app::parse_frame_line(line, index + 1) {
                debug_assert!(record.fps.is_finite());
                debug_assert!(record.frametime_ms.is_none_or(f64::is_finite));
            }
        }
    }
});
