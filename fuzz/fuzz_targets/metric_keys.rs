#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 || data.len() > 4096 {
        return;
    }
    let (head, tail) = data.split_at(data.len() / 2);
    let keys: Vec<String> = String::from_utf8_lossy(head)
        .split(',')
        .take(16)
        .map(str::to_owned)
        .collect();

    let mut timestamp_ns = 0_u64;
    let samples: Vec<(u64, f64)> = tail
        .chunks(2)
        .map(|chunk| {
            let step = u64::from(chunk.first().copied().unwrap_or(0));
            timestamp_ns = timestamp_ns.saturating_add(step.saturating_mul(1_000_000_000));
            let value = f64::from(chunk.get(1).copied().unwrap_or(0));
            (timestamp_ns, value)
        })
        .collect();

    let readings = framestat::fuzzing::inline_engine_readings(&keys, &samples, 3);
    for reading in &readings {
        debug_assert!(reading.value.is_finite());
        debug_assert!(reading.value >= 0.0);
    }
});
