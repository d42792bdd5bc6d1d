#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_http1_framing::{AccumulateStatus, RequestAccumulator, parse_request};

fuzz_target!(|data: &[u8]| {
    // データを一度に accumulate
    let mut accumulator = RequestAccumulator::new();
    if let Ok(AccumulateStatus::Complete) = accumulator.accumulate(data) {
        // Complete と判定されたフレームのパースはパニックしない
        // (パースエラー自体は許容される)
        let _ = parse_request(accumulator.accumulated_data());
    }

    // データを分割して accumulate (ストリーミングシナリオ)
    accumulator.reset();
    for chunk in data.chunks(17) {
        match accumulator.accumulate(chunk) {
            Ok(AccumulateStatus::Complete) => {
                let _ = parse_request(accumulator.accumulated_data());
                return;
            }
            Ok(AccumulateStatus::NeedMoreData) => {}
            Err(_) => return,
        }
    }
});
