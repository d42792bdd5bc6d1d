#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_http1_framing::{AccumulateStatus, RequestAccumulator};

#[derive(Debug, Arbitrary)]
struct Input {
    data: Vec<u8>,
    chunk_sizes: Vec<u8>,
}

fuzz_target!(|input: Input| {
    // 区切り方を変えても一括投入と同じ判定になること
    let mut whole = RequestAccumulator::new();
    let whole_status = whole.accumulate(&input.data);

    let mut chunked = RequestAccumulator::new();
    let mut rest = input.data.as_slice();
    let mut sizes = input.chunk_sizes.iter().cycle();
    let mut last_status = Ok(AccumulateStatus::NeedMoreData);

    if input.chunk_sizes.iter().all(|&s| s == 0) {
        return;
    }

    while !rest.is_empty() {
        let size = (*sizes.next().unwrap() as usize).min(rest.len());
        if size == 0 {
            continue;
        }
        let (chunk, next) = rest.split_at(size);
        last_status = chunked.accumulate(chunk);
        rest = next;
    }

    if let (Ok(a), Ok(b)) = (whole_status, last_status) {
        assert_eq!(a, b);
        assert_eq!(whole.accumulated_data(), chunked.accumulated_data());
        assert_eq!(
            whole.expected_body_length(),
            chunked.expected_body_length()
        );
    }
});
