#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_http1_framing::parse_request;

fuzz_target!(|data: &[u8]| {
    // 任意のバイト列でパニックしないこと
    if let Ok(request) = parse_request(data) {
        // 借用ビューとアクセサーが健全であること
        let _ = request.request_line.method_str();
        let _ = request.request_line.path_str();
        let _ = request.request_line.version_str();
        let _ = request.content_length();
        for header in &request.headers {
            let _ = header.name_str();
            let _ = header.value_str();
        }
        assert!(request.body.len() <= data.len());
    }
});
