#![no_main]

use libfuzzer_sys::fuzz_target;
use packedserial_link::{encode_frame, FrameDecoder};

fuzz_target!(|data: &[u8]| {
    let mut decoder = FrameDecoder::new(64);
    for packet in decoder.feed(data).into_iter().flatten() {
        let frame = encode_frame(&packet);
        let mut again = FrameDecoder::new(frame.len());
        assert_eq!(again.feed(&frame), vec![Ok(packet)]);
    }
});
