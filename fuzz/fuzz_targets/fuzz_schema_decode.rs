#![no_main]

use libfuzzer_sys::fuzz_target;
use packedserial_core::{Codec, Schema, TypeTag};

// Bytes before the first 0xFF pick one tag each; the rest is the packet.
fuzz_target!(|data: &[u8]| {
    let split = data.iter().position(|b| *b == 0xFF).unwrap_or(data.len());
    let schema: Schema = data[..split]
        .iter()
        .take(32)
        .map(|b| TypeTag::ALL[(*b as usize) % TypeTag::ALL.len()])
        .collect();
    let packet = data.get(split + 1..).unwrap_or(&[]);

    let codec = Codec::new(schema);
    if let Ok((values, used)) = codec.decode_prefix(packet) {
        assert!(used <= packet.len());
        // Anything that decodes re-encodes to the bytes it came from, unless
        // a float was a NaN with a non-canonical payload.
        if let Ok(bytes) = codec.encode(&values) {
            if values.iter().all(|v| v.as_float().map_or(true, |f| !f.is_nan())) {
                assert_eq!(bytes, &packet[..used]);
            }
        }
    }
});
