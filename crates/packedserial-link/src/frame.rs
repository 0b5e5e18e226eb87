//! COBS framing on top of the `cobs` crate.
//!
//! COBS removes every zero byte from a payload, so a single `0x00` can mark
//! the end of each frame on the wire. Overhead is one byte per started run of
//! 254 payload bytes, plus the delimiter.

use crate::FrameError;

/// Byte that terminates every frame on the wire.
pub const DELIMITER: u8 = 0x00;

/// Largest wire frame (stuffed bytes, delimiter excluded) for a payload of
/// `payload_len` bytes.
pub const fn max_frame_len(payload_len: usize) -> usize {
    payload_len + payload_len / 254 + 1
}

/// Stuffs `payload` and appends the delimiter.
pub fn encode_frame(payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![0u8; max_frame_len(payload.len()) + 1];
    let n = cobs::encode(payload, &mut frame);
    frame.truncate(n);
    frame.push(DELIMITER);
    frame
}

/// Reverses the stuffing of one frame. `encoded` must not include the
/// delimiter.
pub fn decode_frame(encoded: &[u8]) -> Result<Vec<u8>, FrameError> {
    if encoded.is_empty() || encoded.contains(&DELIMITER) {
        return Err(FrameError::Malformed);
    }
    cobs::decode_vec(encoded).map_err(|_| FrameError::Malformed)
}

/// Incremental splitter from a raw byte stream to decoded packets.
///
/// Bytes are buffered until a delimiter arrives. A frame longer than
/// `max_frame_len` stuffed bytes is discarded as a whole when its delimiter
/// is seen, rather than being decoded from a partial buffer. Empty frames
/// (back-to-back delimiters) are skipped.
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    buf: Vec<u8>,
    max_frame_len: usize,
    overflowed: bool,
}

impl FrameDecoder {
    pub fn new(max_frame_len: usize) -> Self {
        Self {
            buf: Vec::with_capacity(max_frame_len),
            max_frame_len,
            overflowed: false,
        }
    }

    pub fn max_frame_len(&self) -> usize {
        self.max_frame_len
    }

    /// Bytes buffered for the frame currently in progress.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Drops any partial frame.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.overflowed = false;
    }

    /// Feeds one byte, returning a packet when it completes a frame.
    pub fn push_byte(&mut self, byte: u8) -> Option<Result<Vec<u8>, FrameError>> {
        if byte != DELIMITER {
            if self.buf.len() < self.max_frame_len {
                self.buf.push(byte);
            } else {
                self.overflowed = true;
            }
            return None;
        }

        if self.overflowed {
            log::debug!(
                "dropping frame longer than {} bytes ({} buffered)",
                self.max_frame_len,
                self.buf.len()
            );
            self.reset();
            return Some(Err(FrameError::Overflow {
                limit: self.max_frame_len,
            }));
        }
        if self.buf.is_empty() {
            return None;
        }

        let decoded = decode_frame(&self.buf);
        if decoded.is_err() {
            log::debug!("dropping malformed frame of {} bytes", self.buf.len());
        }
        self.buf.clear();
        Some(decoded)
    }

    /// Feeds a chunk of stream bytes, returning every frame it completes in
    /// order.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Result<Vec<u8>, FrameError>> {
        bytes.iter().filter_map(|b| self.push_byte(*b)).collect()
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new(crate::serial::DEFAULT_MAX_FRAME_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_frame, encode_frame, max_frame_len, FrameDecoder, DELIMITER};
    use crate::serial::DEFAULT_MAX_FRAME_LEN;
    use crate::FrameError;
    use packedserial_core::{Codec, Value, MAX_TEXT_LEN};
    use proptest::prelude::*;

    #[test]
    fn encodes_known_vectors() {
        assert_eq!(encode_frame(&[0x00]), [0x01, 0x01, 0x00]);
        assert_eq!(
            encode_frame(&[0x11, 0x22, 0x00, 0x33]),
            [0x03, 0x11, 0x22, 0x02, 0x33, 0x00]
        );
    }

    #[test]
    fn full_block_has_no_implied_zero() {
        let payload = [0xAB; 254];
        let frame = encode_frame(&payload);
        assert_eq!(frame[0], 0xFF);
        assert!(frame.len() - 1 <= max_frame_len(payload.len()));
        assert_eq!(frame.last(), Some(&DELIMITER));
        assert_eq!(decode_frame(&frame[..frame.len() - 1]).unwrap(), payload);
    }

    #[test]
    fn default_decoder_takes_a_maximal_string_packet() {
        let codec = Codec::new("string".parse().unwrap());
        let text = "x".repeat(MAX_TEXT_LEN);
        let packet = codec.encode(&[Value::from(text.as_str())]).unwrap();
        assert_eq!(packet.len(), 1 + MAX_TEXT_LEN);

        let mut dec = FrameDecoder::default();
        assert_eq!(dec.max_frame_len(), DEFAULT_MAX_FRAME_LEN);
        assert_eq!(dec.feed(&encode_frame(&packet)), vec![Ok(packet)]);
    }

    #[test]
    fn decodes_known_vector() {
        assert_eq!(decode_frame(&[0x01, 0x01]).unwrap(), [0x00]);
        assert_eq!(
            decode_frame(&[0x03, 0x11, 0x22, 0x02, 0x33]).unwrap(),
            [0x11, 0x22, 0x00, 0x33]
        );
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(
            decode_frame(&[0x02, 0x00, 0x01]).unwrap_err(),
            FrameError::Malformed
        );
        assert_eq!(decode_frame(&[0x05, 0x11]).unwrap_err(), FrameError::Malformed);
        assert_eq!(decode_frame(&[]).unwrap_err(), FrameError::Malformed);
    }

    #[test]
    fn splits_stream_across_chunks() {
        let mut stream = encode_frame(&[1, 0, 2]);
        stream.extend(encode_frame(&[0xFF; 3]));
        let (a, b) = stream.split_at(2);

        let mut dec = FrameDecoder::new(64);
        assert!(dec.feed(a).is_empty());
        assert_eq!(dec.pending(), 2);
        let frames = dec.feed(b);
        assert_eq!(frames, vec![Ok(vec![1, 0, 2]), Ok(vec![0xFF; 3])]);
        assert_eq!(dec.pending(), 0);
    }

    #[test]
    fn skips_empty_frames() {
        let mut dec = FrameDecoder::new(64);
        let mut stream = vec![DELIMITER, DELIMITER];
        stream.extend(encode_frame(&[7]));
        assert_eq!(dec.feed(&stream), vec![Ok(vec![7])]);
    }

    #[test]
    fn overflowing_frame_is_dropped_then_decoder_recovers() {
        let mut dec = FrameDecoder::new(4);
        let mut stream = encode_frame(&[1, 2, 3, 4, 5, 6]);
        stream.extend(encode_frame(&[9]));
        assert_eq!(
            dec.feed(&stream),
            vec![Err(FrameError::Overflow { limit: 4 }), Ok(vec![9])]
        );
    }

    #[test]
    fn reset_discards_partial_frame() {
        let mut dec = FrameDecoder::new(16);
        dec.feed(&[0x03, 0x11]);
        dec.reset();
        assert_eq!(dec.feed(&encode_frame(&[5])), vec![Ok(vec![5])]);
    }

    proptest! {
        #[test]
        fn frames_roundtrip(payloads in proptest::collection::vec(
            proptest::collection::vec(any::<u8>(), 1..600), 1..4)
        ) {
            let mut stream = Vec::new();
            for p in &payloads {
                let frame = encode_frame(p);
                prop_assert!(frame.len() - 1 <= max_frame_len(p.len()));
                prop_assert!(!frame[..frame.len() - 1].contains(&DELIMITER));
                stream.extend(frame);
            }
            let mut dec = FrameDecoder::new(max_frame_len(600));
            let got: Vec<Vec<u8>> = dec.feed(&stream).into_iter().map(|f| f.unwrap()).collect();
            prop_assert_eq!(got, payloads);
        }
    }
}
