use crate::frame::{encode_frame, FrameDecoder};
use crate::{FrameError, LinkError, PacketLink};
use std::collections::VecDeque;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

const READ_CHUNK: usize = 256;

/// A [`PacketLink`] over any tokio byte stream.
pub struct StreamLink<S> {
    stream: S,
    decoder: FrameDecoder,
    ready: VecDeque<Result<Vec<u8>, FrameError>>,
    read_buf: [u8; READ_CHUNK],
}

impl<S> StreamLink<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Wraps `stream`, dropping frames longer than `max_frame_len` stuffed
    /// bytes.
    pub fn new(stream: S, max_frame_len: usize) -> Self {
        Self {
            stream,
            decoder: FrameDecoder::new(max_frame_len),
            ready: VecDeque::new(),
            read_buf: [0u8; READ_CHUNK],
        }
    }

    /// Returns the stream. A partially received frame is lost.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S> PacketLink for StreamLink<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Empty payloads are not sent.
    async fn send(&mut self, payload: &[u8]) -> Result<(), LinkError> {
        if payload.is_empty() {
            return Ok(());
        }
        let frame = encode_frame(payload);
        self.stream.write_all(&frame).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Returns frame errors as they occur; the link stays usable afterwards.
    async fn recv(&mut self) -> Result<Vec<u8>, LinkError> {
        loop {
            if let Some(frame) = self.ready.pop_front() {
                return frame.map_err(LinkError::Frame);
            }
            let n = self.stream.read(&mut self.read_buf).await?;
            if n == 0 {
                if self.decoder.pending() > 0 {
                    log::debug!(
                        "stream closed with {} bytes of unterminated frame",
                        self.decoder.pending()
                    );
                }
                return Err(LinkError::Closed);
            }
            self.ready.extend(self.decoder.feed(&self.read_buf[..n]));
        }
    }
}
