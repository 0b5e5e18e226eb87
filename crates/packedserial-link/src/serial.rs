use crate::frame::max_frame_len;
use crate::{LinkError, StreamLink};
use packedserial_core::MAX_TEXT_LEN;
use tokio_serial::{SerialPortBuilderExt, SerialStream};

pub const DEFAULT_BAUD_RATE: u32 = 115_200;
/// Fits any packet up to one maximal string plus its length prefix.
pub const DEFAULT_MAX_FRAME_LEN: usize = max_frame_len(1 + MAX_TEXT_LEN);

/// A [`StreamLink`] over a serial port.
pub type SerialLink = StreamLink<SerialStream>;

/// Serial port settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyACM0` or `COM4`.
    pub path: String,
    #[cfg_attr(feature = "serde", serde(default = "default_baud_rate"))]
    pub baud_rate: u32,
    /// Longest accepted frame in stuffed bytes; longer frames are dropped.
    #[cfg_attr(feature = "serde", serde(default = "default_max_frame_len"))]
    pub max_frame_len: usize,
}

#[cfg(feature = "serde")]
fn default_baud_rate() -> u32 {
    DEFAULT_BAUD_RATE
}

#[cfg(feature = "serde")]
fn default_max_frame_len() -> usize {
    DEFAULT_MAX_FRAME_LEN
}

impl SerialConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
        }
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_max_frame_len(mut self, max_frame_len: usize) -> Self {
        self.max_frame_len = max_frame_len;
        self
    }

    /// Opens the port (8N1, no flow control) and wraps it in a packet link.
    pub fn open(&self) -> Result<SerialLink, LinkError> {
        log::debug!("opening {} at {} baud", self.path, self.baud_rate);
        let port = tokio_serial::new(&self.path, self.baud_rate).open_native_async()?;
        Ok(StreamLink::new(port, self.max_frame_len))
    }
}
