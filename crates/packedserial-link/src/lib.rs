//! Packet transport for packedserial.
//!
//! Packets travel over a byte stream as COBS-encoded frames terminated by a
//! `0x00` delimiter. [`FrameDecoder`] splits an arbitrary byte stream back
//! into packets, [`StreamLink`] runs that over any tokio byte stream (a
//! serial port via [`SerialConfig::open`]), and [`TypedLink`] pairs a link
//! with a [`Codec`](packedserial_core::Codec) so callers deal in values
//! rather than bytes.

#![allow(async_fn_in_trait)]

pub mod error;
pub mod frame;
pub mod serial;
pub mod stream;
pub mod traits;
pub mod typed;

pub use error::{FrameError, LinkError};
pub use frame::{decode_frame, encode_frame, max_frame_len, FrameDecoder, DELIMITER};
pub use serial::{SerialConfig, SerialLink};
pub use stream::StreamLink;
pub use traits::PacketLink;
pub use typed::TypedLink;
