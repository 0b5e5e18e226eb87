//! Schema-driven value packing for serial packets.
//!
//! `packedserial-core` turns an ordered list of scalar values into a single
//! contiguous byte buffer and back again, driven by a [`Schema`] of
//! [`TypeTag`]s. Numbers are fixed-width big-endian, text is a one-byte
//! length prefix followed by raw UTF-8. There are no separators, headers, or
//! checksums: field boundaries are recovered purely by replaying the schema.
//!
//! ```
//! use packedserial_core::{Codec, Schema, Value};
//!
//! let schema: Schema = "uint8, string, uint16".parse().unwrap();
//! let codec = Codec::new(schema);
//! let values = [Value::from(1u8), Value::from("abc"), Value::from(0x1234u16)];
//! let bytes = codec.encode(&values).unwrap();
//! assert_eq!(bytes, [0x01, 0x03, b'a', b'b', b'c', 0x12, 0x34]);
//! assert_eq!(codec.decode(&bytes).unwrap(), values);
//! ```
//!
//! # Feature flags
//!
//! - **`std`** (default) — enables `std::error::Error` implementations.
//! - **`serde`** — derives `Serialize`/`Deserialize` on tags and values.
//! - **`defmt`** — derives `defmt::Format` for embedded logging.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Schema-driven encode and decode.
pub mod codec;
/// Cursor-based byte reader and writer used by the codec.
pub mod encoding;
/// Error types for schema parsing, encoding and decoding.
pub mod error;
/// Type tags and schemas.
pub mod schema;
/// Runtime values carried in a packet.
pub mod value;

pub use codec::{decode, encode, Codec, OverflowPolicy};
pub use error::{DecodeError, EncodeError, SchemaError};
pub use schema::{Schema, TypeTag, MAX_TEXT_LEN};
pub use value::Value;
