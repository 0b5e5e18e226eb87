use crate::schema::TypeTag;
use core::fmt;

/// Failure to build a [`Schema`](crate::Schema) from tag names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchemaError {
    /// The tag name at `position` is not one of the known type tags.
    UnsupportedTag { position: usize },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedTag { position } => {
                write!(f, "unsupported type tag at position {position}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SchemaError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// The number of values differs from the number of schema tags.
    SchemaMismatch { expected: usize, actual: usize },
    /// A string field is longer than its one-byte length prefix can describe.
    TextTooLong { field: usize, len: usize },
    /// An integer does not fit the width of its tag.
    RangeOverflow { field: usize, tag: TypeTag },
    /// The value kind is not accepted by the tag.
    KindMismatch { field: usize, tag: TypeTag },
    /// The caller-provided output buffer cannot hold the encoding.
    BufferTooSmall { needed: usize, available: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaMismatch { expected, actual } => {
                write!(f, "schema has {expected} fields but {actual} values were given")
            }
            Self::TextTooLong { field, len } => {
                write!(f, "field {field}: text is {len} bytes, limit is 255")
            }
            Self::RangeOverflow { field, tag } => {
                write!(f, "field {field}: value out of range for {tag}")
            }
            Self::KindMismatch { field, tag } => {
                write!(f, "field {field}: value kind not accepted by {tag}")
            }
            Self::BufferTooSmall { needed, available } => {
                write!(f, "buffer too small: need {needed} bytes, have {available}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Reading `field` needed `needed` bytes but only `available` were left.
    TruncatedBuffer {
        field: usize,
        needed: usize,
        available: usize,
    },
    /// A string field did not hold valid UTF-8.
    InvalidUtf8 { field: usize },
    /// Bytes remained after the last field (exact decoding only).
    TrailingBytes { count: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedBuffer {
                field,
                needed,
                available,
            } => write!(
                f,
                "truncated buffer at field {field}: need {needed} bytes, have {available}"
            ),
            Self::InvalidUtf8 { field } => write!(f, "field {field}: invalid utf-8"),
            Self::TrailingBytes { count } => write!(f, "{count} trailing bytes after last field"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

#[cfg(test)]
mod tests {
    use super::{DecodeError, EncodeError};
    use crate::schema::TypeTag;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_field() {
        let err = EncodeError::RangeOverflow {
            field: 2,
            tag: TypeTag::UInt8,
        };
        assert_eq!(err.to_string(), "field 2: value out of range for uint8");

        let err = DecodeError::TruncatedBuffer {
            field: 0,
            needed: 4,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "truncated buffer at field 0: need 4 bytes, have 1"
        );
    }
}
