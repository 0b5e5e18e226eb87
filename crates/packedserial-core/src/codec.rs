use crate::encoding::{Reader, ShortRead, Writer};
use crate::schema::{Schema, TypeTag, MAX_TEXT_LEN};
use crate::value::Value;
use crate::{DecodeError, EncodeError};
use alloc::{string::ToString, vec, vec::Vec};

/// What to do with an integer that does not fit its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverflowPolicy {
    /// Fail with [`EncodeError::RangeOverflow`].
    #[default]
    Reject,
    /// Keep the low bytes (two's-complement wraparound), so `256` packed as
    /// `uint8` becomes `0` and `-1` packed as `uint16` becomes `0xFFFF`.
    Wrap,
}

/// Encoder/decoder bound to one schema.
///
/// A codec carries no per-call state, so one instance can be shared between
/// threads and used for any number of packets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Codec {
    schema: Schema,
    overflow: OverflowPolicy,
}

impl Codec {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            overflow: OverflowPolicy::default(),
        }
    }

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn overflow(&self) -> OverflowPolicy {
        self.overflow
    }

    /// Number of bytes [`encode`](Self::encode) would produce for `values`.
    pub fn encoded_len(&self, values: &[Value]) -> Result<usize, EncodeError> {
        encoded_len_with(self.schema.tags(), values, self.overflow)
    }

    pub fn encode(&self, values: &[Value]) -> Result<Vec<u8>, EncodeError> {
        encode_with(self.schema.tags(), values, self.overflow)
    }

    /// Encodes into a caller-owned buffer and returns the bytes written.
    ///
    /// Nothing is written unless every value is valid and the whole packet
    /// fits.
    pub fn encode_into(&self, w: &mut Writer<'_>, values: &[Value]) -> Result<usize, EncodeError> {
        encode_into_with(self.schema.tags(), w, values, self.overflow)
    }

    /// Decodes one packet. Bytes past the last field are ignored.
    pub fn decode(&self, buf: &[u8]) -> Result<Vec<Value>, DecodeError> {
        decode(self.schema.tags(), buf)
    }

    /// Decodes one packet and reports how many bytes it occupied.
    pub fn decode_prefix(&self, buf: &[u8]) -> Result<(Vec<Value>, usize), DecodeError> {
        decode_prefix(self.schema.tags(), buf)
    }

    /// Decodes one packet and rejects any bytes past the last field.
    pub fn decode_exact(&self, buf: &[u8]) -> Result<Vec<Value>, DecodeError> {
        let (values, used) = self.decode_prefix(buf)?;
        match buf.len() - used {
            0 => Ok(values),
            count => Err(DecodeError::TrailingBytes { count }),
        }
    }
}

/// Packs `values` according to `schema`, rejecting out-of-range integers.
pub fn encode(schema: &[TypeTag], values: &[Value]) -> Result<Vec<u8>, EncodeError> {
    encode_with(schema, values, OverflowPolicy::Reject)
}

/// Unpacks one value per tag of `schema` from the front of `buf`.
pub fn decode(schema: &[TypeTag], buf: &[u8]) -> Result<Vec<Value>, DecodeError> {
    decode_prefix(schema, buf).map(|(values, _)| values)
}

fn encoded_len_with(
    schema: &[TypeTag],
    values: &[Value],
    overflow: OverflowPolicy,
) -> Result<usize, EncodeError> {
    check_arity(schema, values)?;
    schema
        .iter()
        .zip(values)
        .enumerate()
        .try_fold(
            0usize,
            |total, (field, (tag, value))| -> Result<usize, EncodeError> {
                Ok(total + resolve(field, *tag, value, overflow)?.width())
            },
        )
}

fn encode_with(
    schema: &[TypeTag],
    values: &[Value],
    overflow: OverflowPolicy,
) -> Result<Vec<u8>, EncodeError> {
    let len = encoded_len_with(schema, values, overflow)?;
    let mut out = vec![0u8; len];
    let mut w = Writer::new(&mut out);
    write_fields(schema, &mut w, values, overflow)?;
    debug_assert_eq!(w.position(), len);
    Ok(out)
}

fn encode_into_with(
    schema: &[TypeTag],
    w: &mut Writer<'_>,
    values: &[Value],
    overflow: OverflowPolicy,
) -> Result<usize, EncodeError> {
    let len = encoded_len_with(schema, values, overflow)?;
    if w.remaining() < len {
        return Err(EncodeError::BufferTooSmall {
            needed: len,
            available: w.remaining(),
        });
    }
    write_fields(schema, w, values, overflow)?;
    Ok(len)
}

fn check_arity(schema: &[TypeTag], values: &[Value]) -> Result<(), EncodeError> {
    if schema.len() != values.len() {
        return Err(EncodeError::SchemaMismatch {
            expected: schema.len(),
            actual: values.len(),
        });
    }
    Ok(())
}

fn write_fields(
    schema: &[TypeTag],
    w: &mut Writer<'_>,
    values: &[Value],
    overflow: OverflowPolicy,
) -> Result<(), EncodeError> {
    for (field, (tag, value)) in schema.iter().zip(values).enumerate() {
        resolve(field, *tag, value, overflow)?.write(w)?;
    }
    Ok(())
}

/// A value reduced to the bytes its tag puts on the wire.
enum Wire<'v> {
    U8(u8),
    U16(u16),
    U32(u32),
    Text(&'v [u8]),
}

impl Wire<'_> {
    fn width(&self) -> usize {
        match self {
            Self::U8(_) => 1,
            Self::U16(_) => 2,
            Self::U32(_) => 4,
            Self::Text(bytes) => 1 + bytes.len(),
        }
    }

    fn write(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        match self {
            Self::U8(v) => w.write_u8(*v),
            Self::U16(v) => w.write_be_u16(*v),
            Self::U32(v) => w.write_be_u32(*v),
            Self::Text(bytes) => w.write_len_prefixed(bytes),
        }
    }
}

fn resolve(
    field: usize,
    tag: TypeTag,
    value: &Value,
    overflow: OverflowPolicy,
) -> Result<Wire<'_>, EncodeError> {
    match (tag, value) {
        (TypeTag::String, Value::Text(text)) => {
            let bytes = text.as_bytes();
            if bytes.len() > MAX_TEXT_LEN {
                return Err(EncodeError::TextTooLong {
                    field,
                    len: bytes.len(),
                });
            }
            Ok(Wire::Text(bytes))
        }
        (TypeTag::Float, Value::Float(v)) => Ok(Wire::U32((*v as f32).to_bits())),
        (TypeTag::Float, Value::Int(v)) => Ok(Wire::U32((*v as f32).to_bits())),
        (_, Value::Int(v)) => {
            let Some((min, max)) = tag.int_range() else {
                return Err(EncodeError::KindMismatch { field, tag });
            };
            if overflow == OverflowPolicy::Reject && !(min..=max).contains(v) {
                return Err(EncodeError::RangeOverflow { field, tag });
            }
            // Truncating casts keep the low bytes in two's complement.
            Ok(match tag {
                TypeTag::Int8 | TypeTag::UInt8 => Wire::U8(*v as u8),
                TypeTag::Int16 | TypeTag::UInt16 => Wire::U16(*v as u16),
                _ => Wire::U32(*v as u32),
            })
        }
        _ => Err(EncodeError::KindMismatch { field, tag }),
    }
}

fn decode_prefix(schema: &[TypeTag], buf: &[u8]) -> Result<(Vec<Value>, usize), DecodeError> {
    let mut r = Reader::new(buf);
    let mut values = Vec::with_capacity(schema.len());
    for (field, tag) in schema.iter().enumerate() {
        values.push(decode_field(&mut r, field, *tag)?);
    }
    Ok((values, r.position()))
}

fn decode_field(r: &mut Reader<'_>, field: usize, tag: TypeTag) -> Result<Value, DecodeError> {
    let truncated = |e: ShortRead| DecodeError::TruncatedBuffer {
        field,
        needed: e.needed,
        available: e.available,
    };
    let value = match tag {
        TypeTag::Int8 => Value::Int(r.read_i8().map_err(truncated)?.into()),
        TypeTag::UInt8 => Value::Int(r.read_u8().map_err(truncated)?.into()),
        TypeTag::Int16 => Value::Int(r.read_be_i16().map_err(truncated)?.into()),
        TypeTag::UInt16 => Value::Int(r.read_be_u16().map_err(truncated)?.into()),
        TypeTag::Int32 => Value::Int(r.read_be_i32().map_err(truncated)?.into()),
        TypeTag::UInt32 => Value::Int(r.read_be_u32().map_err(truncated)?.into()),
        TypeTag::Float => Value::Float(r.read_be_f32().map_err(truncated)?.into()),
        TypeTag::String => {
            let bytes = r.read_len_prefixed().map_err(truncated)?;
            let text = core::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { field })?;
            Value::Text(text.to_string())
        }
    };
    Ok(value)
}
