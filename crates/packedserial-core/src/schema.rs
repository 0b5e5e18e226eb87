use crate::SchemaError;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// Longest text a `string` field can carry: its length prefix is one byte.
pub const MAX_TEXT_LEN: usize = u8::MAX as usize;

/// Wire type of a single packet field.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TypeTag {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float,
    String,
}

impl TypeTag {
    pub const ALL: [TypeTag; 8] = [
        Self::Int8,
        Self::UInt8,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Float,
        Self::String,
    ];

    /// Looks up a tag by its wire-format name, e.g. `"uint16"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int8" => Some(Self::Int8),
            "uint8" => Some(Self::UInt8),
            "int16" => Some(Self::Int16),
            "uint16" => Some(Self::UInt16),
            "int32" => Some(Self::Int32),
            "uint32" => Some(Self::UInt32),
            "float" => Some(Self::Float),
            "string" => Some(Self::String),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::UInt8 => "uint8",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::Float => "float",
            Self::String => "string",
        }
    }

    /// Encoded width in bytes, or `None` for `string` whose width depends on
    /// the value.
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            Self::Int8 | Self::UInt8 => Some(1),
            Self::Int16 | Self::UInt16 => Some(2),
            Self::Int32 | Self::UInt32 | Self::Float => Some(4),
            Self::String => None,
        }
    }

    /// Smallest number of bytes this field can occupy on the wire.
    pub const fn min_width(self) -> usize {
        match self.fixed_width() {
            Some(width) => width,
            None => 1,
        }
    }

    /// Inclusive integer range of integer tags.
    pub const fn int_range(self) -> Option<(i64, i64)> {
        match self {
            Self::Int8 => Some((i8::MIN as i64, i8::MAX as i64)),
            Self::UInt8 => Some((0, u8::MAX as i64)),
            Self::Int16 => Some((i16::MIN as i64, i16::MAX as i64)),
            Self::UInt16 => Some((0, u16::MAX as i64)),
            Self::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            Self::UInt32 => Some((0, u32::MAX as i64)),
            Self::Float | Self::String => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered list of field types describing one packet layout.
///
/// A schema is fixed once built. Encoding and decoding with the same schema
/// is what keeps field offsets in agreement on both ends of the link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Schema {
    tags: Vec<TypeTag>,
}

impl Schema {
    pub fn new(tags: Vec<TypeTag>) -> Self {
        Self { tags }
    }

    /// Builds a schema from tag names, failing on the first unknown name.
    pub fn from_names<'n, I>(names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = &'n str>,
    {
        names
            .into_iter()
            .enumerate()
            .map(|(position, name)| {
                TypeTag::from_name(name.trim()).ok_or(SchemaError::UnsupportedTag { position })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn tags(&self) -> &[TypeTag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Shortest possible encoding: every string empty.
    pub fn min_encoded_len(&self) -> usize {
        self.tags.iter().map(|tag| tag.min_width()).sum()
    }

    /// Longest possible encoding: every string at [`MAX_TEXT_LEN`].
    pub fn max_encoded_len(&self) -> usize {
        self.tags
            .iter()
            .map(|tag| tag.fixed_width().unwrap_or(1 + MAX_TEXT_LEN))
            .sum()
    }
}

impl From<Vec<TypeTag>> for Schema {
    fn from(tags: Vec<TypeTag>) -> Self {
        Self::new(tags)
    }
}

impl From<&[TypeTag]> for Schema {
    fn from(tags: &[TypeTag]) -> Self {
        Self::new(tags.to_vec())
    }
}

impl FromIterator<TypeTag> for Schema {
    fn from_iter<I: IntoIterator<Item = TypeTag>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Parses a comma-separated list such as `"uint8, string, uint16"`.
///
/// An empty or all-whitespace string is the empty schema.
impl FromStr for Schema {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_names(s.split(','))
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(tag.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Schema, TypeTag};
    use crate::SchemaError;
    use alloc::string::ToString;

    #[test]
    fn names_roundtrip() {
        for tag in TypeTag::ALL {
            assert_eq!(TypeTag::from_name(tag.name()), Some(tag));
        }
        assert_eq!(TypeTag::from_name("double"), None);
        assert_eq!(TypeTag::from_name("UINT8"), None);
    }

    #[test]
    fn widths() {
        assert_eq!(TypeTag::Int8.fixed_width(), Some(1));
        assert_eq!(TypeTag::UInt16.fixed_width(), Some(2));
        assert_eq!(TypeTag::Float.fixed_width(), Some(4));
        assert_eq!(TypeTag::String.fixed_width(), None);
        assert_eq!(TypeTag::String.min_width(), 1);
    }

    #[test]
    fn parses_comma_separated() {
        let schema: Schema = " uint8,string , uint16 ".parse().unwrap();
        assert_eq!(
            schema.tags(),
            &[TypeTag::UInt8, TypeTag::String, TypeTag::UInt16]
        );
        assert_eq!(schema.to_string(), "uint8,string,uint16");
        assert_eq!(schema.min_encoded_len(), 4);
        assert_eq!(schema.max_encoded_len(), 1 + 256 + 2);
    }

    #[test]
    fn rejects_unknown_tag_with_position() {
        let err = "uint8,int64,string".parse::<Schema>().unwrap_err();
        assert_eq!(err, SchemaError::UnsupportedTag { position: 1 });
        let err = "uint8,,string".parse::<Schema>().unwrap_err();
        assert_eq!(err, SchemaError::UnsupportedTag { position: 1 });
    }

    #[test]
    fn empty_text_is_empty_schema() {
        let schema: Schema = "".parse().unwrap();
        assert!(schema.is_empty());
        assert_eq!(schema.min_encoded_len(), 0);
    }
}
