use clap::Args;
use packedserial_core::{Schema, TypeTag, Value};
use packedserial_link::{max_frame_len, SerialConfig};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ArgError {
    #[error("schema has {expected} fields but {actual} values were given")]
    Count { expected: usize, actual: usize },
    #[error("field {field}: cannot parse {text:?} as {tag}")]
    Value {
        field: usize,
        tag: TypeTag,
        text: String,
    },
    #[error("invalid hex at byte {0}")]
    Hex(usize),
}

/// Serial port options shared by the tools that talk to a device.
#[derive(Args, Debug, Clone)]
pub struct PortArgs {
    /// Serial device, e.g. /dev/ttyACM0 or COM4.
    #[arg(long)]
    pub port: String,
    #[arg(long, default_value_t = packedserial_link::serial::DEFAULT_BAUD_RATE)]
    pub baud: u32,
    /// Longest accepted frame in bytes. Defaults to the largest frame the
    /// schema can produce.
    #[arg(long)]
    pub max_frame: Option<usize>,
}

impl PortArgs {
    pub fn config(&self, schema: &Schema) -> SerialConfig {
        SerialConfig::new(self.port.clone())
            .with_baud_rate(self.baud)
            .with_max_frame_len(
                self.max_frame
                    .unwrap_or_else(|| max_frame_len(schema.max_encoded_len())),
            )
    }
}

/// Parses command-line text as a value for `tag`.
///
/// Integers accept a `0x` prefix for hex. Strings are taken verbatim.
pub fn parse_value(tag: TypeTag, text: &str) -> Option<Value> {
    match tag {
        TypeTag::String => Some(Value::from(text)),
        TypeTag::Float => text.trim().parse::<f64>().ok().map(Value::Float),
        _ => {
            let t = text.trim();
            let parsed = match t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
                Some(hex) => i64::from_str_radix(hex, 16),
                None => t.parse::<i64>(),
            };
            parsed.ok().map(Value::Int)
        }
    }
}

/// Parses one command-line argument per schema field.
pub fn parse_values(schema: &Schema, args: &[String]) -> Result<Vec<Value>, ArgError> {
    if args.len() != schema.len() {
        return Err(ArgError::Count {
            expected: schema.len(),
            actual: args.len(),
        });
    }
    schema
        .tags()
        .iter()
        .zip(args)
        .enumerate()
        .map(|(field, (tag, text))| {
            parse_value(*tag, text).ok_or_else(|| ArgError::Value {
                field,
                tag: *tag,
                text: text.clone(),
            })
        })
        .collect()
}

/// Formats bytes as space-separated upper-case hex pairs.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses hex pairs, ignoring whitespace, `:` and `,` separators.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, ArgError> {
    let digits: Vec<u8> = text
        .bytes()
        .filter(|c| !c.is_ascii_whitespace() && *c != b':' && *c != b',')
        .collect();
    if digits.len() % 2 != 0 {
        return Err(ArgError::Hex(digits.len() / 2));
    }
    digits
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or(ArgError::Hex(i))
        })
        .collect()
}

/// Renders decoded values for printing, as JSON or as a bracketed list.
pub fn render_values(values: &[Value], json: bool) -> String {
    if json {
        return serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string());
    }
    let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}
