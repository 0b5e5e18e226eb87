/// Bounds-checked byte reader over a received packet.
pub mod reader;
/// Bounds-checked byte writer into a caller-owned buffer.
pub mod writer;

pub use reader::{Reader, ShortRead};
pub use writer::Writer;
