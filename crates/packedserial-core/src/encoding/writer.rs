use crate::EncodeError;

/// Packet writer over a caller-owned buffer.
///
/// Every write reserves its whole width up front, so a failed write leaves
/// the buffer and position untouched.
#[derive(Debug)]
pub struct Writer<'a> {
    out: &'a mut [u8],
    len: usize,
}

impl<'a> Writer<'a> {
    pub fn new(out: &'a mut [u8]) -> Self {
        Self { out, len: 0 }
    }

    pub const fn position(&self) -> usize {
        self.len
    }

    pub fn remaining(&self) -> usize {
        self.out.len() - self.len
    }

    pub fn as_written(&self) -> &[u8] {
        &self.out[..self.len]
    }

    fn reserve(&mut self, width: usize) -> Result<&mut [u8], EncodeError> {
        let available = self.remaining();
        if width > available {
            return Err(EncodeError::BufferTooSmall {
                needed: width,
                available,
            });
        }
        let start = self.len;
        self.len += width;
        Ok(&mut self.out[start..self.len])
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), EncodeError> {
        self.reserve(1)?[0] = value;
        Ok(())
    }

    pub fn write_be_u16(&mut self, value: u16) -> Result<(), EncodeError> {
        self.reserve(2)?.copy_from_slice(&value.to_be_bytes());
        Ok(())
    }

    pub fn write_be_u32(&mut self, value: u32) -> Result<(), EncodeError> {
        self.reserve(4)?.copy_from_slice(&value.to_be_bytes());
        Ok(())
    }

    /// Writes a one-byte length followed by `data`.
    ///
    /// Callers must have checked that `data` is at most 255 bytes.
    pub fn write_len_prefixed(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        debug_assert!(data.len() <= u8::MAX as usize);
        let (len, body) = self.reserve(1 + data.len())?.split_at_mut(1);
        len[0] = data.len() as u8;
        body.copy_from_slice(data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Writer;
    use crate::EncodeError;

    #[test]
    fn writer_writes_values() {
        let mut buf = [0u8; 8];
        let mut w = Writer::new(&mut buf);
        w.write_u8(1).unwrap();
        w.write_be_u16(0x1234).unwrap();
        w.write_len_prefixed(b"hi").unwrap();
        assert_eq!(w.as_written(), &[1, 0x12, 0x34, 2, b'h', b'i']);
        assert_eq!(w.remaining(), 2);
    }

    #[test]
    fn writer_bounds() {
        let mut buf = [0u8; 3];
        let mut w = Writer::new(&mut buf);
        w.write_u8(1).unwrap();
        assert_eq!(
            w.write_be_u32(2).unwrap_err(),
            EncodeError::BufferTooSmall {
                needed: 4,
                available: 2
            }
        );
        assert_eq!(
            w.write_len_prefixed(b"ab").unwrap_err(),
            EncodeError::BufferTooSmall {
                needed: 3,
                available: 2
            }
        );
        assert_eq!(w.position(), 1);
    }
}
