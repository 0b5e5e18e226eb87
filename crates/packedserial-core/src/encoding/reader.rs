/// Not enough bytes left to satisfy a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortRead {
    pub needed: usize,
    pub available: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub const fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_u8(&mut self) -> Result<u8, ShortRead> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    pub fn read_i8(&mut self) -> Result<i8, ShortRead> {
        Ok(i8::from_be_bytes(self.read_array()?))
    }

    pub fn read_be_u16(&mut self) -> Result<u16, ShortRead> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_be_i16(&mut self) -> Result<i16, ShortRead> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    pub fn read_be_u32(&mut self) -> Result<u32, ShortRead> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_be_i32(&mut self) -> Result<i32, ShortRead> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    pub fn read_be_f32(&mut self) -> Result<f32, ShortRead> {
        Ok(f32::from_bits(self.read_be_u32()?))
    }

    pub fn read_exact(&mut self, len: usize) -> Result<&'a [u8], ShortRead> {
        let available = self.remaining();
        if available < len {
            return Err(ShortRead {
                needed: len,
                available,
            });
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.buf[start..start + len])
    }

    /// Reads a one-byte length followed by that many bytes.
    ///
    /// On a short payload the cursor is left after the length byte.
    pub fn read_len_prefixed(&mut self) -> Result<&'a [u8], ShortRead> {
        let len = self.read_u8()?;
        self.read_exact(len as usize)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ShortRead> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_exact(N)?);
        Ok(out)
    }
}
