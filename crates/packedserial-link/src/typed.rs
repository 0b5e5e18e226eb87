use crate::{LinkError, PacketLink};
use packedserial_core::{Codec, Value};

/// A packet link that speaks values of one schema.
pub struct TypedLink<L> {
    link: L,
    codec: Codec,
}

impl<L: PacketLink> TypedLink<L> {
    pub fn new(link: L, codec: Codec) -> Self {
        Self { link, codec }
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Access to the underlying link for raw packets.
    pub fn get_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub async fn send_values(&mut self, values: &[Value]) -> Result<(), LinkError> {
        let payload = self.codec.encode(values)?;
        self.link.send(&payload).await
    }

    /// Receives the next packet and decodes it. Bytes past the last field
    /// are ignored.
    pub async fn recv_values(&mut self) -> Result<Vec<Value>, LinkError> {
        let payload = self.link.recv().await?;
        let values = self.codec.decode(&payload)?;
        Ok(values)
    }
}
