use crate::LinkError;

/// Async trait for sending and receiving whole packets.
///
/// Implementors take care of framing: `send` puts one packet on the wire and
/// `recv` yields the next complete, unstuffed packet. The main implementor is
/// [`StreamLink`](crate::StreamLink).
pub trait PacketLink: Send {
    /// Sends one packet.
    async fn send(&mut self, payload: &[u8]) -> Result<(), LinkError>;

    /// Waits for the next packet.
    async fn recv(&mut self) -> Result<Vec<u8>, LinkError>;
}
