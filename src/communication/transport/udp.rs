//! UDP datagram source over embassy-net
//!
//! Binds one socket on the control port and hands the loop at most one
//! datagram per poll. Every poll is bounded by the configured timeout so the
//! failsafe check keeps running when the transmitter goes quiet; the timeout
//! itself is reported as `Ok(None)`, not as an error.

use super::{DatagramSource, TransportError};
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::Stack;
use embassy_time::{with_timeout, Duration};

/// UDP control-link socket.
pub struct UdpDatagramSource<'a> {
    socket: UdpSocket<'a>,
    poll_timeout: Duration,
}

impl<'a> UdpDatagramSource<'a> {
    /// Create the socket and bind it on `port` (all interfaces).
    ///
    /// # Arguments
    ///
    /// * `stack` - embassy-net network stack
    /// * `port` - UDP port the transmitter sends to
    /// * `poll_timeout_ms` - bounded wait per poll; must stay below the
    ///   failsafe timeout
    /// * `rx_meta`/`rx_buffer`/`tx_meta`/`tx_buffer` - socket buffers owned
    ///   by the caller
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        stack: Stack<'a>,
        port: u16,
        poll_timeout_ms: u64,
        rx_meta: &'a mut [PacketMetadata],
        rx_buffer: &'a mut [u8],
        tx_meta: &'a mut [PacketMetadata],
        tx_buffer: &'a mut [u8],
    ) -> Self {
        let mut socket = UdpSocket::new(stack, rx_meta, rx_buffer, tx_meta, tx_buffer);

        if socket.bind(port).is_err() {
            crate::log_error!("failed to bind control socket to port {}", port);
        } else {
            crate::log_info!("control link listening on UDP port {}", port);
        }

        Self {
            socket,
            poll_timeout: Duration::from_millis(poll_timeout_ms),
        }
    }
}

impl DatagramSource for UdpDatagramSource<'_> {
    async fn recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TransportError> {
        match with_timeout(self.poll_timeout, self.socket.recv_from(buf)).await {
            // Nothing within the poll window: a normal quiet tick
            Err(_) => Ok(None),
            Ok(Ok((n, _from))) => Ok(Some(n)),
            Ok(Err(_)) => Err(TransportError::IoError),
        }
    }
}
