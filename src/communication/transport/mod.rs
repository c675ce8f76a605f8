//! Datagram transport abstraction
//!
//! The control loop sees the network as "at most one datagram per poll, or
//! nothing". The UDP implementation (hardware, `pico_w` feature) bounds each
//! poll with a timeout; the mock implementation feeds queued datagrams to
//! host tests.
//!
//! A poll that simply finds no data is **not** an error: it returns
//! `Ok(None)`. Errors are reserved for actual transport faults, and the loop
//! absorbs those as "no data this tick" anyway.

#[cfg(feature = "pico_w")]
pub mod udp;

use core::fmt;

/// Source of control datagrams.
#[allow(async_fn_in_trait)]
pub trait DatagramSource {
    /// Wait up to the transport's poll timeout for one datagram.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(n))` - a datagram of `n` bytes was written to `buf`
    ///   (truncated to `buf.len()` if larger);
    /// - `Ok(None)` - nothing arrived within the poll window;
    /// - `Err(TransportError)` - a transport fault; recoverable by polling
    ///   again next tick.
    async fn recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TransportError>;
}

/// Transport fault types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico_w", derive(defmt::Format))]
pub enum TransportError {
    /// Generic I/O error from the socket layer
    IoError,
    /// The transport is no longer usable (e.g. WiFi went down)
    Disconnected,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::IoError => write!(f, "I/O error"),
            TransportError::Disconnected => write!(f, "transport disconnected"),
        }
    }
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    //! Mock datagram source for host tests
    //!
    //! Datagrams are queued by the test and handed out one per poll; an empty
    //! queue reads as "nothing this tick", and single-shot faults can be
    //! injected to exercise the loop's error absorption.

    use super::{DatagramSource, TransportError};
    use heapless::{Deque, Vec};

    /// Largest datagram the mock will queue
    pub const MOCK_DATAGRAM_MAX: usize = 1024;

    /// Queue-backed datagram source.
    pub struct MockDatagramSource {
        queue: Deque<Vec<u8, MOCK_DATAGRAM_MAX>, 16>,
        next_error: Option<TransportError>,
        polls: usize,
    }

    impl MockDatagramSource {
        /// Create an empty source.
        pub fn new() -> Self {
            Self {
                queue: Deque::new(),
                next_error: None,
                polls: 0,
            }
        }

        /// Queue a datagram for a future poll.
        pub fn push_datagram(&mut self, data: &[u8]) {
            let mut v = Vec::new();
            v.extend_from_slice(data)
                .expect("datagram larger than MOCK_DATAGRAM_MAX");
            self.queue
                .push_back(v)
                .map_err(|_| ())
                .expect("mock datagram queue full");
        }

        /// Make the next poll fail with `error`, once.
        pub fn fail_next(&mut self, error: TransportError) {
            self.next_error = Some(error);
        }

        /// Number of polls made so far.
        pub fn poll_count(&self) -> usize {
            self.polls
        }
    }

    impl Default for MockDatagramSource {
        fn default() -> Self {
            Self::new()
        }
    }

    impl DatagramSource for MockDatagramSource {
        async fn recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TransportError> {
            self.polls += 1;

            if let Some(error) = self.next_error.take() {
                return Err(error);
            }

            match self.queue.pop_front() {
                Some(data) => {
                    // Truncate like a real socket with a too-small buffer
                    let n = core::cmp::min(data.len(), buf.len());
                    buf[..n].copy_from_slice(&data[..n]);
                    Ok(Some(n))
                }
                None => Ok(None),
            }
        }
    }
}
