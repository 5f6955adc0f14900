//! Relay configuration.

/// Tunables for the relay pipeline.
///
/// The defaults are 4096-byte reads and hand-off queues holding a single
/// in-flight item, so backpressure from a slow dispatcher reaches the
/// sockets almost immediately.
#[derive(Debug, Clone)]
pub struct Config {
    /// Capacity of the raw-data and command hand-off queues.
    ///
    /// Sends always block when a queue is full; nothing is ever dropped.
    /// A zero-capacity rendezvous channel does not exist in tokio, so `1`
    /// is the closest available hand-off and the default. Values below 1
    /// are clamped to 1.
    pub queue_capacity: usize,

    /// Size in bytes of each connection's read buffer.
    ///
    /// One read of up to this many bytes is treated as exactly one frame,
    /// which bounds the largest frame a client can send.
    pub read_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            queue_capacity: 1,
            read_buffer: 4096,
        }
    }
}
