//! Error type for wire-level decoding.

/// Errors produced while decoding a command frame.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The frame grammar was violated: missing terminator or separator, or
    /// a length field that is not an unsigned decimal number.
    #[error("invalid framing: {0}")]
    Framing(&'static str),

    /// The declared payload length disagrees with the actual buffer span.
    #[error("length mismatch: declared {declared} bytes, payload spans {actual}")]
    LengthMismatch {
        /// Length announced in the frame header.
        declared: u64,
        /// Bytes actually present between separator and terminator.
        actual: usize,
    },

    /// The payload violates the credential/command grammar.
    #[error("invalid protocol: {0}")]
    Protocol(&'static str),
}
