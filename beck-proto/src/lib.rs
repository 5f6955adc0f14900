//! Wire protocol for the beck command relay.
//!
//! Command frames are netstrings, suitable for any reliable byte stream:
//!
//! ```text
//! <decimal-length>:<payload-bytes>,
//! ```
//!
//! where `decimal-length` is the exact byte length of `payload-bytes` in
//! ASCII digits. The payload itself carries a shared-secret credential and
//! the command text, separated by a single space:
//!
//! ```text
//! <credential><space><command-text>
//! ```
//!
//! The command text may contain further spaces (or be empty); only the
//! first space is structural. A full frame for secret `s3cr3t` and command
//! `stop` is therefore `11:s3cr3t stop,`.

mod error;
mod frame;
mod payload;

pub use error::Error;
pub use frame::{decode, encode};
pub use payload::split;
