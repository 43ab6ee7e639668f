//! Error kinds returned by the client.
//!
//! Every fallible operation in this crate returns [`Error`]. There is no
//! dynamic `anyhow`-style box here: callers match on the kind (for example,
//! to decide whether a failed command means the catalog needs re-`init`).

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A mandatory argument was absent, an entity reference did not belong
    /// to this client's catalog, a write targeted a non-writable entity, or
    /// a group-creation list was empty.
    #[error("invalid parameter: {0}")]
    ParamInvalid(&'static str),

    /// A bin-op code was out of range, or a curve offset/length fell
    /// outside the curve's bounds.
    #[error("parameter out of range: {0}")]
    ParamOutOfRange(&'static str),

    /// The transport failed, a response was too short to contain a header,
    /// the declared payload size did not match the received length, or the
    /// response opcode did not match what the command expected.
    #[error("communication error: {0}")]
    Comm(String),
}

impl Error {
    /// Short human-readable description, for diagnostic logging.
    ///
    /// This is deliberately just `Display`: every call site that wants a
    /// diagnostic string already has one via `.to_string()` or `tracing`'s
    /// `%err` capture, so a second mapping function would only drift from
    /// this one.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}
