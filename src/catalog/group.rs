//! Group entities (§3): ordered aggregates of variables.

use super::VarHandle;

/// A server-side group: `{ id, writable, vars, size }`.
///
/// `size` is the sum of the sizes of every member variable, enforced as an
/// invariant (P2) by whoever populates this struct (see `handshake.rs`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: u8,
    pub writable: bool,
    pub vars: Vec<VarHandle>,
    pub size: u32,
}

impl Group {
    /// Decode one `GROUP_LIST` descriptor byte into an (empty, not yet
    /// populated) group shell. The low 7 bits are the *expected* member
    /// count, used only to sanity-check the follow-up `GROUP_QUERY`.
    pub fn decode_shell(id: u8, byte: u8) -> (Self, u8) {
        let expected_count = byte & 0x7F;
        (
            Self {
                id,
                writable: byte & 0x80 != 0,
                vars: Vec::new(),
                size: 0,
            },
            expected_count,
        )
    }
}
