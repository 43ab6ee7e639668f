//! Wire-level constants for the Protocol.
//!
//! Values here are the compile-time parameters §3 of the spec calls out as
//! fixed by the server implementation a client pairs with. They are taken
//! verbatim from the reference server this crate targets; changing them to
//! match a different server deployment is the one legitimate reason to fork
//! this file.

/// `opcode:u8, payload_size:u16` (big-endian).
pub const HEADER_SIZE: usize = 3;

/// Largest payload the reference server will accept or emit.
pub const MAX_PAYLOAD: usize = 8192;

/// Largest complete frame (header + payload).
pub const MAX_MESSAGE: usize = HEADER_SIZE + MAX_PAYLOAD;

/// Block size used by the reference server's curve storage, in bytes.
pub const CURVE_BLOCK_SIZE: u16 = 4096;

/// Bytes used per curve entry in a `CURVE_LIST` response:
/// `writable:u8, block_size:u16, nblocks:u16`.
pub const CURVE_LIST_INFO: usize = 5;

/// Bytes used as the curve/offset prefix of a block transfer:
/// `curve_id:u8, offset:u16`.
pub const CURVE_BLOCK_INFO: usize = 3;

/// Fixed width of a curve checksum.
pub const CURVE_CSUM_SIZE: usize = 16;

/// The size encoded by the wrap-around byte value `0` in a variable
/// descriptor: a 7-bit size field can represent `1..=127` directly, so `0`
/// is reused to mean the one remaining value, 128.
pub const VAR_MAX_SIZE: u8 = 128;

/// The block count encoded by the wrap-around value `0` in a curve list
/// record: a 16-bit `nblocks` field can represent `1..=65535` directly, so
/// `0` is reused to mean the one remaining value, 65536.
pub const CURVE_MAX_BLOCKS: u32 = 65536;

/// Largest input/output size for a function (4-bit nibble).
pub const FUNC_MAX_SIZE: u8 = 15;

/// Number of server-reserved groups (`ALL_VARS`, `READ_ONLY`, `WRITABLE`)
/// that `remove_all_groups` may never remove.
pub const RESERVED_GROUP_COUNT: usize = 3;
