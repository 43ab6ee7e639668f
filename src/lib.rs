//! A synchronous client core for the BSMP device-control protocol.
//!
//! This crate implements the protocol engine (framing, request/response
//! dispatch, bit-exact payload encoding), the entity catalog (Variables,
//! Groups, Curves, Functions), and the handshake that populates it. The
//! transport — sockets, serial lines, shared memory — is supplied by the
//! caller as a pair of byte-level `send`/`recv` callbacks or a
//! [`Transport`] implementation; this crate never opens a connection
//! itself.
//!
//! ```no_run
//! use bsmp_client::{new, Error};
//!
//! # fn send(_: &[u8]) -> Result<(), Error> { Ok(()) }
//! # fn recv(_: &mut [u8]) -> Result<usize, Error> { Ok(0) }
//! let mut client = new(send, recv);
//! client.init()?;
//! println!("server version: {}", client.get_version().unwrap().as_str());
//! # Ok::<(), Error>(())
//! ```

pub mod catalog;
pub mod client;
pub mod commands;
pub mod constants;
pub mod engine;
pub mod error;
pub mod frame;
pub mod handshake;
pub mod opcode;
pub mod transport;
pub mod version;

pub use catalog::{Catalog, Curve, CurveHandle, FuncHandle, Function, Group, GroupHandle, VarHandle, Variable};
pub use client::{new, Client};
pub use commands::FuncOutcome;
pub use error::{Error, Result};
pub use opcode::{BinOp, Opcode};
pub use transport::{CallbackTransport, Transport};
pub use version::Version;
