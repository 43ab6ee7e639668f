//! Command engine (§4.C): one request, one response, no retries.

use crate::constants::MAX_MESSAGE;
use crate::error::{Error, Result};
use crate::frame;
use crate::opcode::Opcode;
use crate::transport::Transport;

/// Issues exactly one request and waits for exactly one response.
pub struct Engine<T> {
    pub(crate) transport: T,
    send_buf: [u8; MAX_MESSAGE],
    recv_buf: [u8; MAX_MESSAGE],
}

impl<T: Transport> Engine<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            send_buf: [0u8; MAX_MESSAGE],
            recv_buf: [0u8; MAX_MESSAGE],
        }
    }

    /// Send `(opcode, payload)` and return the decoded `(opcode, payload)`
    /// of the response, without checking the response opcode against any
    /// expectation — that is the caller's job (see [`Self::exchange`]).
    ///
    /// The raw response byte is decoded through [`Opcode::try_from`]; a
    /// byte outside the known opcode table is a [`Error::Comm`], matching
    /// how every other unexpected-response case is reported.
    pub fn exchange_raw(&mut self, opcode: Opcode, payload: &[u8]) -> Result<(Opcode, Vec<u8>)> {
        let n = frame::encode(opcode as u8, payload, &mut self.send_buf)?;
        tracing::trace!(opcode = ?opcode, payload_len = payload.len(), "sending request");
        self.transport
            .send(&self.send_buf[..n])
            .map_err(|e| Error::Comm(format!("transport send failed: {e}")))?;

        let n = self
            .transport
            .recv(&mut self.recv_buf)
            .map_err(|e| Error::Comm(format!("transport recv failed: {e}")))?;
        let (resp_opcode, resp_payload) = frame::decode(&self.recv_buf, n)?;
        let resp_opcode = Opcode::try_from(resp_opcode)
            .map_err(|b| Error::Comm(format!("response carried unknown opcode {b:#04x}")))?;
        tracing::trace!(
            response_opcode = ?resp_opcode,
            payload_len = resp_payload.len(),
            "received response"
        );
        Ok((resp_opcode, resp_payload.to_vec()))
    }

    /// Like [`Self::exchange_raw`], but fails with [`Error::Comm`] unless
    /// the response opcode is exactly `expected`.
    pub fn exchange(&mut self, opcode: Opcode, payload: &[u8], expected: Opcode) -> Result<Vec<u8>> {
        let (resp_opcode, resp_payload) = self.exchange_raw(opcode, payload)?;
        if resp_opcode != expected {
            return Err(Error::Comm(format!(
                "unexpected response opcode {resp_opcode:?}, expected {expected:?}"
            )));
        }
        Ok(resp_payload)
    }

    /// Like [`Self::exchange`], but treats either of two acceptable
    /// response opcodes as success, returning which one fired.
    pub fn exchange_either(
        &mut self,
        opcode: Opcode,
        payload: &[u8],
        expected_a: Opcode,
        expected_b: Opcode,
    ) -> Result<(Opcode, Vec<u8>)> {
        let (resp_opcode, resp_payload) = self.exchange_raw(opcode, payload)?;
        if resp_opcode == expected_a {
            Ok((expected_a, resp_payload))
        } else if resp_opcode == expected_b {
            Ok((expected_b, resp_payload))
        } else {
            Err(Error::Comm(format!(
                "unexpected response opcode {resp_opcode:?}, expected {expected_a:?} or {expected_b:?}"
            )))
        }
    }
}
