//! Curve commands: `curve_block_request`, `curve_block_send`,
//! `curve_recalc_csum`.

use crate::catalog::{Catalog, CurveHandle};
use crate::constants::CURVE_BLOCK_INFO;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::handshake;
use crate::opcode::Opcode;
use crate::transport::Transport;

/// Fetch one block of curve data at `offset`.
pub fn curve_block_request<T: Transport>(
    engine: &mut Engine<T>,
    catalog: &Catalog,
    curve: CurveHandle,
    offset: u16,
) -> Result<Vec<u8>> {
    let c = catalog
        .resolve_curve(curve)
        .ok_or(Error::ParamInvalid("curve handle not in catalog"))?;
    if offset as u32 >= c.nblocks {
        return Err(Error::ParamOutOfRange("curve offset past nblocks"));
    }

    let payload = [c.id, (offset >> 8) as u8, (offset & 0xFF) as u8];
    let response = engine.exchange(Opcode::CurveBlockRequest, &payload, Opcode::CurveBlock)?;
    if response.len() < CURVE_BLOCK_INFO {
        return Err(Error::Comm("CURVE_BLOCK response shorter than its prefix".into()));
    }
    let (prefix, data) = response.split_at(CURVE_BLOCK_INFO);
    let resp_offset = u16::from_be_bytes([prefix[1], prefix[2]]);
    if prefix[0] != c.id || resp_offset != offset {
        return Err(Error::Comm(
            "CURVE_BLOCK response echoed a different curve id or offset".into(),
        ));
    }
    Ok(data.to_vec())
}

/// Send one block of curve data at `offset`.
pub fn curve_block_send<T: Transport>(
    engine: &mut Engine<T>,
    catalog: &Catalog,
    curve: CurveHandle,
    offset: u16,
    data: &[u8],
) -> Result<()> {
    let c = catalog
        .resolve_curve(curve)
        .ok_or(Error::ParamInvalid("curve handle not in catalog"))?;
    if !c.writable {
        return Err(Error::ParamInvalid("curve is not writable"));
    }
    if offset as u32 >= c.nblocks {
        return Err(Error::ParamOutOfRange("curve offset past nblocks"));
    }
    if data.len() > c.block_size as usize {
        return Err(Error::ParamOutOfRange("curve write length exceeds block_size"));
    }

    let mut payload = Vec::with_capacity(CURVE_BLOCK_INFO + data.len());
    payload.push(c.id);
    payload.push((offset >> 8) as u8);
    payload.push((offset & 0xFF) as u8);
    payload.extend_from_slice(data);
    engine.exchange(Opcode::CurveBlock, &payload, Opcode::Ok)?;
    Ok(())
}

/// Ask the server to recompute a curve's checksum, then re-populate the
/// curves catalog so the refreshed checksum is visible.
pub fn curve_recalc_csum<T: Transport>(
    engine: &mut Engine<T>,
    catalog: &mut Catalog,
    curve: CurveHandle,
) -> Result<()> {
    let c = catalog
        .resolve_curve(curve)
        .ok_or(Error::ParamInvalid("curve handle not in catalog"))?;
    let id = c.id;

    engine.exchange(Opcode::CurveRecalcCsum, &[id], Opcode::Ok)?;
    handshake::update_curves(engine, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Curve;
    use crate::constants::CURVE_CSUM_SIZE;
    use crate::transport::mock::MockTransport;

    fn frame(opcode: Opcode, payload: &[u8]) -> Vec<u8> {
        let mut out = vec![opcode as u8, (payload.len() >> 8) as u8, payload.len() as u8];
        out.extend_from_slice(payload);
        out
    }

    fn catalog_with_curve(writable: bool, block_size: u16, nblocks: u32) -> Catalog {
        let mut catalog = Catalog::new();
        catalog.curves.repopulate(vec![Curve {
            id: 0,
            writable,
            block_size,
            nblocks,
            checksum: [0u8; CURVE_CSUM_SIZE],
        }]);
        catalog
    }

    #[test]
    fn curve_block_request_emits_expected_bytes_and_strips_prefix() {
        let catalog = catalog_with_curve(false, 4096, 4);
        let mut mock = MockTransport::new();
        mock.push_response(frame(
            Opcode::CurveBlock,
            &[0, 0x01, 0x02, 0xAA, 0xBB, 0xCC, 0xDD],
        ));
        let mut engine = Engine::new(mock);

        let handle = catalog.curve_handle(0).unwrap();
        let data = curve_block_request(&mut engine, &catalog, handle, 0x0102).unwrap();
        assert_eq!(data, vec![0xAA, 0xBB, 0xCC, 0xDD]);
        assert_eq!(
            engine.transport.sent[0],
            vec![Opcode::CurveBlockRequest as u8, 0x00, 0x03, 0, 0x01, 0x02]
        );
    }

    #[test]
    fn curve_block_request_rejects_offset_past_nblocks() {
        let catalog = catalog_with_curve(false, 4096, 2);
        let mock = MockTransport::new();
        let mut engine = Engine::new(mock);

        let handle = catalog.curve_handle(0).unwrap();
        let err = curve_block_request(&mut engine, &catalog, handle, 2).unwrap_err();
        assert!(matches!(err, Error::ParamOutOfRange(_)));
    }

    #[test]
    fn curve_block_send_rejects_oversized_block() {
        let catalog = catalog_with_curve(true, 4, 2);
        let mock = MockTransport::new();
        let mut engine = Engine::new(mock);

        let handle = catalog.curve_handle(0).unwrap();
        let err = curve_block_send(&mut engine, &catalog, handle, 0, &[0; 5]).unwrap_err();
        assert!(matches!(err, Error::ParamOutOfRange(_)));
    }
}
