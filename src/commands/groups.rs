//! Group commands: `read_group`, `write_group`, `bin_op_group`,
//! `create_group`, `remove_all_groups`.

use crate::catalog::{Catalog, GroupHandle};
use crate::constants::RESERVED_GROUP_COUNT;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::handshake;
use crate::opcode::{BinOp, Opcode};
use crate::transport::Transport;

pub fn read_group<T: Transport>(
    engine: &mut Engine<T>,
    catalog: &Catalog,
    group: GroupHandle,
) -> Result<Vec<u8>> {
    let g = catalog
        .resolve_group(group)
        .ok_or(Error::ParamInvalid("group handle not in catalog"))?;

    let payload = engine.exchange(Opcode::GroupRead, &[g.id], Opcode::GroupValues)?;
    if payload.len() != g.size as usize {
        return Err(Error::Comm(format!(
            "GROUP_VALUES payload length {} does not match group size {}",
            payload.len(),
            g.size
        )));
    }
    Ok(payload)
}

pub fn write_group<T: Transport>(
    engine: &mut Engine<T>,
    catalog: &Catalog,
    group: GroupHandle,
    values: &[u8],
) -> Result<()> {
    let g = catalog
        .resolve_group(group)
        .ok_or(Error::ParamInvalid("group handle not in catalog"))?;
    if !g.writable {
        return Err(Error::ParamInvalid("group is not writable"));
    }
    if values.len() != g.size as usize {
        return Err(Error::ParamInvalid("values length does not match group size"));
    }

    let mut payload = Vec::with_capacity(1 + values.len());
    payload.push(g.id);
    payload.extend_from_slice(values);
    engine.exchange(Opcode::GroupWrite, &payload, Opcode::Ok)?;
    Ok(())
}

pub fn bin_op_group<T: Transport>(
    engine: &mut Engine<T>,
    catalog: &Catalog,
    group: GroupHandle,
    op: BinOp,
    mask: &[u8],
) -> Result<()> {
    let g = catalog
        .resolve_group(group)
        .ok_or(Error::ParamInvalid("group handle not in catalog"))?;
    if !g.writable {
        return Err(Error::ParamInvalid("group is not writable"));
    }
    if mask.len() != g.size as usize {
        return Err(Error::ParamInvalid("mask length does not match group size"));
    }

    let mut payload = Vec::with_capacity(2 + mask.len());
    payload.push(g.id);
    payload.push(op.op_char());
    payload.extend_from_slice(mask);
    engine.exchange(Opcode::GroupBinOp, &payload, Opcode::Ok)?;
    Ok(())
}

/// Create a new group from `var_ids` (≥1), then re-populate the groups
/// catalog (§4.F post-condition) so the new group shows up in
/// [`Catalog::groups`].
pub fn create_group<T: Transport>(
    engine: &mut Engine<T>,
    catalog: &mut Catalog,
    var_ids: &[u8],
) -> Result<()> {
    if var_ids.is_empty() {
        return Err(Error::ParamInvalid("create_group requires at least one variable id"));
    }

    engine.exchange(Opcode::GroupCreate, var_ids, Opcode::Ok)?;
    handshake::update_groups(engine, catalog)
}

/// Remove every non-reserved group, then re-populate the groups catalog.
///
/// The first [`RESERVED_GROUP_COUNT`] groups (`ALL_VARS`, `READ_ONLY`,
/// `WRITABLE`) must survive; a server that removed one of them anyway is a
/// protocol violation, not a silently-accepted catalog state.
pub fn remove_all_groups<T: Transport>(
    engine: &mut Engine<T>,
    catalog: &mut Catalog,
) -> Result<()> {
    engine.exchange(Opcode::GroupRemoveAll, &[], Opcode::Ok)?;
    handshake::update_groups(engine, catalog)?;

    if catalog.groups().len() < RESERVED_GROUP_COUNT {
        return Err(Error::Comm(format!(
            "server returned only {} groups after remove_all_groups, expected at least the {RESERVED_GROUP_COUNT} reserved ones",
            catalog.groups().len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Group, VarHandle, Variable};
    use crate::transport::mock::MockTransport;

    fn frame(opcode: Opcode, payload: &[u8]) -> Vec<u8> {
        let mut out = vec![opcode as u8, (payload.len() >> 8) as u8, payload.len() as u8];
        out.extend_from_slice(payload);
        out
    }

    fn catalog_with_one_group(writable: bool, size: u32) -> Catalog {
        let mut catalog = Catalog::new();
        catalog.vars.repopulate(vec![Variable { id: 0, size: size as u8, writable: true }]);
        let gen = catalog.vars.generation();
        catalog.groups.repopulate(vec![Group {
            id: 0,
            writable,
            vars: vec![VarHandle::new(0, gen)],
            size,
        }]);
        catalog
    }

    #[test]
    fn read_group_checks_payload_length() {
        let catalog = catalog_with_one_group(false, 2);
        let mut mock = MockTransport::new();
        mock.push_response(frame(Opcode::GroupValues, &[1, 2]));
        let mut engine = Engine::new(mock);

        let handle = catalog.group_handle(0).unwrap();
        let value = read_group(&mut engine, &catalog, handle).unwrap();
        assert_eq!(value, vec![1, 2]);
    }

    #[test]
    fn write_group_rejects_read_only() {
        let catalog = catalog_with_one_group(false, 2);
        let mock = MockTransport::new();
        let mut engine = Engine::new(mock);

        let handle = catalog.group_handle(0).unwrap();
        let err = write_group(&mut engine, &catalog, handle, &[1, 2]).unwrap_err();
        assert!(matches!(err, Error::ParamInvalid(_)));
    }

    #[test]
    fn create_group_rejects_empty_list() {
        let mut catalog = Catalog::new();
        let mock = MockTransport::new();
        let mut engine = Engine::new(mock);

        let err = create_group(&mut engine, &mut catalog, &[]).unwrap_err();
        assert!(matches!(err, Error::ParamInvalid(_)));
    }

    #[test]
    fn create_group_repopulates_catalog() {
        let mut catalog = Catalog::new();
        catalog.vars.repopulate(vec![Variable { id: 0, size: 1, writable: true }]);
        let mut mock = MockTransport::new();
        mock.push_response(frame(Opcode::Ok, &[]));
        mock.push_response(frame(Opcode::GroupList, &[0x01]));
        mock.push_response(frame(Opcode::Group, &[0]));
        let mut engine = Engine::new(mock);

        create_group(&mut engine, &mut catalog, &[0]).unwrap();
        assert_eq!(catalog.groups().len(), 1);
        assert_eq!(catalog.groups()[0].size, 1);
    }

    #[test]
    fn remove_all_groups_accepts_surviving_reserved_groups() {
        let mut catalog = Catalog::new();
        let mut mock = MockTransport::new();
        mock.push_response(frame(Opcode::Ok, &[]));
        mock.push_response(frame(Opcode::GroupList, &[0x00, 0x00, 0x00]));
        mock.push_response(frame(Opcode::Group, &[]));
        mock.push_response(frame(Opcode::Group, &[]));
        mock.push_response(frame(Opcode::Group, &[]));
        let mut engine = Engine::new(mock);

        remove_all_groups(&mut engine, &mut catalog).unwrap();
        assert_eq!(catalog.groups().len(), 3);
    }

    #[test]
    fn remove_all_groups_rejects_server_that_drops_reserved_groups() {
        let mut catalog = Catalog::new();
        let mut mock = MockTransport::new();
        mock.push_response(frame(Opcode::Ok, &[]));
        mock.push_response(frame(Opcode::GroupList, &[0x00, 0x00]));
        mock.push_response(frame(Opcode::Group, &[]));
        mock.push_response(frame(Opcode::Group, &[]));
        let mut engine = Engine::new(mock);

        let err = remove_all_groups(&mut engine, &mut catalog).unwrap_err();
        assert!(matches!(err, Error::Comm(_)));
    }
}
