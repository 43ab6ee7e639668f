//! Variable commands: `read_var`, `write_var`, `write_read_vars`,
//! `bin_op_var`.

use crate::catalog::{Catalog, VarHandle};
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::opcode::{BinOp, Opcode};
use crate::transport::Transport;

pub fn read_var<T: Transport>(
    engine: &mut Engine<T>,
    catalog: &Catalog,
    var: VarHandle,
) -> Result<Vec<u8>> {
    let v = catalog
        .resolve_var(var)
        .ok_or(Error::ParamInvalid("variable handle not in catalog"))?;

    let payload = engine.exchange(Opcode::VarRead, &[v.id], Opcode::VarValue)?;
    if payload.len() != v.size as usize {
        return Err(Error::Comm(format!(
            "VAR_VALUE payload length {} does not match variable size {}",
            payload.len(),
            v.size
        )));
    }
    Ok(payload)
}

pub fn write_var<T: Transport>(
    engine: &mut Engine<T>,
    catalog: &Catalog,
    var: VarHandle,
    value: &[u8],
) -> Result<()> {
    let v = catalog
        .resolve_var(var)
        .ok_or(Error::ParamInvalid("variable handle not in catalog"))?;
    if !v.writable {
        return Err(Error::ParamInvalid("variable is not writable"));
    }
    if value.len() != v.size as usize {
        return Err(Error::ParamInvalid("value length does not match variable size"));
    }

    let mut payload = Vec::with_capacity(1 + value.len());
    payload.push(v.id);
    payload.extend_from_slice(value);
    engine.exchange(Opcode::VarWrite, &payload, Opcode::Ok)?;
    Ok(())
}

pub fn write_read_vars<T: Transport>(
    engine: &mut Engine<T>,
    catalog: &Catalog,
    write_var: VarHandle,
    write_value: &[u8],
    read_var: VarHandle,
) -> Result<Vec<u8>> {
    let w = catalog
        .resolve_var(write_var)
        .ok_or(Error::ParamInvalid("write-variable handle not in catalog"))?;
    if !w.writable {
        return Err(Error::ParamInvalid("write-variable is not writable"));
    }
    if write_value.len() != w.size as usize {
        return Err(Error::ParamInvalid("value length does not match write-variable size"));
    }
    let r = catalog
        .resolve_var(read_var)
        .ok_or(Error::ParamInvalid("read-variable handle not in catalog"))?;

    let mut payload = Vec::with_capacity(2 + write_value.len());
    payload.push(w.id);
    payload.push(r.id);
    payload.extend_from_slice(write_value);
    let response = engine.exchange(Opcode::VarWriteRead, &payload, Opcode::VarValue)?;
    if response.len() != r.size as usize {
        return Err(Error::Comm(format!(
            "VAR_VALUE payload length {} does not match read-variable size {}",
            response.len(),
            r.size
        )));
    }
    Ok(response)
}

pub fn bin_op_var<T: Transport>(
    engine: &mut Engine<T>,
    catalog: &Catalog,
    var: VarHandle,
    op: BinOp,
    mask: &[u8],
) -> Result<()> {
    let v = catalog
        .resolve_var(var)
        .ok_or(Error::ParamInvalid("variable handle not in catalog"))?;
    if !v.writable {
        return Err(Error::ParamInvalid("variable is not writable"));
    }
    if mask.len() != v.size as usize {
        return Err(Error::ParamInvalid("mask length does not match variable size"));
    }

    let mut payload = Vec::with_capacity(2 + mask.len());
    payload.push(v.id);
    payload.push(op.op_char());
    payload.extend_from_slice(mask);
    engine.exchange(Opcode::VarBinOp, &payload, Opcode::Ok)?;
    Ok(())
}
