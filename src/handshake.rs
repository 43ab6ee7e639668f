//! Handshake (§4.E): version query followed by catalog population.

use crate::catalog::{Catalog, Curve, Function, Group, Variable};
use crate::constants::{CURVE_CSUM_SIZE, CURVE_LIST_INFO};
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::opcode::Opcode;
use crate::transport::Transport;
use crate::version::Version;

/// Run the full handshake: version query, then variables, groups, curves,
/// and functions, in that order, stopping at the first failure.
pub fn run<T: Transport>(engine: &mut Engine<T>, catalog: &mut Catalog) -> Result<Version> {
    let version = query_version(engine)?;
    update_variables(engine, catalog)?;
    update_groups(engine, catalog)?;
    update_curves(engine, catalog)?;
    update_functions(engine, catalog)?;
    tracing::info!(version = %version.as_str(), "handshake complete");
    Ok(version)
}

fn query_version<T: Transport>(engine: &mut Engine<T>) -> Result<Version> {
    let (opcode, payload) = engine.exchange_raw(Opcode::QueryVersion, &[])?;
    if opcode == Opcode::ErrOpNotSupported {
        tracing::info!("server does not support QUERY_VERSION, assuming version 1.0.0");
        return Ok(Version::V1_0);
    }
    if payload.len() < 3 {
        return Err(Error::Comm(
            "QUERY_VERSION response payload shorter than 3 bytes".into(),
        ));
    }
    let version = Version {
        major: payload[0],
        minor: payload[1],
        revision: payload[2],
    };
    Ok(version)
}

fn update_variables<T: Transport>(engine: &mut Engine<T>, catalog: &mut Catalog) -> Result<()> {
    let payload = engine.exchange(Opcode::VarQueryList, &[], Opcode::VarList)?;
    let vars: Vec<Variable> = payload
        .iter()
        .enumerate()
        .map(|(i, &byte)| Variable::decode(i as u8, byte))
        .collect();
    tracing::info!(count = vars.len(), "variables catalog populated");
    catalog.vars.repopulate(vars);
    Ok(())
}

pub(crate) fn update_groups<T: Transport>(engine: &mut Engine<T>, catalog: &mut Catalog) -> Result<()> {
    let list_payload = match engine.exchange(Opcode::GroupQueryList, &[], Opcode::GroupList) {
        Ok(p) => p,
        Err(e) => {
            catalog.groups.clear();
            return Err(e);
        }
    };

    let mut groups = Vec::with_capacity(list_payload.len());
    for (i, &byte) in list_payload.iter().enumerate() {
        let id = i as u8;
        let (mut group, expected_count) = Group::decode_shell(id, byte);

        let member_payload = match engine.exchange(Opcode::GroupQuery, &[id], Opcode::Group) {
            Ok(p) => p,
            Err(e) => {
                catalog.groups.clear();
                return Err(e);
            }
        };
        if member_payload.len() != expected_count as usize {
            tracing::warn!(
                group = id,
                expected = expected_count,
                actual = member_payload.len(),
                "group member count did not match GROUP_LIST descriptor"
            );
        }

        for &var_id in &member_payload {
            let handle = match catalog.var_handle(var_id) {
                Some(h) => h,
                None => {
                    catalog.groups.clear();
                    return Err(Error::Comm(format!(
                        "group {id} references unknown variable {var_id}"
                    )));
                }
            };
            let size = catalog
                .resolve_var(handle)
                .expect("handle just minted from catalog.var_handle")
                .size;
            group.size += size as u32;
            group.vars.push(handle);
        }

        groups.push(group);
    }

    tracing::info!(count = groups.len(), "groups catalog populated");
    catalog.groups.repopulate(groups);
    Ok(())
}

pub(crate) fn update_curves<T: Transport>(engine: &mut Engine<T>, catalog: &mut Catalog) -> Result<()> {
    let payload = engine.exchange(Opcode::CurveQueryList, &[], Opcode::CurveList)?;
    if payload.len() % CURVE_LIST_INFO != 0 {
        return Err(Error::Comm(format!(
            "CURVE_LIST payload length {} is not a multiple of {CURVE_LIST_INFO}",
            payload.len()
        )));
    }

    let mut curves = Vec::with_capacity(payload.len() / CURVE_LIST_INFO);
    for (i, record) in payload.chunks_exact(CURVE_LIST_INFO).enumerate() {
        let id = i as u8;
        let record: [u8; CURVE_LIST_INFO] = record.try_into().expect("chunks_exact(5)");
        let mut curve = Curve::decode(id, &record);

        match engine.exchange(Opcode::CurveQueryCsum, &[id], Opcode::CurveCsum) {
            Ok(csum) if csum.len() == CURVE_CSUM_SIZE => {
                curve.checksum.copy_from_slice(&csum);
            }
            Ok(csum) => {
                tracing::warn!(
                    curve = id,
                    len = csum.len(),
                    "checksum response had unexpected length, leaving checksum zeroed"
                );
            }
            Err(e) => {
                tracing::warn!(curve = id, error = %e, "checksum fetch failed, leaving checksum zeroed");
            }
        }

        curves.push(curve);
    }

    tracing::info!(count = curves.len(), "curves catalog populated");
    catalog.curves.repopulate(curves);
    Ok(())
}

fn update_functions<T: Transport>(engine: &mut Engine<T>, catalog: &mut Catalog) -> Result<()> {
    let payload = engine.exchange(Opcode::FuncQueryList, &[], Opcode::FuncList)?;
    let funcs: Vec<Function> = payload
        .iter()
        .enumerate()
        .map(|(i, &byte)| Function::decode(i as u8, byte))
        .collect();
    tracing::info!(count = funcs.len(), "functions catalog populated");
    catalog.funcs.repopulate(funcs);
    Ok(())
}
