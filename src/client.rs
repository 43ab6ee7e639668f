//! The public client (§6): ties the transport, command engine, and entity
//! catalog together into the one type callers construct.

use crate::catalog::{Catalog, CurveHandle, FuncHandle, GroupHandle, VarHandle};
use crate::commands::{self, FuncOutcome};
use crate::engine::Engine;
use crate::error::Result;
use crate::handshake;
use crate::opcode::BinOp;
use crate::transport::{CallbackTransport, Transport};
use crate::version::Version;

/// A client for one connection to a Protocol server.
///
/// `Client` owns the transport, so it is not `Sync`: concurrent use of one
/// instance from multiple threads is undefined (§5), matching the
/// single-owner lifecycle the spec describes.
pub struct Client<T> {
    engine: Engine<T>,
    catalog: Catalog,
    version: Option<Version>,
}

/// Construct a client from a pair of `send`/`recv` callbacks, matching the
/// `new(send_fn, recv_fn)` shape of §6.
pub fn new<S, R>(
    send_fn: S,
    recv_fn: R,
) -> Client<CallbackTransport<S, R>>
where
    S: FnMut(&[u8]) -> Result<()>,
    R: FnMut(&mut [u8]) -> Result<usize>,
{
    Client::with_transport(CallbackTransport::new(send_fn, recv_fn))
}

impl<T: Transport> Client<T> {
    /// Construct a client directly from any [`Transport`] implementation.
    pub fn with_transport(transport: T) -> Self {
        Self {
            engine: Engine::new(transport),
            catalog: Catalog::new(),
            version: None,
        }
    }

    /// Run the handshake (§4.E): version query, then variables, groups,
    /// curves, and functions, in that order.
    pub fn init(&mut self) -> Result<()> {
        let version = handshake::run(&mut self.engine, &mut self.catalog)?;
        self.version = Some(version);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.version.is_some()
    }

    // -- Accessors (§6) -----------------------------------------------

    pub fn get_version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    pub fn get_vars_list(&self) -> &[crate::catalog::Variable] {
        self.catalog.vars()
    }

    pub fn get_groups_list(&self) -> &[crate::catalog::Group] {
        self.catalog.groups()
    }

    pub fn get_curves_list(&self) -> &[crate::catalog::Curve] {
        self.catalog.curves()
    }

    pub fn get_funcs_list(&self) -> &[crate::catalog::Function] {
        self.catalog.funcs()
    }

    // -- Handle lookup --------------------------------------------------

    pub fn var_handle(&self, id: u8) -> Option<VarHandle> {
        self.catalog.var_handle(id)
    }

    pub fn group_handle(&self, id: u8) -> Option<GroupHandle> {
        self.catalog.group_handle(id)
    }

    pub fn curve_handle(&self, id: u8) -> Option<CurveHandle> {
        self.catalog.curve_handle(id)
    }

    pub fn func_handle(&self, id: u8) -> Option<FuncHandle> {
        self.catalog.func_handle(id)
    }

    // -- Command surface (§4.F) -----------------------------------------

    pub fn read_var(&mut self, var: VarHandle) -> Result<Vec<u8>> {
        commands::read_var(&mut self.engine, &self.catalog, var)
    }

    pub fn write_var(&mut self, var: VarHandle, value: &[u8]) -> Result<()> {
        commands::write_var(&mut self.engine, &self.catalog, var, value)
    }

    pub fn write_read_vars(
        &mut self,
        write_var: VarHandle,
        write_value: &[u8],
        read_var: VarHandle,
    ) -> Result<Vec<u8>> {
        commands::write_read_vars(&mut self.engine, &self.catalog, write_var, write_value, read_var)
    }

    pub fn bin_op_var(&mut self, var: VarHandle, op: BinOp, mask: &[u8]) -> Result<()> {
        commands::bin_op_var(&mut self.engine, &self.catalog, var, op, mask)
    }

    pub fn read_group(&mut self, group: GroupHandle) -> Result<Vec<u8>> {
        commands::read_group(&mut self.engine, &self.catalog, group)
    }

    pub fn write_group(&mut self, group: GroupHandle, values: &[u8]) -> Result<()> {
        commands::write_group(&mut self.engine, &self.catalog, group, values)
    }

    pub fn bin_op_group(&mut self, group: GroupHandle, op: BinOp, mask: &[u8]) -> Result<()> {
        commands::bin_op_group(&mut self.engine, &self.catalog, group, op, mask)
    }

    pub fn create_group(&mut self, var_ids: &[u8]) -> Result<()> {
        commands::create_group(&mut self.engine, &mut self.catalog, var_ids)
    }

    pub fn remove_all_groups(&mut self) -> Result<()> {
        commands::remove_all_groups(&mut self.engine, &mut self.catalog)
    }

    pub fn curve_block_request(&mut self, curve: CurveHandle, offset: u16) -> Result<Vec<u8>> {
        commands::curve_block_request(&mut self.engine, &self.catalog, curve, offset)
    }

    pub fn curve_block_send(&mut self, curve: CurveHandle, offset: u16, data: &[u8]) -> Result<()> {
        commands::curve_block_send(&mut self.engine, &self.catalog, curve, offset, data)
    }

    pub fn curve_recalc_csum(&mut self, curve: CurveHandle) -> Result<()> {
        commands::curve_recalc_csum(&mut self.engine, &mut self.catalog, curve)
    }

    pub fn func_execute(&mut self, func: FuncHandle, input: &[u8]) -> Result<FuncOutcome> {
        commands::func_execute(&mut self.engine, &self.catalog, func, input)
    }
}
