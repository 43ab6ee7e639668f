//! Command surface (§4.F): one function per protocol verb.
//!
//! Each function validates its arguments against the catalog (§4.D),
//! builds a request payload per the wire table, and dispatches it through
//! the [`Engine`](crate::engine::Engine). These are free functions rather
//! than methods so [`crate::client::Client`] can borrow `engine` and
//! `catalog` independently where a command needs `&mut` access to one and
//! only `&` access to the other.

mod curves;
mod funcs;
mod groups;
mod vars;

pub use curves::{curve_block_request, curve_block_send, curve_recalc_csum};
pub use funcs::{func_execute, FuncOutcome};
pub use groups::{bin_op_group, create_group, read_group, remove_all_groups, write_group};
pub use vars::{bin_op_var, read_var, write_read_vars, write_var};
