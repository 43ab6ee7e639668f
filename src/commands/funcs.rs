//! Function command: `func_execute`.

use crate::catalog::{Catalog, FuncHandle};
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::opcode::Opcode;
use crate::transport::Transport;

/// The outcome of a function call: either the routine returned normally
/// with its output bytes, or it reported a domain error.
///
/// Both variants are `Ok` at the [`Result`] level — a `FUNC_ERROR` response
/// is a successful call that happens to carry a domain error, not a
/// transport failure (§9).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FuncOutcome {
    Returned(Vec<u8>),
    DomainError(u8),
}

pub fn func_execute<T: Transport>(
    engine: &mut Engine<T>,
    catalog: &Catalog,
    func: FuncHandle,
    input: &[u8],
) -> Result<FuncOutcome> {
    let f = catalog
        .resolve_func(func)
        .ok_or(Error::ParamInvalid("function handle not in catalog"))?;
    if input.len() != f.input_size as usize {
        return Err(Error::ParamInvalid("input length does not match function input_size"));
    }

    let mut payload = Vec::with_capacity(1 + input.len());
    payload.push(f.id);
    payload.extend_from_slice(input);

    let (which, response) = engine.exchange_either(
        Opcode::FuncExecute,
        &payload,
        Opcode::FuncReturn,
        Opcode::FuncError,
    )?;

    match which {
        Opcode::FuncReturn => {
            if response.len() != f.output_size as usize {
                return Err(Error::Comm(format!(
                    "FUNC_RETURN payload length {} does not match output_size {}",
                    response.len(),
                    f.output_size
                )));
            }
            Ok(FuncOutcome::Returned(response))
        }
        Opcode::FuncError => {
            let code = *response
                .first()
                .ok_or_else(|| Error::Comm("FUNC_ERROR response carried no error byte".into()))?;
            Ok(FuncOutcome::DomainError(code))
        }
        _ => unreachable!("exchange_either only returns the two opcodes it was given"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Function;
    use crate::transport::mock::MockTransport;

    fn frame(opcode: Opcode, payload: &[u8]) -> Vec<u8> {
        let mut out = vec![opcode as u8, (payload.len() >> 8) as u8, payload.len() as u8];
        out.extend_from_slice(payload);
        out
    }

    fn catalog_with_func(input_size: u8, output_size: u8) -> Catalog {
        let mut catalog = Catalog::new();
        catalog.funcs.repopulate(vec![Function { id: 0, input_size, output_size }]);
        catalog
    }

    #[test]
    fn func_execute_domain_error_leaves_output_unset() {
        let catalog = catalog_with_func(1, 2);
        let mut mock = MockTransport::new();
        mock.push_response(frame(Opcode::FuncError, &[0x07]));
        let mut engine = Engine::new(mock);

        let handle = catalog.func_handle(0).unwrap();
        let outcome = func_execute(&mut engine, &catalog, handle, &[0xFF]).unwrap();
        assert_eq!(outcome, FuncOutcome::DomainError(7));
    }

    #[test]
    fn func_execute_returns_output_bytes() {
        let catalog = catalog_with_func(0, 2);
        let mut mock = MockTransport::new();
        mock.push_response(frame(Opcode::FuncReturn, &[0x01, 0x02]));
        let mut engine = Engine::new(mock);

        let handle = catalog.func_handle(0).unwrap();
        let outcome = func_execute(&mut engine, &catalog, handle, &[]).unwrap();
        assert_eq!(outcome, FuncOutcome::Returned(vec![0x01, 0x02]));
    }

    #[test]
    fn func_execute_rejects_wrong_input_length() {
        let catalog = catalog_with_func(2, 0);
        let mock = MockTransport::new();
        let mut engine = Engine::new(mock);

        let handle = catalog.func_handle(0).unwrap();
        let err = func_execute(&mut engine, &catalog, handle, &[0x01]).unwrap_err();
        assert!(matches!(err, Error::ParamInvalid(_)));
    }
}
