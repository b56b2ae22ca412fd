use super::errors::PrecompileError;
use super::handlers::{CallContext, handle};
use super::operation::Operation;
use super::selector::Selector;
use crate::state::{OverlayState, State};
use crate::types::address::Address;
use crate::types::bytes::Bytes;
use crate::{debug, error, warn};

/// A call handed to the precompile by the host.
#[derive(Clone, Copy, Debug)]
pub struct PrecompileCall<'a> {
    pub caller: Address,
    /// Address the call was sent to.
    pub address: Address,
    /// Full calldata, selector included.
    pub input: &'a [u8],
    pub supplied_gas: u64,
    pub read_only: bool,
}

/// Outcome of a precompile call.
///
/// On failure `output` is empty and `error` is set. `remaining_gas` is always the
/// gas handed back to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallResult {
    pub output: Bytes,
    pub remaining_gas: u64,
    pub error: Option<PrecompileError>,
}

impl CallResult {
    fn success(output: Bytes, remaining_gas: u64) -> Self {
        Self {
            output,
            remaining_gas,
            error: None,
        }
    }

    fn failure(error: PrecompileError, remaining_gas: u64) -> Self {
        Self {
            output: Bytes::empty(),
            remaining_gas,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Converts to a `Result`, discarding the gas figure.
    pub fn into_result(self) -> Result<Bytes, PrecompileError> {
        match self.error {
            None => Ok(self.output),
            Some(err) => Err(err),
        }
    }
}

/// The asset registry precompile.
///
/// Holds only its routing table; all data lives in the [`State`] passed to
/// [`run`](Self::run), namespaced by the call's target address.
#[derive(Clone, Debug)]
pub struct AssetPrecompile {
    address: Address,
    functions: Vec<(Selector, Operation)>,
}

impl AssetPrecompile {
    pub fn new(address: Address) -> Self {
        let functions = Operation::ALL
            .iter()
            .map(|op| (op.selector(), *op))
            .collect();
        Self { address, functions }
    }

    /// Address this precompile is installed at.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The `(selector, operation)` dispatch table.
    pub fn functions(&self) -> &[(Selector, Operation)] {
        &self.functions
    }

    pub fn lookup(&self, selector: Selector) -> Option<Operation> {
        self.functions
            .iter()
            .find(|(candidate, _)| *candidate == selector)
            .map(|(_, op)| *op)
    }

    /// Executes one call atomically.
    ///
    /// The handler works on an overlay of `state`; its writes are applied only if
    /// it succeeds. Calls that never reach a handler keep all their gas.
    pub fn run<S: State + ?Sized>(&self, state: &mut S, call: &PrecompileCall<'_>) -> CallResult {
        let Some((selector, payload)) = Selector::split(call.input) else {
            warn!("call from {} without selector ({} bytes)", call.caller, call.input.len());
            return CallResult::failure(
                PrecompileError::MissingSelector(call.input.len()),
                call.supplied_gas,
            );
        };
        let Some(op) = self.lookup(selector) else {
            warn!("call from {} with unknown selector {}", call.caller, selector);
            return CallResult::failure(
                PrecompileError::SelectorNotFound(selector),
                call.supplied_gas,
            );
        };

        debug!("{} from {} at {}", op.name(), call.caller, call.address);
        let ctx = CallContext {
            caller: call.caller,
            address: call.address,
            payload,
            read_only: call.read_only,
        };

        let mut overlay = OverlayState::new(&*state);
        let out = handle(op, &mut overlay, &ctx, call.supplied_gas);
        match out.result {
            Ok(output) => {
                let writes = overlay.into_writes();
                state.apply_writes(writes);
                CallResult::success(output, out.remaining_gas)
            }
            Err(err @ PrecompileError::CorruptState(_)) => {
                error!("{} from {} hit {}", op.name(), call.caller, err);
                CallResult::failure(err, out.remaining_gas)
            }
            Err(err) => {
                warn!("{} from {} failed: {}", op.name(), call.caller, err);
                CallResult::failure(err, out.remaining_gas)
            }
        }
    }
}
