use soroban_sdk::{contractclient, Address, Bytes, Env};

/// The one capability the wallet needs from the contract it governs.
///
/// The payload is opaque to the wallet; the target decodes it into whatever
/// privileged operation it exposes.
#[contractclient(name = "ExecutionTargetClient")]
pub trait ExecutionTarget {
    fn dispatch(env: Env, payload: Bytes);
}

/// Forwards `payload` to `target`. Returns `false` if the target reverted or
/// its result could not be decoded; the wallet's own writes are kept either way.
pub fn dispatch(env: &Env, target: &Address, payload: &Bytes) -> bool {
    let client = ExecutionTargetClient::new(env, target);
    matches!(client.try_dispatch(payload), Ok(Ok(())))
}
