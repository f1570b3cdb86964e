//! Proof engine instruction handlers

use acme_state::{Address, ProofHash};
use pinocchio::msg;

use crate::engine::ensure_recoverable;
use crate::error::AcmeError;
use crate::governance;
use crate::processor::Deployment;

use super::engine_for;

pub fn process_submit_proof(
    deployment: &mut Deployment,
    caller: &Address,
    hash: ProofHash,
) -> Result<(), AcmeError> {
    let fee = engine_for(deployment).submit_proof(caller, hash)?;
    deployment.registry.note_activity(caller);
    msg!("Proof fee charged: {}", fee);
    Ok(())
}

/// Account 4 (the foreign token ledger) is only looked at once the token is
/// known not to be the primary one and the caller is the engine admin.
pub fn process_recover_tokens(
    deployment: &mut Deployment,
    caller: &Address,
    token: &Address,
    amount: u128,
) -> Result<(), AcmeError> {
    ensure_recoverable(&*deployment.engine, token)?;
    governance::require_admin(&deployment.engine.admin, caller)?;

    let mut vault = deployment.token.take().ok_or_else(|| {
        msg!("Recovery needs the token ledger account");
        AcmeError::MissingTokenAccount
    })?;
    let result = engine_for(deployment).emergency_token_recovery(caller, token, amount, &mut *vault);
    deployment.token = Some(vault);
    result?;

    msg!("Recovered {} base units", amount);
    Ok(())
}
