//! Token instruction handlers

use acme_state::Address;
use pinocchio::msg;

use crate::error::AcmeError;
use crate::processor::Deployment;

/// A transfer signed by a subwallet counts as activity for it.
pub fn process_transfer(
    deployment: &mut Deployment,
    caller: &Address,
    to: &Address,
    amount: u128,
) -> Result<(), AcmeError> {
    deployment.ledger.transfer(caller, to, amount)?;
    deployment.registry.note_activity(caller);
    Ok(())
}

pub fn process_approve(
    deployment: &mut Deployment,
    caller: &Address,
    spender: &Address,
    amount: u128,
) -> Result<(), AcmeError> {
    deployment.ledger.approve(caller, spender, amount)
}

pub fn process_transfer_from(
    deployment: &mut Deployment,
    caller: &Address,
    owner: &Address,
    to: &Address,
    amount: u128,
) -> Result<(), AcmeError> {
    deployment.ledger.transfer_from(caller, owner, to, amount)
}

pub fn process_mint(
    deployment: &mut Deployment,
    caller: &Address,
    to: &Address,
    amount: u128,
) -> Result<(), AcmeError> {
    deployment.ledger.mint(caller, to, amount)?;
    msg!("Minted {} base units", amount);
    Ok(())
}

pub fn process_burn(
    deployment: &mut Deployment,
    caller: &Address,
    amount: u128,
) -> Result<(), AcmeError> {
    deployment
        .ledger
        .burn(caller, amount, &*deployment.registry)?;
    msg!("Burned {} base units", amount);
    Ok(())
}

pub fn process_bind_incentive_authority(
    deployment: &mut Deployment,
    caller: &Address,
    authority: Address,
) -> Result<(), AcmeError> {
    if authority != deployment.engine.address {
        msg!("Warning: incentive authority is not this deployment's engine");
    }
    deployment
        .ledger
        .bind_incentive_authority(caller, authority)?;
    msg!("Incentive authority bound");
    Ok(())
}
