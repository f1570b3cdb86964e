//! Component-targeted pause and admin handover handlers

use acme_state::Address;
use pinocchio::msg;

use crate::error::AcmeError;
use crate::instruction::Component;
use crate::processor::Deployment;

use super::engine_for;

pub fn process_pause(
    deployment: &mut Deployment,
    caller: &Address,
    target: Component,
) -> Result<(), AcmeError> {
    match target {
        Component::Registry => deployment.registry.pause(caller)?,
        Component::Ledger => deployment.ledger.pause(caller)?,
        Component::Engine => {
            msg!("The engine has no pause switch");
            return Err(AcmeError::InvalidInstruction);
        },
    }
    msg!("{:?} paused", target);
    Ok(())
}

pub fn process_unpause(
    deployment: &mut Deployment,
    caller: &Address,
    target: Component,
) -> Result<(), AcmeError> {
    match target {
        Component::Registry => deployment.registry.unpause(caller)?,
        Component::Ledger => deployment.ledger.unpause(caller)?,
        Component::Engine => {
            msg!("The engine has no pause switch");
            return Err(AcmeError::InvalidInstruction);
        },
    }
    msg!("{:?} unpaused", target);
    Ok(())
}

pub fn process_propose_admin(
    deployment: &mut Deployment,
    caller: &Address,
    target: Component,
    candidate: Address,
) -> Result<(), AcmeError> {
    match target {
        Component::Registry => deployment.registry.propose_admin(caller, candidate),
        Component::Ledger => deployment.ledger.propose_admin(caller, candidate),
        Component::Engine => engine_for(deployment).propose_admin(caller, candidate),
    }
}

pub fn process_accept_admin(
    deployment: &mut Deployment,
    caller: &Address,
    target: Component,
) -> Result<(), AcmeError> {
    match target {
        Component::Registry => deployment.registry.accept_admin(caller)?,
        Component::Ledger => deployment.ledger.accept_admin(caller)?,
        Component::Engine => engine_for(deployment).accept_admin(caller)?,
    }
    msg!("{:?} admin handed over", target);
    Ok(())
}
