//! Subwallet instruction handlers

use acme_state::Address;
use pinocchio::msg;

use crate::error::AcmeError;
use crate::processor::Deployment;

pub fn process_register_subwallet(
    deployment: &mut Deployment,
    caller: &Address,
    delegate: Address,
    name: &str,
) -> Result<(), AcmeError> {
    deployment.registry.register(caller, delegate, name)?;
    msg!(
        "Subwallet registered ({} owned by caller)",
        deployment.registry.subwallets_of(caller).len()
    );
    Ok(())
}

pub fn process_rename_subwallet(
    deployment: &mut Deployment,
    caller: &Address,
    delegate: &Address,
    name: &str,
) -> Result<(), AcmeError> {
    deployment.registry.rename(caller, delegate, name)?;
    msg!("Subwallet renamed");
    Ok(())
}

pub fn process_set_subwallet_active(
    deployment: &mut Deployment,
    caller: &Address,
    delegate: &Address,
    active: bool,
) -> Result<(), AcmeError> {
    deployment.registry.set_active(caller, delegate, active)?;
    msg!("Subwallet active = {}", active);
    Ok(())
}

pub fn process_unregister_subwallet(
    deployment: &mut Deployment,
    caller: &Address,
    delegate: &Address,
) -> Result<(), AcmeError> {
    deployment.registry.unregister(caller, delegate)?;
    msg!("Subwallet unregistered");
    Ok(())
}

pub fn process_touch_activity(
    deployment: &mut Deployment,
    delegate: &Address,
) -> Result<(), AcmeError> {
    deployment.registry.touch_activity(delegate)
}

pub fn process_prune_subwallets(
    deployment: &mut Deployment,
    caller: &Address,
) -> Result<(), AcmeError> {
    let removed = deployment.registry.prune_unregistered(caller)?;
    msg!("Pruned {} unregistered subwallets", removed);
    Ok(())
}
