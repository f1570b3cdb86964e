//! Role checks and transitions for the admin and pause state machines.

use acme_state::{is_null, Address, AdminRole, AdminStage, Governance, PauseState};
use pinocchio::msg;

use crate::error::AcmeError;

pub fn require_admin(role: &AdminRole, caller: &Address) -> Result<(), AcmeError> {
    if role.is_admin(caller) {
        Ok(())
    } else {
        msg!("Permission denied: caller is not the admin");
        Err(AcmeError::Unauthorized)
    }
}

pub fn require_not_paused(governance: &Governance) -> Result<(), AcmeError> {
    if governance.is_paused() {
        Err(AcmeError::SystemPaused)
    } else {
        Ok(())
    }
}

/// `Active -> Paused`, admin only.
pub fn pause(governance: &mut Governance, caller: &Address) -> Result<(), AcmeError> {
    require_admin(&governance.admin, caller)?;
    if governance.pause != PauseState::Active {
        return Err(AcmeError::InvalidStateTransition);
    }
    governance.pause = PauseState::Paused;
    Ok(())
}

/// `Paused -> Active`, admin only.
pub fn unpause(governance: &mut Governance, caller: &Address) -> Result<(), AcmeError> {
    require_admin(&governance.admin, caller)?;
    if governance.pause != PauseState::Paused {
        return Err(AcmeError::InvalidStateTransition);
    }
    governance.pause = PauseState::Active;
    Ok(())
}

/// First step of the handover. Re-proposing replaces the candidate.
pub fn propose_admin(
    role: &mut AdminRole,
    caller: &Address,
    candidate: Address,
) -> Result<(), AcmeError> {
    require_admin(role, caller)?;
    if is_null(&candidate) {
        return Err(AcmeError::InvalidAddress);
    }
    role.propose(candidate);
    Ok(())
}

/// Second step; only the pending candidate may accept. Returns the previous admin.
pub fn accept_admin(role: &mut AdminRole, caller: &Address) -> Result<Address, AcmeError> {
    match role.stage() {
        AdminStage::PendingTransfer(candidate) if &candidate == caller => {
            let previous = role.admin;
            role.accept(caller);
            Ok(previous)
        },
        AdminStage::PendingTransfer(_) => {
            msg!("Permission denied: caller is not the proposed admin");
            Err(AcmeError::Unauthorized)
        },
        AdminStage::Settled => {
            msg!("No admin handover pending");
            Err(AcmeError::Unauthorized)
        },
    }
}
