//! Administrative role and pause state machines shared by all components.
//!
//! - Admin:  `Owner -> PendingOwner -> Owner` (propose, then accept)
//! - Pause:  `Active <-> Paused`

use borsh::{BorshDeserialize, BorshSerialize};

use crate::Address;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseState {
    Active,
    Paused,
}

impl PauseState {
    pub fn is_paused(&self) -> bool {
        matches!(self, PauseState::Paused)
    }
}

/// Stage of the two-step admin handover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminStage {
    Settled,
    PendingTransfer(Address),
}

/// Single administrator with an optional proposed successor.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminRole {
    pub admin: Address,
    pub pending: Option<Address>,
}

impl AdminRole {
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            pending: None,
        }
    }

    #[inline]
    pub fn is_admin(&self, who: &Address) -> bool {
        &self.admin == who
    }

    pub fn stage(&self) -> AdminStage {
        match self.pending {
            Some(candidate) => AdminStage::PendingTransfer(candidate),
            None => AdminStage::Settled,
        }
    }

    /// Replaces any earlier proposal.
    pub fn propose(&mut self, candidate: Address) {
        self.pending = Some(candidate);
    }

    /// Promotes the pending candidate if `who` is that candidate.
    pub fn accept(&mut self, who: &Address) -> bool {
        match self.pending {
            Some(candidate) if &candidate == who => {
                self.admin = candidate;
                self.pending = None;
                true
            },
            _ => false,
        }
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Governance {
    pub admin: AdminRole,
    pub pause: PauseState,
}

impl Governance {
    pub fn new(admin: Address) -> Self {
        Self {
            admin: AdminRole::new(admin),
            pause: PauseState::Active,
        }
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }
}
