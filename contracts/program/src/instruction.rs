//! ACME Instruction Definitions
//!
//! Every instruction except the three initializers uses the same account list:
//!
//! 0. `[signer]` Caller
//! 1. `[writable]` Registry state account
//! 2. `[writable]` Ledger state account (the primary token)
//! 3. `[writable]` Engine state account (the incentive authority)
//! 4. `[writable]` Optional foreign token ledger, read only by `RecoverTokens`

use acme_state::{Address, EngineConfig, LedgerConfig, ProofHash, RegistryConfig};
use borsh::{BorshDeserialize, BorshSerialize};
use pinocchio::program_error::ProgramError;

use crate::error::AcmeError;

/// Selects the component an admin instruction applies to.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum Component {
    Registry = 0,
    Ledger = 1,
    Engine = 2,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum AcmeInstruction {
    /// Create the identity registry
    ///
    /// Accounts:
    /// 0. `[signer]` Payer
    /// 1. `[writable]` Registry state account (program owned, zeroed)
    InitializeRegistry {
        admin: Address,
        config: RegistryConfig,
    },

    /// Create the value ledger; the initial supply goes to `admin`
    ///
    /// Accounts:
    /// 0. `[signer]` Payer
    /// 1. `[writable]` Ledger state account (program owned, zeroed)
    InitializeLedger {
        admin: Address,
        config: LedgerConfig,
    },

    /// Create the proof engine bound to an existing registry and ledger
    ///
    /// Accounts:
    /// 0. `[signer]` Payer
    /// 1. `[]` Registry state account
    /// 2. `[]` Ledger state account
    /// 3. `[writable]` Engine state account (program owned, zeroed)
    InitializeEngine {
        admin: Address,
        config: EngineConfig,
    },

    /// Register `delegate` under the caller
    RegisterSubwallet {
        delegate: Address,
        name: String,
    },

    /// Rename a subwallet (owner or registry admin)
    RenameSubwallet {
        delegate: Address,
        name: String,
    },

    /// Toggle a subwallet's active flag (owner or registry admin)
    SetSubwalletActive {
        delegate: Address,
        active: bool,
    },

    /// Remove a subwallet (owner or registry admin)
    UnregisterSubwallet {
        delegate: Address,
    },

    /// Stamp the subwallet's last activity time
    TouchActivity {
        delegate: Address,
    },

    /// Drop unregistered records (registry admin)
    PruneSubwallets,

    Transfer {
        to: Address,
        amount: u128,
    },

    Approve {
        spender: Address,
        amount: u128,
    },

    /// Spend the caller's allowance over `owner`
    TransferFrom {
        owner: Address,
        to: Address,
        amount: u128,
    },

    /// Ledger admin only
    Mint {
        to: Address,
        amount: u128,
    },

    Burn {
        amount: u128,
    },

    /// Bind the ledger's incentive authority, once (ledger admin)
    BindIncentiveAuthority {
        authority: Address,
    },

    /// Record a proof hash and pay the discounted fee
    SubmitProof {
        hash: ProofHash,
    },

    /// Move a foreign token held by the engine to the engine admin.
    /// Requires account 4.
    RecoverTokens {
        token: Address,
        amount: u128,
    },

    Pause {
        target: Component,
    },

    Unpause {
        target: Component,
    },

    /// First step of the admin handover
    ProposeAdmin {
        target: Component,
        candidate: Address,
    },

    /// Second step, signed by the proposed candidate
    AcceptAdmin {
        target: Component,
    },
}

impl AcmeInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        Self::try_from_slice(input).map_err(|_| ProgramError::InvalidInstructionData)
    }

    pub fn pack(&self) -> Result<Vec<u8>, AcmeError> {
        borsh::to_vec(self).map_err(|_| AcmeError::InvalidInstruction)
    }

    /// `true` for the instructions that create a state account.
    pub fn is_initialize(&self) -> bool {
        matches!(
            self,
            AcmeInstruction::InitializeRegistry { .. }
                | AcmeInstruction::InitializeLedger { .. }
                | AcmeInstruction::InitializeEngine { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_rejects_unknown_variant() {
        assert_eq!(
            AcmeInstruction::unpack(&[0xff]),
            Err(ProgramError::InvalidInstructionData)
        );
        assert_eq!(
            AcmeInstruction::unpack(&[]),
            Err(ProgramError::InvalidInstructionData)
        );
    }

    #[test]
    fn test_unpack_rejects_trailing_bytes() {
        let mut data = AcmeInstruction::PruneSubwallets.pack().unwrap();
        data.push(0);
        assert_eq!(
            AcmeInstruction::unpack(&data),
            Err(ProgramError::InvalidInstructionData)
        );
    }

    #[test]
    fn test_admin_instruction_carries_component_tag() {
        let data = AcmeInstruction::Pause {
            target: Component::Engine,
        }
        .pack()
        .unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[1], Component::Engine as u8);
    }
}
