//! ACME State Module
//!
//! Account state for the identity registry, the value ledger and the proof
//! incentive engine. Every state account is stored as a one-byte
//! [`Discriminator`] followed by the borsh encoding of its body.

pub mod admin;
pub mod constants;
pub mod discount;
pub mod error;
pub mod ledger;
pub mod proof;
pub mod registry;

use borsh::{BorshDeserialize, BorshSerialize};
use pinocchio::pubkey::Pubkey;

pub use admin::{AdminRole, AdminStage, Governance, PauseState};
pub use discount::{DiscountTable, DiscountTier};
pub use error::AcmeStateError;
pub use ledger::{LedgerConfig, LedgerState};
pub use proof::{EngineConfig, EngineState, ProofHash, ProofRecord, ProofStatistics};
pub use registry::{RegistryConfig, RegistryState, SubwalletRecord};

/// Fixed-width account address.
pub type Address = Pubkey;

/// The null address. Never a valid delegate, recipient or authority.
pub const NULL_ADDRESS: Address = [0u8; 32];

/// Returns `true` for the all-zero address.
#[inline]
pub fn is_null(address: &Address) -> bool {
    address == &NULL_ADDRESS
}

/// Represents the type discriminator for different account types in the system.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discriminator {
    /// Freshly allocated, zeroed account
    Uninitialized = 0,
    /// Identity registry state account
    Registry = 1,
    /// Value ledger state account
    Ledger = 2,
    /// Proof incentive engine state account
    Engine = 3,
}

impl TryFrom<u8> for Discriminator {
    type Error = AcmeStateError;

    fn try_from(discriminator: u8) -> Result<Self, Self::Error> {
        match discriminator {
            0 => Ok(Discriminator::Uninitialized),
            1 => Ok(Discriminator::Registry),
            2 => Ok(Discriminator::Ledger),
            3 => Ok(Discriminator::Engine),
            _ => Err(AcmeStateError::InvalidDiscriminator),
        }
    }
}

/// Borsh-backed account body tagged with a discriminator.
pub trait AccountState: BorshSerialize + BorshDeserialize + Sized {
    const DISCRIMINATOR: Discriminator;

    /// Decodes the state from raw account data.
    fn load(data: &[u8]) -> Result<Self, AcmeStateError> {
        let (tag, mut body) = data
            .split_first()
            .ok_or(AcmeStateError::AccountNotInitialized)?;
        match Discriminator::try_from(*tag)? {
            Discriminator::Uninitialized => Err(AcmeStateError::AccountNotInitialized),
            found if found == Self::DISCRIMINATOR => {
                Self::deserialize(&mut body).map_err(|_| AcmeStateError::InvalidAccountData)
            },
            _ => Err(AcmeStateError::WrongAccountType),
        }
    }

    /// Discriminator byte followed by the borsh body.
    fn encode(&self) -> Result<Vec<u8>, AcmeStateError> {
        let mut bytes = vec![Self::DISCRIMINATOR as u8];
        self.serialize(&mut bytes)
            .map_err(|_| AcmeStateError::InvalidAccountData)?;
        Ok(bytes)
    }

    /// Encodes the state into raw account data. The account is left untouched
    /// if the encoding does not fit.
    fn store(&self, data: &mut [u8]) -> Result<usize, AcmeStateError> {
        let bytes = self.encode()?;
        write_encoded(data, &bytes)?;
        Ok(bytes.len())
    }
}

/// Copies pre-encoded state into account data.
pub fn write_encoded(data: &mut [u8], bytes: &[u8]) -> Result<(), AcmeStateError> {
    if bytes.len() > data.len() {
        return Err(AcmeStateError::AccountDataTooSmall);
    }
    data[..bytes.len()].copy_from_slice(bytes);
    Ok(())
}

/// `true` when the account has never been initialized.
pub fn is_uninitialized(data: &[u8]) -> bool {
    data.first()
        .map_or(true, |tag| *tag == Discriminator::Uninitialized as u8)
}

impl AccountState for RegistryState {
    const DISCRIMINATOR: Discriminator = Discriminator::Registry;
}

impl AccountState for LedgerState {
    const DISCRIMINATOR: Discriminator = Discriminator::Ledger;
}

impl AccountState for EngineState {
    const DISCRIMINATOR: Discriminator = Discriminator::Engine;
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_account_state_round_trip_through_buffer() {
        let admin = [7u8; 32];
        let state = RegistryState::new(admin, RegistryConfig::default());
        let mut buffer = vec![0u8; 256];

        assert!(is_uninitialized(&buffer));
        let written = state.store(&mut buffer).unwrap();
        assert!(written > 1);
        assert_eq!(buffer[0], Discriminator::Registry as u8);
        assert_eq!(RegistryState::load(&buffer).unwrap(), state);
    }

    #[test]
    fn test_load_rejects_wrong_account_type() {
        let state = RegistryState::new([7u8; 32], RegistryConfig::default());
        let mut buffer = vec![0u8; 256];
        state.store(&mut buffer).unwrap();

        assert_matches!(
            LedgerState::load(&buffer),
            Err(AcmeStateError::WrongAccountType)
        );
        assert_matches!(
            EngineState::load(&[0u8; 8]),
            Err(AcmeStateError::AccountNotInitialized)
        );
        assert_matches!(
            EngineState::load(&[9u8; 8]),
            Err(AcmeStateError::InvalidDiscriminator)
        );
    }

    #[test]
    fn test_store_refuses_short_buffer_without_writing() {
        let state = RegistryState::new([7u8; 32], RegistryConfig::default());
        let mut buffer = vec![0u8; 4];

        assert_matches!(
            state.store(&mut buffer),
            Err(AcmeStateError::AccountDataTooSmall)
        );
        assert_eq!(buffer, vec![0u8; 4]);
    }
}
