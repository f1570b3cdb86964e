use pinocchio::program_error::ProgramError;
use thiserror::Error;

/// Error types related to state encoding and state validation.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum AcmeStateError {
    /// Account data is invalid or corrupted
    #[error("Invalid account data")]
    InvalidAccountData = 1000,
    /// Account has not been initialized
    #[error("Account not initialized")]
    AccountNotInitialized,
    /// Unknown discriminator byte
    #[error("Invalid discriminator")]
    InvalidDiscriminator,
    /// Discriminator belongs to a different account type
    #[error("Wrong account type")]
    WrongAccountType,
    /// Encoded state does not fit into the account
    #[error("Account data too small")]
    AccountDataTooSmall,
    /// Discount table is empty, unordered or out of range
    #[error("Invalid discount table")]
    InvalidDiscountTable,
    /// Configuration value out of range
    #[error("Invalid configuration")]
    InvalidConfig,
}

impl From<AcmeStateError> for ProgramError {
    fn from(e: AcmeStateError) -> Self {
        ProgramError::Custom(e as u32 + 2000)
    }
}
