//! ACME Error Types

use acme_state::AcmeStateError;
use pinocchio::program_error::ProgramError;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum AcmeError {
    #[error("Invalid instruction")]
    InvalidInstruction,

    #[error("Invalid address")]
    InvalidAddress,

    #[error("Invalid name")]
    InvalidName,

    #[error("Not authorized")]
    Unauthorized,

    #[error("Caller is not an active registered subwallet")]
    NotEligible,

    #[error("Subwallet already registered")]
    AlreadyRegistered,

    #[error("Subwallet not registered")]
    NotRegistered,

    #[error("Proof already exists")]
    DuplicateProof,

    #[error("Proof not found")]
    NotFound,

    #[error("Subwallet limit per owner reached")]
    QuotaExceeded,

    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Insufficient funds for proof fee")]
    InsufficientFunds,

    #[error("Insufficient allowance")]
    InsufficientAllowance,

    #[error("System paused")]
    SystemPaused,

    #[error("Incentive authority already bound")]
    AuthorityAlreadyBound,

    #[error("Cannot recover the primary token")]
    CannotRecoverPrimaryToken,

    #[error("Invalid state transition")]
    InvalidStateTransition,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    #[error("Invalid configuration")]
    InvalidConfig,

    #[error("Invalid account data")]
    InvalidAccountData,

    #[error("Account data too small")]
    AccountDataTooSmall,

    #[error("Account already initialized")]
    AlreadyInitialized,

    #[error("Account does not match deployment")]
    AccountMismatch,

    #[error("Token account missing")]
    MissingTokenAccount,
}

/// Coarse classification of failures.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied data is malformed
    Validation,
    /// Caller lacks the role or eligibility
    Authorization,
    /// Transition is illegal in the current state
    StateConflict,
    /// Request exceeds a bound
    Resource,
    /// System is administratively frozen
    Availability,
    /// Instruction or account plumbing problem
    Program,
}

impl AcmeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AcmeError::InvalidAddress | AcmeError::InvalidName => ErrorKind::Validation,
            AcmeError::Unauthorized
            | AcmeError::NotEligible
            | AcmeError::CannotRecoverPrimaryToken => ErrorKind::Authorization,
            AcmeError::AlreadyRegistered
            | AcmeError::NotRegistered
            | AcmeError::DuplicateProof
            | AcmeError::NotFound
            | AcmeError::AuthorityAlreadyBound
            | AcmeError::InvalidStateTransition => ErrorKind::StateConflict,
            AcmeError::QuotaExceeded
            | AcmeError::InsufficientBalance
            | AcmeError::InsufficientFunds
            | AcmeError::InsufficientAllowance
            | AcmeError::ArithmeticOverflow => ErrorKind::Resource,
            AcmeError::SystemPaused => ErrorKind::Availability,
            AcmeError::InvalidInstruction
            | AcmeError::InvalidConfig
            | AcmeError::InvalidAccountData
            | AcmeError::AccountDataTooSmall
            | AcmeError::AlreadyInitialized
            | AcmeError::AccountMismatch
            | AcmeError::MissingTokenAccount => ErrorKind::Program,
        }
    }
}

impl From<AcmeError> for ProgramError {
    fn from(e: AcmeError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl From<AcmeStateError> for AcmeError {
    fn from(e: AcmeStateError) -> Self {
        match e {
            AcmeStateError::InvalidDiscountTable | AcmeStateError::InvalidConfig => {
                AcmeError::InvalidConfig
            },
            AcmeStateError::AccountDataTooSmall => AcmeError::AccountDataTooSmall,
            AcmeStateError::InvalidAccountData
            | AcmeStateError::AccountNotInitialized
            | AcmeStateError::InvalidDiscriminator
            | AcmeStateError::WrongAccountType => AcmeError::InvalidAccountData,
        }
    }
}
