//! Initialize instruction handlers
//!
//! These run before any state is loaded: each writes a fresh state body into a
//! zeroed, program-owned account.

use acme_assertions::{
    check_key_match, check_nonzero_key, check_owned_by, check_signer, check_writable,
};
use acme_state::{
    is_uninitialized, AccountState, Address, EngineConfig, LedgerConfig, LedgerState,
    RegistryConfig, RegistryState,
};
use pinocchio::{
    account_info::AccountInfo, msg, program_error::ProgramError, pubkey::Pubkey, ProgramResult,
};

use crate::engine;
use crate::env::Env;
use crate::error::AcmeError;
use crate::ledger::ValueLedger;
use crate::registry::IdentityRegistry;

pub fn process_initialize_registry(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    admin: Address,
    config: RegistryConfig,
    env: &Env,
) -> ProgramResult {
    let [payer, registry_account, ..] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    check_signer(payer, ProgramError::MissingRequiredSignature)?;
    check_nonzero_key(&admin, AcmeError::InvalidAddress)?;
    check_fresh_state_account(program_id, registry_account)?;

    let registry = IdentityRegistry::new(admin, config, env.clone())?;
    let mut data = registry_account.try_borrow_mut_data()?;
    let written = registry.state().store(&mut data).map_err(AcmeError::from)?;

    msg!("Registry initialized ({} bytes)", written);
    Ok(())
}

pub fn process_initialize_ledger(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    admin: Address,
    config: LedgerConfig,
    env: &Env,
) -> ProgramResult {
    let [payer, ledger_account, ..] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    check_signer(payer, ProgramError::MissingRequiredSignature)?;
    check_nonzero_key(&admin, AcmeError::InvalidAddress)?;
    check_fresh_state_account(program_id, ledger_account)?;

    let ledger = ValueLedger::new(*ledger_account.key(), admin, config, env.clone())?;
    let mut data = ledger_account.try_borrow_mut_data()?;
    let written = ledger.state().store(&mut data).map_err(AcmeError::from)?;

    msg!(
        "Ledger initialized: {} {} minted ({} bytes)",
        ledger.total_supply(),
        ledger.symbol(),
        written
    );
    Ok(())
}

pub fn process_initialize_engine(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    admin: Address,
    config: EngineConfig,
) -> ProgramResult {
    let [payer, registry_account, ledger_account, engine_account, ..] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    check_signer(payer, ProgramError::MissingRequiredSignature)?;
    check_owned_by(registry_account, program_id, ProgramError::IllegalOwner)?;
    check_owned_by(ledger_account, program_id, ProgramError::IllegalOwner)?;
    check_nonzero_key(&admin, AcmeError::InvalidAddress)?;
    check_fresh_state_account(program_id, engine_account)?;

    // Both siblings must already hold initialized state of the right type.
    RegistryState::load(&registry_account.try_borrow_data()?).map_err(AcmeError::from)?;
    let ledger = LedgerState::load(&ledger_account.try_borrow_data()?).map_err(AcmeError::from)?;
    check_key_match(ledger_account, &ledger.address, AcmeError::AccountMismatch)?;

    let state = engine::create_state(
        *engine_account.key(),
        *ledger_account.key(),
        *registry_account.key(),
        admin,
        config,
    )?;
    let mut data = engine_account.try_borrow_mut_data()?;
    let written = state.store(&mut data).map_err(AcmeError::from)?;

    msg!("Engine initialized ({} bytes)", written);
    Ok(())
}

fn check_fresh_state_account(program_id: &Pubkey, account: &AccountInfo) -> ProgramResult {
    check_owned_by(account, program_id, ProgramError::IllegalOwner)?;
    check_writable(account, ProgramError::InvalidAccountData)?;
    if !is_uninitialized(&account.try_borrow_data()?) {
        msg!("State account already holds data");
        return Err(AcmeError::AlreadyInitialized.into());
    }
    Ok(())
}
