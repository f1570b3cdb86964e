//! Instruction Processor
//!
//! `dispatch` routes a decoded instruction to its handler over an already
//! loaded deployment; it is shared by the on-chain entrypoint and the host
//! runtime. `process_instruction` is the on-chain wrapper that loads state
//! from accounts and writes it back only when the handler succeeds.

use acme_assertions::{check_key_match, check_owned_by, check_signer, check_writable};
use acme_state::{AccountState, Address, EngineState, LedgerState, RegistryState};
use pinocchio::{
    account_info::AccountInfo, msg, program_error::ProgramError, pubkey::Pubkey, ProgramResult,
};

use crate::actions;
use crate::env::Env;
use crate::error::AcmeError;
use crate::instruction::AcmeInstruction;
use crate::ledger::ValueLedger;
use crate::registry::IdentityRegistry;

/// The three components of one deployment plus the optional foreign token
/// ledger used by recovery.
pub struct Deployment<'a> {
    pub registry: &'a mut IdentityRegistry,
    pub ledger: &'a mut ValueLedger,
    pub engine: &'a mut EngineState,
    pub token: Option<&'a mut ValueLedger>,
    pub env: &'a Env,
}

pub fn dispatch(
    deployment: &mut Deployment,
    caller: &Address,
    instruction: AcmeInstruction,
) -> Result<(), AcmeError> {
    match instruction {
        AcmeInstruction::InitializeRegistry { .. }
        | AcmeInstruction::InitializeLedger { .. }
        | AcmeInstruction::InitializeEngine { .. } => Err(AcmeError::AlreadyInitialized),

        AcmeInstruction::RegisterSubwallet { delegate, name } => {
            actions::process_register_subwallet(deployment, caller, delegate, &name)
        },
        AcmeInstruction::RenameSubwallet { delegate, name } => {
            actions::process_rename_subwallet(deployment, caller, &delegate, &name)
        },
        AcmeInstruction::SetSubwalletActive { delegate, active } => {
            actions::process_set_subwallet_active(deployment, caller, &delegate, active)
        },
        AcmeInstruction::UnregisterSubwallet { delegate } => {
            actions::process_unregister_subwallet(deployment, caller, &delegate)
        },
        AcmeInstruction::TouchActivity { delegate } => {
            actions::process_touch_activity(deployment, &delegate)
        },
        AcmeInstruction::PruneSubwallets => actions::process_prune_subwallets(deployment, caller),

        AcmeInstruction::Transfer { to, amount } => {
            actions::process_transfer(deployment, caller, &to, amount)
        },
        AcmeInstruction::Approve { spender, amount } => {
            actions::process_approve(deployment, caller, &spender, amount)
        },
        AcmeInstruction::TransferFrom { owner, to, amount } => {
            actions::process_transfer_from(deployment, caller, &owner, &to, amount)
        },
        AcmeInstruction::Mint { to, amount } => actions::process_mint(deployment, caller, &to, amount),
        AcmeInstruction::Burn { amount } => actions::process_burn(deployment, caller, amount),
        AcmeInstruction::BindIncentiveAuthority { authority } => {
            actions::process_bind_incentive_authority(deployment, caller, authority)
        },

        AcmeInstruction::SubmitProof { hash } => {
            actions::process_submit_proof(deployment, caller, hash)
        },
        AcmeInstruction::RecoverTokens { token, amount } => {
            actions::process_recover_tokens(deployment, caller, &token, amount)
        },

        AcmeInstruction::Pause { target } => actions::process_pause(deployment, caller, target),
        AcmeInstruction::Unpause { target } => actions::process_unpause(deployment, caller, target),
        AcmeInstruction::ProposeAdmin { target, candidate } => {
            actions::process_propose_admin(deployment, caller, target, candidate)
        },
        AcmeInstruction::AcceptAdmin { target } => {
            actions::process_accept_admin(deployment, caller, target)
        },
    }
}

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let env = Env::on_chain()?;
    process_with_env(program_id, accounts, instruction_data, &env)
}

/// Same as [`process_instruction`] with the clock and event sink supplied
/// by the caller.
pub fn process_with_env(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
    env: &Env,
) -> ProgramResult {
    let instruction = AcmeInstruction::unpack(instruction_data).map_err(|e| {
        msg!("Failed to unpack instruction: {:?}", e);
        e
    })?;
    match instruction {
        AcmeInstruction::InitializeRegistry { admin, config } => {
            actions::process_initialize_registry(program_id, accounts, admin, config, env)
        },
        AcmeInstruction::InitializeLedger { admin, config } => {
            actions::process_initialize_ledger(program_id, accounts, admin, config, env)
        },
        AcmeInstruction::InitializeEngine { admin, config } => {
            actions::process_initialize_engine(program_id, accounts, admin, config)
        },
        other => process_operation(program_id, accounts, other, env),
    }
}

fn process_operation(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction: AcmeInstruction,
    env: &Env,
) -> ProgramResult {
    let [caller, registry_account, ledger_account, engine_account, rest @ ..] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    check_signer(caller, ProgramError::MissingRequiredSignature)?;
    for account in [registry_account, ledger_account, engine_account] {
        check_owned_by(account, program_id, ProgramError::IllegalOwner)?;
        check_writable(account, ProgramError::InvalidAccountData)?;
    }

    let registry_state =
        RegistryState::load(&registry_account.try_borrow_data()?).map_err(AcmeError::from)?;
    let ledger_state =
        LedgerState::load(&ledger_account.try_borrow_data()?).map_err(AcmeError::from)?;
    let mut engine_state =
        EngineState::load(&engine_account.try_borrow_data()?).map_err(AcmeError::from)?;

    // All three accounts must belong to one deployment.
    check_key_match(engine_account, &engine_state.address, AcmeError::AccountMismatch)?;
    check_key_match(registry_account, &engine_state.registry, AcmeError::AccountMismatch)?;
    check_key_match(ledger_account, &engine_state.primary_token, AcmeError::AccountMismatch)?;
    check_key_match(ledger_account, &ledger_state.address, AcmeError::AccountMismatch)?;

    // Account 4 is only decoded for recovery, and never when it aliases the
    // primary ledger.
    let token_account = match (&instruction, rest.first()) {
        (AcmeInstruction::RecoverTokens { .. }, Some(account))
            if account.key() != ledger_account.key() =>
        {
            check_owned_by(account, program_id, ProgramError::IllegalOwner)?;
            check_writable(account, ProgramError::InvalidAccountData)?;
            Some(account)
        },
        _ => None,
    };
    let mut token = match token_account {
        Some(account) => {
            let state =
                LedgerState::load(&account.try_borrow_data()?).map_err(AcmeError::from)?;
            check_key_match(account, &state.address, AcmeError::AccountMismatch)?;
            Some(ValueLedger::from_state(state, env.clone()))
        },
        None => None,
    };

    let mut registry = IdentityRegistry::from_state(registry_state, env.clone());
    let mut ledger = ValueLedger::from_state(ledger_state, env.clone());
    let mut deployment = Deployment {
        registry: &mut registry,
        ledger: &mut ledger,
        engine: &mut engine_state,
        token: token.as_mut(),
        env,
    };
    dispatch(&mut deployment, caller.key(), instruction).map_err(|err| {
        msg!("Instruction failed: {} ({:?})", err, err.kind());
        err
    })?;

    // Encode everything first so a state that outgrew its account fails the
    // instruction before any account is written.
    let mut writes = vec![
        (registry_account, registry.state().encode().map_err(AcmeError::from)?),
        (ledger_account, ledger.state().encode().map_err(AcmeError::from)?),
        (engine_account, engine_state.encode().map_err(AcmeError::from)?),
    ];
    if let (Some(account), Some(vault)) = (token_account, token.as_ref()) {
        writes.push((account, vault.state().encode().map_err(AcmeError::from)?));
    }
    for (account, bytes) in &writes {
        if bytes.len() > account.data_len() {
            msg!("State no longer fits its account ({} bytes)", bytes.len());
            return Err(AcmeError::AccountDataTooSmall.into());
        }
    }
    for (account, bytes) in &writes {
        let mut data = account.try_borrow_mut_data()?;
        acme_state::write_encoded(&mut data, bytes).map_err(AcmeError::from)?;
    }
    Ok(())
}
