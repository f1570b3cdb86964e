//! Instruction encoding tests: borsh payloads routed through the dispatcher

mod common;

use acme_program::{AcmeError, AcmeInstruction, Component};
use acme_state::{AccountState, EngineConfig, RegistryConfig, RegistryState};
use assert_matches::assert_matches;
use common::*;

#[test]
fn test_raw_submit_proof_matches_typed_path() -> anyhow::Result<()> {
    let mut runtime = setup_runtime()?;
    register_funded(&mut runtime, &PRINCIPAL, DELEGATE, "Wallet A", tokens(1))?;

    let hash: [u8; 32] = hex::decode(
        "9c22ff5f21f0b81b113e63f7db6da94fedef11b2119b4088b89664fb9a3cb658",
    )?
    .try_into()
    .map_err(|_| anyhow::anyhow!("digest must be 32 bytes"))?;
    let data = AcmeInstruction::SubmitProof { hash }.pack()?;
    assert_eq!(data.len(), 1 + 32);
    assert_eq!(&data[1..], &hash);

    runtime.execute_raw(&DELEGATE, &data)?;
    assert!(runtime.engine_state().proof(&hash).is_some());
    assert_matches!(
        runtime.execute_raw(&DELEGATE, &data),
        Err(AcmeError::DuplicateProof)
    );
    Ok(())
}

#[test]
fn test_malformed_payload_is_rejected() -> anyhow::Result<()> {
    let mut runtime = setup_runtime()?;

    assert_matches!(
        runtime.execute_raw(&ADMIN, &[]),
        Err(AcmeError::InvalidInstruction)
    );
    assert_matches!(
        runtime.execute_raw(&ADMIN, &[0xee, 1, 2, 3]),
        Err(AcmeError::InvalidInstruction)
    );

    // Component selector outside the enum.
    let mut data = AcmeInstruction::Pause {
        target: Component::Registry,
    }
    .pack()?;
    data[1] = 7;
    assert_matches!(
        runtime.execute_raw(&ADMIN, &data),
        Err(AcmeError::InvalidInstruction)
    );
    assert!(!runtime.registry().is_paused());
    Ok(())
}

#[test]
fn test_initialize_is_rejected_on_live_deployment() -> anyhow::Result<()> {
    let mut runtime = setup_runtime()?;

    let data = AcmeInstruction::InitializeEngine {
        admin: OUTSIDER,
        config: EngineConfig::default(),
    }
    .pack()?;
    assert_matches!(
        runtime.execute_raw(&OUTSIDER, &data),
        Err(AcmeError::AlreadyInitialized)
    );
    assert_eq!(runtime.engine().admin(), ADMIN);
    Ok(())
}

#[test]
fn test_instruction_round_trips_with_name() -> anyhow::Result<()> {
    let instruction = AcmeInstruction::RegisterSubwallet {
        delegate: DELEGATE,
        name: "Wallet Ä".to_string(),
    };
    let data = instruction.pack()?;
    assert_eq!(AcmeInstruction::unpack(&data), Ok(instruction));
    assert!(!AcmeInstruction::PruneSubwallets.is_initialize());
    assert!(AcmeInstruction::InitializeRegistry {
        admin: ADMIN,
        config: RegistryConfig::default(),
    }
    .is_initialize());
    Ok(())
}

#[test]
fn test_registry_state_survives_account_encoding() -> anyhow::Result<()> {
    let mut runtime = setup_runtime()?;
    register_funded(&mut runtime, &PRINCIPAL, DELEGATE, "Wallet A", 0)?;

    let bytes = runtime.registry().state().encode()?;
    let mut account = vec![0u8; bytes.len() + 64];
    runtime.registry().state().store(&mut account)?;
    let decoded = RegistryState::load(&account)?;
    assert_eq!(&decoded, runtime.registry().state());

    let mut short = vec![0u8; bytes.len() - 1];
    assert!(runtime.registry().state().store(&mut short).is_err());
    assert!(short.iter().all(|byte| *byte == 0));
    Ok(())
}
