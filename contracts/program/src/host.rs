//! Host runtime
//!
//! Runs a full deployment in memory: a manual clock, a recording event sink and
//! the same `dispatch` the entrypoint uses. State is snapshotted before every
//! instruction and restored if it fails, mirroring the on-chain rule that
//! accounts are only written back on success.

use std::collections::BTreeMap;
use std::rc::Rc;

use acme_state::{Address, EngineConfig, EngineState, LedgerConfig, RegistryConfig};

use crate::engine::{self, ProofIncentiveEngine};
use crate::env::{Env, ManualClock, RecordingSink};
use crate::error::AcmeError;
use crate::instruction::AcmeInstruction;
use crate::ledger::ValueLedger;
use crate::processor::{dispatch, Deployment};
use crate::registry::IdentityRegistry;

pub const DEFAULT_START_TIME: i64 = 1_700_000_000;

/// Addresses of the three state accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploymentKeys {
    pub registry: Address,
    pub ledger: Address,
    pub engine: Address,
}

impl Default for DeploymentKeys {
    fn default() -> Self {
        Self {
            registry: [0xA1; 32],
            ledger: [0xA2; 32],
            engine: [0xA3; 32],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HostConfig {
    pub keys: DeploymentKeys,
    pub registry: RegistryConfig,
    pub ledger: LedgerConfig,
    pub engine: EngineConfig,
    pub start_time: i64,
}

pub struct HostRuntime {
    clock: Rc<ManualClock>,
    events: Rc<RecordingSink>,
    env: Env,
    registry: IdentityRegistry,
    ledger: ValueLedger,
    engine: EngineState,
    tokens: BTreeMap<Address, ValueLedger>,
}

impl HostRuntime {
    /// Deploys all three components with `admin` as the admin of each and
    /// binds the engine as the ledger's incentive authority.
    pub fn new(admin: Address, config: HostConfig) -> Result<Self, AcmeError> {
        let clock = Rc::new(ManualClock::new(config.start_time));
        let events = Rc::new(RecordingSink::new());
        let env = Env::new(clock.clone(), events.clone());

        let keys = config.keys;
        let registry = IdentityRegistry::new(admin, config.registry, env.clone())?;
        let mut ledger = ValueLedger::new(keys.ledger, admin, config.ledger, env.clone())?;
        let engine =
            engine::create_state(keys.engine, keys.ledger, keys.registry, admin, config.engine)?;
        ledger.bind_incentive_authority(&admin, keys.engine)?;

        Ok(Self {
            clock,
            events,
            env,
            registry,
            ledger,
            engine,
            tokens: BTreeMap::new(),
        })
    }

    pub fn with_defaults(admin: Address) -> Result<Self, AcmeError> {
        Self::new(
            admin,
            HostConfig {
                start_time: DEFAULT_START_TIME,
                ..HostConfig::default()
            },
        )
    }

    /// Deploys an unrelated token ledger, e.g. one the engine may end up
    /// holding and the admin later recovers.
    pub fn add_token(
        &mut self,
        address: Address,
        admin: Address,
        config: LedgerConfig,
    ) -> Result<(), AcmeError> {
        if address == self.ledger.address() || self.tokens.contains_key(&address) {
            return Err(AcmeError::AlreadyInitialized);
        }
        let token = ValueLedger::new(address, admin, config, self.env.clone())?;
        self.tokens.insert(address, token);
        Ok(())
    }

    pub fn execute(
        &mut self,
        caller: &Address,
        instruction: AcmeInstruction,
    ) -> Result<(), AcmeError> {
        let snapshot = (
            self.registry.state().clone(),
            self.ledger.state().clone(),
            self.engine.clone(),
        );
        let token_key = match &instruction {
            AcmeInstruction::RecoverTokens { token, .. } => Some(*token),
            _ => None,
        };
        let token_snapshot = token_key
            .and_then(|key| self.tokens.get(&key))
            .map(|token| token.state().clone());
        let recorded = self.events.len();

        let mut deployment = Deployment {
            registry: &mut self.registry,
            ledger: &mut self.ledger,
            engine: &mut self.engine,
            token: token_key.and_then(|key| self.tokens.get_mut(&key)),
            env: &self.env,
        };
        let result = dispatch(&mut deployment, caller, instruction);

        if result.is_err() {
            let (registry, ledger, engine) = snapshot;
            self.registry = IdentityRegistry::from_state(registry, self.env.clone());
            self.ledger = ValueLedger::from_state(ledger, self.env.clone());
            self.engine = engine;
            self.events.truncate(recorded);
            if let (Some(key), Some(state)) = (token_key, token_snapshot) {
                self.tokens
                    .insert(key, ValueLedger::from_state(state, self.env.clone()));
            }
        }
        result
    }

    /// Decodes borsh instruction data the way the entrypoint does.
    pub fn execute_raw(&mut self, caller: &Address, data: &[u8]) -> Result<(), AcmeError> {
        let instruction =
            AcmeInstruction::unpack(data).map_err(|_| AcmeError::InvalidInstruction)?;
        self.execute(caller, instruction)
    }

    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &ValueLedger {
        &self.ledger
    }

    pub fn engine_state(&self) -> &EngineState {
        &self.engine
    }

    /// Engine view wired to this runtime's registry and ledger.
    pub fn engine(&mut self) -> ProofIncentiveEngine<'_, &IdentityRegistry, &mut ValueLedger> {
        ProofIncentiveEngine::new(
            &mut self.engine,
            &self.registry,
            &mut self.ledger,
            self.env.clone(),
        )
    }

    pub fn token(&self, address: &Address) -> Option<&ValueLedger> {
        self.tokens.get(address)
    }

    pub fn token_mut(&mut self, address: &Address) -> Option<&mut ValueLedger> {
        self.tokens.get_mut(address)
    }

    pub fn keys(&self) -> DeploymentKeys {
        DeploymentKeys {
            registry: self.engine.registry,
            ledger: self.engine.primary_token,
            engine: self.engine.address,
        }
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn events(&self) -> &RecordingSink {
        &self.events
    }

    pub fn env(&self) -> &Env {
        &self.env
    }
}
