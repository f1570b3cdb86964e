//! Common test utilities for ACME program tests

#![allow(dead_code)]

pub mod loader;

use std::rc::Rc;

use acme_program::capability::{DebitSink, EligibilityOracle};
use acme_program::env::{Env, ManualClock, RecordingSink};
use acme_program::{AcmeError, AcmeInstruction, HostRuntime};
use acme_state::constants::ONE_TOKEN;
use acme_state::{Address, ProofHash};
use sha3::{Digest, Keccak256};
use std::collections::{BTreeMap, BTreeSet};

pub const ADMIN: Address = [1u8; 32];
pub const PRINCIPAL: Address = [2u8; 32];
pub const DELEGATE: Address = [3u8; 32];
pub const OTHER_PRINCIPAL: Address = [4u8; 32];
pub const OUTSIDER: Address = [5u8; 32];
pub const ENGINE: Address = [0xA3u8; 32];

/// Whole tokens to base units.
pub fn tokens(amount: u128) -> u128 {
    amount * ONE_TOKEN
}

/// Deterministic proof digest for a label.
pub fn proof_hash(label: &str) -> ProofHash {
    Keccak256::digest(label.as_bytes()).into()
}

/// Deterministic non-null address for a label.
pub fn address(label: &str) -> Address {
    let mut digest: Address = Keccak256::digest(label.as_bytes()).into();
    digest[0] |= 1;
    digest
}

/// Env with a manual clock and a recording sink, plus handles to both.
pub fn test_env(now: i64) -> (Env, Rc<ManualClock>, Rc<RecordingSink>) {
    let clock = Rc::new(ManualClock::new(now));
    let events = Rc::new(RecordingSink::new());
    (Env::new(clock.clone(), events.clone()), clock, events)
}

/// Default deployment administered by `ADMIN`.
pub fn setup_runtime() -> anyhow::Result<HostRuntime> {
    Ok(HostRuntime::with_defaults(ADMIN)?)
}

/// Registers `delegate` under `owner` and funds it from the admin's supply.
pub fn register_funded(
    runtime: &mut HostRuntime,
    owner: &Address,
    delegate: Address,
    name: &str,
    amount: u128,
) -> anyhow::Result<()> {
    runtime.execute(
        owner,
        AcmeInstruction::RegisterSubwallet {
            delegate,
            name: name.to_string(),
        },
    )?;
    if amount > 0 {
        runtime.execute(
            &ADMIN,
            AcmeInstruction::Transfer {
                to: delegate,
                amount,
            },
        )?;
    }
    Ok(())
}

pub fn submit(runtime: &mut HostRuntime, caller: &Address, label: &str) -> Result<(), AcmeError> {
    runtime.execute(
        caller,
        AcmeInstruction::SubmitProof {
            hash: proof_hash(label),
        },
    )
}

/// Eligibility oracle backed by a fixed set of addresses.
#[derive(Default)]
pub struct FakeOracle {
    pub eligible: BTreeSet<Address>,
}

impl FakeOracle {
    pub fn allowing(addresses: &[Address]) -> Self {
        Self {
            eligible: addresses.iter().copied().collect(),
        }
    }
}

impl EligibilityOracle for FakeOracle {
    fn is_eligible(&self, delegate: &Address) -> bool {
        self.eligible.contains(delegate)
    }

    fn eligible_count(&self) -> u64 {
        self.eligible.len() as u64
    }
}

/// Debit sink that records every successful debit.
pub struct FakeLedger {
    pub authority: Address,
    pub balances: BTreeMap<Address, u128>,
    pub debits: Vec<(Address, u128)>,
    /// Forces every debit to fail with this error
    pub failure: Option<AcmeError>,
}

impl FakeLedger {
    pub fn new(authority: Address) -> Self {
        Self {
            authority,
            balances: BTreeMap::new(),
            debits: Vec::new(),
            failure: None,
        }
    }

    pub fn fund(mut self, account: Address, amount: u128) -> Self {
        self.balances.insert(account, amount);
        self
    }
}

impl DebitSink for FakeLedger {
    fn incentive_debit(
        &mut self,
        authority: &Address,
        account: &Address,
        amount: u128,
    ) -> Result<(), AcmeError> {
        if let Some(failure) = self.failure {
            return Err(failure);
        }
        if authority != &self.authority {
            return Err(AcmeError::Unauthorized);
        }
        let balance = self.balance_of(account);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(AcmeError::InsufficientBalance)?;
        self.balances.insert(*account, remaining);
        self.debits.push((*account, amount));
        Ok(())
    }

    fn balance_of(&self, account: &Address) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }
}
