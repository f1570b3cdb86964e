//! Proof incentive engine.
//!
//! Accepts proof hashes from eligible delegates, charges a tier-discounted fee
//! through the ledger's incentive channel and keeps one record per hash. The
//! engine only talks to the registry and ledger through the capability traits.

use acme_state::{
    is_null, Address, EngineConfig, EngineState, ProofHash, ProofRecord, ProofStatistics,
};
use pinocchio::msg;

use crate::capability::{DebitSink, EligibilityOracle, TokenVault};
use crate::env::Env;
use crate::error::AcmeError;
use crate::events::Event;
use crate::governance;
use crate::instruction::Component;

pub struct ProofIncentiveEngine<'a, O: EligibilityOracle, D: DebitSink> {
    state: &'a mut EngineState,
    oracle: O,
    ledger: D,
    env: Env,
}

impl<'a, O: EligibilityOracle, D: DebitSink> ProofIncentiveEngine<'a, O, D> {
    pub fn new(state: &'a mut EngineState, oracle: O, ledger: D, env: Env) -> Self {
        Self {
            state,
            oracle,
            ledger,
            env,
        }
    }

    pub fn state(&self) -> &EngineState {
        &*self.state
    }

    pub fn address(&self) -> Address {
        self.state.address
    }

    pub fn admin(&self) -> Address {
        self.state.admin.admin
    }

    pub fn base_cost(&self) -> u128 {
        self.state.config.base_cost
    }

    /// Records `hash` for `caller` and returns the fee that was charged.
    pub fn submit_proof(&mut self, caller: &Address, hash: ProofHash) -> Result<u128, AcmeError> {
        if !self.oracle.is_eligible(caller) {
            msg!("Proof rejected: submitter is not an active subwallet");
            return Err(AcmeError::NotEligible);
        }
        if self.state.proofs.contains_key(&hash) {
            return Err(AcmeError::DuplicateProof);
        }
        let fee = self
            .state
            .fee_for(caller)
            .ok_or(AcmeError::ArithmeticOverflow)?;

        let authority = self.state.address;
        self.ledger
            .incentive_debit(&authority, caller, fee)
            .map_err(|err| match err {
                AcmeError::InsufficientBalance => AcmeError::InsufficientFunds,
                other => other,
            })?;

        let submitted_at = self.env.now();
        self.state.proofs.insert(
            hash,
            ProofRecord {
                hash,
                submitter: *caller,
                verified: false,
                submitted_at,
                fee_paid: fee,
            },
        );
        self.state.submissions.entry(*caller).or_default().push(hash);

        msg!(
            "Proof accepted, submission #{} for this subwallet",
            self.state.submission_count(caller)
        );
        self.env.emit(Event::ProofSubmitted {
            hash,
            submitter: *caller,
            fee,
        });
        Ok(fee)
    }

    pub fn get_proof(&self, hash: &ProofHash) -> Result<&ProofRecord, AcmeError> {
        self.state.proof(hash).ok_or(AcmeError::NotFound)
    }

    /// Whether `hash` has been marked verified; unknown hashes are not.
    pub fn is_verified(&self, hash: &ProofHash) -> bool {
        self.state.is_verified(hash)
    }

    pub fn statistics(&self) -> Result<ProofStatistics, AcmeError> {
        Ok(ProofStatistics {
            total_proofs: self.state.proofs.len() as u64,
            verified_proofs: self.state.verified_count(),
            tokens_burned: self
                .state
                .fees_collected()
                .ok_or(AcmeError::ArithmeticOverflow)?,
            active_subwallets: self.oracle.eligible_count(),
        })
    }

    /// Fee the submitter's next proof would pay.
    pub fn quote_fee(&self, submitter: &Address) -> Result<u128, AcmeError> {
        self.state
            .fee_for(submitter)
            .ok_or(AcmeError::ArithmeticOverflow)
    }

    pub fn discount_percent(&self, submitter: &Address) -> u8 {
        self.state
            .config
            .discounts
            .percent_for(self.state.submission_count(submitter))
    }

    pub fn submission_count(&self, submitter: &Address) -> u64 {
        self.state.submission_count(submitter)
    }

    pub fn proofs_of(&self, submitter: &Address) -> &[ProofHash] {
        self.state.proofs_of(submitter)
    }

    /// Sends `amount` of a foreign token held by the engine to the admin.
    pub fn emergency_token_recovery(
        &mut self,
        caller: &Address,
        token: &Address,
        amount: u128,
        vault: &mut dyn TokenVault,
    ) -> Result<(), AcmeError> {
        ensure_recoverable(&*self.state, token)?;
        governance::require_admin(&self.state.admin, caller)?;
        if &vault.token_address() != token {
            msg!("Recovery rejected: vault does not hold the requested token");
            return Err(AcmeError::AccountMismatch);
        }

        let admin = self.state.admin.admin;
        vault.release(&self.state.address, &admin, amount)?;
        self.env.emit(Event::TokensRecovered {
            token: *token,
            to: admin,
            amount,
        });
        Ok(())
    }

    pub fn propose_admin(&mut self, caller: &Address, candidate: Address) -> Result<(), AcmeError> {
        governance::propose_admin(&mut self.state.admin, caller, candidate)?;
        self.env.emit(Event::AdminProposed {
            component: Component::Engine,
            candidate,
        });
        Ok(())
    }

    pub fn accept_admin(&mut self, caller: &Address) -> Result<(), AcmeError> {
        let previous = governance::accept_admin(&mut self.state.admin, caller)?;
        self.env.emit(Event::AdminTransferred {
            component: Component::Engine,
            previous,
            admin: *caller,
        });
        Ok(())
    }
}

/// Builds a validated engine state bound to `registry` and `primary_token`.
pub fn create_state(
    address: Address,
    primary_token: Address,
    registry: Address,
    admin: Address,
    config: EngineConfig,
) -> Result<EngineState, AcmeError> {
    if [address, primary_token, registry, admin].iter().any(is_null) {
        return Err(AcmeError::InvalidAddress);
    }
    config.validate()?;
    Ok(EngineState::new(address, primary_token, registry, admin, config))
}

/// The fee currency can never be pulled out of the engine.
pub fn ensure_recoverable(state: &EngineState, token: &Address) -> Result<(), AcmeError> {
    if token == &state.primary_token {
        msg!("Recovery rejected: primary token");
        return Err(AcmeError::CannotRecoverPrimaryToken);
    }
    Ok(())
}
