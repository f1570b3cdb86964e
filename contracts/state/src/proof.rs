//! Proof incentive engine state: proof records and per-submitter history.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::constants::PROOF_REGISTRATION_COST;
use crate::error::AcmeStateError;
use crate::{AdminRole, Address, DiscountTable};

/// Opaque 32-byte digest of an externally generated proof.
pub type ProofHash = [u8; 32];

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Undiscounted fee per submission
    pub base_cost: u128,
    pub discounts: DiscountTable,
}

impl EngineConfig {
    /// Largest base cost whose undiscounted fee can still be scaled by 100.
    pub const MAX_BASE_COST: u128 = u128::MAX / 100;

    pub fn validate(&self) -> Result<(), AcmeStateError> {
        if self.base_cost > Self::MAX_BASE_COST {
            return Err(AcmeStateError::InvalidConfig);
        }
        self.discounts.validate()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_cost: PROOF_REGISTRATION_COST,
            discounts: DiscountTable::default(),
        }
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProofRecord {
    pub hash: ProofHash,
    pub submitter: Address,
    /// Always false at submission; set by a separate verification workflow
    pub verified: bool,
    pub submitted_at: i64,
    pub fee_paid: u128,
}

/// Aggregate view over every accepted proof.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProofStatistics {
    pub total_proofs: u64,
    pub verified_proofs: u64,
    /// Sum of fees burned by accepted submissions
    pub tokens_burned: u128,
    pub active_subwallets: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct EngineState {
    /// Engine identity, bound as the ledger's incentive authority
    pub address: Address,
    /// Fee currency ledger
    pub primary_token: Address,
    /// Identity registry consulted for eligibility
    pub registry: Address,
    pub admin: AdminRole,
    pub config: EngineConfig,
    pub proofs: BTreeMap<ProofHash, ProofRecord>,
    /// Submitter -> accepted proof hashes in submission order
    pub submissions: BTreeMap<Address, Vec<ProofHash>>,
}

impl EngineState {
    pub fn new(
        address: Address,
        primary_token: Address,
        registry: Address,
        admin: Address,
        config: EngineConfig,
    ) -> Self {
        Self {
            address,
            primary_token,
            registry,
            admin: AdminRole::new(admin),
            config,
            proofs: BTreeMap::new(),
            submissions: BTreeMap::new(),
        }
    }

    pub fn proof(&self, hash: &ProofHash) -> Option<&ProofRecord> {
        self.proofs.get(hash)
    }

    /// `false` for unknown hashes.
    pub fn is_verified(&self, hash: &ProofHash) -> bool {
        self.proofs.get(hash).map_or(false, |record| record.verified)
    }

    pub fn verified_count(&self) -> u64 {
        self.proofs.values().filter(|record| record.verified).count() as u64
    }

    /// Total fees charged so far; `None` on overflow.
    pub fn fees_collected(&self) -> Option<u128> {
        self.proofs
            .values()
            .try_fold(0u128, |total, record| total.checked_add(record.fee_paid))
    }

    /// Accepted proofs so far; drives the discount tier.
    pub fn submission_count(&self, submitter: &Address) -> u64 {
        self.submissions
            .get(submitter)
            .map_or(0, |hashes| hashes.len() as u64)
    }

    /// Fee the submitter's next proof would pay.
    pub fn fee_for(&self, submitter: &Address) -> Option<u128> {
        self.config
            .discounts
            .apply(self.config.base_cost, self.submission_count(submitter))
    }

    pub fn proofs_of(&self, submitter: &Address) -> &[ProofHash] {
        self.submissions
            .get(submitter)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
