//! Identity registry state: subwallet records and the per-owner quota index.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::constants::{MAX_NAME_LEN, MAX_SUBWALLETS_PER_OWNER};
use crate::error::AcmeStateError;
use crate::{Address, Governance};

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    pub max_subwallets_per_owner: u16,
    pub max_name_len: u16,
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<(), AcmeStateError> {
        if self.max_subwallets_per_owner == 0 || self.max_name_len == 0 {
            return Err(AcmeStateError::InvalidConfig);
        }
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_subwallets_per_owner: MAX_SUBWALLETS_PER_OWNER,
            max_name_len: MAX_NAME_LEN,
        }
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubwalletRecord {
    pub name: String,
    pub owner: Address,
    pub is_registered: bool,
    pub is_active: bool,
    pub registered_at: i64,
    pub last_activity: i64,
}

impl SubwalletRecord {
    pub fn new(name: String, owner: Address, now: i64) -> Self {
        Self {
            name,
            owner,
            is_registered: true,
            is_active: true,
            registered_at: now,
            last_activity: now,
        }
    }

    /// Registered and active.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_registered && self.is_active
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegistryState {
    pub governance: Governance,
    pub config: RegistryConfig,
    /// One record per delegate, kept after unregistration
    pub records: BTreeMap<Address, SubwalletRecord>,
    /// Every delegate ever registered, in first-registration order
    pub all_subwallets: Vec<Address>,
    /// Owner -> currently registered delegates
    pub owner_index: BTreeMap<Address, Vec<Address>>,
}

impl RegistryState {
    pub fn new(admin: Address, config: RegistryConfig) -> Self {
        Self {
            governance: Governance::new(admin),
            config,
            records: BTreeMap::new(),
            all_subwallets: Vec::new(),
            owner_index: BTreeMap::new(),
        }
    }

    pub fn record(&self, delegate: &Address) -> Option<&SubwalletRecord> {
        self.records.get(delegate)
    }

    /// Record that is currently registered (active or not).
    pub fn registered(&self, delegate: &Address) -> Option<&SubwalletRecord> {
        self.records
            .get(delegate)
            .filter(|record| record.is_registered)
    }

    pub fn is_valid(&self, delegate: &Address) -> bool {
        self.records
            .get(delegate)
            .map_or(false, SubwalletRecord::is_valid)
    }

    pub fn subwallets_of(&self, owner: &Address) -> &[Address] {
        self.owner_index
            .get(owner)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn owned_count(&self, owner: &Address) -> usize {
        self.subwallets_of(owner).len()
    }

    /// Registered and active delegates across all owners.
    pub fn active_count(&self) -> u64 {
        self.records.values().filter(|record| record.is_valid()).count() as u64
    }
}
