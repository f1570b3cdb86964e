//! Value ledger state: balances, allowances and the incentive authority slot.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::constants::{INITIAL_SUPPLY, TOKEN_DECIMALS, TOKEN_NAME, TOKEN_SYMBOL};
use crate::error::AcmeStateError;
use crate::{Address, Governance};

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Minted to the admin at initialization
    pub initial_supply: u128,
}

impl LedgerConfig {
    pub fn validate(&self) -> Result<(), AcmeStateError> {
        if self.name.is_empty() || self.symbol.is_empty() || self.decimals > TOKEN_DECIMALS {
            return Err(AcmeStateError::InvalidConfig);
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            name: TOKEN_NAME.to_string(),
            symbol: TOKEN_SYMBOL.to_string(),
            decimals: TOKEN_DECIMALS,
            initial_supply: INITIAL_SUPPLY,
        }
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct LedgerState {
    /// Address identifying this token
    pub address: Address,
    pub governance: Governance,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: u128,
    pub balances: BTreeMap<Address, u128>,
    /// (owner, spender) -> remaining allowance
    pub allowances: BTreeMap<(Address, Address), u128>,
    /// Bound at most once
    pub incentive_authority: Option<Address>,
}

impl LedgerState {
    /// Creates a ledger with the configured supply credited to `admin`.
    pub fn new(address: Address, admin: Address, config: LedgerConfig) -> Self {
        let mut balances = BTreeMap::new();
        if config.initial_supply > 0 {
            balances.insert(admin, config.initial_supply);
        }
        Self {
            address,
            governance: Governance::new(admin),
            name: config.name,
            symbol: config.symbol,
            decimals: config.decimals,
            total_supply: config.initial_supply,
            balances,
            allowances: BTreeMap::new(),
            incentive_authority: None,
        }
    }

    pub fn balance_of(&self, account: &Address) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    /// Writes a balance, dropping zero entries to keep the account small.
    pub fn set_balance(&mut self, account: Address, amount: u128) {
        if amount == 0 {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, amount);
        }
    }

    pub fn set_allowance(&mut self, owner: Address, spender: Address, amount: u128) {
        if amount == 0 {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }
}
