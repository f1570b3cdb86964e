//! Value ledger: fungible balances, allowances and the incentive authority.
//!
//! Balances are `u128` base units (18 decimals). Every debit is checked
//! against the current balance before any write; nothing ever underflows.

use acme_state::{is_null, Address, LedgerConfig, LedgerState};
use pinocchio::msg;

use crate::capability::{DebitSink, EligibilityOracle, TokenVault};
use crate::env::Env;
use crate::error::AcmeError;
use crate::events::Event;
use crate::governance;
use crate::instruction::Component;

pub struct ValueLedger {
    state: LedgerState,
    env: Env,
}

impl ValueLedger {
    pub fn new(
        address: Address,
        admin: Address,
        config: LedgerConfig,
        env: Env,
    ) -> Result<Self, AcmeError> {
        if is_null(&address) || is_null(&admin) {
            return Err(AcmeError::InvalidAddress);
        }
        config.validate()?;
        Ok(Self {
            state: LedgerState::new(address, admin, config),
            env,
        })
    }

    pub fn from_state(state: LedgerState, env: Env) -> Self {
        Self { state, env }
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn into_state(self) -> LedgerState {
        self.state
    }

    pub fn address(&self) -> Address {
        self.state.address
    }

    pub fn name(&self) -> &str {
        &self.state.name
    }

    pub fn symbol(&self) -> &str {
        &self.state.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.state.decimals
    }

    pub fn total_supply(&self) -> u128 {
        self.state.total_supply
    }

    pub fn balance_of(&self, account: &Address) -> u128 {
        self.state.balance_of(account)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.state.allowance(owner, spender)
    }

    pub fn incentive_authority(&self) -> Option<Address> {
        self.state.incentive_authority
    }

    pub fn is_paused(&self) -> bool {
        self.state.governance.is_paused()
    }

    pub fn admin(&self) -> Address {
        self.state.governance.admin.admin
    }

    pub fn transfer(&mut self, caller: &Address, to: &Address, amount: u128) -> Result<(), AcmeError> {
        governance::require_not_paused(&self.state.governance)?;
        self.move_balance(caller, to, amount)?;
        self.env.emit(Event::Transfer {
            from: *caller,
            to: *to,
            amount,
        });
        Ok(())
    }

    /// Sets (not adds to) the spender's allowance. Allowed while paused.
    pub fn approve(
        &mut self,
        caller: &Address,
        spender: &Address,
        amount: u128,
    ) -> Result<(), AcmeError> {
        if is_null(spender) {
            return Err(AcmeError::InvalidAddress);
        }
        self.state.set_allowance(*caller, *spender, amount);
        self.env.emit(Event::Approval {
            owner: *caller,
            spender: *spender,
            amount,
        });
        Ok(())
    }

    /// Spends `caller`'s allowance over `owner`. A `u128::MAX` allowance is
    /// treated as unlimited and never decremented.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        owner: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), AcmeError> {
        governance::require_not_paused(&self.state.governance)?;
        let allowance = self.state.allowance(owner, caller);
        let remaining = allowance
            .checked_sub(amount)
            .ok_or(AcmeError::InsufficientAllowance)?;

        self.move_balance(owner, to, amount)?;
        if allowance != u128::MAX {
            self.state.set_allowance(*owner, *caller, remaining);
        }
        self.env.emit(Event::Transfer {
            from: *owner,
            to: *to,
            amount,
        });
        Ok(())
    }

    pub fn mint(&mut self, caller: &Address, to: &Address, amount: u128) -> Result<(), AcmeError> {
        governance::require_not_paused(&self.state.governance)?;
        governance::require_admin(&self.state.governance.admin, caller)?;
        if is_null(to) {
            return Err(AcmeError::InvalidAddress);
        }
        let supply = self
            .state
            .total_supply
            .checked_add(amount)
            .ok_or(AcmeError::ArithmeticOverflow)?;
        let balance = self
            .state
            .balance_of(to)
            .checked_add(amount)
            .ok_or(AcmeError::ArithmeticOverflow)?;

        self.state.total_supply = supply;
        self.state.set_balance(*to, balance);
        self.env.emit(Event::Minted { to: *to, amount });
        Ok(())
    }

    /// Burning is open to the ledger admin, the incentive authority and any
    /// subwallet the oracle reports as valid.
    pub fn burn(
        &mut self,
        caller: &Address,
        amount: u128,
        oracle: &dyn EligibilityOracle,
    ) -> Result<(), AcmeError> {
        governance::require_not_paused(&self.state.governance)?;
        let permitted = self.state.governance.admin.is_admin(caller)
            || self.state.incentive_authority.as_ref() == Some(caller)
            || oracle.is_eligible(caller);
        if !permitted {
            msg!("Burn rejected: caller is not a subwallet, the admin or the incentive authority");
            return Err(AcmeError::Unauthorized);
        }
        self.destroy(caller, amount)?;
        self.env.emit(Event::Burned {
            from: *caller,
            amount,
        });
        Ok(())
    }

    /// Binds the incentive authority. Can only ever succeed once.
    pub fn bind_incentive_authority(
        &mut self,
        caller: &Address,
        authority: Address,
    ) -> Result<(), AcmeError> {
        governance::require_admin(&self.state.governance.admin, caller)?;
        if self.state.incentive_authority.is_some() {
            return Err(AcmeError::AuthorityAlreadyBound);
        }
        if is_null(&authority) {
            return Err(AcmeError::InvalidAddress);
        }
        self.state.incentive_authority = Some(authority);
        self.env
            .emit(Event::IncentiveAuthorityBound { authority });
        Ok(())
    }

    /// Debits `account` without an allowance. Only the bound authority may
    /// call it; the debited amount is burned.
    pub fn incentive_debit(
        &mut self,
        caller: &Address,
        account: &Address,
        amount: u128,
    ) -> Result<(), AcmeError> {
        if self.state.incentive_authority.as_ref() != Some(caller) {
            msg!("Incentive debit rejected: caller is not the bound authority");
            return Err(AcmeError::Unauthorized);
        }
        governance::require_not_paused(&self.state.governance)?;
        self.destroy(account, amount)?;
        self.env.emit(Event::IncentiveDebited {
            account: *account,
            amount,
        });
        Ok(())
    }

    pub fn pause(&mut self, caller: &Address) -> Result<(), AcmeError> {
        governance::pause(&mut self.state.governance, caller)?;
        self.env.emit(Event::Paused {
            component: Component::Ledger,
            by: *caller,
        });
        Ok(())
    }

    pub fn unpause(&mut self, caller: &Address) -> Result<(), AcmeError> {
        governance::unpause(&mut self.state.governance, caller)?;
        self.env.emit(Event::Unpaused {
            component: Component::Ledger,
            by: *caller,
        });
        Ok(())
    }

    pub fn propose_admin(&mut self, caller: &Address, candidate: Address) -> Result<(), AcmeError> {
        governance::propose_admin(&mut self.state.governance.admin, caller, candidate)?;
        self.env.emit(Event::AdminProposed {
            component: Component::Ledger,
            candidate,
        });
        Ok(())
    }

    pub fn accept_admin(&mut self, caller: &Address) -> Result<(), AcmeError> {
        let previous = governance::accept_admin(&mut self.state.governance.admin, caller)?;
        self.env.emit(Event::AdminTransferred {
            component: Component::Ledger,
            previous,
            admin: *caller,
        });
        Ok(())
    }

    fn move_balance(&mut self, from: &Address, to: &Address, amount: u128) -> Result<(), AcmeError> {
        if is_null(to) {
            return Err(AcmeError::InvalidAddress);
        }
        let from_balance = self
            .state
            .balance_of(from)
            .checked_sub(amount)
            .ok_or(AcmeError::InsufficientBalance)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self
            .state
            .balance_of(to)
            .checked_add(amount)
            .ok_or(AcmeError::ArithmeticOverflow)?;

        self.state.set_balance(*from, from_balance);
        self.state.set_balance(*to, to_balance);
        Ok(())
    }

    fn destroy(&mut self, account: &Address, amount: u128) -> Result<(), AcmeError> {
        let balance = self
            .state
            .balance_of(account)
            .checked_sub(amount)
            .ok_or(AcmeError::InsufficientBalance)?;
        let supply = self
            .state
            .total_supply
            .checked_sub(amount)
            .ok_or(AcmeError::ArithmeticOverflow)?;

        self.state.set_balance(*account, balance);
        self.state.total_supply = supply;
        Ok(())
    }
}

impl DebitSink for ValueLedger {
    fn incentive_debit(
        &mut self,
        authority: &Address,
        account: &Address,
        amount: u128,
    ) -> Result<(), AcmeError> {
        ValueLedger::incentive_debit(self, authority, account, amount)
    }

    fn balance_of(&self, account: &Address) -> u128 {
        self.state.balance_of(account)
    }
}

impl TokenVault for ValueLedger {
    fn token_address(&self) -> Address {
        self.state.address
    }

    fn release(&mut self, holder: &Address, to: &Address, amount: u128) -> Result<(), AcmeError> {
        self.transfer(holder, to, amount)
    }
}
