//! Capabilities the proof engine holds over its sibling components.
//!
//! The engine only ever sees these narrow interfaces, never the concrete
//! registry or ledger, so either side can be replaced by a fake in tests.

use acme_state::Address;

use crate::error::AcmeError;

/// Answers whether a delegate may act (registered and active).
pub trait EligibilityOracle {
    fn is_eligible(&self, delegate: &Address) -> bool;

    /// Number of delegates that would currently pass `is_eligible`.
    fn eligible_count(&self) -> u64;
}

/// Privileged fee channel into the value ledger.
pub trait DebitSink {
    /// Debits `amount` from `account` on behalf of `authority`, bypassing
    /// allowances. Fails without side effects when `authority` is not the
    /// bound incentive authority or the balance is short.
    fn incentive_debit(
        &mut self,
        authority: &Address,
        account: &Address,
        amount: u128,
    ) -> Result<(), AcmeError>;

    fn balance_of(&self, account: &Address) -> u128;
}

/// A token ledger from which balances held by `holder` can be released.
pub trait TokenVault {
    fn token_address(&self) -> Address;

    fn release(&mut self, holder: &Address, to: &Address, amount: u128) -> Result<(), AcmeError>;
}

impl<T: EligibilityOracle + ?Sized> EligibilityOracle for &T {
    fn is_eligible(&self, delegate: &Address) -> bool {
        (**self).is_eligible(delegate)
    }

    fn eligible_count(&self) -> u64 {
        (**self).eligible_count()
    }
}

impl<T: EligibilityOracle + ?Sized> EligibilityOracle for &mut T {
    fn is_eligible(&self, delegate: &Address) -> bool {
        (**self).is_eligible(delegate)
    }

    fn eligible_count(&self) -> u64 {
        (**self).eligible_count()
    }
}

impl<T: DebitSink + ?Sized> DebitSink for &mut T {
    fn incentive_debit(
        &mut self,
        authority: &Address,
        account: &Address,
        amount: u128,
    ) -> Result<(), AcmeError> {
        (**self).incentive_debit(authority, account, amount)
    }

    fn balance_of(&self, account: &Address) -> u128 {
        (**self).balance_of(account)
    }
}
