//! Identity registry: delegated subwallets owned by principal accounts.
//!
//! Record lifecycle:
//! `Unregistered -> Registered(active) <-> Registered(inactive) -> Unregistered`
//!
//! Every mutating call checks the pause switch and all of its preconditions
//! before touching state, so a failed call leaves the registry unchanged.

use acme_state::{is_null, Address, RegistryConfig, RegistryState, SubwalletRecord};
use pinocchio::msg;

use crate::capability::EligibilityOracle;
use crate::env::Env;
use crate::error::AcmeError;
use crate::events::Event;
use crate::governance;
use crate::instruction::Component;

pub struct IdentityRegistry {
    state: RegistryState,
    env: Env,
}

impl IdentityRegistry {
    pub fn new(admin: Address, config: RegistryConfig, env: Env) -> Result<Self, AcmeError> {
        if is_null(&admin) {
            return Err(AcmeError::InvalidAddress);
        }
        config.validate()?;
        Ok(Self {
            state: RegistryState::new(admin, config),
            env,
        })
    }

    pub fn from_state(state: RegistryState, env: Env) -> Self {
        Self { state, env }
    }

    pub fn state(&self) -> &RegistryState {
        &self.state
    }

    pub fn into_state(self) -> RegistryState {
        self.state
    }

    pub fn register(
        &mut self,
        caller: &Address,
        delegate: Address,
        name: &str,
    ) -> Result<(), AcmeError> {
        governance::require_not_paused(&self.state.governance)?;
        if is_null(&delegate) {
            return Err(AcmeError::InvalidAddress);
        }
        self.validate_name(name)?;
        if self.state.registered(&delegate).is_some() {
            return Err(AcmeError::AlreadyRegistered);
        }
        if self.state.owned_count(caller) >= self.state.config.max_subwallets_per_owner as usize {
            msg!(
                "Owner already holds {} subwallets",
                self.state.config.max_subwallets_per_owner
            );
            return Err(AcmeError::QuotaExceeded);
        }

        let now = self.env.now();
        self.state
            .records
            .insert(delegate, SubwalletRecord::new(name.to_string(), *caller, now));
        if !self.state.all_subwallets.contains(&delegate) {
            self.state.all_subwallets.push(delegate);
        }
        self.state
            .owner_index
            .entry(*caller)
            .or_default()
            .push(delegate);

        self.env.emit(Event::SubwalletRegistered {
            delegate,
            owner: *caller,
            name: name.to_string(),
        });
        Ok(())
    }

    pub fn rename(
        &mut self,
        caller: &Address,
        delegate: &Address,
        new_name: &str,
    ) -> Result<(), AcmeError> {
        governance::require_not_paused(&self.state.governance)?;
        self.require_manager(caller, delegate)?;
        self.validate_name(new_name)?;

        if let Some(record) = self.state.records.get_mut(delegate) {
            record.name = new_name.to_string();
        }
        self.env.emit(Event::SubwalletRenamed {
            delegate: *delegate,
            name: new_name.to_string(),
        });
        Ok(())
    }

    /// Toggles the active flag. The quota slot stays taken either way.
    pub fn set_active(
        &mut self,
        caller: &Address,
        delegate: &Address,
        active: bool,
    ) -> Result<(), AcmeError> {
        governance::require_not_paused(&self.state.governance)?;
        self.require_manager(caller, delegate)?;

        if let Some(record) = self.state.records.get_mut(delegate) {
            record.is_active = active;
        }
        self.env.emit(Event::SubwalletStatusChanged {
            delegate: *delegate,
            active,
        });
        Ok(())
    }

    /// Frees the owner's quota slot and makes the address available again.
    pub fn unregister(&mut self, caller: &Address, delegate: &Address) -> Result<(), AcmeError> {
        governance::require_not_paused(&self.state.governance)?;
        let owner = self.require_manager(caller, delegate)?;

        if let Some(record) = self.state.records.get_mut(delegate) {
            record.is_registered = false;
        }
        let emptied = match self.state.owner_index.get_mut(&owner) {
            Some(delegates) => {
                delegates.retain(|entry| entry != delegate);
                delegates.is_empty()
            },
            None => false,
        };
        if emptied {
            self.state.owner_index.remove(&owner);
        }

        self.env.emit(Event::SubwalletUnregistered {
            delegate: *delegate,
            owner,
        });
        Ok(())
    }

    /// Liveness signal; anyone may call it for a registered subwallet.
    pub fn touch_activity(&mut self, delegate: &Address) -> Result<(), AcmeError> {
        governance::require_not_paused(&self.state.governance)?;
        if self.state.registered(delegate).is_none() {
            return Err(AcmeError::NotRegistered);
        }
        self.stamp_activity(delegate);
        Ok(())
    }

    /// Best-effort activity stamp used after ledger and engine operations.
    /// Does nothing for paused registries or ineligible addresses.
    pub fn note_activity(&mut self, delegate: &Address) -> bool {
        if self.state.governance.is_paused() || !self.state.is_valid(delegate) {
            return false;
        }
        self.stamp_activity(delegate);
        true
    }

    /// Drops unregistered records and their entries in the enumerable list.
    pub fn prune_unregistered(&mut self, caller: &Address) -> Result<u32, AcmeError> {
        governance::require_not_paused(&self.state.governance)?;
        governance::require_admin(&self.state.governance.admin, caller)?;

        let before = self.state.records.len();
        self.state.records.retain(|_, record| record.is_registered);
        let removed = before - self.state.records.len();

        let records = &self.state.records;
        self.state
            .all_subwallets
            .retain(|delegate| records.contains_key(delegate));

        let removed = u32::try_from(removed).map_err(|_| AcmeError::ArithmeticOverflow)?;
        self.env.emit(Event::SubwalletsPruned { removed });
        Ok(removed)
    }

    pub fn pause(&mut self, caller: &Address) -> Result<(), AcmeError> {
        governance::pause(&mut self.state.governance, caller)?;
        self.env.emit(Event::Paused {
            component: Component::Registry,
            by: *caller,
        });
        Ok(())
    }

    pub fn unpause(&mut self, caller: &Address) -> Result<(), AcmeError> {
        governance::unpause(&mut self.state.governance, caller)?;
        self.env.emit(Event::Unpaused {
            component: Component::Registry,
            by: *caller,
        });
        Ok(())
    }

    pub fn propose_admin(&mut self, caller: &Address, candidate: Address) -> Result<(), AcmeError> {
        governance::propose_admin(&mut self.state.governance.admin, caller, candidate)?;
        self.env.emit(Event::AdminProposed {
            component: Component::Registry,
            candidate,
        });
        Ok(())
    }

    pub fn accept_admin(&mut self, caller: &Address) -> Result<(), AcmeError> {
        let previous = governance::accept_admin(&mut self.state.governance.admin, caller)?;
        self.env.emit(Event::AdminTransferred {
            component: Component::Registry,
            previous,
            admin: *caller,
        });
        Ok(())
    }

    pub fn is_valid(&self, delegate: &Address) -> bool {
        self.state.is_valid(delegate)
    }

    pub fn active_subwallets(&self) -> u64 {
        self.state.active_count()
    }

    pub fn all_subwallets(&self) -> &[Address] {
        &self.state.all_subwallets
    }

    pub fn subwallets_of(&self, owner: &Address) -> &[Address] {
        self.state.subwallets_of(owner)
    }

    pub fn subwallet(&self, delegate: &Address) -> Option<&SubwalletRecord> {
        self.state.record(delegate)
    }

    pub fn is_paused(&self) -> bool {
        self.state.governance.is_paused()
    }

    pub fn admin(&self) -> Address {
        self.state.governance.admin.admin
    }

    fn validate_name(&self, name: &str) -> Result<(), AcmeError> {
        if name.is_empty() || name.len() > self.state.config.max_name_len as usize {
            return Err(AcmeError::InvalidName);
        }
        Ok(())
    }

    /// Returns the record owner if `caller` may manage `delegate`.
    fn require_manager(&self, caller: &Address, delegate: &Address) -> Result<Address, AcmeError> {
        let record = self
            .state
            .registered(delegate)
            .ok_or(AcmeError::NotRegistered)?;
        if &record.owner != caller && !self.state.governance.admin.is_admin(caller) {
            msg!("Permission denied: caller neither owns the subwallet nor administers the registry");
            return Err(AcmeError::Unauthorized);
        }
        Ok(record.owner)
    }

    fn stamp_activity(&mut self, delegate: &Address) {
        let timestamp = self.env.now();
        if let Some(record) = self.state.records.get_mut(delegate) {
            record.last_activity = timestamp;
        }
        self.env.emit(Event::SubwalletActivity {
            delegate: *delegate,
            timestamp,
        });
    }
}

impl EligibilityOracle for IdentityRegistry {
    fn is_eligible(&self, delegate: &Address) -> bool {
        self.state.is_valid(delegate)
    }

    fn eligible_count(&self) -> u64 {
        self.state.active_count()
    }
}
