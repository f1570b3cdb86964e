//! Observable side effects of successful operations.

use acme_state::{Address, ProofHash};

use crate::instruction::Component;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SubwalletRegistered {
        delegate: Address,
        owner: Address,
        name: String,
    },
    SubwalletRenamed {
        delegate: Address,
        name: String,
    },
    SubwalletStatusChanged {
        delegate: Address,
        active: bool,
    },
    SubwalletUnregistered {
        delegate: Address,
        owner: Address,
    },
    SubwalletActivity {
        delegate: Address,
        timestamp: i64,
    },
    SubwalletsPruned {
        removed: u32,
    },
    Transfer {
        from: Address,
        to: Address,
        amount: u128,
    },
    Approval {
        owner: Address,
        spender: Address,
        amount: u128,
    },
    Minted {
        to: Address,
        amount: u128,
    },
    Burned {
        from: Address,
        amount: u128,
    },
    IncentiveAuthorityBound {
        authority: Address,
    },
    IncentiveDebited {
        account: Address,
        amount: u128,
    },
    ProofSubmitted {
        hash: ProofHash,
        submitter: Address,
        fee: u128,
    },
    TokensRecovered {
        token: Address,
        to: Address,
        amount: u128,
    },
    Paused {
        component: Component,
        by: Address,
    },
    Unpaused {
        component: Component,
        by: Address,
    },
    AdminProposed {
        component: Component,
        candidate: Address,
    },
    AdminTransferred {
        component: Component,
        previous: Address,
        admin: Address,
    },
}
