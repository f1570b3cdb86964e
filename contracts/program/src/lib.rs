//! ACME Program - Main Entry Point
//!
//! Identity registry, value ledger and proof incentive engine deployed as one
//! program. Components are plain Rust types driven by `processor::dispatch`;
//! the entrypoint and the host runtime only differ in where state lives.

pub mod actions;
pub mod capability;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod governance;
pub mod host;
pub mod instruction;
pub mod ledger;
pub mod processor;
pub mod registry;

#[cfg(not(feature = "no-entrypoint"))]
mod entrypoint;

pub use engine::ProofIncentiveEngine;
pub use error::{AcmeError, ErrorKind};
pub use host::HostRuntime;
pub use instruction::{AcmeInstruction, Component};
pub use ledger::ValueLedger;
pub use registry::IdentityRegistry;

use pinocchio_pubkey::declare_id;

declare_id!("AcmeProofRegistry11111111111111111111111111");
