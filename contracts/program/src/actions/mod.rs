pub mod admin;
pub mod engine;
pub mod initialize;
pub mod ledger;
pub mod registry;

pub use admin::*;
pub use engine::*;
pub use initialize::*;
pub use ledger::*;
pub use registry::*;

use crate::engine::ProofIncentiveEngine;
use crate::ledger::ValueLedger;
use crate::processor::Deployment;
use crate::registry::IdentityRegistry;

/// Engine view over a loaded deployment: the registry answers eligibility and
/// the primary ledger takes the fee debits.
pub fn engine_for<'d>(
    deployment: &'d mut Deployment<'_>,
) -> ProofIncentiveEngine<'d, &'d IdentityRegistry, &'d mut ValueLedger> {
    ProofIncentiveEngine::new(
        &mut *deployment.engine,
        &*deployment.registry,
        &mut *deployment.ledger,
        deployment.env.clone(),
    )
}
