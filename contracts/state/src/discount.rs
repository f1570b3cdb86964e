//! Tiered fee discounts.
//!
//! The schedule is an ordered breakpoint table mapping a submitter's number of
//! prior accepted proofs to a percentage taken off the base cost. Lookups are
//! pure; the table is only ever replaced as a whole.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::constants::DEFAULT_DISCOUNT_TIERS;
use crate::error::AcmeStateError;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountTier {
    /// Prior submissions required to reach this tier
    pub min_count: u64,
    /// Percent taken off the base cost (0..=100)
    pub percent: u8,
}

impl DiscountTier {
    pub const fn new(min_count: u64, percent: u8) -> Self {
        Self { min_count, percent }
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct DiscountTable {
    tiers: Vec<DiscountTier>,
}

impl DiscountTable {
    /// Builds a validated table.
    ///
    /// Requirements:
    /// - at least one tier, the first starting at zero submissions
    /// - strictly increasing `min_count`
    /// - non-decreasing `percent`, each at most 100
    pub fn new(tiers: Vec<DiscountTier>) -> Result<Self, AcmeStateError> {
        let table = Self { tiers };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), AcmeStateError> {
        let first = self
            .tiers
            .first()
            .ok_or(AcmeStateError::InvalidDiscountTable)?;
        if first.min_count != 0 {
            return Err(AcmeStateError::InvalidDiscountTable);
        }
        if self.tiers.iter().any(|tier| tier.percent > 100) {
            return Err(AcmeStateError::InvalidDiscountTable);
        }
        let ordered = self
            .tiers
            .windows(2)
            .all(|pair| pair[0].min_count < pair[1].min_count && pair[0].percent <= pair[1].percent);
        if !ordered {
            return Err(AcmeStateError::InvalidDiscountTable);
        }
        Ok(())
    }

    pub fn tiers(&self) -> &[DiscountTier] {
        &self.tiers
    }

    /// Discount percent for a submitter with `prior` accepted proofs.
    pub fn percent_for(&self, prior: u64) -> u8 {
        self.tiers
            .iter()
            .rev()
            .find(|tier| tier.min_count <= prior)
            .map_or(0, |tier| tier.percent)
    }

    /// Highest discount the table can ever grant.
    pub fn max_percent(&self) -> u8 {
        self.tiers.last().map_or(0, |tier| tier.percent)
    }

    /// `base_cost * (100 - percent) / 100`, or `None` on overflow.
    pub fn apply(&self, base_cost: u128, prior: u64) -> Option<u128> {
        let keep = 100u128.checked_sub(self.percent_for(prior) as u128)?;
        base_cost.checked_mul(keep).map(|scaled| scaled / 100)
    }
}

impl Default for DiscountTable {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_DISCOUNT_TIERS
                .iter()
                .map(|(min_count, percent)| DiscountTier::new(*min_count, *percent))
                .collect(),
        }
    }
}
