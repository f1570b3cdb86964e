//! Reference constants for the default configuration.

/// Decimal places of the fee currency.
pub const TOKEN_DECIMALS: u8 = 18;

/// One whole token in base units.
pub const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Supply minted to the ledger admin at initialization (1,000,000 tokens).
pub const INITIAL_SUPPLY: u128 = 1_000_000 * ONE_TOKEN;

/// Undiscounted fee charged per proof submission (0.1 token).
pub const PROOF_REGISTRATION_COST: u128 = ONE_TOKEN / 10;

/// Maximum number of registered subwallets per owner.
pub const MAX_SUBWALLETS_PER_OWNER: u16 = 10;

/// Maximum subwallet display name length in UTF-8 bytes.
pub const MAX_NAME_LEN: u16 = 64;

pub const TOKEN_NAME: &str = "ACME Token";
pub const TOKEN_SYMBOL: &str = "ACME";

/// Reference discount schedule as `(min prior submissions, percent off)`.
pub const DEFAULT_DISCOUNT_TIERS: [(u64, u8); 4] = [(0, 0), (3, 10), (5, 20), (10, 30)];
