//! Token parameters fixed at build time.

pub const DECIMALS: u32 = 18;

/// One whole token in base units.
pub const MAGNITUDE: i128 = 1_000_000_000_000_000_000;

pub const NAME: &str = "Urbit Token";
pub const SYMBOL: &str = "URB";

/// Whole-token allocations minted by `create_sale_tokens`.
pub const SALE_POOL_TOKENS: i128 = 42_000_000;
pub const BONUS_POOL_TOKENS: i128 = 6_000_000;
pub const REFERRAL_POOL_TOKENS: i128 = 2_000_000;

/// Whole-token allocation minted into the team vault when the sale closes.
pub const TEAM_VAULT_TOKENS: i128 = 30_000_000;

/// All-zero ed25519 account, treated as the null identity.
pub const NULL_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;
