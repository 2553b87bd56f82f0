//! Sale-phase transfer gate.
//!
//! `Open -> Closed` is the only transition. While open, only the sale, bonus
//! and referral pools may send tokens.

use soroban_sdk::{contracttype, Address, Env};

use crate::constants::{
    BONUS_POOL_TOKENS, MAGNITUDE, REFERRAL_POOL_TOKENS, SALE_POOL_TOKENS, TEAM_VAULT_TOKENS,
};
use crate::error::TokenError;
use crate::events;
use crate::ledger::Ledger;
use crate::storage::{self, DataKey, Roles};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaleState {
    Open,
    Closed,
}

pub fn sale_state(env: &Env) -> SaleState {
    storage::read_instance(env, &DataKey::SaleState).unwrap_or(SaleState::Open)
}

fn require_open(env: &Env) -> Result<(), TokenError> {
    match sale_state(env) {
        SaleState::Open => Ok(()),
        SaleState::Closed => Err(TokenError::AlreadyClosed),
    }
}

/// Mints the sale, bonus and referral pool allocations. Allowed once, and
/// only while the sale is open.
pub fn create_sale_tokens<L: Ledger>(
    env: &Env,
    ledger: &L,
    roles: &Roles,
) -> Result<(), TokenError> {
    require_open(env)?;
    let created: bool = storage::read_instance(env, &DataKey::SaleTokensCreated).unwrap_or(false);
    if created {
        return Err(TokenError::SaleTokensAlreadyCreated);
    }

    for (pool, tokens) in [
        (&roles.sale, SALE_POOL_TOKENS),
        (&roles.bonus, BONUS_POOL_TOKENS),
        (&roles.referral, REFERRAL_POOL_TOKENS),
    ] {
        let amount = tokens * MAGNITUDE;
        ledger.mint(pool, amount)?;
        events::minted(env, pool, amount);
    }

    storage::write_instance(env, &DataKey::SaleTokensCreated, &true);
    Ok(())
}

/// Closes the sale for good and mints the team allocation into `vault`.
/// Returns the minted amount.
pub fn close_sale<L: Ledger>(env: &Env, ledger: &L, vault: &Address) -> Result<i128, TokenError> {
    require_open(env)?;

    let amount = TEAM_VAULT_TOKENS * MAGNITUDE;
    ledger.mint(vault, amount)?;
    storage::write_instance(env, &DataKey::SaleState, &SaleState::Closed);

    events::sale_closed(env, vault, amount);
    Ok(amount)
}

/// Runs before every transfer. The null recipient is rejected in both
/// states; the source allow-list only applies while the sale is open.
pub fn authorize_transfer(
    env: &Env,
    roles: &Roles,
    from: &Address,
    to: &Address,
) -> Result<(), TokenError> {
    if storage::is_null(env, to) {
        return Err(TokenError::InvalidRecipient);
    }
    match sale_state(env) {
        SaleState::Closed => Ok(()),
        SaleState::Open if is_privileged(roles, from) => Ok(()),
        SaleState::Open => Err(TokenError::TransferRestricted),
    }
}

fn is_privileged(roles: &Roles, party: &Address) -> bool {
    party == &roles.sale || party == &roles.bonus || party == &roles.referral
}
