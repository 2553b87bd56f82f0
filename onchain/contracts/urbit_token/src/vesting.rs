//! Vesting grant registry and release engine.
//!
//! Grants live in an append-only arena (`DataKey::Grant(id)`). Each
//! beneficiary owns an ordered list of arena ids; the position in that list
//! is the grant's public index and never changes.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::error::TokenError;
use crate::events::{self, GrantLockedEvent, GrantReleasedEvent};
use crate::ledger::Ledger;
use crate::storage::{self, DataKey};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grant {
    pub beneficiary: Address,
    /// Party whose spendable balance funded the grant.
    pub source: Address,
    pub amount: i128,
    /// Vesting begins at this ledger timestamp.
    pub start: u64,
    /// Seconds over which `amount` unlocks linearly; 0 unlocks it all at `start`.
    pub duration: u64,
    /// Cumulative amount already credited to the beneficiary.
    pub released: i128,
}

/// Immutable parameters of a grant.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingTerms {
    pub source: Address,
    pub amount: i128,
    pub start: u64,
    pub duration: u64,
}

impl Grant {
    pub fn terms(&self) -> VestingTerms {
        VestingTerms {
            source: self.source.clone(),
            amount: self.amount,
            start: self.start,
            duration: self.duration,
        }
    }

    pub fn locked(&self) -> i128 {
        self.amount - self.released
    }

    pub fn releasable(&self, now: u64) -> i128 {
        vested_amount(self, now) - self.released
    }

    pub fn is_fully_released(&self) -> bool {
        self.released == self.amount
    }
}

/// Amount of `grant` unlocked at `now`, in `[0, amount]` and non-decreasing in `now`.
pub fn vested_amount(grant: &Grant, now: u64) -> i128 {
    if now < grant.start {
        return 0;
    }
    let elapsed = now - grant.start;
    if grant.duration == 0 || elapsed >= grant.duration {
        return grant.amount;
    }
    mul_div_floor(grant.amount, elapsed, grant.duration)
}

/// `floor(amount * numer / denom)` for `0 <= amount` and `numer < denom`,
/// without forming the full product.
fn mul_div_floor(amount: i128, numer: u64, denom: u64) -> i128 {
    let d = i128::from(denom);
    let whole = (amount / d) * i128::from(numer);
    let rest = (amount % d) as u128 * u128::from(numer) / u128::from(denom);
    whole + rest as i128
}

fn grant_ids(env: &Env, beneficiary: &Address) -> Vec<u32> {
    storage::read_persistent(env, &DataKey::Grants(beneficiary.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

fn read_grant(env: &Env, id: u32) -> Result<Grant, TokenError> {
    storage::read_persistent(env, &DataKey::Grant(id)).ok_or(TokenError::IndexOutOfRange)
}

fn write_grant(env: &Env, id: u32, grant: &Grant) {
    storage::write_persistent(env, &DataKey::Grant(id), grant);
}

fn grant_id(env: &Env, beneficiary: &Address, index: u32) -> Result<u32, TokenError> {
    grant_ids(env, beneficiary)
        .get(index)
        .ok_or(TokenError::IndexOutOfRange)
}

/// Sum of outstanding locked amounts over every grant in the registry.
pub fn total_locked(env: &Env) -> i128 {
    storage::read_instance(env, &DataKey::TotalLocked).unwrap_or(0)
}

/// Moves `amount` out of `source`'s spendable balance into a new grant for
/// `beneficiary`. Returns the grant's index in the beneficiary's list.
pub fn lock<L: Ledger>(
    env: &Env,
    ledger: &L,
    source: &Address,
    amount: i128,
    beneficiary: &Address,
    start: u64,
    duration: u64,
) -> Result<u32, TokenError> {
    if amount <= 0 {
        return Err(TokenError::InvalidAmount);
    }
    if storage::is_null(env, beneficiary) {
        return Err(TokenError::InvalidBeneficiary);
    }
    let locked = total_locked(env)
        .checked_add(amount)
        .ok_or(TokenError::Overflow)?;
    let id: u32 = storage::read_instance(env, &DataKey::GrantCount).unwrap_or(0);
    let next_id = id.checked_add(1).ok_or(TokenError::Overflow)?;

    ledger.debit(source, amount)?;

    let mut ids = grant_ids(env, beneficiary);
    let index = ids.len();
    ids.push_back(id);

    let grant = Grant {
        beneficiary: beneficiary.clone(),
        source: source.clone(),
        amount,
        start,
        duration,
        released: 0,
    };
    write_grant(env, id, &grant);
    storage::write_persistent(env, &DataKey::Grants(beneficiary.clone()), &ids);
    storage::write_instance(env, &DataKey::GrantCount, &next_id);
    storage::write_instance(env, &DataKey::TotalLocked, &locked);

    events::grant_locked(
        env,
        GrantLockedEvent {
            beneficiary: beneficiary.clone(),
            source: source.clone(),
            index,
            amount,
            start,
            duration,
        },
    );
    Ok(index)
}

pub fn vesting_count_of(env: &Env, beneficiary: &Address) -> u32 {
    grant_ids(env, beneficiary).len()
}

pub fn grant_of(env: &Env, beneficiary: &Address, index: u32) -> Result<Grant, TokenError> {
    read_grant(env, grant_id(env, beneficiary, index)?)
}

pub fn vesting_of(env: &Env, beneficiary: &Address, index: u32) -> Result<VestingTerms, TokenError> {
    grant_of(env, beneficiary, index).map(|grant| grant.terms())
}

pub fn locked_balance_of(env: &Env, beneficiary: &Address) -> Result<i128, TokenError> {
    let mut locked = 0i128;
    for id in grant_ids(env, beneficiary).iter() {
        locked += read_grant(env, id)?.locked();
    }
    Ok(locked)
}

pub fn releasable_balance_of(env: &Env, beneficiary: &Address, now: u64) -> Result<i128, TokenError> {
    let mut releasable = 0i128;
    for id in grant_ids(env, beneficiary).iter() {
        releasable += read_grant(env, id)?.releasable(now);
    }
    Ok(releasable)
}

fn release_grant<L: Ledger>(
    env: &Env,
    ledger: &L,
    id: u32,
    index: u32,
    now: u64,
) -> Result<i128, TokenError> {
    let mut grant = read_grant(env, id)?;
    if grant.is_fully_released() {
        return Ok(0);
    }
    let due = grant.releasable(now);
    if due <= 0 {
        return Ok(0);
    }

    ledger.credit(&grant.beneficiary, due)?;
    grant.released += due;
    write_grant(env, id, &grant);
    storage::write_instance(env, &DataKey::TotalLocked, &(total_locked(env) - due));

    events::grant_released(
        env,
        GrantReleasedEvent {
            beneficiary: grant.beneficiary.clone(),
            index,
            amount: due,
            released: grant.released,
        },
    );
    Ok(due)
}

/// Credits whatever has vested but not yet been released for one grant.
/// Returns the credited amount; 0 when nothing is due.
pub fn release<L: Ledger>(
    env: &Env,
    ledger: &L,
    beneficiary: &Address,
    index: u32,
    now: u64,
) -> Result<i128, TokenError> {
    let id = grant_id(env, beneficiary, index)?;
    release_grant(env, ledger, id, index, now)
}

/// Releases every grant of `beneficiary` in creation order. Returns the total
/// credited, which equals `releasable_balance_of` just before the call.
pub fn release_all<L: Ledger>(
    env: &Env,
    ledger: &L,
    beneficiary: &Address,
    now: u64,
) -> Result<i128, TokenError> {
    let mut total = 0i128;
    for (index, id) in grant_ids(env, beneficiary).iter().enumerate() {
        total += release_grant(env, ledger, id, index as u32, now)?;
    }
    Ok(total)
}
