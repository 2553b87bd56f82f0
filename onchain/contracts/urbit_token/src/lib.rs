#![no_std]

//! URB token: a fixed-supply token whose transfers are gated until the
//! administrator closes the sale, plus time-locked grants funded from any
//! holder's balance.

mod constants;
mod error;
mod events;
mod gate;
mod ledger;
pub mod storage;
mod vesting;

use soroban_sdk::{contract, contractimpl, Address, Env, String};

pub use constants::{
    BONUS_POOL_TOKENS, DECIMALS, MAGNITUDE, NULL_ACCOUNT, REFERRAL_POOL_TOKENS,
    SALE_POOL_TOKENS, TEAM_VAULT_TOKENS,
};
pub use error::TokenError;
pub use events::{GrantLockedEvent, GrantReleasedEvent, TransferEvent};
pub use gate::SaleState;
pub use storage::Roles;
pub use vesting::{Grant, VestingTerms};

use ledger::{Ledger, StorageLedger};

#[contract]
pub struct UrbitToken;

fn require_amount(amount: i128) -> Result<(), TokenError> {
    if amount < 0 {
        return Err(TokenError::InvalidAmount);
    }
    Ok(())
}

/// Loads the roles and keeps the instance entry alive.
fn require_initialized(env: &Env) -> Result<Roles, TokenError> {
    let roles = storage::read_roles(env)?;
    storage::bump_instance(env);
    Ok(roles)
}

fn do_transfer(
    env: &Env,
    roles: &Roles,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), TokenError> {
    gate::authorize_transfer(env, roles, from, to)?;
    StorageLedger::new(env).move_balance(from, to, amount)?;
    events::transfer(env, from, to, amount);
    Ok(())
}

#[contractimpl]
impl UrbitToken {
    /// @notice Configures the privileged roles.
    /// @dev Callable once. No role may be the null account.
    /// @param admin Closes the sale and creates grants.
    /// @param bonus Bonus pool; may transfer while the sale is open.
    /// @param sale Sale pool; may transfer while the sale is open.
    /// @param referral Referral pool; may transfer while the sale is open.
    pub fn initialize(
        env: Env,
        admin: Address,
        bonus: Address,
        sale: Address,
        referral: Address,
    ) -> Result<(), TokenError> {
        if storage::has_roles(&env) {
            return Err(TokenError::AlreadyInitialized);
        }
        for role in [&admin, &bonus, &sale, &referral] {
            if storage::is_null(&env, role) {
                return Err(TokenError::InvalidRole);
            }
        }

        storage::write_roles(
            &env,
            &Roles {
                admin: admin.clone(),
                bonus,
                sale,
                referral,
            },
        );
        storage::bump_instance(&env);
        events::initialized(&env, &admin);
        Ok(())
    }

    pub fn roles(env: Env) -> Result<Roles, TokenError> {
        storage::read_roles(&env)
    }

    // ----- Supply events and the sale gate -----

    /// @notice Mints the sale, bonus and referral pool allocations.
    /// @dev Administrator only, once, before the sale closes.
    pub fn create_sale_tokens(env: Env, caller: Address) -> Result<(), TokenError> {
        caller.require_auth();
        let roles = require_initialized(&env)?;
        storage::require_admin(&env, &caller)?;
        gate::create_sale_tokens(&env, &StorageLedger::new(&env), &roles)
    }

    /// @notice Closes the sale, lifting transfer restrictions for everyone.
    /// @dev Administrator only. Mints the team allocation into the vault.
    ///      Irreversible; a second call fails with `AlreadyClosed`.
    pub fn close_sale(env: Env, caller: Address) -> Result<(), TokenError> {
        caller.require_auth();
        require_initialized(&env)?;
        storage::require_admin(&env, &caller)?;
        let vault = env.current_contract_address();
        gate::close_sale(&env, &StorageLedger::new(&env), &vault)?;
        Ok(())
    }

    pub fn sale_state(env: Env) -> SaleState {
        gate::sale_state(&env)
    }

    /// @notice Address holding the team allocation minted at sale close.
    pub fn team_tokens_vault(env: Env) -> Address {
        env.current_contract_address()
    }

    // ----- Token surface -----

    pub fn name(env: Env) -> String {
        String::from_str(&env, constants::NAME)
    }

    pub fn symbol(env: Env) -> String {
        String::from_str(&env, constants::SYMBOL)
    }

    pub fn decimals(_env: Env) -> u32 {
        DECIMALS
    }

    pub fn total_supply(env: Env) -> i128 {
        StorageLedger::new(&env).total_supply()
    }

    /// @notice Spendable balance of `id`. Locked grant amounts are excluded.
    pub fn balance(env: Env, id: Address) -> i128 {
        StorageLedger::new(&env).balance_of(&id)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), TokenError> {
        from.require_auth();
        require_amount(amount)?;
        let roles = require_initialized(&env)?;
        do_transfer(&env, &roles, &from, &to, amount)
    }

    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), TokenError> {
        from.require_auth();
        require_amount(amount)?;
        require_initialized(&env)?;
        ledger::write_allowance(&env, &from, &spender, amount);
        events::approve(&env, &from, &spender, amount);
        Ok(())
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        ledger::read_allowance(&env, &from, &spender)
    }

    /// @notice Moves `amount` from `from` to `to` against `spender`'s allowance.
    /// @dev Gated on `from`, exactly like `transfer`.
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), TokenError> {
        spender.require_auth();
        require_amount(amount)?;
        let roles = require_initialized(&env)?;
        gate::authorize_transfer(&env, &roles, &from, &to)?;
        if StorageLedger::new(&env).balance_of(&from) < amount {
            return Err(TokenError::InsufficientBalance);
        }
        ledger::spend_allowance(&env, &from, &spender, amount)?;
        do_transfer(&env, &roles, &from, &to, amount)
    }

    // ----- Vesting grants -----

    /// @notice Locks `amount` of `source`'s balance into a grant for
    ///         `beneficiary` that unlocks entirely at `start`.
    /// @return index Position of the grant in the beneficiary's list.
    pub fn lock_tokens(
        env: Env,
        caller: Address,
        source: Address,
        amount: i128,
        beneficiary: Address,
        start: u64,
    ) -> Result<u32, TokenError> {
        Self::lock_tokens_linear(env, caller, source, amount, beneficiary, start, 0)
    }

    /// @notice Like `lock_tokens`, but the amount unlocks linearly over
    ///         `duration` seconds after `start`.
    pub fn lock_tokens_linear(
        env: Env,
        caller: Address,
        source: Address,
        amount: i128,
        beneficiary: Address,
        start: u64,
        duration: u64,
    ) -> Result<u32, TokenError> {
        caller.require_auth();
        require_initialized(&env)?;
        storage::require_admin(&env, &caller)?;
        vesting::lock(
            &env,
            &StorageLedger::new(&env),
            &source,
            amount,
            &beneficiary,
            start,
            duration,
        )
    }

    pub fn vesting_count_of(env: Env, beneficiary: Address) -> u32 {
        vesting::vesting_count_of(&env, &beneficiary)
    }

    pub fn vesting_of(
        env: Env,
        beneficiary: Address,
        index: u32,
    ) -> Result<VestingTerms, TokenError> {
        vesting::vesting_of(&env, &beneficiary, index)
    }

    pub fn grant_of(env: Env, beneficiary: Address, index: u32) -> Result<Grant, TokenError> {
        vesting::grant_of(&env, &beneficiary, index)
    }

    pub fn locked_balance_of(env: Env, beneficiary: Address) -> Result<i128, TokenError> {
        vesting::locked_balance_of(&env, &beneficiary)
    }

    pub fn releasable_balance_of(env: Env, beneficiary: Address) -> Result<i128, TokenError> {
        vesting::releasable_balance_of(&env, &beneficiary, env.ledger().timestamp())
    }

    pub fn total_locked(env: Env) -> i128 {
        vesting::total_locked(&env)
    }

    /// @notice Credits the vested, unreleased part of one grant. Anyone may call.
    /// @return amount Credited amount; 0 when nothing is due.
    pub fn release(env: Env, beneficiary: Address, index: u32) -> Result<i128, TokenError> {
        let now = env.ledger().timestamp();
        vesting::release(&env, &StorageLedger::new(&env), &beneficiary, index, now)
    }

    /// @notice Releases every grant of `beneficiary`. Anyone may call.
    /// @return amount Total credited across all grants.
    pub fn release_vested_tokens_for(env: Env, beneficiary: Address) -> Result<i128, TokenError> {
        let now = env.ledger().timestamp();
        vesting::release_all(&env, &StorageLedger::new(&env), &beneficiary, now)
    }
}
