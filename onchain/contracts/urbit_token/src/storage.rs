use soroban_sdk::{contracttype, Address, Env, IntoVal, String, TryFromVal, Val};

use crate::constants::{
    INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, NULL_ACCOUNT, PERSISTENT_BUMP_AMOUNT,
    PERSISTENT_LIFETIME_THRESHOLD,
};
use crate::error::TokenError;

/// Privileged identities, fixed at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Roles {
    pub admin: Address,
    pub bonus: Address,
    pub sale: Address,
    pub referral: Address,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    // Instance storage.
    Roles,
    SaleState,
    SaleTokensCreated,
    TotalSupply,
    TotalLocked,
    GrantCount,
    // Persistent storage.
    Balance(Address),
    Allowance(Address, Address),
    /// Arena slot holding one grant record.
    Grant(u32),
    /// Arena ids of a beneficiary's grants, in creation order.
    Grants(Address),
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn read_instance<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: TryFromVal<Env, Val>,
    V::Error: core::fmt::Debug,
{
    env.storage().instance().get(key)
}

pub fn write_instance<V>(env: &Env, key: &DataKey, value: &V)
where
    V: IntoVal<Env, Val>,
{
    env.storage().instance().set(key, value);
}

pub fn read_persistent<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: TryFromVal<Env, Val>,
    V::Error: core::fmt::Debug,
{
    env.storage().persistent().get(key)
}

pub fn write_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: IntoVal<Env, Val>,
{
    let storage = env.storage().persistent();
    storage.set(key, value);
    storage.extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn has_roles(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Roles)
}

pub fn read_roles(env: &Env) -> Result<Roles, TokenError> {
    read_instance(env, &DataKey::Roles).ok_or(TokenError::NotInitialized)
}

pub fn write_roles(env: &Env, roles: &Roles) {
    write_instance(env, &DataKey::Roles, roles);
}

/// Fails with `Unauthorized` unless `caller` is the configured administrator.
/// Authentication of `caller` is the entry point's job.
pub fn require_admin(env: &Env, caller: &Address) -> Result<Roles, TokenError> {
    let roles = read_roles(env)?;
    if &roles.admin != caller {
        return Err(TokenError::Unauthorized);
    }
    Ok(roles)
}

pub fn null_identity(env: &Env) -> Address {
    Address::from_string(&String::from_str(env, NULL_ACCOUNT))
}

pub fn is_null(env: &Env, party: &Address) -> bool {
    party == &null_identity(env)
}
