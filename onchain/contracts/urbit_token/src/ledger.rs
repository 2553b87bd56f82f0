//! Balance bookkeeping underneath the sale gate and the vesting registry.
//!
//! The gate and the registry only talk to balances through [`Ledger`], so the
//! storage-backed implementation can be swapped for [`MemoryLedger`] in unit
//! tests.

use soroban_sdk::{Address, Env};

use crate::error::TokenError;
use crate::storage::{self, DataKey};

pub trait Ledger {
    /// Spendable balance of `party`. Locked grant amounts are not included.
    fn balance_of(&self, party: &Address) -> i128;

    fn credit(&self, party: &Address, amount: i128) -> Result<(), TokenError>;

    /// Fails with `InsufficientBalance` when `amount` exceeds the balance.
    fn debit(&self, party: &Address, amount: i128) -> Result<(), TokenError>;

    fn total_supply(&self) -> i128;

    /// Creates `amount` new tokens as spendable balance of `to`.
    fn mint(&self, to: &Address, amount: i128) -> Result<(), TokenError>;

    fn move_balance(&self, from: &Address, to: &Address, amount: i128) -> Result<(), TokenError> {
        self.debit(from, amount)?;
        self.credit(to, amount)
    }
}

pub struct StorageLedger<'a> {
    env: &'a Env,
}

impl<'a> StorageLedger<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    fn write_balance(&self, party: &Address, amount: i128) {
        storage::write_persistent(self.env, &DataKey::Balance(party.clone()), &amount);
    }
}

impl Ledger for StorageLedger<'_> {
    fn balance_of(&self, party: &Address) -> i128 {
        storage::read_persistent(self.env, &DataKey::Balance(party.clone())).unwrap_or(0)
    }

    fn credit(&self, party: &Address, amount: i128) -> Result<(), TokenError> {
        let balance = self
            .balance_of(party)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.write_balance(party, balance);
        Ok(())
    }

    fn debit(&self, party: &Address, amount: i128) -> Result<(), TokenError> {
        let balance = self.balance_of(party);
        if balance < amount {
            return Err(TokenError::InsufficientBalance);
        }
        self.write_balance(party, balance - amount);
        Ok(())
    }

    fn total_supply(&self) -> i128 {
        storage::read_instance(self.env, &DataKey::TotalSupply).unwrap_or(0)
    }

    fn mint(&self, to: &Address, amount: i128) -> Result<(), TokenError> {
        let supply = self
            .total_supply()
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.credit(to, amount)?;
        storage::write_instance(self.env, &DataKey::TotalSupply, &supply);
        Ok(())
    }
}

pub fn read_allowance(env: &Env, from: &Address, spender: &Address) -> i128 {
    storage::read_persistent(env, &DataKey::Allowance(from.clone(), spender.clone()))
        .unwrap_or(0)
}

pub fn write_allowance(env: &Env, from: &Address, spender: &Address, amount: i128) {
    storage::write_persistent(
        env,
        &DataKey::Allowance(from.clone(), spender.clone()),
        &amount,
    );
}

pub fn spend_allowance(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), TokenError> {
    let allowance = read_allowance(env, from, spender);
    if allowance < amount {
        return Err(TokenError::InsufficientAllowance);
    }
    if amount > 0 {
        write_allowance(env, from, spender, allowance - amount);
    }
    Ok(())
}

/// In-memory ledger for unit tests of the gate and the vesting engine.
#[cfg(test)]
pub struct MemoryLedger {
    balances: core::cell::RefCell<soroban_sdk::Map<Address, i128>>,
    supply: core::cell::Cell<i128>,
}

#[cfg(test)]
impl MemoryLedger {
    pub fn new(env: &Env) -> Self {
        Self {
            balances: core::cell::RefCell::new(soroban_sdk::Map::new(env)),
            supply: core::cell::Cell::new(0),
        }
    }
}

#[cfg(test)]
impl Ledger for MemoryLedger {
    fn balance_of(&self, party: &Address) -> i128 {
        self.balances.borrow().get(party.clone()).unwrap_or(0)
    }

    fn credit(&self, party: &Address, amount: i128) -> Result<(), TokenError> {
        let balance = self
            .balance_of(party)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.balances.borrow_mut().set(party.clone(), balance);
        Ok(())
    }

    fn debit(&self, party: &Address, amount: i128) -> Result<(), TokenError> {
        let balance = self.balance_of(party);
        if balance < amount {
            return Err(TokenError::InsufficientBalance);
        }
        self.balances.borrow_mut().set(party.clone(), balance - amount);
        Ok(())
    }

    fn total_supply(&self) -> i128 {
        self.supply.get()
    }

    fn mint(&self, to: &Address, amount: i128) -> Result<(), TokenError> {
        self.credit(to, amount)?;
        self.supply.set(self.supply.get() + amount);
        Ok(())
    }
}
