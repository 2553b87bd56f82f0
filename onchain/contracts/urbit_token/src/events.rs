use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrantLockedEvent {
    pub beneficiary: Address,
    pub source: Address,
    pub index: u32,
    pub amount: i128,
    pub start: u64,
    pub duration: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrantReleasedEvent {
    pub beneficiary: Address,
    pub index: u32,
    pub amount: i128,
    pub released: i128,
}

pub fn initialized(env: &Env, admin: &Address) {
    env.events()
        .publish((symbol_short!("init"),), admin.clone());
}

pub fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("transfer"), from.clone(), to.clone()),
        TransferEvent {
            from: from.clone(),
            to: to.clone(),
            amount,
        },
    );
}

pub fn approve(env: &Env, from: &Address, spender: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("approve"), from.clone(), spender.clone()), amount);
}

pub fn minted(env: &Env, to: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("sale_mint"), to.clone()), amount);
}

pub fn sale_closed(env: &Env, vault: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("sale_clsd"),), (vault.clone(), amount));
}

pub fn grant_locked(env: &Env, event: GrantLockedEvent) {
    env.events()
        .publish((symbol_short!("lock"), event.beneficiary.clone()), event);
}

pub fn grant_released(env: &Env, event: GrantReleasedEvent) {
    env.events()
        .publish((symbol_short!("release"), event.beneficiary.clone()), event);
}
