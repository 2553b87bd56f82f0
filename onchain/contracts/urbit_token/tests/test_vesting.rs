#![cfg(test)]

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address, Env, String,
};

use urbit_token::{
    TokenError, UrbitToken, UrbitTokenClient, VestingTerms, MAGNITUDE, NULL_ACCOUNT,
    TEAM_VAULT_TOKENS,
};

const MINUTE: u64 = 60;
const VESTED_AMOUNT: i128 = 1_000;

fn create_env() -> Env {
    let env = Env::default();
    env.mock_all_auths();
    env
}

/// Token with sale tokens created and the sale closed; the team vault is funded.
fn setup(env: &Env) -> (UrbitTokenClient<'static>, Address, Address) {
    #[allow(deprecated)]
    let id = env.register_contract(None, UrbitToken);
    let client = UrbitTokenClient::new(env, &id);
    let admin = Address::generate(env);
    client.initialize(
        &admin,
        &Address::generate(env),
        &Address::generate(env),
        &Address::generate(env),
    );
    client.create_sale_tokens(&admin);

    env.ledger().set_timestamp(1_000);
    client.close_sale(&admin);
    let vault = client.team_tokens_vault();
    (client, admin, vault)
}

fn set_time(env: &Env, timestamp: u64) {
    env.ledger().with_mut(|li| {
        li.timestamp = timestamp;
    });
}

#[test]
fn vault_holds_team_allocation() {
    let env = create_env();
    let (client, _, vault) = setup(&env);
    assert_eq!(client.balance(&vault), TEAM_VAULT_TOKENS * MAGNITUDE);
}

#[test]
fn locks_balance_before_start() {
    let env = create_env();
    let (client, admin, vault) = setup(&env);
    let beneficiary = Address::generate(&env);
    let start = 1_000 + MINUTE;

    client.lock_tokens(&admin, &vault, &VESTED_AMOUNT, &beneficiary, &start);

    set_time(&env, start - 1);
    assert_eq!(client.locked_balance_of(&beneficiary), VESTED_AMOUNT);
    assert_eq!(client.releasable_balance_of(&beneficiary), 0);
    assert_eq!(client.balance(&beneficiary), 0);
    assert_eq!(client.balance(&vault), TEAM_VAULT_TOKENS * MAGNITUDE - VESTED_AMOUNT);

    assert_eq!(client.release_vested_tokens_for(&beneficiary), 0);
    assert_eq!(client.balance(&beneficiary), 0);
}

#[test]
fn releases_all_after_end() {
    let env = create_env();
    let (client, admin, vault) = setup(&env);
    let beneficiary = Address::generate(&env);
    let start = 1_000 + MINUTE;

    let index = client.lock_tokens(&admin, &vault, &VESTED_AMOUNT, &beneficiary, &start);
    assert_eq!(index, 0);

    set_time(&env, start + MINUTE);
    assert_eq!(client.balance(&beneficiary), 0);
    assert_eq!(client.releasable_balance_of(&beneficiary), VESTED_AMOUNT);
    assert_eq!(client.vesting_count_of(&beneficiary), 1);
    assert_eq!(
        client.vesting_of(&beneficiary, &0),
        VestingTerms {
            source: vault.clone(),
            amount: VESTED_AMOUNT,
            start,
            duration: 0,
        }
    );

    assert_eq!(client.release(&beneficiary, &0), VESTED_AMOUNT);
    assert_eq!(client.balance(&beneficiary), VESTED_AMOUNT);
    assert_eq!(client.locked_balance_of(&beneficiary), 0);

    // Same timestamp, nothing left to credit.
    assert_eq!(client.release(&beneficiary, &0), 0);
    assert_eq!(client.balance(&beneficiary), VESTED_AMOUNT);
    assert_eq!(client.grant_of(&beneficiary, &0).released, VESTED_AMOUNT);
}

#[test]
fn handles_multiple_grants_to_same_beneficiary() {
    let env = create_env();
    let (client, admin, vault) = setup(&env);
    let beneficiary = Address::generate(&env);
    let start = 1_000 + MINUTE;

    assert_eq!(client.lock_tokens(&admin, &vault, &VESTED_AMOUNT, &beneficiary, &start), 0);
    assert_eq!(client.lock_tokens(&admin, &vault, &VESTED_AMOUNT, &beneficiary, &start), 1);
    assert_eq!(client.vesting_count_of(&beneficiary), 2);
    assert_eq!(client.locked_balance_of(&beneficiary), VESTED_AMOUNT * 2);

    set_time(&env, start + MINUTE);
    assert_eq!(client.releasable_balance_of(&beneficiary), VESTED_AMOUNT * 2);
    assert_eq!(client.release_vested_tokens_for(&beneficiary), VESTED_AMOUNT * 2);
    assert_eq!(client.balance(&beneficiary), VESTED_AMOUNT * 2);
    assert_eq!(client.locked_balance_of(&beneficiary), 0);
    assert_eq!(client.vesting_count_of(&beneficiary), 2);
}

#[test]
fn lock_from_underfunded_source_creates_nothing() {
    let env = create_env();
    let (client, admin, _) = setup(&env);
    let poor = Address::generate(&env);
    let beneficiary = Address::generate(&env);

    let res = client.try_lock_tokens(&admin, &poor, &VESTED_AMOUNT, &beneficiary, &2_000);
    assert_eq!(res, Err(Ok(TokenError::InsufficientBalance)));
    assert_eq!(client.vesting_count_of(&beneficiary), 0);
    assert_eq!(client.locked_balance_of(&beneficiary), 0);
    assert_eq!(client.total_locked(), 0);
}

#[test]
fn lock_rejects_bad_inputs() {
    let env = create_env();
    let (client, admin, vault) = setup(&env);
    let beneficiary = Address::generate(&env);
    let null = Address::from_string(&String::from_str(&env, NULL_ACCOUNT));

    assert_eq!(
        client.try_lock_tokens(&beneficiary, &vault, &VESTED_AMOUNT, &beneficiary, &2_000),
        Err(Ok(TokenError::Unauthorized))
    );
    assert_eq!(
        client.try_lock_tokens(&admin, &vault, &VESTED_AMOUNT, &null, &2_000),
        Err(Ok(TokenError::InvalidBeneficiary))
    );
    assert_eq!(
        client.try_lock_tokens(&admin, &vault, &0, &beneficiary, &2_000),
        Err(Ok(TokenError::InvalidAmount))
    );
    assert_eq!(client.vesting_count_of(&beneficiary), 0);
    assert_eq!(client.balance(&vault), TEAM_VAULT_TOKENS * MAGNITUDE);
}

#[test]
fn vesting_of_out_of_range() {
    let env = create_env();
    let (client, admin, vault) = setup(&env);
    let beneficiary = Address::generate(&env);
    client.lock_tokens(&admin, &vault, &VESTED_AMOUNT, &beneficiary, &2_000);

    assert_eq!(
        client.try_vesting_of(&beneficiary, &1),
        Err(Ok(TokenError::IndexOutOfRange))
    );
    assert_eq!(
        client.try_release(&beneficiary, &1),
        Err(Ok(TokenError::IndexOutOfRange))
    );
}

#[test]
fn linear_grant_releases_in_steps() {
    let env = create_env();
    let (client, admin, vault) = setup(&env);
    let beneficiary = Address::generate(&env);
    let start = 2_000;

    client.lock_tokens_linear(&admin, &vault, &1_200, &beneficiary, &start, &(4 * MINUTE));

    set_time(&env, start + MINUTE);
    assert_eq!(client.releasable_balance_of(&beneficiary), 300);
    assert_eq!(client.release(&beneficiary, &0), 300);

    set_time(&env, start + 3 * MINUTE);
    assert_eq!(client.locked_balance_of(&beneficiary), 900);
    assert_eq!(client.releasable_balance_of(&beneficiary), 600);
    assert_eq!(client.release_vested_tokens_for(&beneficiary), 600);

    set_time(&env, start + 10 * MINUTE);
    assert_eq!(client.release_vested_tokens_for(&beneficiary), 300);
    assert_eq!(client.balance(&beneficiary), 1_200);
    assert_eq!(client.locked_balance_of(&beneficiary), 0);
}

#[test]
fn released_tokens_are_spendable() {
    let env = create_env();
    let (client, admin, vault) = setup(&env);
    let beneficiary = Address::generate(&env);
    let friend = Address::generate(&env);

    client.lock_tokens(&admin, &vault, &VESTED_AMOUNT, &beneficiary, &2_000);
    assert_eq!(
        client.try_transfer(&beneficiary, &friend, &1),
        Err(Ok(TokenError::InsufficientBalance))
    );

    set_time(&env, 2_000);
    client.release_vested_tokens_for(&beneficiary);
    client.transfer(&beneficiary, &friend, &400);
    assert_eq!(client.balance(&friend), 400);
    assert_eq!(client.balance(&beneficiary), 600);
}

#[test]
fn supply_is_conserved_across_lock_and_release() {
    let env = create_env();
    let (client, admin, vault) = setup(&env);
    let roles = client.roles();
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let supply = client.total_supply();

    let holders = [
        vault.clone(),
        roles.sale.clone(),
        roles.bonus.clone(),
        roles.referral.clone(),
        alice.clone(),
        bob.clone(),
    ];
    let accounted = |client: &UrbitTokenClient| -> i128 {
        holders.iter().map(|h| client.balance(h)).sum::<i128>() + client.total_locked()
    };
    assert_eq!(accounted(&client), supply);

    client.lock_tokens(&admin, &vault, &5_000, &alice, &2_000);
    client.lock_tokens_linear(&admin, &vault, &3_000, &alice, &2_000, &100);
    client.lock_tokens(&admin, &roles.sale, &700, &bob, &3_000);
    assert_eq!(accounted(&client), supply);
    assert_eq!(client.total_locked(), 8_700);

    for now in [1_999u64, 2_000, 2_033, 2_050, 2_100, 3_000] {
        set_time(&env, now);
        for b in [&alice, &bob] {
            let locked = client.locked_balance_of(b);
            let releasable = client.releasable_balance_of(b);
            assert!(releasable <= locked);

            let before = client.balance(b);
            assert_eq!(client.release_vested_tokens_for(b), releasable);
            assert_eq!(client.balance(b), before + releasable);
            assert_eq!(client.locked_balance_of(b), locked - releasable);
        }
        assert_eq!(accounted(&client), supply);
        assert_eq!(client.total_supply(), supply);
    }
    assert_eq!(client.total_locked(), 0);
}
