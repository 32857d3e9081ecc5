extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, vec, Address, Env, Vec,
};

use crate::types::{PresaleKind, PresaleParams};
use crate::{Error, PresaleProtocol, PresaleProtocolClient};

// ─── helpers ────────────────────────────────────────────────────────────────

fn setup() -> (Env, PresaleProtocolClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(PresaleProtocol, ());
    let client = PresaleProtocolClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    let fee_sink = Address::generate(&env);
    client.init(&admin, &fee_sink, &5);
    (env, client)
}

fn wl_params(env: &Env, whitelisted: bool) -> PresaleParams {
    let token_admin = Address::generate(env);
    let sale = env
        .register_stellar_asset_contract_v2(token_admin.clone())
        .address();
    let raise = env
        .register_stellar_asset_contract_v2(token_admin.clone())
        .address();
    PresaleParams {
        kind: PresaleKind::Fixed,
        sale_asset: sale,
        raise_asset: raise,
        sale_units_total: 1_000_000,
        soft_cap: 50,
        hard_cap: 100,
        min_contribution: 1,
        max_contribution: 0,
        start_delay: 0,
        duration: 1_000,
        whitelisted,
        // Gated sub-window 100..300 inside the 0..1000 sale window.
        wl_start_delay: 100,
        wl_duration: 200,
    }
}

/// Whitelisted Fixed round with sub-window 100..300; returns the funded
/// raise-asset mint client alongside.
fn create_wl_round(
    env: &Env,
    client: &PresaleProtocolClient,
) -> (u64, Address, token::StellarAssetClient<'static>) {
    let params = wl_params(env, true);
    let sale_sac = token::StellarAssetClient::new(env, &params.sale_asset);
    let raise_sac = token::StellarAssetClient::new(env, &params.raise_asset);

    let creator = Address::generate(env);
    sale_sac.mint(&creator, &1_000_000);
    let id = client.create_presale(&creator, &params);
    (id, creator, raise_sac)
}

fn funded_address(env: &Env, raise_sac: &token::StellarAssetClient, amount: i128) -> Address {
    let addr = Address::generate(env);
    raise_sac.mint(&addr, &amount);
    addr
}

fn batch(env: &Env, addr: &Address) -> Vec<Address> {
    vec![env, addr.clone()]
}

fn set_time(env: &Env, ts: u64) {
    env.ledger().with_mut(|li| li.timestamp = ts);
}

// ─── creation rules ──────────────────────────────────────────────────────────

#[test]
fn whitelisted_dynamic_round_rejected() {
    let (env, client) = setup();
    let mut params = wl_params(&env, true);
    params.kind = PresaleKind::Dynamic;
    params.hard_cap = 0;

    let creator = Address::generate(&env);
    token::StellarAssetClient::new(&env, &params.sale_asset).mint(&creator, &1_000_000);
    assert_eq!(
        client.try_create_presale(&creator, &params),
        Err(Ok(Error::InvalidParams))
    );
}

#[test]
fn whitelist_window_must_nest_in_sale_window() {
    let (env, client) = setup();
    let mut params = wl_params(&env, true);
    params.wl_start_delay = 900;
    params.wl_duration = 200; // 900..1100 overshoots end_time 1000

    let creator = Address::generate(&env);
    token::StellarAssetClient::new(&env, &params.sale_asset).mint(&creator, &1_000_000);
    assert_eq!(
        client.try_create_presale(&creator, &params),
        Err(Ok(Error::InvalidTimeWindow))
    );
}

#[test]
fn zero_length_whitelist_window_rejected() {
    let (env, client) = setup();
    let mut params = wl_params(&env, true);
    params.wl_duration = 0;

    let creator = Address::generate(&env);
    token::StellarAssetClient::new(&env, &params.sale_asset).mint(&creator, &1_000_000);
    assert_eq!(
        client.try_create_presale(&creator, &params),
        Err(Ok(Error::InvalidTimeWindow))
    );
}

// ─── participation gating ────────────────────────────────────────────────────

#[test]
fn everyone_rejected_before_window_opens() {
    let (env, client) = setup();
    let (id, creator, raise_sac) = create_wl_round(&env, &client);

    let member = funded_address(&env, &raise_sac, 10);
    client.add_to_whitelist(&id, &creator, &batch(&env, &member));

    // Membership does not open the gate early.
    set_time(&env, 50);
    assert_eq!(
        client.try_participate(&id, &member, &10),
        Err(Ok(Error::SaleNotStarted))
    );
}

#[test]
fn only_members_admitted_inside_window() {
    let (env, client) = setup();
    let (id, creator, raise_sac) = create_wl_round(&env, &client);

    let member = funded_address(&env, &raise_sac, 10);
    let outsider = funded_address(&env, &raise_sac, 10);
    client.add_to_whitelist(&id, &creator, &batch(&env, &member));
    assert!(client.is_whitelisted(&id, &member));
    assert!(!client.is_whitelisted(&id, &outsider));

    set_time(&env, 200);
    assert_eq!(
        client.try_participate(&id, &outsider, &10),
        Err(Ok(Error::NotWhitelisted))
    );
    assert_eq!(client.participate(&id, &member, &10), 10);
}

#[test]
fn round_opens_to_public_after_window() {
    let (env, client) = setup();
    let (id, _creator, raise_sac) = create_wl_round(&env, &client);

    let outsider = funded_address(&env, &raise_sac, 10);
    set_time(&env, 301);
    assert_eq!(client.participate(&id, &outsider, &10), 10);
}

#[test]
fn removal_revokes_access() {
    let (env, client) = setup();
    let (id, creator, raise_sac) = create_wl_round(&env, &client);

    let member = funded_address(&env, &raise_sac, 10);
    client.add_to_whitelist(&id, &creator, &batch(&env, &member));
    client.remove_from_whitelist(&id, &creator, &batch(&env, &member));
    assert!(!client.is_whitelisted(&id, &member));

    set_time(&env, 200);
    assert_eq!(
        client.try_participate(&id, &member, &10),
        Err(Ok(Error::NotWhitelisted))
    );
}

// ─── management rules ────────────────────────────────────────────────────────

#[test]
fn whitelist_updates_are_creator_only() {
    let (env, client) = setup();
    let (id, _creator, _raise_sac) = create_wl_round(&env, &client);

    let stranger = Address::generate(&env);
    let addr = Address::generate(&env);
    assert_eq!(
        client.try_add_to_whitelist(&id, &stranger, &batch(&env, &addr)),
        Err(Ok(Error::NotAuthorized))
    );
    assert_eq!(
        client.try_remove_from_whitelist(&id, &stranger, &batch(&env, &addr)),
        Err(Ok(Error::NotAuthorized))
    );
}

#[test]
fn updates_rejected_after_window_closes() {
    let (env, client) = setup();
    let (id, creator, _raise_sac) = create_wl_round(&env, &client);

    let addr = Address::generate(&env);
    set_time(&env, 301);
    assert_eq!(
        client.try_add_to_whitelist(&id, &creator, &batch(&env, &addr)),
        Err(Ok(Error::WhitelistClosed))
    );
}

#[test]
fn oversized_batch_rejected() {
    let (env, client) = setup();
    let (id, creator, _raise_sac) = create_wl_round(&env, &client);

    client.set_whitelist_batch_cap(&2);
    let mut addresses = Vec::new(&env);
    for _ in 0..3 {
        addresses.push_back(Address::generate(&env));
    }
    assert_eq!(
        client.try_add_to_whitelist(&id, &creator, &addresses),
        Err(Ok(Error::BatchTooLarge))
    );

    // At the cap the batch goes through.
    let _ = addresses.pop_back();
    client.add_to_whitelist(&id, &creator, &addresses);
    assert!(client.is_whitelisted(&id, &addresses.get(0).unwrap()));
}

#[test]
fn updates_rejected_on_open_round() {
    let (env, client) = setup();
    let params = wl_params(&env, false);
    let creator = Address::generate(&env);
    token::StellarAssetClient::new(&env, &params.sale_asset).mint(&creator, &1_000_000);
    let id = client.create_presale(&creator, &params);

    let addr = Address::generate(&env);
    assert_eq!(
        client.try_add_to_whitelist(&id, &creator, &batch(&env, &addr)),
        Err(Ok(Error::InvalidParams))
    );
}
