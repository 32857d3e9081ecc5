extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    token, vec, Address, Env, IntoVal, TryIntoVal,
};

use crate::events::{
    ContributionAccepted, ContributionPulled, PresaleCancelled, PresaleCreated, PresaleFinalized,
    TokensClaimed,
};
use crate::types::{PresaleKind, PresaleParams};
use crate::{PresaleProtocol, PresaleProtocolClient};

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

fn fixed_params(env: &Env) -> PresaleParams {
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
        whitelisted: false,
        wl_start_delay: 0,
        wl_duration: 0,
    }
}

fn create_round(env: &Env, client: &PresaleProtocolClient) -> (u64, Address, PresaleParams) {
    let params = fixed_params(env);
    let creator = Address::generate(env);
    token::StellarAssetClient::new(env, &params.sale_asset).mint(&creator, &1_000_000);
    let id = client.create_presale(&creator, &params);
    (id, creator, params)
}

fn contribute(env: &Env, client: &PresaleProtocolClient, id: u64, params: &PresaleParams, amount: i128) -> Address {
    let contributor = Address::generate(env);
    token::StellarAssetClient::new(env, &params.raise_asset).mint(&contributor, &amount);
    client.participate(&id, &contributor, &amount);
    contributor
}

#[test]
fn test_presale_created_event() {
    let (env, client) = setup();
    let (id, creator, params) = create_round(&env, &client);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("created"), presale_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("created").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: PresaleCreated struct
    let event_data: PresaleCreated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        PresaleCreated {
            presale_id: id,
            creator,
            sale_asset: params.sale_asset.clone(),
            raise_asset: params.raise_asset.clone(),
            sale_units_total: 1_000_000,
        }
    );
}

#[test]
fn test_contribution_accepted_event() {
    let (env, client) = setup();
    let (id, _creator, params) = create_round(&env, &client);
    let contributor = contribute(&env, &client, id, &params, 60);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("contrib").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ContributionAccepted = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ContributionAccepted {
            presale_id: id,
            contributor,
            amount: 60,
            claimable: 600_000,
        }
    );
}

#[test]
fn test_contribution_accepted_event_reports_clamped_amount() {
    let (env, client) = setup();
    let (id, _creator, params) = create_round(&env, &client);
    contribute(&env, &client, id, &params, 80);

    // Tenders 50 against a remainder of 20.
    let contributor = Address::generate(&env);
    token::StellarAssetClient::new(&env, &params.raise_asset).mint(&contributor, &50);
    client.participate(&id, &contributor, &50);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    let event_data: ContributionAccepted = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data.amount, 20);
    assert_eq!(event_data.claimable, 200_000);
}

#[test]
fn test_contribution_pulled_event() {
    let (env, client) = setup();
    let (id, _creator, params) = create_round(&env, &client);
    let contributor = contribute(&env, &client, id, &params, 40);

    client.pull_out(&id, &contributor);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("pulled").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // 2% of 40 rounds down to 0, so the full amount comes back.
    let event_data: ContributionPulled = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ContributionPulled {
            presale_id: id,
            contributor,
            refund: 40,
            penalty: 0,
        }
    );
}

#[test]
fn test_presale_finalized_event() {
    let (env, client) = setup();
    let (id, creator, params) = create_round(&env, &client);
    contribute(&env, &client, id, &params, 60);

    env.ledger().with_mut(|li| li.timestamp = 1_001);
    client.finalize(&id, &creator);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("finalized").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: PresaleFinalized = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        PresaleFinalized {
            presale_id: id,
            amount_raised: 60,
        }
    );
}

#[test]
fn test_presale_cancelled_event() {
    let (env, client) = setup();
    let (id, creator, params) = create_round(&env, &client);
    contribute(&env, &client, id, &params, 10);

    env.ledger().with_mut(|li| li.timestamp = 1_001);
    client.finalize(&id, &creator);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("cancelled").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: PresaleCancelled = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        PresaleCancelled {
            presale_id: id,
            amount_raised: 10,
        }
    );
}

#[test]
fn test_tokens_claimed_event() {
    let (env, client) = setup();
    let (id, creator, params) = create_round(&env, &client);
    let contributor = contribute(&env, &client, id, &params, 60);

    env.ledger().with_mut(|li| li.timestamp = 1_001);
    client.finalize(&id, &creator);
    client.claim_tokens(&id, &contributor);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("claimed").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: TokensClaimed = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        TokensClaimed {
            presale_id: id,
            contributor,
            amount: 600_000,
        }
    );
}

#[test]
fn test_fee_set_event() {
    let (env, client) = setup();
    client.set_fee_percent(&7);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![&env, symbol_short!("fee_set").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: u32 = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, 7);
}
