//! # Storage
//!
//! Typed helpers over Soroban's storage tiers used by the presale protocol.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key             | Type      | Description                               |
//! |-----------------|-----------|-------------------------------------------|
//! | `Admin`         | `Address` | Protocol administrator                    |
//! | `FeeSink`       | `Address` | Receiver of platform fees and penalties   |
//! | `FeePercent`    | `u32`     | Platform fee, percent (ceiling 10)        |
//! | `WlBatchCap`    | `u32`     | Max addresses per whitelist batch call    |
//! | `Paused`        | `bool`    | Emergency pause switch                    |
//! | `PresaleCount`  | `u64`     | Auto-increment round ID counter           |
//! | `FundedCount`   | `u64`     | Rounds whose proceeds were withdrawn      |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day
//! remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                        | Type            | Description              |
//! |----------------------------|-----------------|--------------------------|
//! | `SaleConfig(id)`           | `PresaleConfig` | Immutable round config   |
//! | `SaleState(id)`            | `PresaleState`  | Mutable round state      |
//! | `Contribution(id, addr)`   | `Contribution`  | Per-contributor ledger   |
//! | `Whitelist(id, addr)`      | `bool`          | Whitelist membership     |
//! | `TotalRaised(asset)`       | `i128`          | Lifetime raise per asset |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining.
//!
//! ## Why split Config and State?
//!
//! Participation is the high-frequency write. `PresaleState` is a handful
//! of words; rewriting the full round record (two addresses, caps, windows)
//! on every contribution would multiply ledger write costs for no benefit.
//!
//! ## Reentrancy lock
//!
//! A single temporary-storage flag spans each state-mutating invocation.
//! A transfer callback that re-enters the engine finds the flag set and the
//! nested call fails closed with `ReentrantCall`.

use soroban_sdk::{contracttype, panic_with_error, Address, Env};

use crate::types::{Contribution, Presale, PresaleConfig, PresaleState};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// Instance-tier keys live as long as the contract and are extended
/// together. Persistent-tier keys hold per-round data with independent
/// TTLs. `ReentryLock` lives in temporary storage for the duration of one
/// invocation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Protocol administrator (Instance).
    Admin,
    /// Fee and penalty sink address (Instance).
    FeeSink,
    /// Platform fee percent (Instance).
    FeePercent,
    /// Whitelist batch size cap (Instance).
    WlBatchCap,
    /// Emergency pause switch (Instance).
    Paused,
    /// Global auto-increment counter for round IDs (Instance).
    PresaleCount,
    /// Count of successfully funded rounds (Instance).
    FundedCount,
    /// Immutable round configuration keyed by ID (Persistent).
    SaleConfig(u64),
    /// Mutable round state keyed by ID (Persistent).
    SaleState(u64),
    /// Per-round, per-contributor ledger entry (Persistent).
    Contribution(u64, Address),
    /// Whitelist membership flag (Persistent).
    Whitelist(u64, Address),
    /// Lifetime total raised per raise asset (Persistent).
    TotalRaised(Address),
    /// Per-invocation reentrancy lock (Temporary).
    ReentryLock,
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

/// Retrieve the protocol administrator. Panics if the contract was never
/// initialised.
pub fn get_admin(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("not initialized")
}

pub fn set_fee_sink(env: &Env, sink: &Address) {
    env.storage().instance().set(&DataKey::FeeSink, sink);
    bump_instance(env);
}

pub fn get_fee_sink(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::FeeSink)
        .expect("not initialized")
}

pub fn set_fee_percent(env: &Env, pct: u32) {
    env.storage().instance().set(&DataKey::FeePercent, &pct);
    bump_instance(env);
}

pub fn get_fee_percent(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::FeePercent)
        .unwrap_or(0)
}

pub fn set_wl_batch_cap(env: &Env, cap: u32) {
    env.storage().instance().set(&DataKey::WlBatchCap, &cap);
    bump_instance(env);
}

pub fn get_wl_batch_cap(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::WlBatchCap)
        .unwrap_or(crate::DEFAULT_WL_BATCH_CAP)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
    bump_instance(env);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

/// Atomically reads, increments, and stores the round counter.
/// Returns the ID to use for the *current* round (pre-increment value).
pub fn get_and_increment_presale_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::PresaleCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::PresaleCount, &(current + 1));
    current
}

pub fn get_presale_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::PresaleCount)
        .unwrap_or(0)
}

pub fn increment_funded_count(env: &Env) {
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::FundedCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::FundedCount, &(current + 1));
    bump_instance(env);
}

pub fn get_funded_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::FundedCount)
        .unwrap_or(0)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Save both the immutable config and initial mutable state for a new round.
pub fn save_presale(env: &Env, config: &PresaleConfig, state: &PresaleState) {
    let config_key = DataKey::SaleConfig(config.id);
    let state_key = DataKey::SaleState(config.id);
    env.storage().persistent().set(&config_key, config);
    env.storage().persistent().set(&state_key, state);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
}

/// Load the full `Presale` by combining config and state.
/// Panics with `PresaleNotFound` if the round does not exist.
pub fn load_presale(env: &Env, id: u64) -> Presale {
    let config = load_config(env, id);
    let state = load_state(env, id);
    Presale {
        id: config.id,
        kind: config.kind,
        creator: config.creator,
        sale_asset: config.sale_asset,
        raise_asset: config.raise_asset,
        sale_units_total: config.sale_units_total,
        soft_cap: config.soft_cap,
        hard_cap: config.hard_cap,
        min_contribution: config.min_contribution,
        max_contribution: config.max_contribution,
        start_time: config.start_time,
        end_time: config.end_time,
        whitelisted: config.whitelisted,
        wl_start: config.wl_start,
        wl_end: config.wl_end,
        status: state.status,
        amount_raised: state.amount_raised,
        sale_units_sold: state.sale_units_sold,
        proceeds_withdrawn: state.proceeds_withdrawn,
        leftover_withdrawn: state.leftover_withdrawn,
    }
}

/// Load only the immutable round configuration.
pub fn load_config(env: &Env, id: u64) -> PresaleConfig {
    let key = DataKey::SaleConfig(id);
    let config: PresaleConfig = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| panic_with_error!(env, Error::PresaleNotFound));
    bump_persistent(env, &key);
    config
}

/// Load only the mutable round state.
pub fn load_state(env: &Env, id: u64) -> PresaleState {
    let key = DataKey::SaleState(id);
    let state: PresaleState = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| panic_with_error!(env, Error::PresaleNotFound));
    bump_persistent(env, &key);
    state
}

/// Save only the mutable round state (the participation/settlement hot path).
pub fn save_state(env: &Env, id: u64, state: &PresaleState) {
    let key = DataKey::SaleState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

// ── Contribution ledger ──────────────────────────────────────────────

/// Load a contributor's ledger entry, defaulting to the zero entry for an
/// address that never participated.
pub fn load_contribution(env: &Env, id: u64, contributor: &Address) -> Contribution {
    let key = DataKey::Contribution(id, contributor.clone());
    match env.storage().persistent().get(&key) {
        Some(entry) => {
            bump_persistent(env, &key);
            entry
        }
        None => Contribution::zero(),
    }
}

pub fn save_contribution(env: &Env, id: u64, contributor: &Address, entry: &Contribution) {
    let key = DataKey::Contribution(id, contributor.clone());
    env.storage().persistent().set(&key, entry);
    bump_persistent(env, &key);
}

// ── Whitelist ────────────────────────────────────────────────────────

pub fn add_whitelisted(env: &Env, id: u64, address: &Address) {
    let key = DataKey::Whitelist(id, address.clone());
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}

pub fn remove_whitelisted(env: &Env, id: u64, address: &Address) {
    let key = DataKey::Whitelist(id, address.clone());
    env.storage().persistent().remove(&key);
}

pub fn is_whitelisted(env: &Env, id: u64, address: &Address) -> bool {
    let key = DataKey::Whitelist(id, address.clone());
    env.storage().persistent().get(&key).unwrap_or(false)
}

// ── Aggregate counters ───────────────────────────────────────────────

pub fn get_total_raised(env: &Env, asset: &Address) -> i128 {
    let key = DataKey::TotalRaised(asset.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

/// Adjust the lifetime per-asset raise counter. `delta` is negative for
/// pull-outs.
pub fn adjust_total_raised(env: &Env, asset: &Address, delta: i128) {
    let key = DataKey::TotalRaised(asset.clone());
    let current: i128 = env.storage().persistent().get(&key).unwrap_or(0);
    let updated = current
        .checked_add(delta)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));
    env.storage().persistent().set(&key, &updated);
    bump_persistent(env, &key);
}

// ── Reentrancy lock ──────────────────────────────────────────────────

/// Take the per-invocation lock. A nested call from within a transfer
/// callback finds the flag set and fails closed.
pub fn acquire_reentry_lock(env: &Env) {
    if env.storage().temporary().has(&DataKey::ReentryLock) {
        panic_with_error!(env, Error::ReentrantCall);
    }
    env.storage().temporary().set(&DataKey::ReentryLock, &true);
}

/// Release the lock at the end of a mutating operation. A panic on the
/// error path aborts the whole invocation, so the lock never leaks.
pub fn release_reentry_lock(env: &Env) {
    env.storage().temporary().remove(&DataKey::ReentryLock);
}
