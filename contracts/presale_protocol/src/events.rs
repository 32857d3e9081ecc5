//! Contract events.
//!
//! Every notification carries the identifiers and amounts an off-system
//! bookkeeper needs; none carries a capability to mutate state. Topics are
//! `(symbol, presale_id)` pairs so an indexer can filter per round; the
//! payload is a `#[contracttype]` struct per event.
//!
//! The backend indexer (`backend/indexer/src/events.rs`) mirrors this
//! taxonomy and must stay in sync with the topic symbols used here.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PresaleCreated {
    pub presale_id: u64,
    pub creator: Address,
    pub sale_asset: Address,
    pub raise_asset: Address,
    pub sale_units_total: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionAccepted {
    pub presale_id: u64,
    pub contributor: Address,
    /// Raise-asset units actually pulled (after hard-cap clamping).
    pub amount: i128,
    /// Sale units credited at contribution time (Fixed rounds; `0` for
    /// Dynamic).
    pub claimable: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionPulled {
    pub presale_id: u64,
    pub contributor: Address,
    pub refund: i128,
    pub penalty: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PresaleFinalized {
    pub presale_id: u64,
    pub amount_raised: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PresaleCancelled {
    pub presale_id: u64,
    pub amount_raised: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensClaimed {
    pub presale_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundIssued {
    pub presale_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProceedsWithdrawn {
    pub presale_id: u64,
    pub payout: i128,
    pub fee: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LeftoverWithdrawn {
    pub presale_id: u64,
    pub payout: i128,
    pub fee: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistUpdated {
    pub presale_id: u64,
    pub count: u32,
}

// ── Emit helpers ─────────────────────────────────────────────────────

pub fn presale_created(env: &Env, ev: PresaleCreated) {
    env.events()
        .publish((symbol_short!("created"), ev.presale_id), ev);
}

pub fn contribution_accepted(env: &Env, ev: ContributionAccepted) {
    env.events()
        .publish((symbol_short!("contrib"), ev.presale_id), ev);
}

pub fn contribution_pulled(env: &Env, ev: ContributionPulled) {
    env.events()
        .publish((symbol_short!("pulled"), ev.presale_id), ev);
}

pub fn presale_finalized(env: &Env, ev: PresaleFinalized) {
    env.events()
        .publish((symbol_short!("finalized"), ev.presale_id), ev);
}

pub fn presale_cancelled(env: &Env, ev: PresaleCancelled) {
    env.events()
        .publish((symbol_short!("cancelled"), ev.presale_id), ev);
}

pub fn tokens_claimed(env: &Env, ev: TokensClaimed) {
    env.events()
        .publish((symbol_short!("claimed"), ev.presale_id), ev);
}

pub fn refund_issued(env: &Env, ev: RefundIssued) {
    env.events()
        .publish((symbol_short!("refunded"), ev.presale_id), ev);
}

pub fn proceeds_withdrawn(env: &Env, ev: ProceedsWithdrawn) {
    env.events()
        .publish((symbol_short!("proceeds"), ev.presale_id), ev);
}

pub fn leftover_withdrawn(env: &Env, ev: LeftoverWithdrawn) {
    env.events()
        .publish((symbol_short!("leftover"), ev.presale_id), ev);
}

pub fn whitelist_added(env: &Env, ev: WhitelistUpdated) {
    env.events()
        .publish((symbol_short!("wl_add"), ev.presale_id), ev);
}

pub fn whitelist_removed(env: &Env, ev: WhitelistUpdated) {
    env.events()
        .publish((symbol_short!("wl_del"), ev.presale_id), ev);
}

pub fn protocol_paused(env: &Env, admin: &Address) {
    env.events()
        .publish((symbol_short!("paused"),), admin.clone());
}

pub fn protocol_unpaused(env: &Env, admin: &Address) {
    env.events()
        .publish((symbol_short!("unpaused"),), admin.clone());
}

pub fn fee_percent_set(env: &Env, pct: u32) {
    env.events().publish((symbol_short!("fee_set"),), pct);
}

pub fn fee_sink_set(env: &Env, sink: &Address) {
    env.events()
        .publish((symbol_short!("sink_set"),), sink.clone());
}

pub fn wl_batch_cap_set(env: &Env, cap: u32) {
    env.events().publish((symbol_short!("cap_set"),), cap);
}
