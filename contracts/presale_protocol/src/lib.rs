//! # Presale Protocol Contract
//!
//! Root crate of the presale launchpad. It exposes the single Soroban
//! contract `PresaleProtocol` whose entry points cover the full round
//! lifecycle:
//!
//! | Phase         | Entry Point(s)                                        |
//! |---------------|-------------------------------------------------------|
//! | Bootstrap     | [`PresaleProtocol::init`]                             |
//! | Admin         | `set_fee_percent`, `set_fee_sink`, `set_whitelist_batch_cap`, `pause`, `unpause` |
//! | Creation      | [`PresaleProtocol::create_presale`]                   |
//! | Participation | [`PresaleProtocol::participate`], [`PresaleProtocol::pull_out`] |
//! | Whitelist     | `add_to_whitelist`, `remove_from_whitelist`           |
//! | Decision      | [`PresaleProtocol::finalize`]                         |
//! | Settlement    | `claim_tokens`, `claim_refund`, `withdraw_proceeds`, `withdraw_leftover_tokens`, `withdraw_escrow_on_cancel` |
//! | Queries       | `get_presale`, `get_contribution`, `is_whitelisted`, `get_stats`, `get_total_raised` |
//!
//! ## Architecture
//!
//! Storage access is fully delegated to [`storage`], fee and allocation
//! math to [`fees`], event payloads to [`events`]. This file contains the
//! entry points and the lifecycle state machine.
//!
//! Every state-mutating operation follows checks-effects-interactions: all
//! ledger writes are committed before any outbound token transfer, and any
//! balance about to be paid out is zeroed first, so a re-invocation finds
//! already-zeroed state and fails closed instead of double-paying. A
//! per-invocation reentrancy lock additionally rejects nested re-entry.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env, Vec,
};

mod events;
mod fees;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_whitelist;

use storage::{
    acquire_reentry_lock, adjust_total_raised, get_and_increment_presale_id, load_config,
    load_contribution, load_state, release_reentry_lock, save_contribution, save_presale,
    save_state,
};
use types::{PresaleConfig, PresaleState};

pub use fees::{FEE_CEILING_PCT, PULL_OUT_PENALTY_PCT};
pub use types::{
    Contribution, Presale, PresaleKind, PresaleParams, PresaleStatus, ProtocolStats,
};

/// After the window closes, the creator has this long to finalize
/// exclusively; afterwards anyone may.
pub const FINALIZE_GRACE_SECS: u64 = 86_400;

/// Default cap on addresses per whitelist batch call.
pub const DEFAULT_WL_BATCH_CAP: u32 = 100;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized   = 1,
    NotAuthorized        = 2,
    ProtocolPaused       = 3,
    PresaleNotFound      = 4,
    InvalidParams        = 5,
    InvalidTimeWindow    = 6,
    InvalidCaps          = 7,
    SaleNotStarted       = 8,
    SaleEnded            = 9,
    SaleNotEnded         = 10,
    SaleFilled           = 11,
    NotWhitelisted       = 12,
    BelowMinContribution = 13,
    AboveMaxContribution = 14,
    InvalidAmount        = 15,
    SoftCapReached       = 16,
    AlreadyFinalized     = 17,
    NotFinalized         = 18,
    NotCancelled         = 19,
    AlreadyWithdrawn     = 20,
    FeeTooHigh           = 21,
    BatchTooLarge        = 22,
    WhitelistClosed      = 23,
    Overflow             = 24,
    ReentrantCall        = 25,
}

#[contract]
pub struct PresaleProtocol;

#[contractimpl]
impl PresaleProtocol {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract: set the administrator, the fee sink, and
    /// the initial platform fee percentage.
    ///
    /// Must be called exactly once after deployment. Subsequent calls
    /// panic with `Error::AlreadyInitialized`.
    pub fn init(env: Env, admin: Address, fee_sink: Address, fee_percent: u32) {
        admin.require_auth();
        if storage::has_admin(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        if fee_percent > FEE_CEILING_PCT {
            panic_with_error!(&env, Error::FeeTooHigh);
        }
        storage::set_admin(&env, &admin);
        storage::set_fee_sink(&env, &fee_sink);
        storage::set_fee_percent(&env, fee_percent);
        storage::set_wl_batch_cap(&env, DEFAULT_WL_BATCH_CAP);
    }

    // ─────────────────────────────────────────────────────────
    // Administrative surface
    // ─────────────────────────────────────────────────────────

    /// Set the platform fee percentage. Hard ceiling 10%.
    ///
    /// Read at settlement time: a change affects only rounds whose
    /// proceeds or leftovers have not yet been withdrawn, never
    /// already-settled ones.
    pub fn set_fee_percent(env: Env, pct: u32) {
        let admin = storage::get_admin(&env);
        admin.require_auth();
        if pct > FEE_CEILING_PCT {
            panic_with_error!(&env, Error::FeeTooHigh);
        }
        storage::set_fee_percent(&env, pct);
        events::fee_percent_set(&env, pct);
    }

    /// Set the receiver of platform fees and pull-out penalties.
    pub fn set_fee_sink(env: Env, sink: Address) {
        let admin = storage::get_admin(&env);
        admin.require_auth();
        storage::set_fee_sink(&env, &sink);
        events::fee_sink_set(&env, &sink);
    }

    /// Set the maximum batch size for whitelist updates. Must be positive.
    pub fn set_whitelist_batch_cap(env: Env, cap: u32) {
        let admin = storage::get_admin(&env);
        admin.require_auth();
        if cap == 0 {
            panic_with_error!(&env, Error::InvalidParams);
        }
        storage::set_wl_batch_cap(&env, cap);
        events::wl_batch_cap_set(&env, cap);
    }

    /// Emergency stop: blocks every state-mutating operation until
    /// `unpause`. Never reverses already-committed state.
    pub fn pause(env: Env) {
        let admin = storage::get_admin(&env);
        admin.require_auth();
        storage::set_paused(&env, true);
        events::protocol_paused(&env, &admin);
    }

    pub fn unpause(env: Env) {
        let admin = storage::get_admin(&env);
        admin.require_auth();
        storage::set_paused(&env, false);
        events::protocol_unpaused(&env, &admin);
    }

    // ─────────────────────────────────────────────────────────
    // Round creation
    // ─────────────────────────────────────────────────────────

    /// Register a new presale round and escrow `sale_units_total` units of
    /// the sale asset from `creator` into the contract.
    ///
    /// The escrow transfer must succeed or the whole operation fails
    /// atomically; a failed call leaves no partial round state.
    pub fn create_presale(env: Env, creator: Address, params: PresaleParams) -> u64 {
        creator.require_auth();
        require_not_paused(&env);
        acquire_reentry_lock(&env);

        if params.sale_units_total <= 0 {
            panic_with_error!(&env, Error::InvalidParams);
        }
        if params.sale_asset == params.raise_asset {
            panic_with_error!(&env, Error::InvalidParams);
        }
        if params.duration == 0 {
            panic_with_error!(&env, Error::InvalidTimeWindow);
        }
        if params.min_contribution < 0
            || params.max_contribution < 0
            || (params.max_contribution > 0 && params.min_contribution > params.max_contribution)
        {
            panic_with_error!(&env, Error::InvalidParams);
        }

        match params.kind {
            PresaleKind::Fixed => {
                if params.soft_cap <= 0 || params.hard_cap < params.soft_cap {
                    panic_with_error!(&env, Error::InvalidCaps);
                }
            }
            PresaleKind::Dynamic => {
                // hard_cap == 0 means uncapped.
                if params.soft_cap <= 0
                    || (params.hard_cap != 0 && params.hard_cap < params.soft_cap)
                {
                    panic_with_error!(&env, Error::InvalidCaps);
                }
            }
        }

        let now = env.ledger().timestamp();
        let start_time = now + params.start_delay;
        let end_time = start_time + params.duration;

        let (wl_start, wl_end) = if params.whitelisted {
            // Whitelisting is a Fixed-round feature and the sub-window
            // must nest inside the sale window.
            if params.kind != PresaleKind::Fixed {
                panic_with_error!(&env, Error::InvalidParams);
            }
            let wl_start = now + params.wl_start_delay;
            let wl_end = wl_start + params.wl_duration;
            if params.wl_duration == 0 || wl_start < start_time || wl_end > end_time {
                panic_with_error!(&env, Error::InvalidTimeWindow);
            }
            (wl_start, wl_end)
        } else {
            (0, 0)
        };

        let id = get_and_increment_presale_id(&env);

        let config = PresaleConfig {
            id,
            kind: params.kind,
            creator: creator.clone(),
            sale_asset: params.sale_asset.clone(),
            raise_asset: params.raise_asset.clone(),
            sale_units_total: params.sale_units_total,
            soft_cap: params.soft_cap,
            hard_cap: params.hard_cap,
            min_contribution: params.min_contribution,
            max_contribution: params.max_contribution,
            start_time,
            end_time,
            whitelisted: params.whitelisted,
            wl_start,
            wl_end,
        };
        let state = PresaleState {
            status: PresaleStatus::Active,
            amount_raised: 0,
            sale_units_sold: 0,
            proceeds_withdrawn: false,
            leftover_withdrawn: false,
        };

        // Escrow the sale asset before the round becomes visible.
        token::Client::new(&env, &config.sale_asset).transfer(
            &creator,
            &env.current_contract_address(),
            &config.sale_units_total,
        );

        save_presale(&env, &config, &state);

        events::presale_created(
            &env,
            events::PresaleCreated {
                presale_id: id,
                creator,
                sale_asset: config.sale_asset.clone(),
                raise_asset: config.raise_asset.clone(),
                sale_units_total: config.sale_units_total,
            },
        );

        release_reentry_lock(&env);
        id
    }

    // ─────────────────────────────────────────────────────────
    // Participation
    // ─────────────────────────────────────────────────────────

    /// Contribute `amount` of the raise asset to a round.
    ///
    /// The accepted amount is clamped to the hard-cap remainder and only
    /// the accepted amount is pulled from the contributor, so no excess
    /// ever needs refunding. Returns the accepted amount.
    pub fn participate(env: Env, presale_id: u64, contributor: Address, amount: i128) -> i128 {
        contributor.require_auth();
        require_not_paused(&env);
        acquire_reentry_lock(&env);

        let config = load_config(&env, presale_id);
        let mut state = load_state(&env, presale_id);

        let now = env.ledger().timestamp();
        if now < config.start_time {
            panic_with_error!(&env, Error::SaleNotStarted);
        }
        if now > config.end_time {
            panic_with_error!(&env, Error::SaleEnded);
        }
        match state.status {
            PresaleStatus::Active => {}
            PresaleStatus::Filled => panic_with_error!(&env, Error::SaleFilled),
            PresaleStatus::Finalized | PresaleStatus::Cancelled => {
                panic_with_error!(&env, Error::AlreadyFinalized)
            }
        }
        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }
        if amount < config.min_contribution {
            panic_with_error!(&env, Error::BelowMinContribution);
        }

        // Whitelist gate: a whitelisted round rejects everyone before the
        // sub-window opens, gates on membership inside it, and is open to
        // the public once it closes.
        if config.whitelisted {
            if now < config.wl_start {
                panic_with_error!(&env, Error::SaleNotStarted);
            }
            if now <= config.wl_end && !storage::is_whitelisted(&env, presale_id, &contributor) {
                panic_with_error!(&env, Error::NotWhitelisted);
            }
        }

        // Clamp to the hard-cap remainder (hard_cap == 0 on a Dynamic
        // round means uncapped).
        let take = if config.hard_cap > 0 {
            let remaining = config.hard_cap - state.amount_raised;
            if remaining <= 0 {
                panic_with_error!(&env, Error::SaleFilled);
            }
            amount.min(remaining)
        } else {
            amount
        };

        let mut entry = load_contribution(&env, presale_id, &contributor);
        let cumulative = entry
            .amount_contributed
            .checked_add(take)
            .unwrap_or_else(|| panic_with_error!(&env, Error::Overflow));
        if config.max_contribution > 0 && cumulative > config.max_contribution {
            panic_with_error!(&env, Error::AboveMaxContribution);
        }

        // Pull exactly `take` from the contributor.
        token::Client::new(&env, &config.raise_asset).transfer(
            &contributor,
            &env.current_contract_address(),
            &take,
        );

        let claimable = match config.kind {
            PresaleKind::Fixed => {
                let token_amount =
                    fees::fixed_allocation(take, config.sale_units_total, config.hard_cap)
                        .unwrap_or_else(|| panic_with_error!(&env, Error::Overflow));
                let token_amount = fees::clamp_to_remaining(
                    token_amount,
                    state.sale_units_sold,
                    config.sale_units_total,
                );
                state.sale_units_sold += token_amount;
                entry.amount_claimable += token_amount;
                token_amount
            }
            // Dynamic allocation is deferred to claim time.
            PresaleKind::Dynamic => 0,
        };

        state.amount_raised += take;
        entry.amount_contributed = cumulative;

        // `Filled` is a Fixed-round flag; a capped Dynamic round simply
        // stops accepting once the remainder hits zero.
        if config.kind == PresaleKind::Fixed && state.amount_raised >= config.hard_cap {
            state.status = PresaleStatus::Filled;
        }

        save_state(&env, presale_id, &state);
        save_contribution(&env, presale_id, &contributor, &entry);
        adjust_total_raised(&env, &config.raise_asset, take);

        events::contribution_accepted(
            &env,
            events::ContributionAccepted {
                presale_id,
                contributor,
                amount: take,
                claimable,
            },
        );

        release_reentry_lock(&env);
        take
    }

    /// Voluntary early exit: refund the caller's whole contribution minus
    /// the fixed penalty.
    ///
    /// Only possible while the window is open and the soft cap has not been
    /// reached — once the raise is viable, capital is locked in.
    pub fn pull_out(env: Env, presale_id: u64, contributor: Address) {
        contributor.require_auth();
        require_not_paused(&env);
        acquire_reentry_lock(&env);

        let config = load_config(&env, presale_id);
        let mut state = load_state(&env, presale_id);

        if env.ledger().timestamp() > config.end_time {
            panic_with_error!(&env, Error::SaleEnded);
        }
        if state.amount_raised >= config.soft_cap {
            panic_with_error!(&env, Error::SoftCapReached);
        }

        let entry = load_contribution(&env, presale_id, &contributor);
        if entry.amount_contributed <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        // Effects before interaction: zero the ledger entry, release the
        // reserved sale units, decrement the raise.
        state.amount_raised -= entry.amount_contributed;
        state.sale_units_sold -= entry.amount_claimable;
        save_state(&env, presale_id, &state);
        save_contribution(&env, presale_id, &contributor, &Contribution::zero());
        adjust_total_raised(&env, &config.raise_asset, -entry.amount_contributed);

        let (penalty, refund) = fees::pull_out_split(entry.amount_contributed);
        let client = token::Client::new(&env, &config.raise_asset);
        if refund > 0 {
            client.transfer(&env.current_contract_address(), &contributor, &refund);
        }
        if penalty > 0 {
            client.transfer(
                &env.current_contract_address(),
                &storage::get_fee_sink(&env),
                &penalty,
            );
        }

        events::contribution_pulled(
            &env,
            events::ContributionPulled {
                presale_id,
                contributor,
                refund,
                penalty,
            },
        );

        release_reentry_lock(&env);
    }

    // ─────────────────────────────────────────────────────────
    // Finalization
    // ─────────────────────────────────────────────────────────

    /// Resolve a round after its window closes. Moves no funds; only flips
    /// the terminal state, decoupling the one-time decision from the
    /// idempotent settlement operations.
    ///
    /// Outcomes, evaluated in order:
    /// 1. soft cap met, within the grace period — creator only, finalized;
    /// 2. soft cap met, grace period elapsed — anyone, finalized;
    /// 3. soft cap missed — anyone, cancelled.
    pub fn finalize(env: Env, presale_id: u64, caller: Address) {
        caller.require_auth();
        require_not_paused(&env);

        let config = load_config(&env, presale_id);
        let mut state = load_state(&env, presale_id);

        match state.status {
            PresaleStatus::Active | PresaleStatus::Filled => {}
            PresaleStatus::Finalized | PresaleStatus::Cancelled => {
                panic_with_error!(&env, Error::AlreadyFinalized)
            }
        }

        let now = env.ledger().timestamp();
        if now <= config.end_time {
            panic_with_error!(&env, Error::SaleNotEnded);
        }

        if state.amount_raised >= config.soft_cap {
            if now - config.end_time <= FINALIZE_GRACE_SECS && caller != config.creator {
                panic_with_error!(&env, Error::NotAuthorized);
            }
            state.status = PresaleStatus::Finalized;
            save_state(&env, presale_id, &state);
            events::presale_finalized(
                &env,
                events::PresaleFinalized {
                    presale_id,
                    amount_raised: state.amount_raised,
                },
            );
        } else {
            state.status = PresaleStatus::Cancelled;
            save_state(&env, presale_id, &state);
            events::presale_cancelled(
                &env,
                events::PresaleCancelled {
                    presale_id,
                    amount_raised: state.amount_raised,
                },
            );
        }
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Claim purchased sale units from a finalized round.
    ///
    /// Fixed rounds pay out the precomputed claimable; Dynamic rounds
    /// derive the pro-rata share of the final raise here. The contribution
    /// entry is zeroed before the transfer, so a second call finds nothing
    /// and fails with `InvalidAmount`.
    pub fn claim_tokens(env: Env, presale_id: u64, contributor: Address) {
        contributor.require_auth();
        require_not_paused(&env);
        acquire_reentry_lock(&env);

        let config = load_config(&env, presale_id);
        let mut state = load_state(&env, presale_id);
        require_finalized(&env, &state);

        let entry = load_contribution(&env, presale_id, &contributor);
        if entry.amount_contributed <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        let amount = match config.kind {
            PresaleKind::Fixed => entry.amount_claimable,
            PresaleKind::Dynamic => {
                let share = fees::pro_rata_allocation(
                    entry.amount_contributed,
                    config.sale_units_total,
                    state.amount_raised,
                )
                .unwrap_or_else(|| panic_with_error!(&env, Error::Overflow));
                let share = fees::clamp_to_remaining(
                    share,
                    state.sale_units_sold,
                    config.sale_units_total,
                );
                state.sale_units_sold += share;
                share
            }
        };
        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        save_contribution(&env, presale_id, &contributor, &Contribution::zero());
        save_state(&env, presale_id, &state);

        token::Client::new(&env, &config.sale_asset).transfer(
            &env.current_contract_address(),
            &contributor,
            &amount,
        );

        events::tokens_claimed(
            &env,
            events::TokensClaimed {
                presale_id,
                contributor,
                amount,
            },
        );

        release_reentry_lock(&env);
    }

    /// Recover a contribution from a cancelled round, in full.
    pub fn claim_refund(env: Env, presale_id: u64, contributor: Address) {
        contributor.require_auth();
        require_not_paused(&env);
        acquire_reentry_lock(&env);

        let config = load_config(&env, presale_id);
        let state = load_state(&env, presale_id);
        require_cancelled(&env, &state);

        let entry = load_contribution(&env, presale_id, &contributor);
        if entry.amount_contributed <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        save_contribution(&env, presale_id, &contributor, &Contribution::zero());

        token::Client::new(&env, &config.raise_asset).transfer(
            &env.current_contract_address(),
            &contributor,
            &entry.amount_contributed,
        );

        events::refund_issued(
            &env,
            events::RefundIssued {
                presale_id,
                contributor,
                amount: entry.amount_contributed,
            },
        );

        release_reentry_lock(&env);
    }

    /// Return the full escrowed sale asset to the creator of a cancelled
    /// round. A cancelled round never allocates sale units to contributors,
    /// so nothing is subtracted for amounts "sold" before cancellation.
    pub fn withdraw_escrow_on_cancel(env: Env, presale_id: u64, caller: Address) {
        caller.require_auth();
        require_not_paused(&env);
        acquire_reentry_lock(&env);

        let config = load_config(&env, presale_id);
        let mut state = load_state(&env, presale_id);
        require_cancelled(&env, &state);
        if caller != config.creator {
            panic_with_error!(&env, Error::NotAuthorized);
        }
        if state.leftover_withdrawn {
            panic_with_error!(&env, Error::AlreadyWithdrawn);
        }

        state.leftover_withdrawn = true;
        save_state(&env, presale_id, &state);

        token::Client::new(&env, &config.sale_asset).transfer(
            &env.current_contract_address(),
            &config.creator,
            &config.sale_units_total,
        );

        events::leftover_withdrawn(
            &env,
            events::LeftoverWithdrawn {
                presale_id,
                payout: config.sale_units_total,
                fee: 0,
            },
        );

        release_reentry_lock(&env);
    }

    /// Pay the raise proceeds of a finalized round to the creator, minus
    /// the platform fee read at this moment. Once per round; the first
    /// successful withdrawal counts the round as funded.
    pub fn withdraw_proceeds(env: Env, presale_id: u64, caller: Address) {
        caller.require_auth();
        require_not_paused(&env);
        acquire_reentry_lock(&env);

        let config = load_config(&env, presale_id);
        let mut state = load_state(&env, presale_id);
        require_finalized(&env, &state);
        if caller != config.creator {
            panic_with_error!(&env, Error::NotAuthorized);
        }
        if state.proceeds_withdrawn {
            panic_with_error!(&env, Error::AlreadyWithdrawn);
        }

        let (fee, payout) =
            fees::platform_fee_split(state.amount_raised, storage::get_fee_percent(&env));

        state.proceeds_withdrawn = true;
        save_state(&env, presale_id, &state);
        storage::increment_funded_count(&env);

        let client = token::Client::new(&env, &config.raise_asset);
        if payout > 0 {
            client.transfer(&env.current_contract_address(), &config.creator, &payout);
        }
        if fee > 0 {
            client.transfer(
                &env.current_contract_address(),
                &storage::get_fee_sink(&env),
                &fee,
            );
        }

        events::proceeds_withdrawn(
            &env,
            events::ProceedsWithdrawn {
                presale_id,
                payout,
                fee,
            },
        );

        release_reentry_lock(&env);
    }

    /// Return unsold sale units of a finalized Fixed round to the creator,
    /// minus the platform fee. Once per round.
    pub fn withdraw_leftover_tokens(env: Env, presale_id: u64, caller: Address) {
        caller.require_auth();
        require_not_paused(&env);
        acquire_reentry_lock(&env);

        let config = load_config(&env, presale_id);
        let mut state = load_state(&env, presale_id);
        require_finalized(&env, &state);
        if config.kind != PresaleKind::Fixed {
            panic_with_error!(&env, Error::InvalidParams);
        }
        if caller != config.creator {
            panic_with_error!(&env, Error::NotAuthorized);
        }
        if state.leftover_withdrawn {
            panic_with_error!(&env, Error::AlreadyWithdrawn);
        }

        let leftover = config.sale_units_total - state.sale_units_sold;
        if leftover <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        let (fee, payout) = fees::platform_fee_split(leftover, storage::get_fee_percent(&env));

        state.leftover_withdrawn = true;
        save_state(&env, presale_id, &state);

        let client = token::Client::new(&env, &config.sale_asset);
        if payout > 0 {
            client.transfer(&env.current_contract_address(), &config.creator, &payout);
        }
        if fee > 0 {
            client.transfer(
                &env.current_contract_address(),
                &storage::get_fee_sink(&env),
                &fee,
            );
        }

        events::leftover_withdrawn(
            &env,
            events::LeftoverWithdrawn {
                presale_id,
                payout,
                fee,
            },
        );

        release_reentry_lock(&env);
    }

    // ─────────────────────────────────────────────────────────
    // Whitelist management
    // ─────────────────────────────────────────────────────────

    /// Admit a batch of addresses to a whitelisted round. Creator only,
    /// only while the sub-window is still open, batch size bounded.
    pub fn add_to_whitelist(env: Env, presale_id: u64, caller: Address, addresses: Vec<Address>) {
        let count = Self::whitelist_update(&env, presale_id, &caller, &addresses, true);
        events::whitelist_added(&env, events::WhitelistUpdated { presale_id, count });
    }

    /// Remove a batch of addresses from a whitelisted round.
    pub fn remove_from_whitelist(
        env: Env,
        presale_id: u64,
        caller: Address,
        addresses: Vec<Address>,
    ) {
        let count = Self::whitelist_update(&env, presale_id, &caller, &addresses, false);
        events::whitelist_removed(&env, events::WhitelistUpdated { presale_id, count });
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Retrieve a round's full record by its ID.
    pub fn get_presale(env: Env, presale_id: u64) -> Presale {
        storage::load_presale(&env, presale_id)
    }

    /// A contributor's current ledger entry for a round (zeros for an
    /// address that never participated or has already settled).
    pub fn get_contribution(env: Env, presale_id: u64, contributor: Address) -> Contribution {
        load_contribution(&env, presale_id, &contributor)
    }

    pub fn is_whitelisted(env: Env, presale_id: u64, address: Address) -> bool {
        storage::is_whitelisted(&env, presale_id, &address)
    }

    pub fn get_stats(env: Env) -> ProtocolStats {
        ProtocolStats {
            presale_count: storage::get_presale_count(&env),
            funded_count: storage::get_funded_count(&env),
        }
    }

    /// Lifetime raise-asset units accepted across all rounds for `asset`,
    /// net of pull-outs.
    pub fn get_total_raised(env: Env, asset: Address) -> i128 {
        storage::get_total_raised(&env, &asset)
    }

    pub fn get_fee_percent(env: Env) -> u32 {
        storage::get_fee_percent(&env)
    }

    pub fn get_fee_sink(env: Env) -> Address {
        storage::get_fee_sink(&env)
    }

    pub fn get_whitelist_batch_cap(env: Env) -> u32 {
        storage::get_wl_batch_cap(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }
}

impl PresaleProtocol {
    fn whitelist_update(
        env: &Env,
        presale_id: u64,
        caller: &Address,
        addresses: &Vec<Address>,
        add: bool,
    ) -> u32 {
        caller.require_auth();
        require_not_paused(env);

        let config = load_config(env, presale_id);
        if !config.whitelisted {
            panic_with_error!(env, Error::InvalidParams);
        }
        if *caller != config.creator {
            panic_with_error!(env, Error::NotAuthorized);
        }
        if env.ledger().timestamp() > config.wl_end {
            panic_with_error!(env, Error::WhitelistClosed);
        }
        if addresses.len() > storage::get_wl_batch_cap(env) {
            panic_with_error!(env, Error::BatchTooLarge);
        }

        for address in addresses.iter() {
            if add {
                storage::add_whitelisted(env, presale_id, &address);
            } else {
                storage::remove_whitelisted(env, presale_id, &address);
            }
        }
        addresses.len()
    }
}

fn require_not_paused(env: &Env) {
    if storage::is_paused(env) {
        panic_with_error!(env, Error::ProtocolPaused);
    }
}

fn require_finalized(env: &Env, state: &PresaleState) {
    match state.status {
        PresaleStatus::Finalized => {}
        PresaleStatus::Cancelled => panic_with_error!(env, Error::NotFinalized),
        PresaleStatus::Active | PresaleStatus::Filled => {
            panic_with_error!(env, Error::NotFinalized)
        }
    }
}

fn require_cancelled(env: &Env, state: &PresaleState) {
    match state.status {
        PresaleStatus::Cancelled => {}
        PresaleStatus::Finalized | PresaleStatus::Active | PresaleStatus::Filled => {
            panic_with_error!(env, Error::NotCancelled)
        }
    }
}
