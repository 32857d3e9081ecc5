//! # Types
//!
//! Shared data structures used across all modules of the presale protocol.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A `Presale` is internally stored as two separate ledger entries:
//!
//! - [`PresaleConfig`] — written once at creation; never mutated.
//! - [`PresaleState`] — written on every participation and settlement step.
//!
//! The public API exposes the reconstructed [`Presale`] struct for
//! convenience.
//!
//! ### Status as a Finite-State Machine
//!
//! [`PresaleStatus`] enforces a strict forward-only lifecycle:
//!
//! ```text
//! Active ──► Filled ──► Finalized
//!    │          │
//!    │          └─────► Cancelled
//!    ├────────────────► Finalized
//!    └────────────────► Cancelled
//! ```
//!
//! `Filled` is reached only by Fixed rounds whose hard cap is met before the
//! window closes; it does not end the window. `Finalized` and `Cancelled`
//! are terminal and mutually exclusive by construction — they are variants
//! of one enum, not independent booleans. The two settlement latches
//! (`proceeds_withdrawn`, `leftover_withdrawn`) stay as booleans on
//! [`PresaleState`] because they are one-shot guards orthogonal to the
//! lifecycle.

use soroban_sdk::{contracttype, Address};

/// Allocation strategy of a presale round.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PresaleKind {
    /// Sale units are awarded proportionally against the hard cap, computed
    /// at contribution time.
    Fixed,
    /// Sale units are awarded pro-rata against the final total raised,
    /// computed at claim time after finalization.
    Dynamic,
}

/// Lifecycle status of a presale round.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PresaleStatus {
    /// Accepting contributions inside the sale window.
    Active,
    /// Hard cap reached early (Fixed rounds only); no further contributions.
    Filled,
    /// Soft cap met and the round settled successfully.
    Finalized,
    /// Soft cap missed; contributions refundable, escrow returnable.
    Cancelled,
}

/// Immutable round configuration, written once at creation.
///
/// Stored separately from the mutable state so the hot path (participate)
/// only rewrites the small [`PresaleState`] entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PresaleConfig {
    pub id: u64,
    pub kind: PresaleKind,
    /// Address that created the round, escrowed the sale asset, and
    /// receives proceeds.
    pub creator: Address,
    /// Token sold to contributors. Held in escrow for the round's duration.
    pub sale_asset: Address,
    /// Token contributed by participants. Must differ from `sale_asset`;
    /// the native asset is addressed through its Stellar Asset Contract.
    pub raise_asset: Address,
    /// Total sale units escrowed at creation.
    pub sale_units_total: i128,
    /// Minimum raise for the round to finalize successfully.
    pub soft_cap: i128,
    /// Maximum raise accepted. For Dynamic rounds `0` means uncapped.
    pub hard_cap: i128,
    /// Minimum tendered amount per participation call.
    pub min_contribution: i128,
    /// Cumulative per-wallet cap; `0` means no cap.
    pub max_contribution: i128,
    pub start_time: u64,
    pub end_time: u64,
    /// Whether a whitelist sub-window gates early participation
    /// (Fixed rounds only).
    pub whitelisted: bool,
    pub wl_start: u64,
    pub wl_end: u64,
}

/// Mutable round state, updated on participation and settlement.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PresaleState {
    pub status: PresaleStatus,
    /// Raise-asset units currently credited to the round. Decreases only
    /// via `pull_out`.
    pub amount_raised: i128,
    /// Sale units allocated so far. Never exceeds `sale_units_total`.
    pub sale_units_sold: i128,
    /// One-shot latch for `withdraw_proceeds`.
    pub proceeds_withdrawn: bool,
    /// One-shot latch for `withdraw_leftover_tokens` and, on cancelled
    /// rounds, `withdraw_escrow_on_cancel` (the paths are mutually
    /// exclusive).
    pub leftover_withdrawn: bool,
}

/// Full on-chain representation of a presale round.
///
/// Used as the public query return type; reconstructed internally from the
/// split `PresaleConfig` + `PresaleState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Presale {
    pub id: u64,
    pub kind: PresaleKind,
    pub creator: Address,
    pub sale_asset: Address,
    pub raise_asset: Address,
    pub sale_units_total: i128,
    pub soft_cap: i128,
    pub hard_cap: i128,
    pub min_contribution: i128,
    pub max_contribution: i128,
    pub start_time: u64,
    pub end_time: u64,
    pub whitelisted: bool,
    pub wl_start: u64,
    pub wl_end: u64,
    pub status: PresaleStatus,
    pub amount_raised: i128,
    pub sale_units_sold: i128,
    pub proceeds_withdrawn: bool,
    pub leftover_withdrawn: bool,
}

/// Per-round, per-contributor ledger entry.
///
/// Created on first participation; zeroed (not deleted) once refunded or
/// claimed — the zeroing is the idempotence guard against double payment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contribution {
    /// Cumulative raise-asset contributed.
    pub amount_contributed: i128,
    /// Cumulative sale-asset claimable. Precomputed at contribution time
    /// for Fixed rounds; always `0` for Dynamic rounds, whose allocation is
    /// derived at claim time.
    pub amount_claimable: i128,
}

impl Contribution {
    pub fn zero() -> Self {
        Contribution {
            amount_contributed: 0,
            amount_claimable: 0,
        }
    }
}

/// Creation parameters for [`create_presale`](crate::PresaleProtocol::create_presale).
///
/// Times are relative delays from the current ledger timestamp so a
/// transaction cannot fail merely because it was submitted with a stale
/// absolute start.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PresaleParams {
    pub kind: PresaleKind,
    pub sale_asset: Address,
    pub raise_asset: Address,
    pub sale_units_total: i128,
    pub soft_cap: i128,
    pub hard_cap: i128,
    pub min_contribution: i128,
    pub max_contribution: i128,
    pub start_delay: u64,
    pub duration: u64,
    pub whitelisted: bool,
    pub wl_start_delay: u64,
    pub wl_duration: u64,
}

/// Protocol-wide aggregate counters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolStats {
    /// Total rounds ever created.
    pub presale_count: u64,
    /// Rounds whose proceeds were successfully withdrawn.
    pub funded_count: u64,
}
