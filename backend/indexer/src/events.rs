//! Canonical event types emitted by the presale protocol contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/presale_protocol/src/events.rs` and must stay in sync with
//! the topic symbols used there.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the presale contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A new round was created (`created` topic).
    PresaleCreated,
    /// A contribution was accepted (`contrib` topic).
    ContributionAccepted,
    /// A contributor pulled out early (`pulled` topic).
    ContributionPulled,
    /// A round finalized successfully (`finalized` topic).
    PresaleFinalized,
    /// A round missed its soft cap and was cancelled (`cancelled` topic).
    PresaleCancelled,
    /// Sale units were claimed (`claimed` topic).
    TokensClaimed,
    /// A cancelled-round refund was issued (`refunded` topic).
    RefundIssued,
    /// Raise proceeds were withdrawn by the creator (`proceeds` topic).
    ProceedsWithdrawn,
    /// Unsold units or cancelled escrow were withdrawn (`leftover` topic).
    LeftoverWithdrawn,
    /// Addresses were whitelisted (`wl_add` topic).
    WhitelistAdded,
    /// Addresses were removed from a whitelist (`wl_del` topic).
    WhitelistRemoved,
    /// Protocol was paused (`paused` topic).
    ProtocolPaused,
    /// Protocol was unpaused (`unpaused` topic).
    ProtocolUnpaused,
    /// Platform fee percent changed (`fee_set` topic).
    FeeUpdated,
    /// Fee sink address changed (`sink_set` topic).
    FeeSinkUpdated,
    /// Whitelist batch cap changed (`cap_set` topic).
    BatchCapUpdated,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an
    /// [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::PresaleCreated,
            "contrib" => Self::ContributionAccepted,
            "pulled" => Self::ContributionPulled,
            "finalized" => Self::PresaleFinalized,
            "cancelled" => Self::PresaleCancelled,
            "claimed" => Self::TokensClaimed,
            "refunded" => Self::RefundIssued,
            "proceeds" => Self::ProceedsWithdrawn,
            "leftover" => Self::LeftoverWithdrawn,
            "wl_add" => Self::WhitelistAdded,
            "wl_del" => Self::WhitelistRemoved,
            "paused" => Self::ProtocolPaused,
            "unpaused" => Self::ProtocolUnpaused,
            "fee_set" => Self::FeeUpdated,
            "sink_set" => Self::FeeSinkUpdated,
            "cap_set" => Self::BatchCapUpdated,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PresaleCreated => "presale_created",
            Self::ContributionAccepted => "contribution_accepted",
            Self::ContributionPulled => "contribution_pulled",
            Self::PresaleFinalized => "presale_finalized",
            Self::PresaleCancelled => "presale_cancelled",
            Self::TokensClaimed => "tokens_claimed",
            Self::RefundIssued => "refund_issued",
            Self::ProceedsWithdrawn => "proceeds_withdrawn",
            Self::LeftoverWithdrawn => "leftover_withdrawn",
            Self::WhitelistAdded => "whitelist_added",
            Self::WhitelistRemoved => "whitelist_removed",
            Self::ProtocolPaused => "protocol_paused",
            Self::ProtocolUnpaused => "protocol_unpaused",
            Self::FeeUpdated => "fee_updated",
            Self::FeeSinkUpdated => "fee_sink_updated",
            Self::BatchCapUpdated => "batch_cap_updated",
            Self::Unknown => "unknown",
        }
    }
}

/// A fully decoded presale event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresaleEvent {
    pub event_type: String,
    pub presale_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub presale_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
