#![allow(dead_code)]

extern crate std;

use crate::types::{Presale, PresaleKind, PresaleStatus};

/// INV-1: Sale units sold must never exceed the escrowed total.
pub fn assert_unit_conservation(presale: &Presale) {
    assert!(
        presale.sale_units_sold <= presale.sale_units_total,
        "INV-1 violated: round {} sold {} of {} units",
        presale.id,
        presale.sale_units_sold,
        presale.sale_units_total
    );
    assert!(
        presale.sale_units_sold >= 0,
        "INV-1 violated: round {} has negative units sold",
        presale.id
    );
}

/// INV-2: A Fixed round's raise never exceeds its hard cap; a capped
/// Dynamic round likewise.
pub fn assert_cap_respected(presale: &Presale) {
    if presale.hard_cap > 0 {
        assert!(
            presale.amount_raised <= presale.hard_cap,
            "INV-2 violated: round {} raised {} over hard cap {}",
            presale.id,
            presale.amount_raised,
            presale.hard_cap
        );
    }
}

/// INV-3: Cap ordering holds for every stored round.
pub fn assert_caps_consistent(presale: &Presale) {
    assert!(presale.soft_cap > 0, "INV-3 violated: non-positive soft cap");
    match presale.kind {
        PresaleKind::Fixed => assert!(
            presale.hard_cap >= presale.soft_cap,
            "INV-3 violated: hard cap below soft cap"
        ),
        PresaleKind::Dynamic => assert!(
            presale.hard_cap == 0 || presale.hard_cap >= presale.soft_cap,
            "INV-3 violated: capped dynamic round below soft cap"
        ),
    }
}

/// INV-4: Status transition validity. Only forward transitions are allowed:
///   Active    -> Filled | Finalized | Cancelled
///   Filled    -> Finalized | Cancelled
///   Finalized -> (none)
///   Cancelled -> (none)
pub fn assert_valid_status_transition(from: &PresaleStatus, to: &PresaleStatus) {
    let valid = matches!(
        (from, to),
        (PresaleStatus::Active, PresaleStatus::Filled)
            | (PresaleStatus::Active, PresaleStatus::Finalized)
            | (PresaleStatus::Active, PresaleStatus::Cancelled)
            | (PresaleStatus::Filled, PresaleStatus::Finalized)
            | (PresaleStatus::Filled, PresaleStatus::Cancelled)
    );

    assert!(
        valid,
        "INV-4 violated: invalid status transition from {:?} to {:?}",
        from, to
    );
}

/// INV-5: Participation invariant — after accepting `take`, the raise
/// increases by exactly `take`.
pub fn assert_raise_invariant(raised_before: i128, raised_after: i128, take: i128) {
    assert_eq!(
        raised_after,
        raised_before + take,
        "INV-5 violated: {} + {} != {}",
        raised_before,
        take,
        raised_after
    );
}

/// INV-6: Round data immutability — config fields never change after
/// creation.
pub fn assert_immutable_fields(original: &Presale, current: &Presale) {
    assert_eq!(original.id, current.id, "INV-6 violated: id changed");
    assert_eq!(
        original.creator, current.creator,
        "INV-6 violated: creator changed"
    );
    assert_eq!(
        original.sale_asset, current.sale_asset,
        "INV-6 violated: sale asset changed"
    );
    assert_eq!(
        original.raise_asset, current.raise_asset,
        "INV-6 violated: raise asset changed"
    );
    assert_eq!(
        original.sale_units_total, current.sale_units_total,
        "INV-6 violated: escrow total changed"
    );
    assert_eq!(
        original.soft_cap, current.soft_cap,
        "INV-6 violated: soft cap changed"
    );
    assert_eq!(
        original.hard_cap, current.hard_cap,
        "INV-6 violated: hard cap changed"
    );
    assert_eq!(
        original.end_time, current.end_time,
        "INV-6 violated: end time changed"
    );
}

/// Run all stateless round invariants.
pub fn assert_all_presale_invariants(presale: &Presale) {
    assert_unit_conservation(presale);
    assert_cap_respected(presale);
    assert_caps_consistent(presale);
}
