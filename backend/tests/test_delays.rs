//! Tests for voyage duration and delay computation

use fleet_allocator_core_rs::{
    periods_busy, DelayPolicy, Route, FALLBACK_VOYAGE_DAYS, PANAMA_CLOSURE_EXTRA_DAYS,
    SUEZ_CLOSURE_EXTRA_DAYS,
};

fn suez_route(avg: Option<u32>) -> Route {
    Route::new("AsiaEuropeSuez", "ASIA", "EUR", 3, avg)
}

fn panama_route(avg: Option<u32>) -> Route {
    Route::new("UsEastPanama", "NA", "ASIA", 2, avg)
}

#[test]
fn test_open_canals_no_adjustment() {
    let policy = DelayPolicy::new(false, false);
    assert_eq!(policy.voyage_days(&suez_route(Some(45))), 45);
    assert_eq!(policy.voyage_days(&panama_route(Some(35))), 35);
}

#[test]
fn test_fallback_when_catalog_has_no_average() {
    let policy = DelayPolicy::new(false, false);
    assert_eq!(
        policy.voyage_days(&suez_route(None)),
        FALLBACK_VOYAGE_DAYS
    );
}

#[test]
fn test_suez_closure_adds_fourteen_days() {
    let open = DelayPolicy::new(false, false);
    let closed = DelayPolicy::new(true, false);
    let route = suez_route(Some(45));

    assert_eq!(
        closed.voyage_days(&route),
        open.voyage_days(&route) + SUEZ_CLOSURE_EXTRA_DAYS
    );
}

#[test]
fn test_panama_closure_adds_ten_days() {
    let open = DelayPolicy::new(false, false);
    let closed = DelayPolicy::new(false, true);
    let route = panama_route(Some(35));

    assert_eq!(
        closed.voyage_days(&route),
        open.voyage_days(&route) + PANAMA_CLOSURE_EXTRA_DAYS
    );
}

#[test]
fn test_closure_requires_category_marker() {
    // Both canals closed, but the category names neither.
    let policy = DelayPolicy::new(true, true);
    let route = Route::new("TransPacific", "ASIA", "NA", 2, Some(28));
    assert_eq!(policy.voyage_days(&route), 28);
}

#[test]
fn test_closure_and_congestion_are_independent() {
    let route = suez_route(Some(45));

    let congestion_only = DelayPolicy::new(false, false).with_congestion("AsiaEuropeSuez", 6);
    let closure_only = DelayPolicy::new(true, false);
    let both = DelayPolicy::new(true, false).with_congestion("AsiaEuropeSuez", 6);

    assert_eq!(congestion_only.voyage_days(&route), 51);
    assert_eq!(closure_only.voyage_days(&route), 59);
    // The two adjustments add independently.
    assert_eq!(both.voyage_days(&route), 65);
}

#[test]
fn test_congestion_applies_to_fallback_duration() {
    let policy = DelayPolicy::new(false, false).with_congestion("AsiaEuropeSuez", 10);
    assert_eq!(
        policy.voyage_days(&suez_route(None)),
        FALLBACK_VOYAGE_DAYS + 10
    );
}

#[test]
fn test_congestion_for_unlisted_category_is_zero() {
    let policy = DelayPolicy::new(false, false).with_congestion("AsiaEuropeSuez", 10);
    assert_eq!(policy.congestion_for("TransPacific"), 0);
}

#[test]
fn test_periods_busy_conversion() {
    assert_eq!(periods_busy(29), 0);
    assert_eq!(periods_busy(30), 1);
    assert_eq!(periods_busy(40), 1);
    assert_eq!(periods_busy(74), 2);
    assert_eq!(periods_busy(120), 4);
}
