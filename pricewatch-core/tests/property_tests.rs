//! Property tests for core invariants.
//!
//! Uses proptest to verify:
//! 1. Snapshot round-trip — load(save(s)) == s for arbitrary alert sets
//! 2. Parser totality on well-formed targets — render then parse agrees
//! 3. Identity stability — alert id never depends on the observed price
//! 4. Diff soundness — diff_new returns exactly the ids absent from previous

use proptest::prelude::*;
use std::collections::BTreeMap;
use tempfile::TempDir;

use pricewatch_core::domain::{alert_id, Alert, AlertSnapshot, Direction, ThresholdRule};
use pricewatch_core::evaluate::evaluate;
use pricewatch_core::snapshot::{diff_new, SnapshotStore};
use pricewatch_core::watchlist::parse_targets;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_ticker() -> impl Strategy<Value = String> {
    "[A-Z]{1,5}"
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Above), Just(Direction::Below)]
}

fn arb_target() -> impl Strategy<Value = f64> {
    (0.01..5000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_alert() -> impl Strategy<Value = Alert> {
    (arb_ticker(), arb_direction(), arb_target(), arb_target()).prop_map(
        |(ticker, direction, target, price)| Alert {
            id: alert_id(&ticker, direction, target),
            ticker: ticker.clone(),
            direction,
            target_price: target,
            current_price: price,
            message: format!("{ticker} is {direction} ${target:.2} (current: ${price:.2})"),
            timestamp: "2024-06-03T14:30:00Z".parse().unwrap(),
        },
    )
}

fn arb_snapshot() -> impl Strategy<Value = AlertSnapshot> {
    prop::collection::vec(arb_alert(), 0..12).prop_map(|alerts| {
        alerts
            .into_iter()
            .map(|a| (a.id.clone(), a))
            .collect::<BTreeMap<_, _>>()
    })
}

// ── 1. Snapshot round-trip ───────────────────────────────────────────

proptest! {
    /// Persisting and reloading any snapshot reproduces it exactly.
    #[test]
    fn snapshot_roundtrips_through_disk(snapshot in arb_snapshot()) {
        let tmp = TempDir::new().unwrap();
        let store = SnapshotStore::new(tmp.path().join("previous_alerts.json"));

        store.save(&snapshot).unwrap();
        let loaded = store.load().unwrap();
        prop_assert_eq!(loaded, snapshot);
    }
}

// ── 2. Parser agrees with the rendered grammar ───────────────────────

proptest! {
    /// Any rule rendered back into the target grammar parses to itself.
    #[test]
    fn rendered_target_parses_back(
        direction in arb_direction(),
        target in arb_target(),
        deferred in any::<bool>(),
    ) {
        let marker = match direction {
            Direction::Above => '>',
            Direction::Below => '<',
        };
        let suffix = if deferred { "+" } else { "" };
        let token = format!("{marker}{target}{suffix}");

        let rules = parse_targets("AAPL", [token.as_str()]).unwrap();
        prop_assert_eq!(
            &rules[..],
            &[ThresholdRule { direction, price: target, deferred }][..]
        );
    }
}

// ── 3. Identity ignores the observed price ───────────────────────────

proptest! {
    /// Two evaluations of the same rule at different prices share an id.
    #[test]
    fn alert_id_is_stable_across_prices(
        target in arb_target(),
        bump_a in 0.01..100.0_f64,
        bump_b in 0.01..100.0_f64,
    ) {
        let rules = [ThresholdRule::new(Direction::Above, target)];
        let now = "2024-06-03T14:30:00Z".parse().unwrap();

        let a = evaluate("AAPL", Some(target + bump_a), &rules, now);
        let b = evaluate("AAPL", Some(target + bump_b), &rules, now);
        prop_assert_eq!(&a[0].id, &b[0].id);
    }
}

// ── 4. Diff soundness ────────────────────────────────────────────────

proptest! {
    /// diff_new returns exactly the current entries whose id is new.
    #[test]
    fn diff_new_partitions_current(
        current in arb_snapshot(),
        previous in arb_snapshot(),
    ) {
        let new_alerts = diff_new(&current, &previous);

        for alert in &new_alerts {
            prop_assert!(current.contains_key(&alert.id));
            prop_assert!(!previous.contains_key(&alert.id));
        }

        let expected = current
            .keys()
            .filter(|id| !previous.contains_key(*id))
            .count();
        prop_assert_eq!(new_alerts.len(), expected);
    }
}
