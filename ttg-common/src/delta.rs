//! Per-test percentage-change calculation.

use crate::report::ReportSet;
use std::collections::BTreeMap;

/// Mapping from test key to signed percentage change, restricted to keys
/// present in both report sets.
pub type DeltaSet = BTreeMap<String, f64>;

/// Compute the signed percentage change for every test present in both runs.
///
/// The change is `(compare - base) / base * 100`. A zero base duration maps
/// to `0.0`: a test that was instant in the base run is never reported as a
/// regression, whatever its compare duration. Pure function, no side effects.
pub fn percentage_changed(base: &ReportSet, compare: &ReportSet) -> DeltaSet {
    let mut changed = DeltaSet::new();
    for (key, base_secs) in base {
        let Some(compare_secs) = compare.get(key) else {
            continue;
        };
        let pct = if *base_secs == 0.0 {
            0.0
        } else {
            (compare_secs - base_secs) / base_secs * 100.0
        };
        changed.insert(key.clone(), pct);
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(entries: &[(&str, f64)]) -> ReportSet {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_delta_restricted_to_shared_keys() {
        let base = set(&[("s.C.t1", 1.0), ("s.C.only_base", 2.0)]);
        let compare = set(&[("s.C.t1", 1.5), ("s.C.only_compare", 3.0)]);

        let delta = percentage_changed(&base, &compare);
        assert_eq!(delta.len(), 1);
        assert!((delta["s.C.t1"] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_delta_zero_base_guards_division() {
        let base = set(&[("s.C.t1", 0.0)]);
        let compare = set(&[("s.C.t1", 5.0)]);

        let delta = percentage_changed(&base, &compare);
        assert_eq!(delta["s.C.t1"], 0.0);
    }

    #[test]
    fn test_delta_signed_for_improvements() {
        let base = set(&[("s.C.t1", 10.0)]);
        let compare = set(&[("s.C.t1", 5.0)]);

        let delta = percentage_changed(&base, &compare);
        assert!((delta["s.C.t1"] - -50.0).abs() < 1e-9);
    }

    #[test]
    fn test_delta_is_idempotent() {
        let base = set(&[("s.C.t1", 10.0), ("s.C.t2", 0.0)]);
        let compare = set(&[("s.C.t1", 11.0), ("s.C.t2", 4.0)]);

        let first = percentage_changed(&base, &compare);
        let second = percentage_changed(&base, &compare);
        assert_eq!(first, second);
    }

    fn report_set_strategy() -> impl Strategy<Value = ReportSet> {
        proptest::collection::btree_map("[a-d]\\.[A-B]\\.[a-z]{1,3}", 0.0f64..1000.0, 0..12)
    }

    proptest! {
        #[test]
        fn prop_delta_keys_are_exactly_the_intersection(
            base in report_set_strategy(),
            compare in report_set_strategy(),
        ) {
            let delta = percentage_changed(&base, &compare);
            for key in delta.keys() {
                prop_assert!(base.contains_key(key) && compare.contains_key(key));
            }
            for key in base.keys() {
                if compare.contains_key(key) {
                    prop_assert!(delta.contains_key(key));
                }
            }
        }

        #[test]
        fn prop_delta_formula_and_zero_guard_hold(
            base in report_set_strategy(),
            compare in report_set_strategy(),
        ) {
            let delta = percentage_changed(&base, &compare);
            for (key, pct) in &delta {
                let b = base[key];
                let c = compare[key];
                if b == 0.0 {
                    prop_assert_eq!(*pct, 0.0);
                } else {
                    let expected = (c - b) / b * 100.0;
                    prop_assert!((pct - expected).abs() <= 1e-9 * expected.abs().max(1.0));
                }
            }
        }
    }
}
