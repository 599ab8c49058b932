use proptest::prelude::*;

use crate::form::FormValues;
use crate::grid::materialize;
use crate::resolver::{resolve, Domain, RangeInput, ResolveError, DEFAULT_DOMAIN};
use crate::session::{Session, SessionSettings, SubmitError};
use crate::tabs::{SequentialIds, TabId, TabRegistry};

const MAX: u64 = 10_000;

#[test]
fn three_by_three_table() {
    let range = resolve(RangeInput::new(1, 3, 1, 3), DEFAULT_DOMAIN, MAX).unwrap();
    let grid = materialize(&range);
    assert_eq!(grid.row_labels(), &[1, 2, 3]);
    assert_eq!(grid.col_labels(), &[1, 2, 3]);
    assert_eq!(grid.cells(), &[vec![1, 2, 3], vec![2, 4, 6], vec![3, 6, 9]]);
}

#[test]
fn sixty_is_out_of_domain_before_any_swap() {
    let err = resolve(RangeInput::new(60, 1, 1, 1), DEFAULT_DOMAIN, MAX).unwrap_err();
    assert!(matches!(err, ResolveError::OutOfDomain { value: 60, .. }));
}

#[test]
fn domain_boundaries_are_inclusive() {
    assert!(resolve(RangeInput::new(-50, -50, 50, 50), DEFAULT_DOMAIN, MAX).is_ok());
    for bad in [
        RangeInput::new(-51, 0, 0, 0),
        RangeInput::new(0, 51, 0, 0),
        RangeInput::new(0, 0, -51, 0),
        RangeInput::new(0, 0, 0, 51),
    ] {
        assert!(matches!(
            resolve(bad, DEFAULT_DOMAIN, MAX),
            Err(ResolveError::OutOfDomain { .. })
        ));
    }
}

#[test]
fn size_guard_boundary() {
    // 100 x 100 == 10_000 exactly
    let exact = resolve(RangeInput::new(-49, 50, -49, 50), DEFAULT_DOMAIN, MAX).unwrap();
    assert_eq!(exact.cells(), 10_000);
    let over = resolve(RangeInput::new(-50, 50, -49, 50), DEFAULT_DOMAIN, MAX).unwrap_err();
    assert_eq!(
        over,
        ResolveError::TooLarge {
            cells: 10_100,
            max_cells: 10_000
        }
    );
    // the larger ceiling accepts the full domain
    assert!(resolve(RangeInput::new(-50, 50, -50, 50), DEFAULT_DOMAIN, 100_000).is_ok());
}

#[test]
fn custom_domain_is_honoured() {
    let domain = Domain::new(0, 12).unwrap();
    assert!(resolve(RangeInput::new(0, 12, 12, 0), domain, MAX).is_ok());
    assert!(resolve(RangeInput::new(-1, 12, 0, 0), domain, MAX).is_err());
}

#[test]
fn create_many_then_remove_all_leaves_home() {
    let mut reg = TabRegistry::new(Box::new(SequentialIds::new()));
    let range = resolve(RangeInput::new(1, 2, 1, 2), DEFAULT_DOMAIN, MAX).unwrap();
    for _ in 0..5 {
        reg.create(materialize(&range), &range.title());
    }
    assert_eq!(reg.len(), 6);
    assert_eq!(reg.remove_all(), 5);
    assert_eq!(reg.len(), 1);
    assert!(reg.tabs()[0].is_home());
    assert_eq!(reg.remove_all(), 0);
}

#[test]
fn remove_one_leaves_other_tabs_untouched() {
    let mut reg = TabRegistry::new(Box::new(SequentialIds::new()));
    let a_range = resolve(RangeInput::new(1, 2, 1, 2), DEFAULT_DOMAIN, MAX).unwrap();
    let b_range = resolve(RangeInput::new(3, 4, 3, 4), DEFAULT_DOMAIN, MAX).unwrap();
    let a = reg.create(materialize(&a_range), &a_range.title());
    let b = reg.create(materialize(&b_range), &b_range.title());
    assert!(reg.remove_one(&a));
    assert!(!reg.contains(&a));
    let kept = reg.get(&b).unwrap();
    assert_eq!(kept.title, "[3 to 4] x [3 to 4]");
    assert_eq!(kept.grid.as_ref(), Some(&materialize(&b_range)));
    assert!(reg.contains(&TabId::home()));
}

#[test]
fn session_title_and_tab_on_success() {
    let mut s = Session::new(
        SessionSettings {
            tabbed: true,
            ..SessionSettings::default()
        },
        Box::new(SequentialIds::new()),
    );
    let sub = s.submit(&FormValues::new("10", "-2", "7", "7")).unwrap();
    assert_eq!(sub.title, "[-2 to 10] x [7 to 7]");
    assert_eq!(sub.tab, Some(TabId::new("tab-1")));
    assert_eq!(s.registry().active_id(), &TabId::new("tab-1"));

    let err = s.submit(&FormValues::new("", "", "", "")).unwrap_err();
    assert!(matches!(err, SubmitError::Invalid(ref e) if e.len() == 4));
    assert_eq!(s.errors().len(), 4);
    assert_eq!(s.registry().len(), 2);
}

fn endpoint() -> impl Strategy<Value = i64> {
    -50i64..=50
}

proptest! {
    #[test]
    fn products_match_labels(
        hs in endpoint(), he in endpoint(), vs in endpoint(), ve in endpoint()
    ) {
        let raw = RangeInput::new(hs, he, vs, ve);
        match resolve(raw, DEFAULT_DOMAIN, MAX) {
            Ok(range) => {
                let grid = materialize(&range);
                prop_assert_eq!(grid.len() as u64, range.cells());
                for w in grid.row_labels().windows(2) {
                    prop_assert_eq!(w[1], w[0] + 1);
                }
                for w in grid.col_labels().windows(2) {
                    prop_assert_eq!(w[1], w[0] + 1);
                }
                for (r, row) in grid.cells().iter().enumerate() {
                    for (c, v) in row.iter().enumerate() {
                        prop_assert_eq!(*v, grid.row_labels()[r] * grid.col_labels()[c]);
                    }
                }
            }
            Err(ResolveError::TooLarge { cells, max_cells }) => {
                let width = (hs - he).unsigned_abs() + 1;
                let height = (vs - ve).unsigned_abs() + 1;
                prop_assert_eq!(cells, width * height);
                prop_assert!(cells > max_cells);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn each_pair_is_order_independent(
        hs in endpoint(), he in endpoint(), vs in endpoint(), ve in endpoint()
    ) {
        let a = resolve(RangeInput::new(hs, he, vs, ve), DEFAULT_DOMAIN, 100_000);
        let b = resolve(RangeInput::new(he, hs, vs, ve), DEFAULT_DOMAIN, 100_000);
        let c = resolve(RangeInput::new(hs, he, ve, vs), DEFAULT_DOMAIN, 100_000);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&a, &c);
    }

    #[test]
    fn too_large_iff_over_ceiling(
        hs in endpoint(), he in endpoint(), vs in endpoint(), ve in endpoint(),
        max_cells in 1u64..12_000
    ) {
        let cells = ((hs - he).unsigned_abs() + 1) * ((vs - ve).unsigned_abs() + 1);
        let result = resolve(RangeInput::new(hs, he, vs, ve), DEFAULT_DOMAIN, max_cells);
        let too_large = matches!(result, Err(ResolveError::TooLarge { .. }));
        prop_assert_eq!(too_large, cells > max_cells);
    }

    #[test]
    fn out_of_domain_values_always_fail(
        v in prop_oneof![-1_000i64..-50, 51i64..1_000], slot in 0usize..4
    ) {
        let mut raw = [0i64; 4];
        raw[slot] = v;
        let result = resolve(RangeInput::new(raw[0], raw[1], raw[2], raw[3]), DEFAULT_DOMAIN, MAX);
        let out_of_domain = matches!(result, Err(ResolveError::OutOfDomain { .. }));
        prop_assert!(out_of_domain);
    }
}
