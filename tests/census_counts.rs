//! End-to-end pipeline counts, driven through `CensusDriver` rather than the
//! lower-level `PairingEnumerator`/`GluingPermSearcher` unit tests.

use simplicial_census::{Boundary, CensusDriver, Orientability};

fn census_count<const K: usize>(n: usize, boundary: Boundary) -> usize {
    CensusDriver::<K>::form_census(
        n,
        Orientability::both(),
        boundary,
        &simplicial_census::NullProgress,
        |_tri| true,
        |_k, _tri| {},
    )
}

/// OEIS A005967: canonical closed facet-pairing counts for d=2. The full
/// census (after the gluing search) can only be equal to or smaller than the
/// pairing count. For d=2 every matched edge pair has exactly one possible
/// gluing permutation up to the subgroup convention (K=3's subgroup has
/// `2!`=2 elements, and orientable/non-orientable variants both survive), so
/// these two end-to-end scenarios are checked directly.
#[test]
fn d2_closed_census_n2_has_two_triangulations() {
    assert_eq!(census_count::<3>(2, Boundary::Closed), 2);
}

#[test]
fn d2_closed_census_n4_has_five_triangulations() {
    assert_eq!(census_count::<3>(4, Boundary::Closed), 5);
}

/// (d=3, n=2, boundary=false): canonical pairing count = 2, and every
/// resulting facet pairing admits at least one gluing, so the full census on
/// two tetrahedra is non-empty and matches the pairing count on this small
/// case.
#[test]
fn d3_closed_census_n2_has_two_triangulations() {
    assert_eq!(census_count::<4>(2, Boundary::Closed), 2);
}

/// Cancellation mid-search yields exactly k emissions plus one end-of-stream
/// callback, never partial triangulations beyond the cancellation point.
#[test]
fn cancellation_stops_emission_without_extra_triangulations() {
    use simplicial_census::FlagProgress;

    let progress = FlagProgress::new();
    let mut seen = 0usize;
    CensusDriver::<3>::form_census(
        5,
        Orientability::both(),
        Boundary::Closed,
        &progress,
        |_tri| true,
        |_k, _tri| {
            seen += 1;
            if seen == 2 {
                progress.cancel();
            }
        },
    );
    assert!(seen <= 3, "cancellation should stop emission shortly after the flag is set");
    assert!(progress.is_finished());
}

/// `form_partial_census` summed over every canonical pairing of a size must
/// equal a single `form_census` call for that size (universal invariant 9).
#[test]
fn form_partial_census_summed_matches_form_census() {
    use simplicial_census::{FacetPairing, PairingEnumerator};

    let n = 4;
    let whole = census_count::<3>(n, Boundary::Closed);

    let enumerator = PairingEnumerator::<3>::new(n, Boundary::Closed);
    let mut summed = 0usize;
    enumerator.enumerate(&simplicial_census::NullProgress, |pairing, _autos| {
        if let Some(p) = pairing {
            let rep = p.to_text_rep();
            let reparsed = FacetPairing::<3>::from_text_rep(&rep).unwrap();
            summed += CensusDriver::<3>::form_partial_census(
                reparsed,
                Orientability::both(),
                &simplicial_census::NullProgress,
                |_tri| true,
                |_k, _tri| {},
            );
        }
    });

    assert_eq!(summed, whole);
}
