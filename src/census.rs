//! `CensusDriver<K>`: composes [`PairingEnumerator`] and [`GluingPermSearcher`],
//! builds a [`Triangulation`] for every completed gluing assignment, applies
//! the hard-coded + user filters, and hands accepted triangulations to the
//! consumer.

use crate::facet_pairing::FacetPairing;
use crate::gluing_perms::GluingPermSearcher;
use crate::pairing_enumerator::{Boundary, PairingEnumerator};
use crate::progress::Progress;
use crate::triangulation::Triangulation;

/// Which orientation polarities a census run should admit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Orientability {
    allow_orientable: bool,
    allow_non_orientable: bool,
}

impl Orientability {
    pub fn both() -> Self {
        Orientability { allow_orientable: true, allow_non_orientable: true }
    }

    pub fn orientable_only() -> Self {
        Orientability { allow_orientable: true, allow_non_orientable: false }
    }

    pub fn non_orientable_only() -> Self {
        Orientability { allow_orientable: false, allow_non_orientable: true }
    }

    /// Both polarities forbidden: a degenerate input that accepts nothing.
    pub fn neither() -> Self {
        Orientability { allow_orientable: false, allow_non_orientable: false }
    }

    fn is_degenerate(self) -> bool {
        !self.allow_orientable && !self.allow_non_orientable
    }

    /// Whether the gluing search itself can be told `orientable_only`: only
    /// when non-orientable triangulations are forbidden outright. When both
    /// polarities are allowed, or only the non-orientable half is wanted,
    /// the search runs unrestricted and the polarity is filtered
    /// post-triangulation instead, since there's no efficient way to force
    /// non-orientability structurally.
    fn search_orientable_only(self) -> bool {
        self.allow_orientable && !self.allow_non_orientable
    }

    fn accepts(self, is_orientable: bool) -> bool {
        if is_orientable {
            self.allow_orientable
        } else {
            self.allow_non_orientable
        }
    }
}

pub struct CensusDriver<const K: usize> {
    _dim: std::marker::PhantomData<[(); K]>,
}

impl<const K: usize> CensusDriver<K> {
    const D: usize = K - 1;

    /// Runs the full two-stage census: enumerate canonical facet pairings of
    /// size `n`, search gluing permutations over each, triangulate, filter,
    /// and hand every accepted triangulation to `consumer` as `(item_number,
    /// &Triangulation)` with `item_number` a 1-based running count. Returns
    /// the total accepted count.
    pub fn form_census<S, F>(
        n: usize,
        orientability: Orientability,
        boundary: Boundary,
        progress: &dyn Progress,
        mut sieve: S,
        mut consumer: F,
    ) -> usize
    where
        S: FnMut(&Triangulation<K>) -> bool,
        F: FnMut(usize, &Triangulation<K>),
    {
        if orientability.is_degenerate() {
            return 0;
        }

        let mut count = 0usize;
        let search_orientable_only = orientability.search_orientable_only();

        let enumerator = PairingEnumerator::<K>::new(n, boundary);
        enumerator.enumerate(progress, |pairing, autos| {
            let (pairing, autos) = match (pairing, autos) {
                (Some(p), Some(a)) => (p, a),
                _ => return,
            };
            if progress.is_cancelled() {
                return;
            }
            count += Self::run_gluing_search(
                pairing.clone(),
                autos.to_vec(),
                search_orientable_only,
                orientability,
                progress,
                &mut sieve,
                &mut consumer,
                count,
            );
        });

        count
    }

    /// Runs the gluing-permutation search on an already-canonical,
    /// already-connected `pairing` whose automorphisms are computed here
    /// locally, skipping the pairing enumeration stage entirely.
    pub fn form_partial_census<S, F>(
        pairing: FacetPairing<K>,
        orientability: Orientability,
        progress: &dyn Progress,
        mut sieve: S,
        mut consumer: F,
    ) -> usize
    where
        S: FnMut(&Triangulation<K>) -> bool,
        F: FnMut(usize, &Triangulation<K>),
    {
        if orientability.is_degenerate() {
            return 0;
        }
        debug_assert!(pairing.is_canonical(), "form_partial_census requires a canonical pairing");

        let autos = match pairing.is_canonical_internal() {
            Some(a) => a,
            None => return 0,
        };

        Self::run_gluing_search(
            pairing,
            autos,
            orientability.search_orientable_only(),
            orientability,
            progress,
            &mut sieve,
            &mut consumer,
            0,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn run_gluing_search<S, F>(
        pairing: FacetPairing<K>,
        autos: Vec<crate::isomorphism::Isomorphism<K>>,
        search_orientable_only: bool,
        orientability: Orientability,
        progress: &dyn Progress,
        sieve: &mut S,
        consumer: &mut F,
        already_accepted: usize,
    ) -> usize
    where
        S: FnMut(&Triangulation<K>) -> bool,
        F: FnMut(usize, &Triangulation<K>),
    {
        let mut accepted = 0usize;
        let mut searcher = GluingPermSearcher::<K>::new(pairing, autos, search_orientable_only);
        searcher.search(None, progress, |found| {
            let searcher = match found {
                Some(s) => s,
                None => return,
            };
            let tri = Triangulation::from_gluing_perms(searcher.perms());

            if !tri.is_valid() {
                return;
            }
            if !orientability.accepts(tri.is_orientable()) {
                return;
            }
            if Self::D == 4 && tri.is_ideal() {
                return;
            }
            if !sieve(&tri) {
                return;
            }

            accepted += 1;
            consumer(already_accepted + accepted, &tri);
        });
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullProgress;

    #[test]
    fn d2_two_triangles_closed_census_has_two_triangulations() {
        let count = CensusDriver::<3>::form_census(
            2,
            Orientability::both(),
            Boundary::Closed,
            &NullProgress,
            |_tri| true,
            |_k, _tri| {},
        );
        assert_eq!(count, 2);
    }

    #[test]
    fn d3_two_tetrahedra_closed_census_has_two_triangulations() {
        let count = CensusDriver::<4>::form_census(
            2,
            Orientability::both(),
            Boundary::Closed,
            &NullProgress,
            |_tri| true,
            |_k, _tri| {},
        );
        assert_eq!(count, 2);
    }

    #[test]
    fn degenerate_orientability_yields_zero() {
        let count = CensusDriver::<3>::form_census(
            4,
            Orientability::neither(),
            Boundary::Closed,
            &NullProgress,
            |_tri| true,
            |_k, _tri| {},
        );
        assert_eq!(count, 0);
    }

    #[test]
    fn sieve_can_reject_everything() {
        let count = CensusDriver::<3>::form_census(
            2,
            Orientability::both(),
            Boundary::Closed,
            &NullProgress,
            |_tri| false,
            |_k, _tri| {},
        );
        assert_eq!(count, 0);
    }

    #[test]
    fn form_partial_census_matches_form_census_for_same_pairing() {
        let rep = "1 0 1 1 1 2 0 0 0 1 0 2";
        let pairing = FacetPairing::<3>::from_text_rep(rep).unwrap();
        let count = CensusDriver::<3>::form_partial_census(
            pairing,
            Orientability::both(),
            &NullProgress,
            |_tri| true,
            |_k, _tri| {},
        );
        assert!(count >= 1);
    }

    #[test]
    fn item_numbers_are_sequential_starting_at_one() {
        let mut seen = Vec::new();
        CensusDriver::<3>::form_census(
            4,
            Orientability::both(),
            Boundary::Closed,
            &NullProgress,
            |_tri| true,
            |k, _tri| seen.push(k),
        );
        let expected: Vec<usize> = (1..=seen.len()).collect();
        assert_eq!(seen, expected);
    }
}
