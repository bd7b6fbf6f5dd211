//! `PairingEnumerator<K>`: depth-first enumeration of every canonical facet
//! pairing of a given size, subject to boundary-facet constraints.

use crate::error::CensusError;
use crate::facet::FacetSpec;
use crate::facet_pairing::FacetPairing;
use crate::isomorphism::Isomorphism;
use crate::progress::Progress;

/// How boundary facets are treated by the enumerator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// Only closed (no unglued facets) pairings.
    Closed,
    /// Boundary facets may or may not appear; no constraint on how many.
    Any,
    /// At least one boundary facet is required, but the count is otherwise
    /// unconstrained.
    Required,
    /// Exactly this many boundary facets are required.
    Exact(usize),
}

pub struct PairingEnumerator<const K: usize> {
    n: usize,
    boundary: Boundary,
}

impl<const K: usize> PairingEnumerator<K> {
    const D: usize = K - 1;

    pub fn new(n: usize, boundary: Boundary) -> Self {
        PairingEnumerator { n, boundary }
    }

    fn allow_boundary(&self) -> bool {
        !matches!(self.boundary, Boundary::Closed)
    }

    fn exact_bdry_facets(&self) -> Option<usize> {
        match self.boundary {
            Boundary::Exact(b) => Some(b),
            Boundary::Closed => Some(0),
            Boundary::Any | Boundary::Required => None,
        }
    }

    /// Parity/range impossibilities that can be ruled out before running
    /// the search at all.
    pub fn constraint_satisfiable(&self) -> bool {
        if self.n == 0 {
            return false;
        }
        let total = self.n * K;
        if let Some(b) = self.exact_bdry_facets() {
            if b > total {
                return false;
            }
            if (total - b) % 2 != 0 {
                return false;
            }
            if Self::D >= 1 && b > (Self::D - 1) * self.n + 2 {
                return false;
            }
        }
        true
    }

    pub fn into_result(&self) -> Result<(), CensusError> {
        if self.constraint_satisfiable() {
            Ok(())
        } else {
            Err(CensusError::BoundaryConstraintImpossible {
                n: self.n,
                d: Self::D,
                requested: self.exact_bdry_facets().unwrap_or(0),
            })
        }
    }

    /// Runs the depth-first search, invoking `callback` with every
    /// canonical pairing found together with its automorphism list, then
    /// finally once with `(None, None)` to signal end-of-stream.
    pub fn enumerate<F>(&self, progress: &dyn Progress, mut callback: F)
    where
        F: FnMut(Option<&FacetPairing<K>>, Option<&[Isomorphism<K>]>),
    {
        let n = self.n;
        let d = Self::D;

        if !self.constraint_satisfiable() {
            progress.set_finished();
            callback(None, None);
            return;
        }

        let allow_bdry_any = self.allow_boundary();
        let exact = self.exact_bdry_facets();
        let boundary_required = matches!(self.boundary, Boundary::Required);

        let mut pairing = FacetPairing::<K>::new(n);
        let no_dest = |p: &FacetPairing<K>, f: FacetSpec| p.dest_of(f) == f;

        let mut trying = FacetSpec::new(0, 0);
        let mut used_facets = 0usize;
        let mut boundary_facets = 0usize;

        loop {
            if progress.is_cancelled() {
                progress.set_message("Cancelled.");
                progress.set_finished();
                callback(None, None);
                return;
            }

            let mut cand = pairing.dest_of(trying);
            cand.inc(d);

            // Avoid prematurely disconnecting the used block: on the
            // (K-2)-th facet of a block, don't let the candidate land back
            // inside the already-used simplices if the next simplex is
            // still untouched.
            if K >= 2
                && used_facets % K == K - 2
                && used_facets < K * n - 2
                && no_dest(&pairing, FacetSpec::new((used_facets / K) as i32 + 1, 0))
                && (cand.simplex as usize) <= used_facets / K
            {
                cand = FacetSpec::new((used_facets / K) as i32 + 1, 0);
            }

            if allow_bdry_any {
                match exact {
                    None => {
                        if boundary_required
                            && boundary_facets == 0
                            && used_facets == K * n - 2
                            && (cand.simplex as usize) < n
                        {
                            cand = FacetSpec::boundary(n);
                        }
                    }
                    Some(b) => {
                        if used_facets as i64 - boundary_facets as i64 + b as i64 == (K * n) as i64
                            && (cand.simplex as usize) < n
                        {
                            cand = FacetSpec::boundary(n);
                        }
                    }
                }
            }

            loop {
                while (cand.simplex as usize) < n && !no_dest(&pairing, cand) {
                    cand.inc(d);
                }
                if (cand.simplex as usize) < n
                    && cand.facet > 0
                    && no_dest(&pairing, FacetSpec::new(cand.simplex, cand.facet - 1))
                {
                    cand.simplex += 1;
                    cand.facet = 0;
                    continue;
                }
                break;
            }

            if (cand.simplex as usize) < n
                && cand.facet == 0
                && cand.simplex > 0
                && no_dest(&pairing, FacetSpec::new(cand.simplex - 1, 0))
            {
                cand = FacetSpec::boundary(n);
            }

            if used_facets % K == K - 1
                && used_facets < K * n - 1
                && no_dest(&pairing, FacetSpec::new((used_facets / K) as i32 + 1, 0))
                && cand.is_boundary(n)
            {
                cand.inc(d);
            }

            let forbid_more_boundary = !allow_bdry_any || exact.map_or(false, |b| boundary_facets == b);

            if cand.is_past_end(n, !forbid_more_boundary) {
                pairing.set_partner(trying, trying);
                trying.dec(d);
                while !trying.is_before_start() {
                    if pairing.dest_of(trying) < trying {
                        trying.dec(d);
                    } else {
                        break;
                    }
                }
                if trying.is_before_start() {
                    break;
                }
                let dtrying = pairing.dest_of(trying);
                if dtrying.is_boundary(n) {
                    used_facets -= 1;
                    boundary_facets -= 1;
                } else {
                    used_facets -= 2;
                    pairing.set_partner(dtrying, dtrying);
                }
                continue;
            }

            pairing.set_partner(trying, cand);
            if cand.is_boundary(n) {
                used_facets += 1;
                boundary_facets += 1;
            } else {
                used_facets += 2;
                pairing.set_partner(cand, trying);
            }

            let old_trying = trying;
            trying.inc(d);
            while (trying.simplex as usize) < n && !no_dest(&pairing, trying) {
                trying.inc(d);
            }

            if trying.simplex as usize == n {
                if let Some(autos) = pairing.is_canonical_internal() {
                    progress.set_message(&pairing.to_text_rep());
                    callback(Some(&pairing), Some(autos.as_slice()));
                }
                trying = old_trying;
                let dtrying = pairing.dest_of(trying);
                if dtrying.is_boundary(n) {
                    used_facets -= 1;
                    boundary_facets -= 1;
                } else {
                    used_facets -= 2;
                    pairing.set_partner(dtrying, dtrying);
                }
            } else if trying.facet > 0 {
                let mut tmp = trying;
                tmp.dec(d);
                while tmp.simplex == trying.simplex {
                    if tmp < pairing.dest_of(tmp) {
                        if pairing.dest_of(trying) < pairing.dest_of(tmp) {
                            let mut new_dest = pairing.dest_of(tmp);
                            pairing.set_partner(trying, new_dest);
                            if new_dest.is_boundary(n) {
                                new_dest.dec(d);
                                pairing.set_partner(trying, new_dest);
                            }
                        }
                        break;
                    }
                    tmp.dec(d);
                }
            }
        }

        progress.set_finished();
        callback(None, None);
    }

    /// Lazily-consumable wrapper around [`Self::enumerate`]. The push-style
    /// search can't be suspended mid-DFS, so this runs to completion into a
    /// buffer up front; each yielded pairing has already dropped its
    /// automorphism list, which existed only for the callback that produced
    /// it.
    pub fn canonical_pairings(&self) -> PairingIter<K> {
        let mut items = Vec::new();
        self.enumerate(&crate::progress::NullProgress, |pairing, _autos| {
            if let Some(p) = pairing {
                items.push(p.clone());
            }
        });
        PairingIter { inner: items.into_iter() }
    }
}

/// Iterator over canonical facet pairings, built by
/// [`PairingEnumerator::canonical_pairings`].
pub struct PairingIter<const K: usize> {
    inner: std::vec::IntoIter<FacetPairing<K>>,
}

impl<const K: usize> Iterator for PairingIter<K> {
    type Item = FacetPairing<K>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullProgress;

    fn count_pairings<const K: usize>(n: usize, boundary: Boundary) -> usize {
        let enumerator = PairingEnumerator::<K>::new(n, boundary);
        let mut count = 0;
        enumerator.enumerate(&NullProgress, |pairing, _autos| {
            if pairing.is_some() {
                count += 1;
            }
        });
        count
    }

    /// OEIS A005967: canonical closed facet pairings of `n` triangles
    /// (K=3), for n = 2..=7.
    #[test]
    fn d2_closed_pairing_counts_match_oeis_a005967() {
        let expected = [2, 0, 5, 0, 17, 0];
        for (i, &want) in expected.iter().enumerate() {
            let n = i + 2;
            assert_eq!(count_pairings::<3>(n, Boundary::Closed), want, "n={n}");
        }
    }

    #[test]
    fn d3_two_tetrahedra_closed_pairing_count_is_two() {
        assert_eq!(count_pairings::<4>(2, Boundary::Closed), 2);
    }

    #[test]
    fn odd_n_for_d2_has_no_closed_pairings() {
        // Total facet count 3n is odd whenever n is odd, so no perfect
        // matching (with no boundary) is possible.
        assert_eq!(count_pairings::<3>(3, Boundary::Closed), 0);
        assert_eq!(count_pairings::<3>(5, Boundary::Closed), 0);
    }

    #[test]
    fn every_emitted_pairing_is_canonical_and_connected() {
        let enumerator = PairingEnumerator::<3>::new(4, Boundary::Closed);
        enumerator.enumerate(&NullProgress, |pairing, autos| {
            if let Some(p) = pairing {
                assert!(p.is_canonical());
                assert!(p.is_closed());
                assert!(autos.is_some());
            }
        });
    }

    #[test]
    fn canonical_pairings_iterator_matches_callback_count() {
        let enumerator = PairingEnumerator::<3>::new(4, Boundary::Closed);
        let via_iter = enumerator.canonical_pairings().count();
        assert_eq!(via_iter, count_pairings::<3>(4, Boundary::Closed));
    }

    #[test]
    fn impossible_exact_boundary_count_yields_only_end_of_stream() {
        // 3 triangles have 9 facets total; requesting an even boundary
        // count is a parity mismatch (9 - 8 = 1, odd leftover).
        let enumerator = PairingEnumerator::<3>::new(3, Boundary::Exact(8));
        let mut saw_any_pairing = false;
        let mut saw_end = false;
        enumerator.enumerate(&NullProgress, |pairing, _| {
            if pairing.is_some() {
                saw_any_pairing = true;
            } else {
                saw_end = true;
            }
        });
        assert!(!saw_any_pairing);
        assert!(saw_end);
    }
}
