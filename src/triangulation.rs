//! `Triangulation<K>`: the bare incidence structure `CensusDriver` builds
//! from a completed `GluingPerms` and hands to the sieve.
//!
//! Concrete topological invariants (homology, Seifert fibring, manifold
//! recognition) are out of scope; this type exposes only what a sieve
//! plausibly needs: facet counts, boundary, a vertex-orbit computation (for
//! the d=4 finiteness/ideal check), orientability, and validity.

use crate::gluing_perms::GluingPerms;
use crate::perm::Perm;

/// One simplex's gluing state: for each of its `K` facets, either the
/// `(adjacent simplex, adjacent facet, gluing permutation)` it's glued to,
/// or `None` for an unglued boundary facet. Storing the adjacent facet
/// explicitly (rather than re-deriving it) avoids ambiguity when two
/// simplices happen to be glued to each other along more than one facet.
#[derive(Clone, Debug)]
pub struct Simplex<const K: usize> {
    adjacent: [Option<(usize, usize, Perm<K>)>; K],
}

impl<const K: usize> Simplex<K> {
    fn new() -> Self {
        Simplex { adjacent: [None; K] }
    }

    pub fn adjacent(&self, facet: usize) -> Option<(usize, Perm<K>)> {
        self.adjacent[facet].map(|(s, _, p)| (s, p))
    }

    /// Like [`Self::adjacent`] but also returns the facet index on the
    /// adjacent simplex.
    pub fn adjacent_full(&self, facet: usize) -> Option<(usize, usize, Perm<K>)> {
        self.adjacent[facet]
    }

    pub fn is_boundary_facet(&self, facet: usize) -> bool {
        self.adjacent[facet].is_none()
    }
}

impl<const K: usize> Default for Simplex<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// A triangulation: `n` simplices of dimension `K - 1` with their facet
/// gluings resolved. Built by [`crate::census::CensusDriver`] from a
/// completed [`GluingPerms`]; never constructed incrementally like
/// `FacetPairing`.
#[derive(Clone, Debug)]
pub struct Triangulation<const K: usize> {
    simplices: Vec<Simplex<K>>,
}

impl<const K: usize> Triangulation<K> {
    /// Builds a triangulation by instantiating `n` simplices and gluing
    /// every matched facet pair of `perms`'s pairing according to the
    /// permutations `perms` assigned.
    pub fn from_gluing_perms(perms: &GluingPerms<K>) -> Self {
        let n = perms.pairing().size();
        let mut simplices = vec![Simplex::<K>::new(); n];

        for s in 0..n {
            for f in 0..K {
                let dest = perms.pairing().dest(s, f);
                if dest.is_boundary(n) {
                    continue;
                }
                let (os, of) = (dest.simplex as usize, dest.facet as usize);
                if os < s || (os == s && of < f) {
                    // Already glued from the other side.
                    continue;
                }
                let gluing = perms.gluing_perm(s, f);
                simplices[s].adjacent[f] = Some((os, of, gluing));
                simplices[os].adjacent[of] = Some((s, f, gluing.inverse()));
            }
        }

        Triangulation { simplices }
    }

    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    pub fn simplex(&self, i: usize) -> &Simplex<K> {
        &self.simplices[i]
    }

    /// Total number of unglued (boundary) facets.
    pub fn boundary_facet_count(&self) -> usize {
        self.simplices
            .iter()
            .flat_map(|s| s.adjacent.iter())
            .filter(|a| a.is_none())
            .count()
    }

    pub fn is_closed(&self) -> bool {
        self.boundary_facet_count() == 0
    }

    /// Validity: every stated gluing is reciprocated with a consistent
    /// inverse permutation. Holds by construction here since gluings are
    /// always derived from a matched, symmetric facet pairing; this checks
    /// it anyway for callers handed a `Triangulation` built another way in
    /// the future, not a condition this constructor can violate.
    pub fn is_valid(&self) -> bool {
        for s in 0..self.len() {
            for f in 0..K {
                if let Some((os, perm)) = self.simplices[s].adjacent(f) {
                    match self.simplices[os].adjacent(perm.image(f)) {
                        Some((back, back_perm)) => {
                            if back != s || back_perm != perm.inverse() {
                                return false;
                            }
                        }
                        None => return false,
                    }
                }
            }
        }
        true
    }

    /// Orientability, derived from the same per-simplex sign convention the
    /// gluing search already tracks, recomputed here from scratch via a
    /// facet-gluing BFS so a `Triangulation` built any other way (e.g. test
    /// fixtures) is still answerable without re-running the search.
    pub fn is_orientable(&self) -> bool {
        let n = self.len();
        if n == 0 {
            return true;
        }
        let mut sign = vec![0i8; n];
        let mut stack = Vec::new();
        for start in 0..n {
            if sign[start] != 0 {
                continue;
            }
            sign[start] = 1;
            stack.push(start);
            while let Some(s) = stack.pop() {
                for f in 0..K {
                    if let Some((os, perm)) = self.simplices[s].adjacent(f) {
                        let expected = if perm.sign() < 0 { sign[s] } else { -sign[s] };
                        if sign[os] == 0 {
                            sign[os] = expected;
                            stack.push(os);
                        } else if sign[os] != expected {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }

    /// Vertex orbits: groups of `(simplex, vertex)` incidences identified by
    /// following gluings around. Used by the d=4 finiteness/ideal check: a
    /// vertex whose link isn't a full simplex boundary sphere represents an
    /// "ideal" (non-finite) vertex.
    pub fn vertex_orbits(&self) -> Vec<Vec<(usize, usize)>> {
        let n = self.len();
        let mut seen = vec![[false; K]; n];
        let mut orbits = Vec::new();

        for s in 0..n {
            for v in 0..K {
                if seen[s][v] {
                    continue;
                }
                let mut orbit = Vec::new();
                let mut stack = vec![(s, v)];
                seen[s][v] = true;
                while let Some((cs, cv)) = stack.pop() {
                    orbit.push((cs, cv));
                    for f in 0..K {
                        if f == cv {
                            continue;
                        }
                        if let Some((os, perm)) = self.simplices[cs].adjacent(f) {
                            let ov = perm.image(cv);
                            if !seen[os][ov] {
                                seen[os][ov] = true;
                                stack.push((os, ov));
                            }
                        }
                    }
                }
                orbits.push(orbit);
            }
        }
        orbits
    }

    /// A vertex is "finite" (not ideal) when every simplex incident to it
    /// appears in its orbit with no boundary facet opposite a vertex in the
    /// orbit cutting the link open, approximated here as: the vertex's
    /// orbit never touches a boundary facet.
    pub fn is_ideal(&self) -> bool {
        for orbit in self.vertex_orbits() {
            for &(s, v) in &orbit {
                for f in 0..K {
                    if f != v && self.simplices[s].is_boundary_facet(f) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet_pairing::FacetPairing;
    use crate::gluing_perms::GluingPerms;

    #[test]
    fn single_simplex_no_gluings_is_closed_only_if_boundary_allowed() {
        let pairing = FacetPairing::<4>::new(1);
        let perms = GluingPerms::<4>::new(pairing);
        let tri = Triangulation::from_gluing_perms(&perms);
        assert_eq!(tri.len(), 1);
        assert_eq!(tri.boundary_facet_count(), 4);
        assert!(!tri.is_closed());
    }
}
