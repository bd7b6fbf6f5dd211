//! Dimension aliases and the d=3-only pruning-hint extension point.
//!
//! `D`/`K = D+1` is threaded through `Perm`, `FacetSpec`'s facet range and
//! `FacetPairing` as a const generic; the aliases below exist purely for
//! ergonomic call sites.

use crate::facet_pairing::FacetPairing;
use crate::isomorphism::Isomorphism;
use crate::perm::Perm;

/// `K = D + 1` vertices/facets per simplex, for `D = 2` (triangles).
pub const DIM2: usize = 3;
/// `K` for `D = 3` (tetrahedra), the primary, most-optimised case.
pub const DIM3: usize = 4;
/// `K` for `D = 4` (pentachora).
pub const DIM4: usize = 5;

pub type Perm2 = Perm<3>;
pub type Perm3 = Perm<4>;
pub type Perm4 = Perm<5>;

pub type FacetPairing2 = FacetPairing<3>;
pub type FacetPairing3 = FacetPairing<4>;
pub type FacetPairing4 = FacetPairing<5>;

pub type Isomorphism2 = Isomorphism<3>;
pub type Isomorphism3 = Isomorphism<4>;
pub type Isomorphism4 = Isomorphism<5>;

/// A structurally-checkable pruning hint for the gluing-permutation search.
/// The crate does not implement 3-manifold recognition (homology, prime
/// decomposition, P² detection are out of scope), so a hint beyond the
/// structural checks named here degrades to a documented no-op: every
/// triangulation that does *not* have the hinted property is still emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PruningHint {
    /// Skip branches that can be shown, from the pairing/permutation state
    /// alone, to produce a triangulation with an obvious non-minimal
    /// reduction (a 2-sphere boundary of two facets glued straight across).
    NonMinimal,
    /// Skip branches that can be shown to produce an immediately-reducible
    /// connect sum (a vertex link that is a pair of triangles glued
    /// directly together is never checked beyond that structural signal).
    NonPrime,
    NonMinimalPrime,
    P2Reducible,
}

impl PruningHint {
    /// Whether this hint licenses pruning purely from facet-pairing
    /// structure (before any gluing permutations are assigned). Only
    /// `NonMinimal`/`NonPrime` have a structural signal at the pairing
    /// stage; the others require permutation data and are left to the
    /// gluing searcher.
    pub fn prunes_at_pairing_stage(self) -> bool {
        matches!(self, PruningHint::NonMinimal | PruningHint::NonPrime)
    }
}
