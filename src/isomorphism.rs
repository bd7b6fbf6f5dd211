//! `Isomorphism<K>`: a simplex relabelling plus a per-simplex facet
//! permutation, the unit of symmetry the canonicity tests search over.
//!
//! Dimension is threaded through as `K = d + 1`, the number of vertices (and
//! facets) of a simplex, rather than `d` itself, so that `Perm<K>` never
//! needs const-generic arithmetic in a type position.

use crate::facet::FacetSpec;
use crate::perm::Perm;

/// An isomorphism of an n-simplex collection: a permutation of the simplices
/// together with, for each simplex, a permutation of its `K` vertices
/// (equivalently, of its facets, since facets are indexed by opposite
/// vertex).
#[derive(Clone, Debug)]
pub struct Isomorphism<const K: usize> {
    /// `simplex_image[i]` is the simplex that simplex `i` maps to.
    simplex_image: Vec<usize>,
    /// `facet_perm[i]` is the facet permutation attached to simplex `i`.
    facet_perm: Vec<Perm<K>>,
}

impl<const K: usize> Isomorphism<K> {
    /// An uninitialised isomorphism over `n` simplices; every image and
    /// permutation defaults to identity-ish placeholders and must be filled
    /// in by the caller before use.
    pub fn new(n: usize) -> Self {
        Isomorphism {
            simplex_image: vec![0; n],
            facet_perm: vec![Perm::identity(); n],
        }
    }

    pub fn size(&self) -> usize {
        self.simplex_image.len()
    }

    pub fn simplex_image(&self, i: usize) -> usize {
        self.simplex_image[i]
    }

    pub fn set_simplex_image(&mut self, i: usize, image: usize) {
        self.simplex_image[i] = image;
    }

    pub fn facet_perm(&self, i: usize) -> &Perm<K> {
        &self.facet_perm[i]
    }

    pub fn set_facet_perm(&mut self, i: usize, perm: Perm<K>) {
        self.facet_perm[i] = perm;
    }

    /// The identity isomorphism on `n` simplices.
    pub fn identity(n: usize) -> Self {
        let mut iso = Self::new(n);
        for i in 0..n {
            iso.simplex_image[i] = i;
        }
        iso
    }

    /// Applies this isomorphism to a facet locator: `(i, f) -> (image(i),
    /// facetPerm(i)(f))`.
    pub fn apply(&self, f: FacetSpec) -> FacetSpec {
        let i = f.simplex as usize;
        let image_simplex = self.simplex_image[i];
        let image_facet = self.facet_perm[i].image(f.facet as usize);
        FacetSpec::new(image_simplex as i32, image_facet as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_fixes_every_facet() {
        let iso = Isomorphism::<4>::identity(4);
        for s in 0..4 {
            for f in 0..4 {
                let spec = FacetSpec::new(s, f);
                assert_eq!(iso.apply(spec), spec);
            }
        }
    }

    #[test]
    fn apply_composes_simplex_and_facet_images() {
        let mut iso = Isomorphism::<3>::new(2);
        iso.set_simplex_image(0, 1);
        iso.set_simplex_image(1, 0);
        iso.set_facet_perm(0, Perm::transposition(0, 1));
        iso.set_facet_perm(1, Perm::identity());
        let applied = iso.apply(FacetSpec::new(0, 0));
        assert_eq!(applied, FacetSpec::new(1, 1));
    }
}
