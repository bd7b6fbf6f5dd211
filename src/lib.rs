//! Isomorphism-free enumeration of simplicial triangulations.
//!
//! The pipeline is two stages: [`pairing_enumerator::PairingEnumerator`]
//! enumerates canonical facet pairings of a fixed size, and
//! [`gluing_perms::GluingPermSearcher`] enumerates canonical gluing-permutation
//! assignments over a fixed pairing. [`census::CensusDriver`] composes the two
//! and applies filters.

pub mod census;
pub mod dim;
pub mod error;
pub mod facet;
pub mod facet_pairing;
pub mod gluing_perms;
pub mod isomorphism;
pub mod pairing_enumerator;
pub mod perm;
pub mod progress;
pub mod triangulation;

pub use census::{CensusDriver, Orientability};
pub use error::{CensusError, Result};
pub use facet::FacetSpec;
pub use facet_pairing::FacetPairing;
pub use gluing_perms::{GluingPermIter, GluingPermSearcher, GluingPerms};
pub use isomorphism::Isomorphism;
pub use pairing_enumerator::{Boundary, PairingEnumerator, PairingIter};
pub use perm::Perm;
pub use progress::{FlagProgress, NullProgress, Progress};
pub use triangulation::{Simplex, Triangulation};
