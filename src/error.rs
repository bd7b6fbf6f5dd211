//! Error types for the census pipeline's Result-typed surfaces.
//!
//! The core combinatorial search (`is_canonical_internal`, the enumerator,
//! the permutation searcher) has no recoverable error path: a broken
//! precondition there is an internal invariant violation, and this crate
//! lets it panic via `debug_assert!`. `CensusError` covers the
//! boundary-facing failure modes instead: malformed text/dump input and
//! unsatisfiable boundary constraints.

use thiserror::Error;

/// Errors surfaced by the parsing and driver entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CensusError {
    /// `FacetPairing::from_text_rep` was given a string that didn't parse
    /// into a well-formed, symmetric pairing.
    #[error("malformed facet pairing text representation: {0}")]
    InvalidTextRep(String),

    /// A `GluingPermSearcher` dump/reload stream was malformed: wrong
    /// lengths, out-of-range indices, or truncated before completion.
    #[error("malformed gluing permutation dump: {0}")]
    InvalidDump(String),

    /// The requested `(size, boundary policy)` combination has no solutions
    /// for arithmetic reasons (parity mismatch, or the requested boundary
    /// facet count exceeds what `size` simplices can supply).
    #[error("boundary facet count {requested} impossible for {n} simplices of dimension {d}")]
    BoundaryConstraintImpossible { n: usize, d: usize, requested: usize },
}

pub type Result<T> = std::result::Result<T, CensusError>;
