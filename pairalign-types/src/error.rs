use crate::I;
use thiserror::Error;

/// Errors reported at the alignment call boundary.
///
/// DP engines themselves are total on well-formed inputs; every failure
/// here is detected synchronously before or after the matrix fill.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// An operation letter or numeric code that maps to no operation.
    #[error("invalid alignment operation: {0}")]
    InvalidOperation(String),

    /// An anchor list violating the alignment invariants.
    #[error("invalid anchors: {0}")]
    InvalidAnchors(String),

    /// A banded alignment whose band misses the start or end cell.
    #[error("band [-{lower}, {upper}] excludes the alignment endpoints")]
    BandExcludesEndpoints { lower: I, upper: I },

    /// Hamming distance over sequences of unequal length.
    #[error("sequence lengths differ: {0} vs {1}")]
    LengthMismatch(usize, usize),

    /// A malformed CIGAR string.
    #[error("malformed CIGAR: {0}")]
    CigarParse(String),

    /// A mode invoked with the wrong kind of model.
    #[error("this alignment mode requires {expected}")]
    ModelMismatch { expected: &'static str },

    /// An option combination the dispatch does not support.
    #[error("unsupported option: {0}")]
    UnsupportedOptions(&'static str),
}
