//! Core data model for pairwise sequence alignment: operations, anchors,
//! the CIGAR text form, and the scoring/cost models consumed by the DP
//! engines.
//!
//! Everything in this crate is a plain immutable value object. The DP
//! engines produce [`Alignment`]s through an [`AlignmentBuilder`];
//! consumers only read.

pub mod anchor;
pub mod cigar;
pub mod error;
pub mod model;
pub mod op;

// Re-export for convenience of `use pairalign_types::*;`.
pub use anchor::*;
pub use cigar::*;
pub use error::*;
pub use model::*;
pub use op::*;

/// Type used for positions and lengths inside alignments.
pub type I = i32;

/// An alignment score. Larger is better.
///
/// 32-bit signed: callers must keep `max(|score|) * (m + n)` within range,
/// which holds for all realistic substitution scores on sequences up to
/// tens of megabases.
pub type Score = i32;

/// An edit cost or distance. Smaller is better, never negative.
pub type Cost = i32;

/// A borrowed sequence of symbols. Indexing is 0-based; the DP recurrences
/// add their own 1-based offset.
pub type Seq<'a> = &'a [u8];

/// An owned sequence of symbols.
pub type Sequence = Vec<u8>;

/// Lossy conversion for error messages and test output.
pub fn seq_to_string(seq: Seq) -> String {
    String::from_utf8_lossy(seq).into_owned()
}
