//! Pairwise sequence alignment with a single dispatch entry point.
//!
//! [`pairalign`] selects a dynamic-programming engine by [`AlignMode`],
//! runs it over two byte sequences, and returns an [`AlignmentResult`]
//! carrying the score (or distance) and, unless score-only output was
//! requested, the reconstructed anchor-based alignment with printable
//! views.
//!
//! ```
//! use pairalign::{pairalign, AlignMode, AlignModel, AlignParams};
//! use pairalign::types::AffineGapScoreModel;
//!
//! let model = AffineGapScoreModel::simple(0, -6, 5, 3);
//! let result = pairalign(
//!     AlignMode::Global,
//!     b"ACGT",
//!     b"AGGT",
//!     AlignModel::Score(&model),
//!     &AlignParams::default(),
//! )
//! .unwrap();
//! assert_eq!(result.score, -6);
//! let views = result.alignment.unwrap();
//! assert_eq!(views.aligned_query(), "ACGT");
//! assert_eq!(views.aligned_reference(), "AGGT");
//! ```

mod align;
mod result;

pub use align::*;
pub use result::*;

/// Re-export of the data-model crate.
pub use pairalign_types as types;
/// Re-export of the engine crate.
pub use pairalign_engines as engines;

#[cfg(test)]
mod tests;
