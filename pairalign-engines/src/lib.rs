//! Dynamic-programming engines for pairwise alignment.
//!
//! Four regimes over byte sequences: affine-gap global (full-matrix or
//! banded), semi-global with free reference ends, local, and minimum-cost
//! edit distance with the Levenshtein and Hamming specializations.
//!
//! Every engine is pure and single-threaded per call: buffers are
//! allocated once, no I/O happens, and models are read-only, so distinct
//! calls may run concurrently without synchronization. Score variants use
//! two-row rolling buffers; alignment variants additionally store one
//! packed traceback byte per cell.

mod distance;
mod global;
mod local;
mod semiglobal;
mod trace;

pub use distance::*;
pub use global::*;
pub use local::*;
pub use semiglobal::*;

use pairalign_types::Score;

/// Sentinel for unreachable DP states, far enough from the real minimum
/// that subtracting a penalty cannot wrap.
pub(crate) const NEG_INF: Score = Score::MIN / 2;
