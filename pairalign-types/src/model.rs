//! Scoring and cost models consumed by the DP engines.

use crate::{Cost, Score};

/// Symbol-pair score lookup.
///
/// The engines are generic over this seam so that concrete alphabets and
/// full substitution tables can live outside the core; anything that maps
/// a pair of symbols to a score works.
pub trait SubstitutionMatrix {
    fn score(&self, x: u8, y: u8) -> Score;
}

/// Two-valued substitution matrix: one score for equal symbols, one for
/// everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DichotomousSubstitutionMatrix {
    pub matched: Score,
    pub mismatched: Score,
}

impl DichotomousSubstitutionMatrix {
    pub const fn new(matched: Score, mismatched: Score) -> Self {
        Self {
            matched,
            mismatched,
        }
    }
}

impl SubstitutionMatrix for DichotomousSubstitutionMatrix {
    #[inline]
    fn score(&self, x: u8, y: u8) -> Score {
        if x == y {
            self.matched
        } else {
            self.mismatched
        }
    }
}

/// Placeholder for modes that take no caller-supplied model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoModel;

impl SubstitutionMatrix for NoModel {
    #[inline]
    fn score(&self, _x: u8, _y: u8) -> Score {
        0
    }
}

/// Affine gap scoring: a gap of length `L >= 1` costs
/// `gap_open + L * gap_extend`.
///
/// Both penalties are non-negative magnitudes; the DP subtracts them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AffineGapScoreModel<S> {
    pub submat: S,
    pub gap_open: Score,
    pub gap_extend: Score,
}

impl<S: SubstitutionMatrix> AffineGapScoreModel<S> {
    pub fn new(submat: S, gap_open: Score, gap_extend: Score) -> Self {
        assert!(gap_open >= 0, "gap_open is a magnitude");
        assert!(gap_extend >= 0, "gap_extend is a magnitude");
        Self {
            submat,
            gap_open,
            gap_extend,
        }
    }

    /// Cost of opening a gap, first position included.
    #[inline]
    pub fn open_extend(&self) -> Score {
        self.gap_open + self.gap_extend
    }
}

impl AffineGapScoreModel<DichotomousSubstitutionMatrix> {
    /// Dichotomous substitution scores with affine gaps.
    pub fn simple(matched: Score, mismatched: Score, gap_open: Score, gap_extend: Score) -> Self {
        Self::new(
            DichotomousSubstitutionMatrix::new(matched, mismatched),
            gap_open,
            gap_extend,
        )
    }
}

/// Linear edit costs: substitution via `submat` (0 on match, positive on
/// mismatch), plus per-symbol insertion and deletion costs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CostModel<S> {
    pub submat: S,
    pub insertion: Cost,
    pub deletion: Cost,
}

impl<S: SubstitutionMatrix> CostModel<S> {
    pub fn new(submat: S, insertion: Cost, deletion: Cost) -> Self {
        assert!(insertion >= 0);
        assert!(deletion >= 0);
        Self {
            submat,
            insertion,
            deletion,
        }
    }
}

impl CostModel<DichotomousSubstitutionMatrix> {
    /// Unit costs: substitutions, insertions and deletions all cost 1.
    pub fn unit() -> Self {
        Self::new(DichotomousSubstitutionMatrix::new(0, 1), 1, 1)
    }
}
