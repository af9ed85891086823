use crate::result::{AlignmentResult, PairwiseAlignment};
use log::debug;
use pairalign_engines::{
    hamming, hamming_align, levenshtein, levenshtein_align, EditDistanceAligner, GlobalAligner,
    LocalAligner, SemiGlobalAligner,
};
use pairalign_types::{
    AffineGapScoreModel, AlignError, AlignedSequence, Alignment, CostModel, NoModel,
    SubstitutionMatrix, I, Seq,
};
use serde::{Deserialize, Serialize};

/// The alignment regime to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignMode {
    /// Both sequences end to end, affine gaps.
    Global,
    /// Query end to end, reference ends free.
    SemiGlobal,
    /// Best-scoring substring pair, score clamped at zero.
    Local,
    /// Minimum-cost edit sequence over a caller-supplied cost model.
    EditDistance,
    /// Unit-cost edit distance; takes no model.
    Levenshtein,
    /// Positionwise mismatch count over equal-length sequences; no model.
    Hamming,
}

/// Options honored by [`pairalign`].
///
/// `score_only` skips traceback and the views (for the distance modes it
/// plays the role of a distance-only flag). The band fields only apply to
/// [`AlignMode::Global`] and give the half-widths below and above the main
/// diagonal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignParams {
    #[serde(alias = "distance_only")]
    pub score_only: bool,
    pub banded: bool,
    pub lower: I,
    pub upper: I,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self {
            score_only: false,
            banded: false,
            lower: 0,
            upper: 0,
        }
    }
}

impl AlignParams {
    pub fn score_only() -> Self {
        Self {
            score_only: true,
            ..Self::default()
        }
    }

    pub fn banded(lower: I, upper: I) -> Self {
        Self {
            banded: true,
            lower,
            upper,
            ..Self::default()
        }
    }
}

/// The model argument of [`pairalign`]: a scoring model for the scoring
/// modes, a cost model for [`AlignMode::EditDistance`], nothing for the
/// fixed-model distances.
pub enum AlignModel<'m, S> {
    Score(&'m AffineGapScoreModel<S>),
    Cost(&'m CostModel<S>),
    None,
}

impl AlignModel<'static, NoModel> {
    /// `AlignModel::None` with its type parameter pinned, for the modes
    /// that take no model.
    pub const NONE: Self = AlignModel::None;
}

/// Run one pairwise alignment: dispatch on `mode`, honoring `params`.
///
/// `a` is the query, `b` the reference. The dispatch is total: every
/// `(mode, model, params)` combination either returns a result or fails
/// with a specific [`AlignError`] kind.
pub fn pairalign<S: SubstitutionMatrix + Clone>(
    mode: AlignMode,
    a: Seq,
    b: Seq,
    model: AlignModel<S>,
    params: &AlignParams,
) -> Result<AlignmentResult, AlignError> {
    debug!(
        "pairalign {mode:?}: |a| = {}, |b| = {}, params {params:?}",
        a.len(),
        b.len()
    );
    if params.banded && mode != AlignMode::Global {
        return Err(AlignError::UnsupportedOptions(
            "banding applies to global alignment only",
        ));
    }
    match mode {
        AlignMode::Global => {
            let aligner = GlobalAligner {
                model: require_score(&model)?.clone(),
                band: params.banded.then_some(pairalign_engines::Band {
                    lower: params.lower,
                    upper: params.upper,
                }),
            };
            if params.score_only {
                Ok(AlignmentResult::score_only(aligner.score(a, b)?))
            } else {
                let (score, aln) = aligner.align(a, b)?;
                Ok(with_views(score, aln, a, b))
            }
        }
        AlignMode::SemiGlobal => {
            let aligner = SemiGlobalAligner::new(require_score(&model)?.clone());
            if params.score_only {
                Ok(AlignmentResult::score_only(aligner.score(a, b)))
            } else {
                let (score, aln) = aligner.align(a, b);
                Ok(with_views(score, aln, a, b))
            }
        }
        AlignMode::Local => {
            let aligner = LocalAligner::new(require_score(&model)?.clone());
            if params.score_only {
                Ok(AlignmentResult::score_only(aligner.score(a, b)))
            } else {
                let (score, aln) = aligner.align(a, b);
                Ok(with_views(score, aln, a, b))
            }
        }
        AlignMode::EditDistance => {
            let aligner = EditDistanceAligner::new(require_cost(&model)?.clone());
            if params.score_only {
                Ok(AlignmentResult::score_only(aligner.distance(a, b)))
            } else {
                let (dist, aln) = aligner.align(a, b);
                Ok(with_views(dist, aln, a, b))
            }
        }
        AlignMode::Levenshtein => {
            require_no_model(&model)?;
            if params.score_only {
                Ok(AlignmentResult::score_only(levenshtein(a, b)))
            } else {
                let (dist, aln) = levenshtein_align(a, b);
                Ok(with_views(dist, aln, a, b))
            }
        }
        AlignMode::Hamming => {
            require_no_model(&model)?;
            if params.score_only {
                Ok(AlignmentResult::score_only(hamming(a, b)?))
            } else {
                let (dist, aln) = hamming_align(a, b)?;
                Ok(with_views(dist, aln, a, b))
            }
        }
    }
}

fn with_views(score: i32, aln: Alignment, a: Seq, b: Seq) -> AlignmentResult {
    AlignmentResult {
        score,
        alignment: Some(PairwiseAlignment::new(
            AlignedSequence::new(a.to_vec(), aln),
            b.to_vec(),
        )),
    }
}

fn require_score<'m, S>(
    model: &AlignModel<'m, S>,
) -> Result<&'m AffineGapScoreModel<S>, AlignError> {
    match model {
        AlignModel::Score(m) => Ok(*m),
        _ => Err(AlignError::ModelMismatch {
            expected: "an affine gap scoring model",
        }),
    }
}

fn require_cost<'m, S>(model: &AlignModel<'m, S>) -> Result<&'m CostModel<S>, AlignError> {
    match model {
        AlignModel::Cost(m) => Ok(*m),
        _ => Err(AlignError::ModelMismatch {
            expected: "a cost model",
        }),
    }
}

fn require_no_model<S>(model: &AlignModel<S>) -> Result<(), AlignError> {
    match model {
        AlignModel::None => Ok(()),
        _ => Err(AlignError::ModelMismatch {
            expected: "no model",
        }),
    }
}
