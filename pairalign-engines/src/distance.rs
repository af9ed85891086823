//! Minimum-cost edit distances: general cost model, Levenshtein, Hamming.

use crate::trace::{h_origin, Traceback, H_DEL, H_DIAG, H_INS};
use pairalign_types::{
    AlignError, Alignment, AlignmentBuilder, Cost, CostModel, Operation, Seq, SubstitutionMatrix, I,
};

/// Single-matrix minimum-cost alignment over a linear [`CostModel`].
///
/// Insertions consume the query at `insertion` cost per symbol, deletions
/// consume the reference at `deletion` cost. Ties prefer substitution,
/// then deletion, then insertion.
pub struct EditDistanceAligner<S> {
    pub model: CostModel<S>,
}

impl<S: SubstitutionMatrix> EditDistanceAligner<S> {
    pub fn new(model: CostModel<S>) -> Self {
        Self { model }
    }

    /// The optimal distance, using two-row rolling buffers.
    pub fn distance(&self, a: Seq, b: Seq) -> Cost {
        self.fill(a, b, None)
    }

    /// The optimal distance plus the reconstructed alignment.
    pub fn align(&self, a: Seq, b: Seq) -> (Cost, Alignment) {
        let (m, n) = (a.len(), b.len());
        let mut tb = Traceback::new(m + 1, n + 1);
        let dist = self.fill(a, b, Some(&mut tb));

        let mut bld = AlignmentBuilder::new();
        let (mut i, mut j) = (m, n);
        loop {
            if i == 0 {
                if j > 0 {
                    bld.push_run(Operation::Delete, j as I);
                }
                break;
            }
            if j == 0 {
                bld.push_run(Operation::Insert, i as I);
                break;
            }
            match h_origin(tb.get(i, j)) {
                H_DIAG => {
                    bld.push(if a[i - 1] == b[j - 1] {
                        Operation::SeqMatch
                    } else {
                        Operation::SeqMismatch
                    });
                    i -= 1;
                    j -= 1;
                }
                H_DEL => {
                    bld.push(Operation::Delete);
                    j -= 1;
                }
                _ => {
                    bld.push(Operation::Insert);
                    i -= 1;
                }
            }
        }
        bld.reverse();
        (dist, bld.finish(0, 0))
    }

    fn fill(&self, a: Seq, b: Seq, mut tb: Option<&mut Traceback>) -> Cost {
        let (m, n) = (a.len(), b.len());
        let mut dp: Vec<Cost> = (0..=n as Cost).map(|j| j * self.model.deletion).collect();
        let mut dc = vec![0; n + 1];

        for i in 1..=m {
            dc[0] = i as Cost * self.model.insertion;
            let ca = a[i - 1];
            for j in 1..=n {
                let diag = dp[j - 1] + self.model.submat.score(ca, b[j - 1]);
                let del = dc[j - 1] + self.model.deletion;
                let ins = dp[j] + self.model.insertion;
                let mut best = diag;
                let mut origin = H_DIAG;
                if del < best {
                    best = del;
                    origin = H_DEL;
                }
                if ins < best {
                    best = ins;
                    origin = H_INS;
                }
                dc[j] = best;
                if let Some(tb) = tb.as_deref_mut() {
                    tb.set(i, j, origin);
                }
            }
            std::mem::swap(&mut dp, &mut dc);
        }
        dp[n]
    }
}

/// Unit-cost edit distance.
pub fn levenshtein(a: Seq, b: Seq) -> Cost {
    EditDistanceAligner::new(CostModel::unit()).distance(a, b)
}

/// Unit-cost edit distance with the reconstructed alignment.
pub fn levenshtein_align(a: Seq, b: Seq) -> (Cost, Alignment) {
    EditDistanceAligner::new(CostModel::unit()).align(a, b)
}

/// Number of differing positions between equal-length sequences.
pub fn hamming(a: Seq, b: Seq) -> Result<Cost, AlignError> {
    if a.len() != b.len() {
        return Err(AlignError::LengthMismatch(a.len(), b.len()));
    }
    Ok(a.iter().zip(b).filter(|(x, y)| x != y).count() as Cost)
}

/// Hamming distance plus the trivial ungapped alignment: one match-family
/// run covering every position.
pub fn hamming_align(a: Seq, b: Seq) -> Result<(Cost, Alignment), AlignError> {
    let dist = hamming(a, b)?;
    let aln = if a.is_empty() {
        Alignment::empty(0, 0)
    } else {
        let mut bld = AlignmentBuilder::new();
        bld.push_run(Operation::Match, a.len() as I);
        bld.finish(0, 0)
    };
    Ok((dist, aln))
}
