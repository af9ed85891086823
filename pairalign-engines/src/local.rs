//! Local alignment (Smith-Waterman with affine gaps).

use crate::trace::{pack, walk_affine, Traceback, WalkStop, H_DEL, H_DIAG, H_INS, H_ZERO};
use crate::NEG_INF;
use pairalign_types::{AffineGapScoreModel, Alignment, Score, Seq, SubstitutionMatrix, I};

/// Best-scoring aligned substring pair; the score is never negative.
///
/// Ties prefer the zero clamp, then the diagonal, then the insert matrix,
/// then the delete matrix, and the overall maximum is taken at the
/// smallest `(i, j)` in row-major order, so results are deterministic.
pub struct LocalAligner<S> {
    pub model: AffineGapScoreModel<S>,
}

impl<S: SubstitutionMatrix> LocalAligner<S> {
    pub fn new(model: AffineGapScoreModel<S>) -> Self {
        Self { model }
    }

    pub fn score(&self, a: Seq, b: Seq) -> Score {
        self.fill(a, b, None).0
    }

    pub fn align(&self, a: Seq, b: Seq) -> (Score, Alignment) {
        let mut tb = Traceback::new(a.len() + 1, b.len() + 1);
        let (score, imax, jmax) = self.fill(a, b, Some(&mut tb));
        if score == 0 {
            return (0, Alignment::empty(0, 0));
        }
        let (mut bld, i0, j0) = walk_affine(|i, j| tb.get(i, j), a, b, imax, jmax, WalkStop::Zero);
        bld.reverse();
        (score, bld.finish(i0 as I, j0 as I))
    }

    /// Returns the maximum and the first cell attaining it.
    fn fill(&self, a: Seq, b: Seq, mut tb: Option<&mut Traceback>) -> (Score, usize, usize) {
        let (m, n) = (a.len(), b.len());
        let ge = self.model.gap_extend;
        let oe = self.model.open_extend();

        let mut hp = vec![0; n + 1];
        let mut hc = vec![0; n + 1];
        let mut ip = vec![NEG_INF; n + 1];
        let mut ic = vec![NEG_INF; n + 1];

        let mut max = (0, 0, 0);
        for i in 1..=m {
            hc[0] = 0;
            ic[0] = NEG_INF;
            let mut del_left = NEG_INF;
            let ca = a[i - 1];
            for j in 1..=n {
                let diag = hp[j - 1] + self.model.submat.score(ca, b[j - 1]);
                let ins_open = hp[j] - oe;
                let ins_extend = ip[j] - ge;
                let (ins, ins_ext) = if ins_extend > ins_open {
                    (ins_extend, true)
                } else {
                    (ins_open, false)
                };
                let del_open = hc[j - 1] - oe;
                let del_extend = del_left - ge;
                let (del, del_ext) = if del_extend > del_open {
                    (del_extend, true)
                } else {
                    (del_open, false)
                };
                let mut best = 0;
                let mut origin = H_ZERO;
                if diag > best {
                    best = diag;
                    origin = H_DIAG;
                }
                if ins > best {
                    best = ins;
                    origin = H_INS;
                }
                if del > best {
                    best = del;
                    origin = H_DEL;
                }
                hc[j] = best;
                ic[j] = ins;
                del_left = del;
                if let Some(tb) = tb.as_deref_mut() {
                    tb.set(i, j, pack(origin, ins_ext, del_ext));
                }
                if best > max.0 {
                    max = (best, i, j);
                }
            }
            std::mem::swap(&mut hp, &mut hc);
            std::mem::swap(&mut ip, &mut ic);
        }
        max
    }
}
