//! Semi-global alignment: the query is consumed end to end, leading and
//! trailing reference positions are free.

use crate::trace::{pack, walk_affine, Traceback, WalkStop, H_DEL, H_DIAG, H_INS};
use crate::NEG_INF;
use pairalign_types::{AffineGapScoreModel, Alignment, Score, Seq, SubstitutionMatrix, I};

/// Same recurrence and tie-breaks as the global aligner, with a zero top
/// row and the score taken as the bottom-row maximum (smallest maximizing
/// column on ties, so the free trailing gap is as long as possible).
pub struct SemiGlobalAligner<S> {
    pub model: AffineGapScoreModel<S>,
}

impl<S: SubstitutionMatrix> SemiGlobalAligner<S> {
    pub fn new(model: AffineGapScoreModel<S>) -> Self {
        Self { model }
    }

    pub fn score(&self, a: Seq, b: Seq) -> Score {
        self.fill(a, b, None).0
    }

    pub fn align(&self, a: Seq, b: Seq) -> (Score, Alignment) {
        let m = a.len();
        let mut tb = Traceback::new(m + 1, b.len() + 1);
        let (score, jmax) = self.fill(a, b, Some(&mut tb));
        let (mut bld, i0, j0) = walk_affine(|i, j| tb.get(i, j), a, b, m, jmax, WalkStop::FreeRefRow);
        debug_assert_eq!(i0, 0);
        bld.reverse();
        (score, bld.finish(0, j0 as I))
    }

    /// Returns the score and its (smallest) bottom-row column.
    fn fill(&self, a: Seq, b: Seq, mut tb: Option<&mut Traceback>) -> (Score, usize) {
        let (m, n) = (a.len(), b.len());
        let go = self.model.gap_open;
        let ge = self.model.gap_extend;
        let oe = self.model.open_extend();

        // Leading reference positions are free: the whole top row is zero.
        let mut hp = vec![0; n + 1];
        let mut hc = vec![0; n + 1];
        let mut ip = vec![NEG_INF; n + 1];
        let mut ic = vec![NEG_INF; n + 1];

        for i in 1..=m {
            hc[0] = -(go + i as Score * ge);
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
                let mut best = diag;
                let mut origin = H_DIAG;
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
            }
            std::mem::swap(&mut hp, &mut hc);
            std::mem::swap(&mut ip, &mut ic);
        }

        let mut best = hp[0];
        let mut jmax = 0;
        for (j, &h) in hp.iter().enumerate().skip(1) {
            if h > best {
                best = h;
                jmax = j;
            }
        }
        (best, jmax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GlobalAligner;
    use pairalign_types::AffineGapScoreModel;

    fn aligner() -> SemiGlobalAligner<impl SubstitutionMatrix> {
        SemiGlobalAligner::new(AffineGapScoreModel::simple(5, -6, 5, 3))
    }

    #[test]
    fn query_inside_reference_is_free() {
        let (score, aln) = aligner().align(b"ACGT", b"TTACGTTT");
        assert_eq!(score, 20);
        assert_eq!(aln.cigar(), "4=");
        assert_eq!(aln.ref_start(), 2);
        assert_eq!(aln.ref_end(), 6);
        assert_eq!(aln.seq_start(), 0);
        assert_eq!(aln.seq_end(), 4);
    }

    #[test]
    fn equal_lengths_match_global() {
        // With no overhang to forgive, semi-global and global agree.
        let model = AffineGapScoreModel::simple(5, -6, 5, 3);
        let a = b"ACGTACGA";
        let b = b"ACTTACGA";
        let semi = SemiGlobalAligner::new(model).align(a, b);
        let global = GlobalAligner::new(model).align(a, b).unwrap();
        assert_eq!(semi.0, global.0);
        assert_eq!(semi.1.cigar(), global.1.cigar());
    }

    #[test]
    fn internal_gap_still_costs() {
        // Query must be fully consumed; the reference symbol between the
        // two matched blocks is deleted at full price, only the flanks are
        // free.
        let (score, aln) = aligner().align(b"ACGTTT", b"AAACGCTTTAA");
        assert_eq!(score, 6 * 5 - (5 + 3));
        assert_eq!(aln.cigar(), "3=1D3=");
        assert_eq!(aln.ref_start(), 2);
        assert_eq!(aln.ref_end(), 9);
    }

    #[test]
    fn empty_query_scores_zero() {
        let (score, aln) = aligner().align(b"", b"ACGT");
        assert_eq!(score, 0);
        assert!(aln.is_empty());
        assert_eq!(aln.ref_start(), 0);
    }

    #[test]
    fn score_only_agrees() {
        let al = aligner();
        for (a, b) in [
            (&b"ACGT"[..], &b"TTACGTTT"[..]),
            (b"ACGTACGT", b"ACGT"),
            (b"CCGACAGGA", b"ACTGACCAGT"),
        ] {
            assert_eq!(al.score(a, b), al.align(a, b).0);
        }
    }
}
