//! Affine-gap global alignment (Needleman-Wunsch with Gotoh's three
//! matrices), full-matrix and banded.

use crate::trace::{pack, walk_affine, Traceback, WalkStop, H_DEL, H_DIAG, H_INS};
use crate::NEG_INF;
use pairalign_types::{
    AffineGapScoreModel, AlignError, Alignment, Score, Seq, SubstitutionMatrix, I,
};

/// Diagonal band half-widths: cells `(i, j)` with
/// `-lower <= j - i <= upper` are computed, everything else is treated as
/// unreachable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Band {
    pub lower: I,
    pub upper: I,
}

impl Band {
    #[inline]
    fn contains(&self, d: I) -> bool {
        -self.lower <= d && d <= self.upper
    }

    #[inline]
    fn width(&self) -> usize {
        (self.lower + self.upper + 1) as usize
    }

    /// Both the start cell and `(m, n)` must lie inside the band.
    fn check_endpoints(&self, m: usize, n: usize) -> Result<(), AlignError> {
        if self.contains(0) && self.contains(n as I - m as I) {
            Ok(())
        } else {
            Err(AlignError::BandExcludesEndpoints {
                lower: self.lower,
                upper: self.upper,
            })
        }
    }
}

/// Aligns both sequences end to end.
///
/// Tie-breaking is fixed: the outer maximum prefers the diagonal, then the
/// insert matrix, then the delete matrix; both gap matrices prefer opening
/// over extending. This makes the reported alignment canonical
/// (match-preferred, gaps as late-opening as possible).
pub struct GlobalAligner<S> {
    pub model: AffineGapScoreModel<S>,
    pub band: Option<Band>,
}

impl<S: SubstitutionMatrix> GlobalAligner<S> {
    pub fn new(model: AffineGapScoreModel<S>) -> Self {
        Self { model, band: None }
    }

    pub fn banded(model: AffineGapScoreModel<S>, lower: I, upper: I) -> Self {
        Self {
            model,
            band: Some(Band { lower, upper }),
        }
    }

    /// Optimal global score, using two-row rolling buffers.
    pub fn score(&self, a: Seq, b: Seq) -> Result<Score, AlignError> {
        match self.band {
            None => Ok(self.fill(a, b, None)),
            Some(band) => {
                band.check_endpoints(a.len(), b.len())?;
                Ok(self.fill_banded(a, b, band, None))
            }
        }
    }

    /// Optimal global score plus the reconstructed alignment.
    pub fn align(&self, a: Seq, b: Seq) -> Result<(Score, Alignment), AlignError> {
        let (m, n) = (a.len(), b.len());
        match self.band {
            None => {
                let mut tb = Traceback::new(m + 1, n + 1);
                let score = self.fill(a, b, Some(&mut tb));
                let (mut bld, _, _) = walk_affine(|i, j| tb.get(i, j), a, b, m, n, WalkStop::Corner);
                bld.reverse();
                Ok((score, bld.finish(0, 0)))
            }
            Some(band) => {
                band.check_endpoints(m, n)?;
                let mut tb = Traceback::new(m + 1, band.width());
                let score = self.fill_banded(a, b, band, Some(&mut tb));
                let get = |i: usize, j: usize| tb.get(i, (j as I - i as I + band.lower) as usize);
                let (mut bld, _, _) = walk_affine(get, a, b, m, n, WalkStop::Corner);
                bld.reverse();
                Ok((score, bld.finish(0, 0)))
            }
        }
    }

    /// Fill the three matrices row by row, optionally recording traceback.
    fn fill(&self, a: Seq, b: Seq, mut tb: Option<&mut Traceback>) -> Score {
        let (m, n) = (a.len(), b.len());
        let go = self.model.gap_open;
        let ge = self.model.gap_extend;
        let oe = self.model.open_extend();

        // h/ins previous and current rows; del only needs the cell to the
        // left, kept in a scalar.
        let mut hp = vec![0; n + 1];
        let mut hc = vec![0; n + 1];
        let mut ip = vec![NEG_INF; n + 1];
        let mut ic = vec![NEG_INF; n + 1];
        for j in 1..=n {
            hp[j] = -(go + j as Score * ge);
        }

        for i in 1..=m {
            hc[0] = -(go + i as Score * ge);
            ic[0] = NEG_INF;
            let mut del_left = NEG_INF;
            let ca = a[i - 1];
            for j in 1..=n {
                let diag = hp[j - 1] + self.model.submat.score(ca, b[j - 1]);
                let (ins, ins_ext) = open_or_extend(hp[j] - oe, ip[j] - ge);
                let (del, del_ext) = open_or_extend(hc[j - 1] - oe, del_left - ge);
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
        hp[n]
    }

    /// Banded fill over `(m + 1) x width` storage with the
    /// `k = j - i + lower` column transform; out-of-band neighbors read as
    /// minus infinity.
    fn fill_banded(&self, a: Seq, b: Seq, band: Band, mut tb: Option<&mut Traceback>) -> Score {
        let (m, n) = (a.len(), b.len());
        let go = self.model.gap_open;
        let ge = self.model.gap_extend;
        let oe = self.model.open_extend();
        let w = band.width();

        let mut hp = vec![NEG_INF; w];
        let mut hc = vec![NEG_INF; w];
        let mut ip = vec![NEG_INF; w];
        let mut ic = vec![NEG_INF; w];
        for k in 0..w {
            let j = k as I - band.lower;
            if (0..=n as I).contains(&j) {
                hp[k] = if j == 0 { 0 } else { -(go + j * ge) };
            }
        }

        for i in 1..=m {
            hc.fill(NEG_INF);
            ic.fill(NEG_INF);
            let jlo = (i as I - band.lower).max(0) as usize;
            let jhi = (i as I + band.upper).min(n as I) as usize;
            if jlo == 0 {
                // Column 0 lies inside the band on this row.
                hc[(band.lower - i as I) as usize] = -(go + i as Score * ge);
            }
            let mut del_left = NEG_INF;
            let ca = a[i - 1];
            for j in jlo.max(1)..=jhi {
                let k = (j as I - i as I + band.lower) as usize;
                let diag = hp[k] + self.model.submat.score(ca, b[j - 1]);
                let above_h = if k + 1 < w { hp[k + 1] } else { NEG_INF };
                let above_i = if k + 1 < w { ip[k + 1] } else { NEG_INF };
                let left_h = if k > 0 { hc[k - 1] } else { NEG_INF };
                let (ins, ins_ext) = open_or_extend(above_h - oe, above_i - ge);
                let (del, del_ext) = open_or_extend(left_h - oe, del_left - ge);
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
                hc[k] = best;
                ic[k] = ins;
                del_left = del;
                if let Some(tb) = tb.as_deref_mut() {
                    tb.set(i, k, pack(origin, ins_ext, del_ext));
                }
            }
            std::mem::swap(&mut hp, &mut hc);
            std::mem::swap(&mut ip, &mut ic);
        }
        hp[(n as I - m as I + band.lower) as usize]
    }
}

/// Gap matrix alternative: open preferred over extend on ties.
#[inline]
fn open_or_extend(open: Score, extend: Score) -> (Score, bool) {
    if extend > open {
        (extend, true)
    } else {
        (open, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aligner(matched: Score, mismatched: Score) -> GlobalAligner<impl SubstitutionMatrix> {
        GlobalAligner::new(AffineGapScoreModel::simple(matched, mismatched, 5, 3))
    }

    #[test]
    fn complete_match() {
        let (score, aln) = aligner(0, -6).align(b"ACGT", b"ACGT").unwrap();
        assert_eq!(score, 0);
        assert_eq!(aln.cigar(), "4=");
    }

    #[test]
    fn single_mismatch() {
        let (score, aln) = aligner(0, -6).align(b"ACGT", b"AGGT").unwrap();
        assert_eq!(score, -6);
        assert_eq!(aln.cigar(), "1=1X2=");
    }

    #[test]
    fn double_insertion_is_canonical() {
        // Gap of length 2 costs 5 + 2*3; the match-first tie-break places
        // the gap before the final match.
        let (score, aln) = aligner(0, -6).align(b"ACGTTT", b"ACGT").unwrap();
        assert_eq!(score, -11);
        assert_eq!(aln.cigar(), "3=2I1=");
    }

    #[test]
    fn double_deletion() {
        let (score, aln) = aligner(0, -6).align(b"ACGT", b"ACGTTT").unwrap();
        assert_eq!(score, -11);
        assert_eq!(aln.cigar(), "3=2D1=");
    }

    #[test]
    fn empty_inputs() {
        let (score, aln) = aligner(0, -6).align(b"", b"").unwrap();
        assert_eq!(score, 0);
        assert!(aln.is_empty());

        let (score, aln) = aligner(0, -6).align(b"", b"ACG").unwrap();
        assert_eq!(score, -(5 + 3 * 3));
        assert_eq!(aln.cigar(), "3D");

        let (score, aln) = aligner(0, -6).align(b"AC", b"").unwrap();
        assert_eq!(score, -(5 + 2 * 3));
        assert_eq!(aln.cigar(), "2I");
    }

    #[test]
    fn score_only_agrees_with_align() {
        let g = aligner(0, -6);
        for (a, b) in [
            (&b"ACGTACGT"[..], &b"ACGT"[..]),
            (b"AGTTTTAT", b"ACCGATTTTTA"),
            (b"", b"TTTT"),
        ] {
            assert_eq!(g.score(a, b).unwrap(), g.align(a, b).unwrap().0);
        }
    }

    #[test]
    fn banded_matches_full_when_band_covers_endpoints() {
        let a = b"ACGAAT";
        let b = b"ACGT";
        let full = aligner(0, -6).align(a, b).unwrap();
        let banded = GlobalAligner::banded(AffineGapScoreModel::simple(0, -6, 5, 3), 2, 2)
            .align(a, b)
            .unwrap();
        assert_eq!(banded.0, full.0);
        assert_eq!(banded.1, full.1);
    }

    #[test]
    fn wide_band_equals_full() {
        let a = b"AGTGGGTTGCCTTCATTCCG";
        let b = b"AGTGGTGTCTTCAGGCCTTCATTCCG";
        let model = AffineGapScoreModel::simple(1, -4, 6, 1);
        let full = GlobalAligner::new(model).align(a, b).unwrap();
        let banded = GlobalAligner::banded(model, a.len() as I, b.len() as I)
            .align(a, b)
            .unwrap();
        assert_eq!(banded, full);
    }

    #[test]
    fn band_excluding_endpoints_fails() {
        let g = GlobalAligner::banded(AffineGapScoreModel::simple(0, -6, 5, 3), 0, 0);
        assert!(matches!(
            g.score(b"ACGT", b"ACG"),
            Err(AlignError::BandExcludesEndpoints { .. })
        ));
        // Same lengths stay on the main diagonal and pass.
        assert_eq!(g.score(b"ACGT", b"ACGT").unwrap(), 0);
    }

    #[test]
    fn banded_score_matches_banded_align() {
        let g = GlobalAligner::banded(AffineGapScoreModel::simple(2, -3, 4, 2), 3, 3);
        let a = b"TTGGGTCAATCAGCCAGTT";
        let b = b"TTGGTCATCAGCCAGTTT";
        assert_eq!(g.score(a, b).unwrap(), g.align(a, b).unwrap().0);
    }
}
