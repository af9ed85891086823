use crate::error::AlignError;
use crate::op::Operation;
use crate::{Sequence, I};
use itertools::Itertools;

/// A boundary between two runs of identical operations.
///
/// `seq_pos` and `ref_pos` are the cumulative numbers of query and
/// reference symbols consumed up to this anchor; `op` labels the run
/// *ending* here. The first anchor of an alignment carries
/// [`Operation::Start`] and records the alignment's 0-based starting
/// offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AlignmentAnchor {
    pub seq_pos: I,
    pub ref_pos: I,
    pub op: Operation,
}

impl AlignmentAnchor {
    #[inline]
    pub const fn new(seq_pos: I, ref_pos: I, op: Operation) -> Self {
        Self {
            seq_pos,
            ref_pos,
            op,
        }
    }
}

/// An immutable, validated sequence of anchors.
///
/// Invariants, checked on construction:
/// - the first anchor is `Start` and no other anchor is;
/// - positions are monotonically non-decreasing;
/// - each run's position deltas agree with its operation family
///   (match: both advance equally, insert: query only, delete: reference
///   only), and every run is non-empty;
/// - no two consecutive anchors share an operation (runs are compressed).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alignment {
    anchors: Vec<AlignmentAnchor>,
}

impl Alignment {
    /// Build an alignment from an arbitrary anchor list, rejecting any
    /// list that violates the run invariants.
    pub fn new(anchors: Vec<AlignmentAnchor>) -> Result<Self, AlignError> {
        Self::validate(&anchors)?;
        Ok(Self { anchors })
    }

    /// An alignment consuming nothing, starting at the given offsets.
    pub fn empty(seq_start: I, ref_start: I) -> Self {
        Self {
            anchors: vec![AlignmentAnchor::new(seq_start, ref_start, Operation::Start)],
        }
    }

    fn validate(anchors: &[AlignmentAnchor]) -> Result<(), AlignError> {
        let invalid = |msg: String| Err(AlignError::InvalidAnchors(msg));

        let Some(first) = anchors.first() else {
            return invalid("anchor list is empty".into());
        };
        if !first.op.is_start() {
            return invalid(format!("first anchor is {:?}, not Start", first.op));
        }
        if first.seq_pos < 0 || first.ref_pos < 0 {
            return invalid(format!(
                "negative start offsets ({}, {})",
                first.seq_pos, first.ref_pos
            ));
        }
        for (k, (prev, cur)) in anchors.iter().tuple_windows().enumerate() {
            let k = k + 1;
            if cur.op.is_start() {
                return invalid(format!("anchor {k} repeats Start"));
            }
            if cur.op == prev.op {
                return invalid(format!("anchors {} and {k} share op {:?}", k - 1, cur.op));
            }
            let ds = cur.seq_pos - prev.seq_pos;
            let dr = cur.ref_pos - prev.ref_pos;
            let ok = if cur.op.is_match_op() {
                ds == dr && ds > 0
            } else if cur.op.is_insert_op() {
                ds > 0 && dr == 0
            } else if cur.op.is_delete_op() {
                ds == 0 && dr > 0
            } else {
                return invalid(format!("anchor {k} has non-alignable op {:?}", cur.op));
            };
            if !ok {
                return invalid(format!(
                    "anchor {k}: op {:?} inconsistent with deltas ({ds}, {dr})",
                    cur.op
                ));
            }
        }
        Ok(())
    }

    /// Construct without re-validating. The builder upholds the invariants
    /// itself; debug builds still check.
    pub(crate) fn from_anchors_unchecked(anchors: Vec<AlignmentAnchor>) -> Self {
        debug_assert!(Self::validate(&anchors).is_ok());
        Self { anchors }
    }

    #[inline]
    pub fn anchors(&self) -> &[AlignmentAnchor] {
        &self.anchors
    }

    /// Number of operation runs (anchors minus the start anchor).
    #[inline]
    pub fn num_runs(&self) -> usize {
        self.anchors.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.anchors.len() == 1
    }

    /// 0-based query offset where the alignment begins.
    #[inline]
    pub fn seq_start(&self) -> I {
        self.anchors[0].seq_pos
    }

    /// 0-based query offset one past the last consumed query symbol.
    #[inline]
    pub fn seq_end(&self) -> I {
        self.anchors[self.anchors.len() - 1].seq_pos
    }

    /// 0-based reference offset where the alignment begins.
    #[inline]
    pub fn ref_start(&self) -> I {
        self.anchors[0].ref_pos
    }

    /// 0-based reference offset one past the last consumed reference symbol.
    #[inline]
    pub fn ref_end(&self) -> I {
        self.anchors[self.anchors.len() - 1].ref_pos
    }

    /// Iterate over `(run length in (ds, dr), op)` pairs.
    pub fn runs(&self) -> impl Iterator<Item = (I, I, Operation)> + '_ {
        self.anchors.iter().tuple_windows().map(|(prev, cur)| {
            (
                cur.seq_pos - prev.seq_pos,
                cur.ref_pos - prev.ref_pos,
                cur.op,
            )
        })
    }

    fn count_where(&self, pred: impl Fn(Operation) -> bool, by_ref: bool) -> I {
        self.runs()
            .filter(|&(_, _, op)| pred(op))
            .map(|(ds, dr, _)| if by_ref { dr } else { ds })
            .sum()
    }

    /// Number of positions aligned as exact matches.
    pub fn count_matches(&self) -> I {
        self.count_where(|op| op == Operation::SeqMatch, false)
    }

    /// Number of positions aligned as mismatches.
    pub fn count_mismatches(&self) -> I {
        self.count_where(|op| op == Operation::SeqMismatch, false)
    }

    /// Number of query symbols inside insert-family runs.
    pub fn count_insertions(&self) -> I {
        self.count_where(Operation::is_insert_op, false)
    }

    /// Number of reference symbols inside delete-family runs.
    pub fn count_deletions(&self) -> I {
        self.count_where(Operation::is_delete_op, true)
    }

    /// Number of aligned symbol pairs, whether matching or not.
    pub fn count_aligned(&self) -> I {
        self.count_where(Operation::is_match_op, false)
    }
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.cigar())
    }
}

/// Accumulates operations one at a time during traceback and compresses
/// them into anchors on finalization.
///
/// Tracebacks discover operations back to front; push in that order, then
/// call [`AlignmentBuilder::reverse`] before finishing.
#[derive(Default, Debug)]
pub struct AlignmentBuilder {
    runs: Vec<(Operation, I)>,
}

impl AlignmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one operation, merging into the current run when possible.
    pub fn push(&mut self, op: Operation) {
        self.push_run(op, 1);
    }

    /// Append a run of `len` identical operations.
    pub fn push_run(&mut self, op: Operation, len: I) {
        debug_assert!(len > 0);
        debug_assert!(op.is_match_op() || op.is_insert_op() || op.is_delete_op());
        if let Some(last) = self.runs.last_mut() {
            if last.0 == op {
                last.1 += len;
                return;
            }
        }
        self.runs.push((op, len));
    }

    /// Reverse the run order after a back-to-front traceback.
    pub fn reverse(&mut self) {
        self.runs.reverse();
    }

    /// Turn the accumulated runs into an alignment starting at the given
    /// 0-based offsets.
    pub fn finish(self, seq_start: I, ref_start: I) -> Alignment {
        let mut anchors = Vec::with_capacity(self.runs.len() + 1);
        anchors.push(AlignmentAnchor::new(seq_start, ref_start, Operation::Start));
        let (mut s, mut r) = (seq_start, ref_start);
        for (op, len) in self.runs {
            if op.is_match_op() {
                s += len;
                r += len;
            } else if op.is_insert_op() {
                s += len;
            } else {
                r += len;
            }
            anchors.push(AlignmentAnchor::new(s, r, op));
        }
        Alignment::from_anchors_unchecked(anchors)
    }
}

/// A query sequence paired with its alignment to a reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignedSequence {
    pub seq: Sequence,
    pub aln: Alignment,
}

impl AlignedSequence {
    pub fn new(seq: Sequence, aln: Alignment) -> Self {
        Self { seq, aln }
    }

    /// 1-based reference position of the first reference-consuming run.
    ///
    /// When no run consumes the reference this is `ref_start + 1`, one past
    /// [`AlignedSequence::last`], so the pair denotes an empty range.
    pub fn first(&self) -> I {
        let anchors = self.aln.anchors();
        anchors
            .iter()
            .tuple_windows()
            .find(|(_, cur)| cur.op.is_match_op() || cur.op.is_delete_op())
            .map(|(prev, _)| prev.ref_pos + 1)
            .unwrap_or(anchors[0].ref_pos + 1)
    }

    /// 1-based reference position of the last reference-consuming run.
    pub fn last(&self) -> I {
        let anchors = self.aln.anchors();
        anchors
            .iter()
            .rev()
            .find(|a| a.op.is_match_op() || a.op.is_delete_op())
            .map(|a| a.ref_pos)
            .unwrap_or(anchors[0].ref_pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Operation::*;

    fn anchor(s: I, r: I, op: Operation) -> AlignmentAnchor {
        AlignmentAnchor::new(s, r, op)
    }

    #[test]
    fn valid_anchor_list() {
        let aln = Alignment::new(vec![
            anchor(0, 0, Start),
            anchor(4, 4, SeqMatch),
            anchor(6, 4, Insert),
            anchor(7, 5, SeqMismatch),
        ])
        .unwrap();
        assert_eq!(aln.num_runs(), 3);
        assert_eq!(aln.seq_end(), 7);
        assert_eq!(aln.ref_end(), 5);
        assert_eq!(aln.count_matches(), 4);
        assert_eq!(aln.count_mismatches(), 1);
        assert_eq!(aln.count_insertions(), 2);
        assert_eq!(aln.count_deletions(), 0);
        assert_eq!(aln.count_aligned(), 5);
    }

    #[test]
    fn missing_start_rejected() {
        assert!(Alignment::new(vec![anchor(4, 4, SeqMatch)]).is_err());
        assert!(Alignment::new(vec![]).is_err());
    }

    #[test]
    fn misplaced_start_rejected() {
        assert!(Alignment::new(vec![
            anchor(0, 0, Start),
            anchor(2, 2, SeqMatch),
            anchor(2, 2, Start),
        ])
        .is_err());
    }

    #[test]
    fn op_delta_mismatch_rejected() {
        // Insert run must not move the reference.
        assert!(Alignment::new(vec![anchor(0, 0, Start), anchor(3, 1, Insert)]).is_err());
        // Match run must advance both equally.
        assert!(Alignment::new(vec![anchor(0, 0, Start), anchor(3, 2, SeqMatch)]).is_err());
        // Empty run.
        assert!(Alignment::new(vec![anchor(0, 0, Start), anchor(0, 0, SeqMatch)]).is_err());
    }

    #[test]
    fn out_of_order_rejected() {
        assert!(Alignment::new(vec![
            anchor(2, 2, Start),
            anchor(1, 1, SeqMatch),
        ])
        .is_err());
    }

    #[test]
    fn uncompressed_rejected() {
        assert!(Alignment::new(vec![
            anchor(0, 0, Start),
            anchor(2, 2, SeqMatch),
            anchor(4, 4, SeqMatch),
        ])
        .is_err());
    }

    #[test]
    fn pad_and_clip_not_alignable() {
        assert!(Alignment::new(vec![anchor(0, 0, Start), anchor(0, 0, Pad)]).is_err());
        assert!(Alignment::new(vec![anchor(0, 0, Start), anchor(0, 0, HardClip)]).is_err());
    }

    #[test]
    fn builder_compresses_runs() {
        let mut b = AlignmentBuilder::new();
        for _ in 0..3 {
            b.push(SeqMatch);
        }
        b.push(Insert);
        b.push(Insert);
        b.push(SeqMatch);
        let aln = b.finish(0, 0);
        assert_eq!(aln.num_runs(), 3);
        assert_eq!(aln.cigar(), "3=2I1=");
    }

    #[test]
    fn builder_reverse_matches_traceback_order() {
        let mut b = AlignmentBuilder::new();
        // Back-to-front: last op first.
        b.push(Delete);
        b.push(SeqMatch);
        b.push(SeqMatch);
        b.reverse();
        let aln = b.finish(0, 0);
        assert_eq!(aln.cigar(), "2=1D");
    }

    #[test]
    fn first_last_reference_positions() {
        let aln = Alignment::new(vec![
            anchor(0, 3, Start),
            anchor(2, 3, Insert),
            anchor(6, 7, SeqMatch),
            anchor(6, 9, Delete),
        ])
        .unwrap();
        let seq = AlignedSequence::new(b"ACGTAC".to_vec(), aln);
        assert_eq!(seq.first(), 4);
        assert_eq!(seq.last(), 9);

        let empty = AlignedSequence::new(Vec::new(), Alignment::empty(0, 5));
        assert_eq!(empty.first(), 6);
        assert_eq!(empty.last(), 5);
    }
}
