use pairalign_types::{AlignedSequence, Score, Sequence};
use std::fmt;

/// What [`crate::pairalign`] returns: the optimal score (or distance) and,
/// unless score-only output was requested, the reconstructed alignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignmentResult {
    /// Optimal score for the scoring modes, optimal distance for the
    /// distance modes.
    pub score: Score,
    pub alignment: Option<PairwiseAlignment>,
}

impl AlignmentResult {
    pub fn score_only(score: Score) -> Self {
        Self {
            score,
            alignment: None,
        }
    }

    pub fn is_score_only(&self) -> bool {
        self.alignment.is_none()
    }
}

/// An aligned query together with the reference it was aligned to,
/// yielding printable gapped views.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairwiseAlignment {
    pub query: AlignedSequence,
    pub reference: Sequence,
}

impl PairwiseAlignment {
    pub fn new(query: AlignedSequence, reference: Sequence) -> Self {
        Self { query, reference }
    }

    /// The query over the aligned region, `-` under every deleted
    /// reference symbol.
    pub fn aligned_query(&self) -> String {
        self.render(true)
    }

    /// The reference over the aligned region, `-` under every inserted
    /// query symbol.
    pub fn aligned_reference(&self) -> String {
        self.render(false)
    }

    fn render(&self, query_side: bool) -> String {
        let aln = &self.query.aln;
        let mut out = String::new();
        let (mut s, mut r) = (aln.seq_start() as usize, aln.ref_start() as usize);
        for (ds, dr, op) in aln.runs() {
            let (ds, dr) = (ds as usize, dr as usize);
            if op.is_match_op() {
                if query_side {
                    push_symbols(&mut out, &self.query.seq[s..s + ds]);
                } else {
                    push_symbols(&mut out, &self.reference[r..r + dr]);
                }
            } else if op.is_insert_op() {
                if query_side {
                    push_symbols(&mut out, &self.query.seq[s..s + ds]);
                } else {
                    out.extend(std::iter::repeat('-').take(ds));
                }
            } else if query_side {
                out.extend(std::iter::repeat('-').take(dr));
            } else {
                push_symbols(&mut out, &self.reference[r..r + dr]);
            }
            s += ds;
            r += dr;
        }
        out
    }
}

fn push_symbols(out: &mut String, symbols: &[u8]) {
    out.extend(symbols.iter().map(|&c| c as char));
}

impl fmt::Display for PairwiseAlignment {
    /// Two-line view, query on top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.aligned_query())?;
        write!(f, "{}", self.aligned_reference())
    }
}
