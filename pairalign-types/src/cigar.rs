use crate::anchor::{Alignment, AlignmentAnchor};
use crate::error::AlignError;
use crate::op::Operation;
use crate::I;
use std::fmt::Write;

impl Alignment {
    /// Encode the alignment as run-length text, e.g. `4M3D5M2I7M`.
    ///
    /// The start anchor carries no letter and is omitted; parsing the
    /// result with the matching 1-based starts reproduces the alignment.
    pub fn cigar(&self) -> String {
        let mut out = String::new();
        for (ds, dr, op) in self.runs() {
            let len = if op.is_delete_op() { dr } else { ds };
            // Every alignable op has a letter.
            let letter = op.letter().unwrap_or('?');
            write!(out, "{len}{letter}").unwrap();
        }
        out
    }

    /// Parse a CIGAR string into an alignment starting at the given
    /// 1-based query and reference positions.
    ///
    /// Parsing is strict: every run needs a positive length and a known
    /// letter, and the reconstructed anchors must satisfy the alignment
    /// invariants (clip/pad letters parse but are rejected there).
    pub fn from_cigar(text: &str, seq_start: I, ref_start: I) -> Result<Self, AlignError> {
        if seq_start < 1 || ref_start < 1 {
            return Err(AlignError::CigarParse(format!(
                "starts must be 1-based positive, got ({seq_start}, {ref_start})"
            )));
        }
        let mut anchors = vec![AlignmentAnchor::new(
            seq_start - 1,
            ref_start - 1,
            Operation::Start,
        )];
        let (mut s, mut r) = (seq_start - 1, ref_start - 1);

        let mut chars = text.chars().peekable();
        while let Some(&c) = chars.peek() {
            let mut len: I = 0;
            let mut digits = 0;
            while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                len = len
                    .checked_mul(10)
                    .and_then(|l| l.checked_add(d as I))
                    .ok_or_else(|| {
                        AlignError::CigarParse(format!("run length overflow in {text:?}"))
                    })?;
                digits += 1;
                chars.next();
            }
            if digits == 0 {
                return Err(AlignError::CigarParse(format!(
                    "expected run length before {c:?}"
                )));
            }
            if len == 0 {
                return Err(AlignError::CigarParse("zero-length run".into()));
            }
            let Some(letter) = chars.next() else {
                return Err(AlignError::CigarParse(format!(
                    "trailing run length in {text:?}"
                )));
            };
            let op = Operation::try_from(letter)
                .map_err(|_| AlignError::CigarParse(format!("unknown operation {letter:?}")))?;
            if op.is_match_op() {
                s += len;
                r += len;
            } else if op.is_insert_op() {
                s += len;
            } else if op.is_delete_op() {
                r += len;
            }
            anchors.push(AlignmentAnchor::new(s, r, op));
        }
        Alignment::new(anchors)
    }
}

/// Convenience free function mirroring [`Alignment::cigar`].
pub fn cigar(aln: &Alignment) -> String {
    aln.cigar()
}
