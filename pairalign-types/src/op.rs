use crate::error::AlignError;

/// A single alignment operation.
///
/// The first nine variants carry the usual one-letter codes and keep their
/// numeric order stable. `Start` marks the first anchor of an alignment and
/// has no letter; `Invalid` is a sentinel that no letter or code produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Operation {
    /// Aligned pair, match or mismatch not distinguished.
    Match = 0,
    /// Consumes the query only.
    Insert = 1,
    /// Consumes the reference only.
    Delete = 2,
    /// Skipped region of the reference.
    Skip = 3,
    /// Clipped query symbols still present in the sequence.
    SoftClip = 4,
    /// Clipped query symbols absent from the sequence.
    HardClip = 5,
    /// Silent padding, consumes neither sequence.
    Pad = 6,
    /// Aligned pair with equal symbols.
    SeqMatch = 7,
    /// Aligned pair with differing symbols.
    SeqMismatch = 8,
    /// First anchor of an alignment; records the starting offsets.
    Start = 9,
    Invalid = 10,
}

impl Operation {
    /// The one-letter code, or `None` for `Start` and `Invalid`.
    #[inline]
    pub const fn letter(self) -> Option<char> {
        Some(match self {
            Operation::Match => 'M',
            Operation::Insert => 'I',
            Operation::Delete => 'D',
            Operation::Skip => 'N',
            Operation::SoftClip => 'S',
            Operation::HardClip => 'H',
            Operation::Pad => 'P',
            Operation::SeqMatch => '=',
            Operation::SeqMismatch => 'X',
            Operation::Start | Operation::Invalid => return None,
        })
    }

    /// True for operations that consume one symbol of each sequence.
    #[inline]
    pub const fn is_match_op(self) -> bool {
        matches!(
            self,
            Operation::Match | Operation::SeqMatch | Operation::SeqMismatch
        )
    }

    /// True for operations that consume the query only.
    #[inline]
    pub const fn is_insert_op(self) -> bool {
        matches!(self, Operation::Insert | Operation::SoftClip)
    }

    /// True for operations that consume the reference only.
    #[inline]
    pub const fn is_delete_op(self) -> bool {
        matches!(self, Operation::Delete | Operation::Skip)
    }

    #[inline]
    pub const fn is_start(self) -> bool {
        matches!(self, Operation::Start)
    }

    /// Everything except the `Invalid` sentinel.
    #[inline]
    pub const fn is_valid(self) -> bool {
        !matches!(self, Operation::Invalid)
    }
}

impl TryFrom<char> for Operation {
    type Error = AlignError;

    fn try_from(c: char) -> Result<Self, AlignError> {
        Ok(match c {
            'M' => Operation::Match,
            'I' => Operation::Insert,
            'D' => Operation::Delete,
            'N' => Operation::Skip,
            'S' => Operation::SoftClip,
            'H' => Operation::HardClip,
            'P' => Operation::Pad,
            '=' => Operation::SeqMatch,
            'X' => Operation::SeqMismatch,
            _ => return Err(AlignError::InvalidOperation(format!("letter {c:?}"))),
        })
    }
}

impl TryFrom<u8> for Operation {
    type Error = AlignError;

    /// Decode a numeric operation code. `Start` and `Invalid` are not
    /// encodable and therefore not decodable either.
    fn try_from(code: u8) -> Result<Self, AlignError> {
        Ok(match code {
            0 => Operation::Match,
            1 => Operation::Insert,
            2 => Operation::Delete,
            3 => Operation::Skip,
            4 => Operation::SoftClip,
            5 => Operation::HardClip,
            6 => Operation::Pad,
            7 => Operation::SeqMatch,
            8 => Operation::SeqMismatch,
            _ => return Err(AlignError::InvalidOperation(format!("code {code}"))),
        })
    }
}
