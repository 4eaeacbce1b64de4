//! Errors raised while encoding or decoding, with the path to the failure.

use crate::encoding::Kind;
use failure::Fail;
use smallvec::SmallVec;
use std::fmt;

/// Which half of the codec produced an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Walking a value and writing bytes.
    Encode,
    /// Reading bytes back into a target.
    Decode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stage::Encode => f.write_str("encode"),
            Stage::Decode => f.write_str("decode"),
        }
    }
}

/// What went wrong.
#[derive(Clone, Debug, Fail, PartialEq, Eq)]
pub enum ErrorKind {
    /// The top-level value is not a kind the entry point accepts.
    #[fail(display = "expected {}, found {:?}", expected, found)]
    Shape {
        /// Description of the accepted kinds.
        expected: &'static str,
        /// Kind that was actually supplied.
        found: Kind,
    },
    /// A value has no representation in the format.
    #[fail(display = "unsupported type: {}", _0)]
    UnsupportedType(String),
    /// A length or count prefix asked for more bytes than remain.
    #[fail(
        display = "truncated input: needed {} bytes at offset {}, {} remaining",
        needed, offset, remaining
    )]
    Truncated {
        /// Absolute offset of the read that failed.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
        /// Bytes left in the input.
        remaining: usize,
    },
    /// A leaf payload does not fit the 2-byte length prefix.
    #[fail(display = "leaf payload of {} bytes exceeds the 65535 byte limit", len)]
    LeafOverflow {
        /// Payload length in bytes.
        len: usize,
    },
    /// A container holds more entries than the 4-byte count prefix allows.
    #[fail(display = "container of {} entries exceeds the u32 count limit", len)]
    CountOverflow {
        /// Number of entries.
        len: usize,
    },
    /// A decoded sequence or mapping count is above the configured limit.
    #[fail(display = "count of {} entries exceeds the decode limit of {}", count, limit)]
    CountLimit {
        /// Count read from the input.
        count: usize,
        /// Largest count the decoder accepts.
        limit: usize,
    },
    /// A leaf payload cannot be interpreted as the target's type.
    #[fail(display = "invalid leaf: {}", _0)]
    InvalidLeaf(String),
    /// The reversible byte transform failed.
    #[fail(display = "compression failed: {}", _0)]
    Compression(String),
}

/// One step on the path from the top-level value to the failing position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// A struct field, by declared name (or tuple index).
    Field(&'static str),
    /// A sequence element.
    Index(usize),
    /// The key of the n-th mapping entry.
    MapKey(usize),
    /// The value of the n-th mapping entry.
    MapValue(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Segment::Field(name) => write!(f, ".{}", name),
            Segment::Index(i) => write!(f, "[{}]", i),
            Segment::MapKey(i) => write!(f, "{{key #{}}}", i),
            Segment::MapValue(i) => write!(f, "{{value #{}}}", i),
        }
    }
}

/// An error encountered while encoding or decoding.
///
/// The path is recorded innermost-first while the error unwinds through the
/// recursive walk and printed outermost-first.
#[derive(Clone, Debug)]
pub struct Error {
    stage: Stage,
    kind: ErrorKind,
    path: SmallVec<[Segment; 8]>,
}

impl Error {
    /// Creates a new `Error` with an empty path.
    ///
    /// # Arguments
    ///
    /// * `stage: Stage` - The half of the codec that failed.
    /// * `kind: ErrorKind` - What went wrong.
    pub fn new(stage: Stage, kind: ErrorKind) -> Self {
        Error {
            stage,
            kind,
            path: SmallVec::new(),
        }
    }

    /// Shorthand for an encode-side error.
    pub fn encode(kind: ErrorKind) -> Self { Error::new(Stage::Encode, kind) }

    /// Shorthand for a decode-side error.
    pub fn decode(kind: ErrorKind) -> Self { Error::new(Stage::Decode, kind) }

    /// Records that the error happened inside `segment`.
    pub fn within(mut self, segment: Segment) -> Self {
        self.path.push(segment);
        self
    }

    /// The half of the codec that failed.
    pub fn stage(&self) -> Stage { self.stage }

    /// What went wrong.
    pub fn kind(&self) -> &ErrorKind { &self.kind }

    /// Path from the top-level value to the failing position, outermost first.
    pub fn path(&self) -> impl Iterator<Item = &Segment> { self.path.iter().rev() }

    /// The path rendered as a string, e.g. `.all.listint[2]`.
    pub fn path_string(&self) -> String { self.path().map(ToString::to_string).collect() }
}

impl Fail for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{} failed: {}", self.stage, self.kind)
        } else {
            write!(
                f,
                "{stage} failed at {path}: {kind}",
                stage = self.stage,
                path = self.path_string(),
                kind = self.kind,
            )
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cold]
pub(crate) fn truncated(offset: usize, needed: usize, remaining: usize) -> Error {
    Error::decode(ErrorKind::Truncated {
        offset,
        needed,
        remaining,
    })
}

#[cold]
pub(crate) fn invalid_leaf<S: Into<String>>(msg: S) -> Error {
    Error::decode(ErrorKind::InvalidLeaf(msg.into()))
}

#[cold]
pub(crate) fn unsupported<S: Into<String>>(stage: Stage, msg: S) -> Error {
    Error::new(stage, ErrorKind::UnsupportedType(msg.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_path() {
        let err = Error::encode(ErrorKind::LeafOverflow { len: 70_000 });
        assert_eq!(
            err.to_string(),
            "encode failed: leaf payload of 70000 bytes exceeds the 65535 byte limit"
        );
    }

    #[test]
    fn path_is_printed_outermost_first() {
        let err = truncated(12, 8, 3)
            .within(Segment::Index(2))
            .within(Segment::Field("listint"))
            .within(Segment::Field("all"));

        assert_eq!(err.stage(), Stage::Decode);
        assert_eq!(err.path_string(), ".all.listint[2]");
        assert_eq!(
            err.to_string(),
            "decode failed at .all.listint[2]: truncated input: needed 8 bytes at offset 12, 3 \
             remaining"
        );
    }

    #[test]
    fn map_segments() {
        let err = invalid_leaf("bool byte 7")
            .within(Segment::MapValue(1))
            .within(Segment::Field("mapbool"));
        assert_eq!(err.path_string(), ".mapbool{value #1}");
    }
}
