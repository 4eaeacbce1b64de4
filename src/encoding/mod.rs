//! # Binary encoder and decoder
//!
//! Encode and decode functions for the wire format.
//!
//! Every leaf is written as a 2-byte little-endian length followed by its
//! payload. Sequences and mappings are written as a 4-byte little-endian count
//! followed by their elements (key, then value, for mappings). Structs have no
//! framing at all: their included fields follow one another in declared order.
//!
//! ```text
//! Leaf     ::= u16(length) bytes[length]
//! Sequence ::= u32(count) Element{count}
//! Mapping  ::= u32(count) (Key Value){count}
//! Struct   ::= Field*
//! ```
//!
//! # Example
//!
//! ```
//! use tinyser::prelude::*;
//!
//! let ints = vec![1i64, 2];
//! let enc = encode_full(&ints).unwrap();
//!
//! assert_eq!(
//!     enc,
//!     vec![
//!         2, 0, 0, 0, // count
//!         8, 0, 1, 0, 0, 0, 0, 0, 0, 0, // leaf
//!         8, 0, 2, 0, 0, 0, 0, 0, 0, 0, // leaf
//!     ]
//! );
//! ```

use crate::errors::{Error, ErrorKind, Result};
use bytes::Bytes;

pub mod ser;
pub use ser::*;
pub mod de;
pub use de::*;
mod constants;
pub use constants::{MAX_COUNT, MAX_LEAF_LEN};

/// Logical kinds of value the format can represent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `true`/`false`, 1-byte payload.
    Bool,
    /// Signed integer, widened to 8 bytes.
    Int,
    /// Unsigned integer, widened to 8 bytes.
    Uint,
    /// Floating point, widened to an 8-byte double.
    Float,
    /// Real and imaginary doubles, 16 bytes.
    Complex,
    /// Raw byte content.
    Bytes,
    /// Ordered aggregate of directive-bearing fields.
    Struct,
    /// Count-prefixed homogeneous elements.
    Sequence,
    /// Count-prefixed key/value pairs.
    Mapping,
}

impl Kind {
    /// Whether values of this kind are framed as a single leaf.
    pub fn is_leaf(self) -> bool {
        match self {
            Kind::Struct | Kind::Sequence | Kind::Mapping => false,
            _ => true,
        }
    }
}

/// A type with a statically known [`Kind`].
///
/// References report the kind of their pointee.
pub trait HasKind {
    /// The kind of every value of this type.
    const KIND: Kind;
}

/// Encode `t` into its binary representation, appending output to `out`.
///
/// # Errors
///
/// Fails with [`ErrorKind::Shape`] unless `t` is a struct, sequence or mapping
/// (after following references), and with any error raised while walking it.
///
/// # Example
///
/// ```
/// use tinyser::prelude::*;
///
/// let out = &mut Vec::new();
/// encode_into(&vec![true], out).unwrap();
///
/// assert_eq!(*out, vec![1, 0, 0, 0, 1, 0, 1]);
/// ```
pub fn encode_into<T: Ser + ?Sized, S: Serializer>(t: &T, out: &mut S) -> Result<()> {
    if T::KIND.is_leaf() {
        return Err(Error::encode(ErrorKind::Shape {
            expected: "a struct, sequence or mapping",
            found: T::KIND,
        }));
    }
    t.ser(out)
}

/// Encodes `t` into a fresh vector of bytes, without compression.
///
/// # Example
///
/// ```
/// use tinyser::prelude::*;
///
/// let enc = encode_full(&Vec::<String>::new()).unwrap();
/// assert_eq!(enc, vec![0, 0, 0, 0]);
///
/// // scalars are not accepted at the top level
/// assert!(encode_full(&5u8).is_err());
/// ```
pub fn encode_full<T: Ser + ?Sized>(t: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_into(t, &mut out)?;
    log::trace!("encoded {:?} into {} bytes", T::KIND, out.len());
    Ok(out)
}

/// Decodes from `data` into `target`, field by field.
///
/// # Errors
///
/// Fails with [`ErrorKind::Shape`] unless `target` is a struct, and with any
/// error raised while walking it. A target that failed to decode holds an
/// unspecified mix of old and new field values and should be discarded.
pub fn decode_from<T: De + ?Sized, D: Deserializer>(data: &mut D, target: &mut T) -> Result<()> {
    if T::KIND != Kind::Struct {
        return Err(Error::decode(ErrorKind::Shape {
            expected: "a struct",
            found: T::KIND,
        }));
    }
    target.de_in_place(data)
}

/// Decodes an uncompressed byte string into `target`.
///
/// # Example
///
/// ```
/// use tinyser::prelude::*;
///
/// #[derive(TinySerDe, Default, Debug, PartialEq)]
/// pub struct Point {
///     #[tiny = "x"]
///     pub x: i32,
///     #[tiny = "y"]
///     pub y: i32,
/// }
///
/// let enc = encode_full(&Point { x: -1, y: 7 }).unwrap();
///
/// let mut dec = Point::default();
/// decode_full(enc, &mut dec).unwrap();
///
/// assert_eq!(dec, Point { x: -1, y: 7 });
/// ```
pub fn decode_full<B: Into<Bytes>, T: De + ?Sized>(bs: B, target: &mut T) -> Result<()> {
    let mut reader = Reader::new(bs);
    decode_from(&mut reader, target)?;
    log::trace!(
        "decoded {} bytes, {} trailing",
        reader.offset(),
        reader.remaining()
    );
    Ok(())
}
