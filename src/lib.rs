//! # tinyser
//!
//! tinyser is a compact binary codec for plain Rust records. The shape of the
//! data lives in the caller's own type declarations: each field carries a
//! directive saying whether it goes on the wire, and nothing but lengths and
//! counts travel with the values.
//!
//! # Usage
//!
//! Derive [`TinySerDe`] and tag the fields that should be written.
//!
//! ```
//! use tinyser::prelude::*;
//!
//! #[derive(TinySerDe, Default, Debug, PartialEq)]
//! pub struct Person {
//!     #[tiny = "name"]
//!     pub name: String,
//!     #[tiny = "siblings"]
//!     pub siblings: i64,
//!     #[tiny = "spouse"]
//!     pub spouse: bool,
//! }
//!
//! let john = Person {
//!     name: "John".into(),
//!     siblings: 2,
//!     spouse: true,
//! };
//!
//! let enc = encode_full(&john).unwrap();
//! assert_eq!(
//!     enc,
//!     vec![
//!         4, 0, b'J', b'o', b'h', b'n', // name
//!         8, 0, 2, 0, 0, 0, 0, 0, 0, 0, // siblings
//!         1, 0, 1, // spouse
//!     ]
//! );
//!
//! let mut dec = Person::default();
//! decode_full(enc, &mut dec).unwrap();
//! assert_eq!(dec, john);
//! ```
//!
//! # Directives
//!
//! | Attribute | Effect |
//! |---|---|
//! | none, or `#[tiny = ""]` | field is skipped |
//! | `#[tiny = "-"]` | field is skipped |
//! | `#[tiny = "omitempty"]` | field is written only when it is not its type's default |
//! | `#[tiny = "anything else"]` | field is always written |
//!
//! Only `pub` fields are ever written. Skipped fields are left untouched by
//! decoding and need not implement any codec trait.
//!
//! The directive text is documentation only: fields are matched purely by
//! position, so the decoding shape must declare the same included fields in
//! the same order with the same types as the encoding shape.
//!
//! A defaulted `omitempty` field writes no bytes and the decoder reads it only
//! while input remains, so such fields are unambiguous only at the end of a
//! top-level shape.
//!
//! # Kinds
//!
//! | Kind | Rust types | Framing |
//! |---|---|---|
//! | Bool | `bool` | `u16` length 1, then `0x00`/`0x01` |
//! | Int | `i8`..`i64`, `isize`, `i128` | `u16` length 8, then little-endian two's complement |
//! | Uint | `u8`..`u64`, `usize`, `u128`, `char` | `u16` length 8, then little-endian |
//! | Float | `f16`, `f32`, `f64` | `u16` length 8, then the `f64` bit pattern |
//! | Complex | `Complex<f32>`, `Complex<f64>` | `u16` length 16, real then imaginary `f64` |
//! | Bytes | `String`, `str`, [`Bytes`] | `u16` length, then the raw bytes |
//! | Sequence | `Vec<T>`, `VecDeque<T>`, `[T]` | `u32` count, then elements |
//! | Mapping | `HashMap<K, V>`, `BTreeMap<K, V>` | `u32` count, then key, value, key, value... |
//! | Struct | `#[derive(TinySerDe)]` | included fields in declared order, no framing |
//!
//! `Box<T>` and `&T` are followed transparently. There is no null marker, so
//! optional references are not representable.
//!
//! 128-bit integers are accepted only when their value fits in 8 bytes.
//! `Vec<u8>` is a sequence of integer leaves; use [`Bytes`] for a raw byte
//! payload.
//!
//! # Compression
//!
//! A [`Codec`] can pass the finished encoding through a reversible transform,
//! zstd by default:
//!
//! ```
//! use tinyser::prelude::*;
//!
//! let data = vec!["repetitive".to_string(); 100];
//!
//! let packed = tinyser::encode(&data, true).unwrap();
//! let plain = tinyser::encode(&data, false).unwrap();
//! assert!(packed.len() < plain.len());
//! ```

#![warn(missing_docs)]

pub mod codec;
pub mod compression;
pub mod config;
pub mod directive;
pub mod encoding;
pub mod errors;
pub mod prelude;

pub use bytes::Bytes;
pub use codec::{decode, encode, Codec};
pub use errors::{Error, ErrorKind, Result};
pub use tinyser_derive::TinySerDe;
