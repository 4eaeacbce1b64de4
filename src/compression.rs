//! Reversible byte transforms applied to a complete encoding.
//!
//! A transform knows nothing about the wire format; it only has to satisfy
//! `invert(apply(x)) == x`.

use crate::errors::{Error, ErrorKind, Result, Stage};

/// A reversible transform over an opaque byte string.
pub trait Transform: Send + Sync {
    /// Short label for diagnostics.
    fn name(&self) -> &'static str;

    /// Transforms freshly encoded bytes.
    fn apply(&self, bytes: &[u8]) -> Result<Vec<u8>>;

    /// Undoes [`Transform::apply`].
    fn invert(&self, bytes: &[u8]) -> Result<Vec<u8>>;
}

/// Leaves bytes untouched.
#[derive(Copy, Clone, Debug, Default)]
pub struct Identity;

impl Transform for Identity {
    fn name(&self) -> &'static str { "identity" }

    fn apply(&self, bytes: &[u8]) -> Result<Vec<u8>> { Ok(bytes.to_vec()) }

    fn invert(&self, bytes: &[u8]) -> Result<Vec<u8>> { Ok(bytes.to_vec()) }
}

#[cold]
fn compression_error<E: std::fmt::Display>(stage: Stage, err: E) -> Error {
    Error::new(stage, ErrorKind::Compression(err.to_string()))
}

#[cfg(feature = "compression")]
pub use self::zstd_impl::Zstd;

#[cfg(feature = "compression")]
mod zstd_impl {
    use super::*;
    use std::io::Read;

    /// zstd compression.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Zstd {
        level: i32,
        max_decompressed: usize,
    }

    impl Zstd {
        /// Creates a transform compressing at `level`, refusing to inflate more
        /// than `max_decompressed` bytes.
        pub fn new(level: i32, max_decompressed: usize) -> Self {
            Zstd {
                level,
                max_decompressed,
            }
        }
    }

    impl Transform for Zstd {
        fn name(&self) -> &'static str { "zstd" }

        fn apply(&self, bytes: &[u8]) -> Result<Vec<u8>> {
            let out = zstd::stream::encode_all(bytes, self.level)
                .map_err(|e| compression_error(Stage::Encode, e))?;
            log::debug!(
                "zstd level {} compressed {} bytes into {}",
                self.level,
                bytes.len(),
                out.len()
            );
            Ok(out)
        }

        fn invert(&self, bytes: &[u8]) -> Result<Vec<u8>> {
            let mut decoder = zstd::stream::read::Decoder::new(bytes)
                .map_err(|e| compression_error(Stage::Decode, e))?;
            let mut out = Vec::new();
            let mut buf = [0_u8; 8192];

            loop {
                let read = decoder
                    .read(&mut buf)
                    .map_err(|e| compression_error(Stage::Decode, e))?;
                if read == 0 {
                    break;
                }

                if out.len() + read > self.max_decompressed {
                    return Err(compression_error(
                        Stage::Decode,
                        format!("decompressed size exceeds {} bytes", self.max_decompressed),
                    ));
                }

                out.extend_from_slice(&buf[..read]);
            }

            log::debug!("zstd decompressed {} bytes into {}", bytes.len(), out.len());
            Ok(out)
        }
    }
}

/// Stands in for a compressor that was not compiled in.
#[cfg(not(feature = "compression"))]
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Unavailable;

#[cfg(not(feature = "compression"))]
impl Transform for Unavailable {
    fn name(&self) -> &'static str { "unavailable" }

    fn apply(&self, _: &[u8]) -> Result<Vec<u8>> {
        Err(compression_error(
            Stage::Encode,
            "built without the `compression` feature",
        ))
    }

    fn invert(&self, _: &[u8]) -> Result<Vec<u8>> {
        Err(compression_error(
            Stage::Decode,
            "built without the `compression` feature",
        ))
    }
}
