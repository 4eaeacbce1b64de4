//! A configured encoder/decoder pair.
//!
//! # Example
//!
//! ```
//! use tinyser::prelude::*;
//!
//! #[derive(TinySerDe, Default, Debug, PartialEq)]
//! pub struct Reading {
//!     #[tiny = "sensor"]
//!     pub sensor: String,
//!     #[tiny = "values"]
//!     pub values: Vec<f64>,
//! }
//!
//! let reading = Reading {
//!     sensor: "probe-1".into(),
//!     values: vec![0.5; 64],
//! };
//!
//! let mut codec = Codec::new();
//! codec.set_compress(true);
//!
//! let enc = codec.encode(&reading).unwrap();
//!
//! let mut dec = Reading::default();
//! codec.decode(&enc, &mut dec).unwrap();
//! assert_eq!(dec, reading);
//! ```

use crate::{
    compression::Transform,
    config::{Compression, Config},
    encoding::{decode_from, encode_into, De, Deserializer, Reader, Ser, Serializer},
    errors::Result,
};
use bytes::Bytes;
use std::fmt;

/// Encodes values and decodes byte strings under one [`Config`].
///
/// A `Codec` holds no buffers between calls: each call owns a fresh one, so a
/// shared `Codec` can serve concurrent operations.
pub struct Codec {
    config: Config,
    transform: Option<Box<dyn Transform>>,
}

impl Default for Codec {
    fn default() -> Self { Codec::new() }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Codec")
            .field("config", &self.config)
            .field("transform", &self.transform.as_ref().map(|t| t.name()))
            .finish()
    }
}

fn transform_for(config: &Config) -> Option<Box<dyn Transform>> {
    match config.compression() {
        Compression::None => None,
        #[cfg(feature = "compression")]
        Compression::Zstd { level } => Some(Box::new(crate::compression::Zstd::new(
            level,
            config.max_decompressed(),
        ))),
        #[cfg(not(feature = "compression"))]
        Compression::Zstd { .. } => Some(Box::new(crate::compression::Unavailable)),
    }
}

impl Codec {
    /// An uncompressed codec.
    pub fn new() -> Self { Codec::with_config(Config::default()) }

    /// A codec for `config`.
    pub fn with_config(config: Config) -> Self {
        Codec {
            transform: transform_for(&config),
            config,
        }
    }

    /// Replaces the compressor with a caller-supplied reversible transform.
    pub fn with_transform<T: Transform + 'static>(mut self, transform: T) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Switches compression on (zstd at the configured or default level) or off.
    pub fn set_compress(&mut self, compress: bool) -> &mut Self {
        let compression = match (compress, self.config.compression()) {
            (false, _) => Compression::None,
            (true, Compression::None) => Config::compressed().compression(),
            (true, current) => current,
        };
        self.config = self.config.with_compression(compression);
        self.transform = transform_for(&self.config);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &Config { &self.config }

    /// Whether encoded bytes pass through a transform.
    pub fn is_compressed(&self) -> bool { self.transform.is_some() }

    /// Encodes `value`, applying the transform if one is configured.
    pub fn encode<T: Ser + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        encode_into(value, &mut out)?;
        log::trace!("encoded {:?} into {} bytes", T::KIND, out.len());
        match &self.transform {
            None => Ok(out),
            Some(t) => t.apply(&out),
        }
    }

    /// Appends the encoding of `value` to `out`.
    ///
    /// Without a transform this writes straight into `out`; otherwise the
    /// value is encoded on its own and the transformed bytes are appended.
    pub fn encode_into<T, S>(&self, value: &T, out: &mut S) -> Result<()>
    where
        T: Ser + ?Sized,
        S: Serializer,
    {
        match &self.transform {
            None => encode_into(value, out),
            Some(_) => {
                let bytes = self.encode(value)?;
                out.put_slice(&bytes);
                Ok(())
            }
        }
    }

    /// Decodes `bytes` into `target`, inverting the transform first if one is
    /// configured.
    pub fn decode<T: De + ?Sized>(&self, bytes: &[u8], target: &mut T) -> Result<()> {
        let raw = match &self.transform {
            None => Bytes::copy_from_slice(bytes),
            Some(t) => Bytes::from(t.invert(bytes)?),
        };
        let len = raw.len();
        let mut reader = Reader::new(raw).with_max_count(self.config.max_count());
        decode_from(&mut reader, target)?;
        log::trace!("decoded {} of {} bytes into {:?}", len - reader.remaining(), len, T::KIND);
        Ok(())
    }
}

/// Encodes `value`, compressing with zstd when `compress` is set.
///
/// # Example
///
/// ```
/// use tinyser::prelude::*;
///
/// let plain = tinyser::encode(&vec![1u8, 2, 3], false).unwrap();
/// assert_eq!(plain, encode_full(&vec![1u8, 2, 3]).unwrap());
/// ```
pub fn encode<T: Ser + ?Sized>(value: &T, compress: bool) -> Result<Vec<u8>> {
    let mut codec = Codec::new();
    codec.set_compress(compress);
    codec.encode(value)
}

/// Decodes `bytes` into `target`, decompressing first when `compress` is set.
pub fn decode<T: De + ?Sized>(bytes: &[u8], target: &mut T, compress: bool) -> Result<()> {
    let mut codec = Codec::new();
    codec.set_compress(compress);
    codec.decode(bytes, target)
}
