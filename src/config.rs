//! Codec configuration.

/// zstd level used when compression is switched on without an explicit level.
pub const DEFAULT_ZSTD_LEVEL: i32 = 3;

/// Upper bound on the size of a decompressed input, 512 MiB.
pub const DEFAULT_MAX_DECOMPRESSED: usize = 512 * 1024 * 1024;

/// Upper bound on a single decoded sequence or mapping count, 16 Mi entries.
///
/// Elements that occupy no bytes on the wire (structs whose fields are all
/// excluded) are decoded once per counted entry however short the input is,
/// so the count itself has to be bounded.
pub const DEFAULT_MAX_COUNT: usize = 1 << 24;

/// Which reversible transform wraps the encoded bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Compression {
    /// Bytes are returned exactly as encoded.
    None,
    /// Bytes are passed through zstd at the given level.
    Zstd {
        /// zstd compression level.
        level: i32,
    },
}

impl Default for Compression {
    fn default() -> Self { Compression::None }
}

impl Compression {
    /// Whether a transform is applied at all.
    pub fn is_enabled(self) -> bool { self != Compression::None }
}

/// Settings for a [`Codec`](crate::codec::Codec).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    compression: Compression,
    max_decompressed: usize,
    max_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            compression: Compression::None,
            max_decompressed: DEFAULT_MAX_DECOMPRESSED,
            max_count: DEFAULT_MAX_COUNT,
        }
    }
}

impl Config {
    /// An uncompressed configuration.
    pub fn new() -> Self { Self::default() }

    /// A configuration compressing with zstd at [`DEFAULT_ZSTD_LEVEL`].
    pub fn compressed() -> Self {
        Self::default().with_compression(Compression::Zstd {
            level: DEFAULT_ZSTD_LEVEL,
        })
    }

    /// Sets the compression mode.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Sets how many bytes decompression may produce before giving up.
    pub fn with_max_decompressed(mut self, limit: usize) -> Self {
        self.max_decompressed = limit;
        self
    }

    /// Sets the largest sequence or mapping count decoding accepts.
    pub fn with_max_count(mut self, limit: usize) -> Self {
        self.max_count = limit;
        self
    }

    /// The compression mode.
    pub fn compression(&self) -> Compression { self.compression }

    /// The decompression size limit.
    pub fn max_decompressed(&self) -> usize { self.max_decompressed }

    /// The decoded count limit.
    pub fn max_count(&self) -> usize { self.max_count }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders() {
        assert!(!Config::new().compression().is_enabled());

        let c = Config::compressed().with_max_decompressed(10);
        assert_eq!(c.compression(), Compression::Zstd { level: 3 });
        assert_eq!(c.max_decompressed(), 10);
        assert_eq!(c.max_count(), DEFAULT_MAX_COUNT);
        assert_eq!(c.with_max_count(3).max_count(), 3);
    }
}
