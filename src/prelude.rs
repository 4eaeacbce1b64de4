//! Everything needed to declare, encode and decode shapes.

pub use crate::{
    codec::Codec,
    compression::Transform,
    config::{Compression, Config},
    directive::{Directive, FieldSpec, Shape},
    encoding::{
        decode_from, decode_full, encode_full, encode_into, De, Deserializer, HasKind, Kind,
        Reader, Ser, Serializer,
    },
    errors::{Error, ErrorKind, Stage},
    TinySerDe,
};
pub use bytes::Bytes;
pub use half::f16;
pub use num_complex::Complex;
