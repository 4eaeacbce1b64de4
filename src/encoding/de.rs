//! Decoding: the read cursor, leaf and count readers, and the `De` impls.

use super::{constants::*, HasKind};
use crate::{
    config::DEFAULT_MAX_COUNT,
    directive::FieldSpec,
    errors::{invalid_leaf, truncated, Error, ErrorKind, Result, Segment},
};
use bytes::{Buf, Bytes};
use half::f16;
use num_complex::Complex;
use num_traits::FromPrimitive;
use std::{
    collections::{BTreeMap, HashMap, VecDeque},
    hash::{BuildHasher, Hash},
};

/// A byte source the decoder reads from.
pub trait Deserializer {
    /// Number of unread bytes.
    fn remaining(&self) -> usize;

    /// Absolute offset of the next unread byte.
    fn offset(&self) -> usize;

    /// Takes the next `len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Truncated`](crate::errors::ErrorKind::Truncated) if
    /// fewer than `len` bytes remain.
    fn read_many(&mut self, len: usize) -> Result<Bytes>;

    /// Largest sequence or mapping count this source accepts.
    fn max_count(&self) -> usize { DEFAULT_MAX_COUNT }
}

/// Framing helpers for [`Deserializer`].
pub trait DeserializerExt: Deserializer {
    /// Reads a 4-byte sequence or mapping count.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::CountLimit`] if the count is above
    /// [`Deserializer::max_count`].
    fn read_count(&mut self) -> Result<usize> {
        let mut bs = self.read_many(COUNT_BYTES)?;
        let count = bs.get_u32_le() as usize;
        let limit = self.max_count();
        if count > limit {
            return Err(Error::decode(ErrorKind::CountLimit { count, limit }));
        }
        Ok(count)
    }

    /// Reads a length-prefixed leaf payload.
    fn read_leaf(&mut self) -> Result<Bytes> {
        let mut bs = self.read_many(LEAF_LEN_BYTES)?;
        let len = bs.get_u16_le() as usize;
        self.read_many(len)
    }

    /// Reads a leaf whose payload must be exactly `width` bytes.
    fn read_fixed(&mut self, width: usize, what: &'static str) -> Result<Bytes> {
        let bs = self.read_leaf()?;
        if bs.len() == width {
            Ok(bs)
        } else {
            Err(invalid_leaf(format!(
                "{} payload must be {} bytes, found {}",
                what,
                width,
                bs.len()
            )))
        }
    }

    /// Reads a bool leaf.
    fn read_bool(&mut self) -> Result<bool> {
        let bs = self.read_fixed(BOOL_WIDTH, "bool")?;
        match bs[0] {
            CON_FALSE => Ok(false),
            CON_TRUE => Ok(true),
            other => Err(invalid_leaf(format!("bool byte must be 0 or 1, found {}", other))),
        }
    }

    /// Reads a signed integer leaf.
    fn read_i64(&mut self) -> Result<i64> { Ok(self.read_fixed(INT_WIDTH, "integer")?.get_i64_le()) }

    /// Reads an unsigned integer leaf.
    fn read_u64(&mut self) -> Result<u64> { Ok(self.read_fixed(INT_WIDTH, "integer")?.get_u64_le()) }

    /// Reads a float leaf.
    fn read_f64(&mut self) -> Result<f64> { Ok(self.read_fixed(FLOAT_WIDTH, "float")?.get_f64_le()) }

    /// Reads a complex leaf as `(re, im)`.
    fn read_complex(&mut self) -> Result<(f64, f64)> {
        let mut bs = self.read_fixed(COMPLEX_WIDTH, "complex")?;
        let re = bs.get_f64_le();
        let im = bs.get_f64_le();
        Ok((re, im))
    }
}

impl<D: Deserializer + ?Sized> DeserializerExt for D {}

/// A read cursor over an immutable byte string.
#[derive(Clone, Debug)]
pub struct Reader {
    buf: Bytes,
    offset: usize,
    max_count: usize,
}

impl Reader {
    /// Creates a reader positioned at the first byte of `buf`.
    pub fn new<B: Into<Bytes>>(buf: B) -> Self {
        Reader {
            buf: buf.into(),
            offset: 0,
            max_count: DEFAULT_MAX_COUNT,
        }
    }

    /// Sets the largest sequence or mapping count the reader accepts.
    pub fn with_max_count(mut self, limit: usize) -> Self {
        self.max_count = limit;
        self
    }

    /// Whether every byte has been consumed.
    pub fn is_empty(&self) -> bool { self.buf.is_empty() }
}

impl Deserializer for Reader {
    #[inline]
    fn remaining(&self) -> usize { self.buf.len() }

    #[inline]
    fn offset(&self) -> usize { self.offset }

    #[inline]
    fn read_many(&mut self, len: usize) -> Result<Bytes> {
        if self.buf.len() >= len {
            self.offset += len;
            Ok(self.buf.split_to(len))
        } else {
            Err(truncated(self.offset, len, self.buf.len()))
        }
    }

    #[inline]
    fn max_count(&self) -> usize { self.max_count }
}

/// A value that can be deserialized in place.
///
/// Decoding writes into existing storage, so fields the wire does not carry
/// keep whatever the target already held.
pub trait De: HasKind {
    /// Overwrite this value with the next value read from `d`.
    fn de_in_place<D: Deserializer>(&mut self, d: &mut D) -> Result<()>;
}

/// Reads one struct field according to its directive.
///
/// This is what derived [`De`] impls call for every non-excluded field.
#[inline]
pub fn de_field<D: Deserializer, T: De + ?Sized>(
    d: &mut D,
    spec: &FieldSpec,
    value: &mut T,
) -> Result<()> {
    if spec.directive.reads(d.remaining()) {
        value
            .de_in_place(d)
            .map_err(|e| e.within(Segment::Field(spec.name)))?;
    }
    Ok(())
}

macro_rules! de_ints {
    ($read:ident, $from:ident, $($t:ty),*) => {
        $(
            impl De for $t {
                #[inline]
                fn de_in_place<D: Deserializer>(&mut self, d: &mut D) -> Result<()> {
                    let v = d.$read()?;
                    match <$t>::$from(v) {
                        Some(n) => {
                            *self = n;
                            Ok(())
                        }
                        None => Err(invalid_leaf(format!(
                            "{} does not fit in {}",
                            v,
                            stringify!($t)
                        ))),
                    }
                }
            }
        )*
    };
}

de_ints!(read_i64, from_i64, i8, i16, i32, i64, i128, isize);
de_ints!(read_u64, from_u64, u8, u16, u32, u64, u128, usize);

impl De for bool {
    fn de_in_place<D: Deserializer>(&mut self, d: &mut D) -> Result<()> {
        *self = d.read_bool()?;
        Ok(())
    }
}

impl De for char {
    fn de_in_place<D: Deserializer>(&mut self, d: &mut D) -> Result<()> {
        let v = d.read_u64()?;
        match u32::from_u64(v).and_then(std::char::from_u32) {
            Some(c) => {
                *self = c;
                Ok(())
            }
            None => Err(invalid_leaf(format!("{:#x} is not a unicode scalar value", v))),
        }
    }
}

impl De for f16 {
    fn de_in_place<D: Deserializer>(&mut self, d: &mut D) -> Result<()> {
        *self = f16::from_f64(d.read_f64()?);
        Ok(())
    }
}

impl De for f32 {
    fn de_in_place<D: Deserializer>(&mut self, d: &mut D) -> Result<()> {
        *self = d.read_f64()? as f32;
        Ok(())
    }
}

impl De for f64 {
    fn de_in_place<D: Deserializer>(&mut self, d: &mut D) -> Result<()> {
        *self = d.read_f64()?;
        Ok(())
    }
}

impl De for Complex<f32> {
    fn de_in_place<D: Deserializer>(&mut self, d: &mut D) -> Result<()> {
        let (re, im) = d.read_complex()?;
        *self = Complex::new(re as f32, im as f32);
        Ok(())
    }
}

impl De for Complex<f64> {
    fn de_in_place<D: Deserializer>(&mut self, d: &mut D) -> Result<()> {
        let (re, im) = d.read_complex()?;
        *self = Complex::new(re, im);
        Ok(())
    }
}

impl De for String {
    fn de_in_place<D: Deserializer>(&mut self, d: &mut D) -> Result<()> {
        let bs = d.read_leaf()?;
        match std::str::from_utf8(&bs) {
            Ok(s) => {
                self.clear();
                self.push_str(s);
                Ok(())
            }
            Err(e) => Err(invalid_leaf(format!("string is not valid UTF-8: {}", e))),
        }
    }
}

impl De for Bytes {
    fn de_in_place<D: Deserializer>(&mut self, d: &mut D) -> Result<()> {
        *self = d.read_leaf()?;
        Ok(())
    }
}

impl<T: De + ?Sized> De for Box<T> {
    fn de_in_place<D: Deserializer>(&mut self, d: &mut D) -> Result<()> { (**self).de_in_place(d) }
}

/// Decodes `count` fresh default elements, handing each to `push`.
#[inline]
fn de_seq<D, T, F>(d: &mut D, count: usize, mut push: F) -> Result<()>
where
    D: Deserializer,
    T: De + Default,
    F: FnMut(T),
{
    for i in 0..count {
        let mut t = T::default();
        t.de_in_place(d).map_err(|e| e.within(Segment::Index(i)))?;
        push(t);
    }
    Ok(())
}

/// Decodes `count` fresh default key/value pairs, handing each to `insert`.
#[inline]
fn de_map<D, K, V, F>(d: &mut D, count: usize, mut insert: F) -> Result<()>
where
    D: Deserializer,
    K: De + Default,
    V: De + Default,
    F: FnMut(K, V),
{
    for i in 0..count {
        let mut k = K::default();
        k.de_in_place(d).map_err(|e| e.within(Segment::MapKey(i)))?;
        let mut v = V::default();
        v.de_in_place(d).map_err(|e| e.within(Segment::MapValue(i)))?;
        insert(k, v);
    }
    Ok(())
}

impl<T: De + Default> De for Vec<T> {
    fn de_in_place<D: Deserializer>(&mut self, d: &mut D) -> Result<()> {
        let count = d.read_count()?;
        // elements may be zero-width, so the count alone cannot be trusted
        // to size the allocation
        let mut out: Vec<T> = Vec::with_capacity(count.min(d.remaining()));
        de_seq(d, count, |t| out.push(t))?;
        *self = out;
        Ok(())
    }
}

impl<T: De + Default> De for VecDeque<T> {
    fn de_in_place<D: Deserializer>(&mut self, d: &mut D) -> Result<()> {
        let count = d.read_count()?;
        let mut out: VecDeque<T> = VecDeque::with_capacity(count.min(d.remaining()));
        de_seq(d, count, |t| out.push_back(t))?;
        *self = out;
        Ok(())
    }
}

impl<K, V, H> De for HashMap<K, V, H>
where
    K: De + Default + Eq + Hash,
    V: De + Default,
    H: BuildHasher + Default,
{
    fn de_in_place<D: Deserializer>(&mut self, d: &mut D) -> Result<()> {
        let count = d.read_count()?;
        let mut out: HashMap<K, V, H> =
            HashMap::with_capacity_and_hasher(count.min(d.remaining()), H::default());
        de_map(d, count, |k, v| {
            out.insert(k, v);
        })?;
        *self = out;
        Ok(())
    }
}

impl<K, V> De for BTreeMap<K, V>
where
    K: De + Default + Ord,
    V: De + Default,
{
    fn de_in_place<D: Deserializer>(&mut self, d: &mut D) -> Result<()> {
        let count = d.read_count()?;
        let mut out: BTreeMap<K, V> = BTreeMap::new();
        de_map(d, count, |k, v| {
            out.insert(k, v);
        })?;
        *self = out;
        Ok(())
    }
}
