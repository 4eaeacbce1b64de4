//! Encoding: byte sinks, leaf and count framing, and the `Ser` impls.

use super::{constants::*, HasKind, Kind};
use crate::{
    directive::FieldSpec,
    errors::{unsupported, Error, ErrorKind, Result, Segment, Stage},
};
use bytes::{BufMut, Bytes, BytesMut};
use half::f16;
use num_complex::Complex;
use num_traits::ToPrimitive;
use std::{
    collections::{BTreeMap, HashMap, VecDeque},
    hash::BuildHasher,
};

/// A growable byte sink the encoder writes into.
pub trait Serializer {
    /// The type of the output value.
    type Out;
    /// Add a byte to the output value.
    fn put_u8(&mut self, u: u8);
    /// Add a slice to the output value.
    fn put_slice(&mut self, slice: &[u8]);
    /// Return the output value.
    fn finalize(self) -> Self::Out;
}

impl Serializer for Vec<u8> {
    type Out = Self;

    fn put_u8(&mut self, u: u8) { self.push(u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Self::Out { self }
}

impl Serializer for BytesMut {
    type Out = Bytes;

    fn put_u8(&mut self, u: u8) { BufMut::put_u8(self, u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Self::Out { self.freeze() }
}

/// Framing helpers for [`Serializer`].
pub trait SerializerExt: Serializer {
    /// Add a length-prefixed leaf.
    ///
    /// # Arguments
    ///
    /// * `payload: &[u8]` - The leaf's payload, at most [`MAX_LEAF_LEN`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::LeafOverflow`] if the payload does not fit the
    /// 2-byte prefix. Nothing is written in that case.
    fn put_leaf(&mut self, payload: &[u8]) -> Result<()>;

    /// Add a sequence or mapping count.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::CountOverflow`] if `len` does not fit in a `u32`.
    fn put_count(&mut self, len: usize) -> Result<()>;

    /// Add a bool leaf.
    fn put_bool(&mut self, b: bool) -> Result<()> {
        self.put_slice(&(BOOL_WIDTH as u16).to_le_bytes());
        self.put_u8(if b { CON_TRUE } else { CON_FALSE });
        Ok(())
    }

    /// Add a signed integer leaf.
    fn put_i64(&mut self, i: i64) -> Result<()> { self.put_leaf(&i.to_le_bytes()) }

    /// Add an unsigned integer leaf.
    fn put_u64(&mut self, u: u64) -> Result<()> { self.put_leaf(&u.to_le_bytes()) }

    /// Add a float leaf.
    fn put_f64(&mut self, f: f64) -> Result<()> { self.put_leaf(&f.to_bits().to_le_bytes()) }

    /// Add a complex leaf, real half first.
    fn put_complex(&mut self, re: f64, im: f64) -> Result<()> {
        let mut payload = [0u8; COMPLEX_WIDTH];
        payload[..FLOAT_WIDTH].copy_from_slice(&re.to_bits().to_le_bytes());
        payload[FLOAT_WIDTH..].copy_from_slice(&im.to_bits().to_le_bytes());
        self.put_leaf(&payload)
    }
}

impl<S: Serializer> SerializerExt for S {
    #[inline]
    fn put_leaf(&mut self, payload: &[u8]) -> Result<()> {
        if payload.len() > MAX_LEAF_LEN {
            return Err(Error::encode(ErrorKind::LeafOverflow { len: payload.len() }));
        }
        self.put_slice(&(payload.len() as u16).to_le_bytes());
        self.put_slice(payload);
        Ok(())
    }

    #[inline]
    fn put_count(&mut self, len: usize) -> Result<()> {
        if len > MAX_COUNT {
            return Err(Error::encode(ErrorKind::CountOverflow { len }));
        }
        self.put_slice(&(len as u32).to_le_bytes());
        Ok(())
    }
}

/// A value that can be serialized.
pub trait Ser: HasKind {
    /// Write this value into `s`.
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()>;

    /// Whether this value equals its type's default, which decides whether an
    /// `omitempty` field is written.
    fn is_default(&self) -> bool;
}

/// Writes one struct field according to its directive.
///
/// This is what derived [`Ser`] impls call for every non-excluded field.
#[inline]
pub fn ser_field<S: Serializer, T: Ser + ?Sized>(
    s: &mut S,
    spec: &FieldSpec,
    value: &T,
) -> Result<()> {
    if spec.directive.writes(|| value.is_default()) {
        value
            .ser(s)
            .map_err(|e| e.within(Segment::Field(spec.name)))?;
    }
    Ok(())
}

macro_rules! ser_ints {
    ($kind:ident, $put:ident, $to:ident, $($t:ty),*) => {
        $(
            impl HasKind for $t {
                const KIND: Kind = Kind::$kind;
            }

            impl Ser for $t {
                #[inline]
                fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> {
                    match self.$to() {
                        Some(v) => s.$put(v),
                        None => Err(unsupported(
                            Stage::Encode,
                            format!(
                                "{} value {} does not fit the 8-byte integer leaf",
                                stringify!($t),
                                self
                            ),
                        )),
                    }
                }

                #[inline]
                fn is_default(&self) -> bool { *self == 0 }
            }
        )*
    };
}

ser_ints!(Int, put_i64, to_i64, i8, i16, i32, i64, i128, isize);
ser_ints!(Uint, put_u64, to_u64, u8, u16, u32, u64, u128, usize);

impl HasKind for bool {
    const KIND: Kind = Kind::Bool;
}

impl Ser for bool {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { s.put_bool(*self) }

    fn is_default(&self) -> bool { !*self }
}

impl HasKind for char {
    const KIND: Kind = Kind::Uint;
}

impl Ser for char {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { s.put_u64(u64::from(*self as u32)) }

    fn is_default(&self) -> bool { *self == '\0' }
}

impl HasKind for f16 {
    const KIND: Kind = Kind::Float;
}

impl Ser for f16 {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { s.put_f64(self.to_f64()) }

    fn is_default(&self) -> bool { self.to_bits() == 0 }
}

impl HasKind for f32 {
    const KIND: Kind = Kind::Float;
}

impl Ser for f32 {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { s.put_f64(f64::from(*self)) }

    fn is_default(&self) -> bool { self.to_bits() == 0 }
}

impl HasKind for f64 {
    const KIND: Kind = Kind::Float;
}

impl Ser for f64 {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { s.put_f64(*self) }

    fn is_default(&self) -> bool { self.to_bits() == 0 }
}

impl HasKind for Complex<f32> {
    const KIND: Kind = Kind::Complex;
}

impl Ser for Complex<f32> {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> {
        s.put_complex(f64::from(self.re), f64::from(self.im))
    }

    fn is_default(&self) -> bool { self.re.to_bits() == 0 && self.im.to_bits() == 0 }
}

impl HasKind for Complex<f64> {
    const KIND: Kind = Kind::Complex;
}

impl Ser for Complex<f64> {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { s.put_complex(self.re, self.im) }

    fn is_default(&self) -> bool { self.re.to_bits() == 0 && self.im.to_bits() == 0 }
}

impl HasKind for str {
    const KIND: Kind = Kind::Bytes;
}

impl Ser for str {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { s.put_leaf(self.as_bytes()) }

    fn is_default(&self) -> bool { self.is_empty() }
}

impl HasKind for String {
    const KIND: Kind = Kind::Bytes;
}

impl Ser for String {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { s.put_leaf(self.as_bytes()) }

    fn is_default(&self) -> bool { self.is_empty() }
}

impl HasKind for Bytes {
    const KIND: Kind = Kind::Bytes;
}

impl Ser for Bytes {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { s.put_leaf(self) }

    fn is_default(&self) -> bool { self.is_empty() }
}

impl<'a, T: HasKind + ?Sized> HasKind for &'a T {
    const KIND: Kind = T::KIND;
}

impl<'a, T: Ser + ?Sized> Ser for &'a T {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { (**self).ser(s) }

    fn is_default(&self) -> bool { (**self).is_default() }
}

impl<T: HasKind + ?Sized> HasKind for Box<T> {
    const KIND: Kind = T::KIND;
}

impl<T: Ser + ?Sized> Ser for Box<T> {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { (**self).ser(s) }

    fn is_default(&self) -> bool { (**self).is_default() }
}

#[inline]
fn ser_seq<'a, S, T, I>(s: &mut S, len: usize, items: I) -> Result<()>
where
    S: Serializer,
    T: Ser + 'a,
    I: Iterator<Item = &'a T>,
{
    s.put_count(len)?;
    for (i, t) in items.enumerate() {
        t.ser(s).map_err(|e| e.within(Segment::Index(i)))?;
    }
    Ok(())
}

#[inline]
fn ser_map<'a, S, K, V, I>(s: &mut S, len: usize, entries: I) -> Result<()>
where
    S: Serializer,
    K: Ser + 'a,
    V: Ser + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    s.put_count(len)?;
    for (i, (k, v)) in entries.enumerate() {
        k.ser(s).map_err(|e| e.within(Segment::MapKey(i)))?;
        v.ser(s).map_err(|e| e.within(Segment::MapValue(i)))?;
    }
    Ok(())
}

impl<T: HasKind> HasKind for [T] {
    const KIND: Kind = Kind::Sequence;
}

impl<T: Ser> Ser for [T] {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { ser_seq(s, self.len(), self.iter()) }

    fn is_default(&self) -> bool { self.is_empty() }
}

impl<T: HasKind> HasKind for Vec<T> {
    const KIND: Kind = Kind::Sequence;
}

impl<T: Ser> Ser for Vec<T> {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { ser_seq(s, self.len(), self.iter()) }

    fn is_default(&self) -> bool { self.is_empty() }
}

impl<T: HasKind> HasKind for VecDeque<T> {
    const KIND: Kind = Kind::Sequence;
}

impl<T: Ser> Ser for VecDeque<T> {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { ser_seq(s, self.len(), self.iter()) }

    fn is_default(&self) -> bool { self.is_empty() }
}

impl<K: HasKind, V: HasKind, H> HasKind for HashMap<K, V, H> {
    const KIND: Kind = Kind::Mapping;
}

impl<K: Ser, V: Ser, H: BuildHasher> Ser for HashMap<K, V, H> {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { ser_map(s, self.len(), self.iter()) }

    fn is_default(&self) -> bool { self.is_empty() }
}

impl<K: HasKind, V: HasKind> HasKind for BTreeMap<K, V> {
    const KIND: Kind = Kind::Mapping;
}

impl<K: Ser, V: Ser> Ser for BTreeMap<K, V> {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { ser_map(s, self.len(), self.iter()) }

    fn is_default(&self) -> bool { self.is_empty() }
}
