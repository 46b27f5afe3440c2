//! Rejects values holding NaN or infinite floats.
//!
//! `serde_json` quietly turns non-finite floats into `null`, which would make
//! `NaN`, `inf` and `null` hash identically. Walking the value with this
//! serializer first surfaces them as errors instead.
use serde::Serialize;
use serde::ser::{self, Error as _};
use serde_json::Error;

/// Fails if any `f32`/`f64` reachable from `value` is NaN or infinite.
pub fn ensure_finite<T: Serialize + ?Sized>(value: &T) -> Result<(), Error> {
    value.serialize(FiniteFloats)
}

#[derive(Clone, Copy)]
struct FiniteFloats;

fn check(x: f64) -> Result<(), Error> {
    if x.is_finite() {
        Ok(())
    } else {
        Err(Error::custom(format!(
            "non-finite float {x} has no canonical form"
        )))
    }
}

impl ser::Serializer for FiniteFloats {
    type Ok = ();
    type Error = Error;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_f32(self, v: f32) -> Result<(), Error> {
        check(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<(), Error> {
        check(v)
    }

    fn serialize_bool(self, _: bool) -> Result<(), Error> {
        Ok(())
    }

    fn serialize_i8(self, _: i8) -> Result<(), Error> {
        Ok(())
    }

    fn serialize_i16(self, _: i16) -> Result<(), Error> {
        Ok(())
    }

    fn serialize_i32(self, _: i32) -> Result<(), Error> {
        Ok(())
    }

    fn serialize_i64(self, _: i64) -> Result<(), Error> {
        Ok(())
    }

    fn serialize_i128(self, _: i128) -> Result<(), Error> {
        Ok(())
    }

    fn serialize_u8(self, _: u8) -> Result<(), Error> {
        Ok(())
    }

    fn serialize_u16(self, _: u16) -> Result<(), Error> {
        Ok(())
    }

    fn serialize_u32(self, _: u32) -> Result<(), Error> {
        Ok(())
    }

    fn serialize_u64(self, _: u64) -> Result<(), Error> {
        Ok(())
    }

    fn serialize_u128(self, _: u128) -> Result<(), Error> {
        Ok(())
    }

    fn serialize_char(self, _: char) -> Result<(), Error> {
        Ok(())
    }

    fn serialize_str(self, _: &str) -> Result<(), Error> {
        Ok(())
    }

    fn serialize_bytes(self, _: &[u8]) -> Result<(), Error> {
        Ok(())
    }

    fn serialize_none(self) -> Result<(), Error> {
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), Error> {
        Ok(())
    }

    fn serialize_unit_struct(self, _: &'static str) -> Result<(), Error> {
        Ok(())
    }

    fn serialize_unit_variant(self, _: &'static str, _: u32, _: &'static str) -> Result<(), Error> {
        Ok(())
    }

    fn serialize_newtype_struct<T>(self, _: &'static str, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        value: &T,
    ) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_seq(self, _: Option<usize>) -> Result<Self, Error> {
        Ok(self)
    }

    fn serialize_tuple(self, _: usize) -> Result<Self, Error> {
        Ok(self)
    }

    fn serialize_tuple_struct(self, _: &'static str, _: usize) -> Result<Self, Error> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self, Error> {
        Ok(self)
    }

    fn serialize_map(self, _: Option<usize>) -> Result<Self, Error> {
        Ok(self)
    }

    fn serialize_struct(self, _: &'static str, _: usize) -> Result<Self, Error> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self, Error> {
        Ok(self)
    }
}

impl ser::SerializeSeq for FiniteFloats {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Error> {
        Ok(())
    }
}

impl ser::SerializeTuple for FiniteFloats {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Error> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for FiniteFloats {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Error> {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for FiniteFloats {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Error> {
        Ok(())
    }
}

impl ser::SerializeMap for FiniteFloats {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        key.serialize(*self)
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Error> {
        Ok(())
    }
}

impl ser::SerializeStruct for FiniteFloats {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, _: &'static str, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Error> {
        Ok(())
    }
}

impl ser::SerializeStructVariant for FiniteFloats {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, _: &'static str, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_finite_values_pass() {
        assert!(ensure_finite(&1.5f64).is_ok());
        assert!(ensure_finite(&f32::MAX).is_ok());
        assert!(ensure_finite(&vec![Some(0.0), None]).is_ok());
        assert!(ensure_finite(&("text", 3u8, -0.0f64)).is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(ensure_finite(&f64::NAN).is_err());
        assert!(ensure_finite(&f64::INFINITY).is_err());
        assert!(ensure_finite(&f64::NEG_INFINITY).is_err());
        assert!(ensure_finite(&f32::NAN).is_err());
    }

    #[test]
    fn test_nested_non_finite_rejected() {
        let mut map = BTreeMap::new();
        map.insert("ok", vec![1.0, 2.0]);
        map.insert("bad", vec![1.0, f64::INFINITY]);
        assert!(ensure_finite(&map).is_err());
        assert!(ensure_finite(&Some((1, f64::NAN))).is_err());
    }
}
