//! Structured context attached to a single log call.
//!
//! A context is only encoded after the level check has passed, and only
//! when it holds at least one field. Encoding is compact JSON with object
//! keys sorted, so identical contexts always render identically.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use serde::ser::{self, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while encoding a context.
#[derive(Debug, Error)]
pub enum ContextError {
    /// A value in the context cannot be represented as JSON.
    #[error("failed to serialize log context: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Anything that can be attached to a log call as structured fields.
pub trait Context {
    /// True when there are no fields to append.
    fn is_empty(&self) -> bool;

    /// Convert the fields to a JSON value.
    ///
    /// Must fail for values JSON cannot represent, non-finite floats included.
    fn to_json(&self) -> Result<Value, serde_json::Error>;
}

/// Encode `ctx`, returning `None` for an empty context.
pub fn encode<C: Context + ?Sized>(ctx: &C) -> Result<Option<String>, ContextError> {
    if ctx.is_empty() {
        return Ok(None);
    }
    // `serde_json::Map` is ordered by key, which gives the canonical form.
    let value = ctx.to_json()?;
    Ok(Some(serde_json::to_string(&value)?))
}

/// `serde_json::to_value`, except that NaN and infinities are errors
/// instead of `null`.
pub fn to_json_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, serde_json::Error> {
    value.serialize(&mut FiniteCheck)?;
    serde_json::to_value(value)
}

/// A free-form set of fields for one log call.
///
/// A value that cannot be represented as JSON is remembered rather than
/// dropped, and makes encoding fail.
///
/// ```
/// use ctxlog::Ctx;
///
/// let ctx = Ctx::new().with("code", 500).with("path", "/health");
/// assert_eq!(ctx.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ctx {
    fields: BTreeMap<String, Value>,
    rejected: BTreeMap<String, String>,
}

impl Ctx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any previous value under the same key.
    pub fn with(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Serialize) -> Option<Value> {
        let key = key.into();
        match to_json_value(&value) {
            Ok(value) => {
                self.rejected.remove(&key);
                self.fields.insert(key, value)
            }
            Err(e) => {
                self.rejected.insert(key.clone(), e.to_string());
                self.fields.remove(&key)
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.rejected.is_empty()
    }

    /// Fields that were accepted, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

impl<K: Into<String>, V: Serialize> FromIterator<(K, V)> for Ctx {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = Self::new();
        for (key, value) in iter {
            ctx.insert(key, value);
        }
        ctx
    }
}

impl From<Map<String, Value>> for Ctx {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            fields: map.into_iter().collect(),
            rejected: BTreeMap::new(),
        }
    }
}

impl Context for Ctx {
    fn is_empty(&self) -> bool {
        Ctx::is_empty(self)
    }

    fn to_json(&self) -> Result<Value, serde_json::Error> {
        if let Some((key, reason)) = self.rejected.iter().next() {
            return Err(ser::Error::custom(format_args!("field '{key}': {reason}")));
        }
        serde_json::to_value(&self.fields)
    }
}

/// No fields.
impl Context for () {
    fn is_empty(&self) -> bool {
        true
    }

    fn to_json(&self) -> Result<Value, serde_json::Error> {
        Ok(Value::Object(Map::new()))
    }
}

// A `Value` cannot hold a non-finite number, so a map of them needs no check.
impl Context for Map<String, Value> {
    fn is_empty(&self) -> bool {
        Map::is_empty(self)
    }

    fn to_json(&self) -> Result<Value, serde_json::Error> {
        Ok(Value::Object(self.clone()))
    }
}

impl<K, V, S> Context for HashMap<K, V, S>
where
    K: Serialize + Eq + Hash,
    V: Serialize,
    S: BuildHasher,
{
    fn is_empty(&self) -> bool {
        HashMap::is_empty(self)
    }

    fn to_json(&self) -> Result<Value, serde_json::Error> {
        to_json_value(self)
    }
}

impl<K: Serialize + Ord, V: Serialize> Context for BTreeMap<K, V> {
    fn is_empty(&self) -> bool {
        BTreeMap::is_empty(self)
    }

    fn to_json(&self) -> Result<Value, serde_json::Error> {
        to_json_value(self)
    }
}

impl<T: Context + ?Sized> Context for &T {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn to_json(&self) -> Result<Value, serde_json::Error> {
        (**self).to_json()
    }
}

/// Serializer that produces nothing and fails on the first non-finite float.
struct FiniteCheck;

type Checked = Result<(), serde_json::Error>;

fn check_float(v: f64) -> Checked {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ser::Error::custom(format_args!("{v} is not representable in JSON")))
    }
}

impl Serializer for &mut FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, _v: bool) -> Checked {
        Ok(())
    }

    fn serialize_i8(self, _v: i8) -> Checked {
        Ok(())
    }

    fn serialize_i16(self, _v: i16) -> Checked {
        Ok(())
    }

    fn serialize_i32(self, _v: i32) -> Checked {
        Ok(())
    }

    fn serialize_i64(self, _v: i64) -> Checked {
        Ok(())
    }

    fn serialize_i128(self, _v: i128) -> Checked {
        Ok(())
    }

    fn serialize_u8(self, _v: u8) -> Checked {
        Ok(())
    }

    fn serialize_u16(self, _v: u16) -> Checked {
        Ok(())
    }

    fn serialize_u32(self, _v: u32) -> Checked {
        Ok(())
    }

    fn serialize_u64(self, _v: u64) -> Checked {
        Ok(())
    }

    fn serialize_u128(self, _v: u128) -> Checked {
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Checked {
        check_float(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Checked {
        check_float(v)
    }

    fn serialize_char(self, _v: char) -> Checked {
        Ok(())
    }

    fn serialize_str(self, _v: &str) -> Checked {
        Ok(())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Checked {
        Ok(())
    }

    fn serialize_none(self) -> Checked {
        Ok(())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Checked {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Checked {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Checked {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> Checked {
        Ok(())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Checked {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Checked {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self, serde_json::Error> {
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self, serde_json::Error> {
        Ok(self)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self, serde_json::Error> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, serde_json::Error> {
        Ok(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self, serde_json::Error> {
        Ok(self)
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self, serde_json::Error> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, serde_json::Error> {
        Ok(self)
    }
}

impl ser::SerializeSeq for &mut FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Checked {
        value.serialize(&mut **self)
    }

    fn end(self) -> Checked {
        Ok(())
    }
}

impl ser::SerializeTuple for &mut FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Checked {
        value.serialize(&mut **self)
    }

    fn end(self) -> Checked {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for &mut FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Checked {
        value.serialize(&mut **self)
    }

    fn end(self) -> Checked {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for &mut FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Checked {
        value.serialize(&mut **self)
    }

    fn end(self) -> Checked {
        Ok(())
    }
}

impl ser::SerializeMap for &mut FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Checked {
        key.serialize(&mut **self)
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Checked {
        value.serialize(&mut **self)
    }

    fn end(self) -> Checked {
        Ok(())
    }
}

impl ser::SerializeStruct for &mut FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, _key: &'static str, value: &T) -> Checked {
        value.serialize(&mut **self)
    }

    fn end(self) -> Checked {
        Ok(())
    }
}

impl ser::SerializeStructVariant for &mut FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, _key: &'static str, value: &T) -> Checked {
        value.serialize(&mut **self)
    }

    fn end(self) -> Checked {
        Ok(())
    }
}
