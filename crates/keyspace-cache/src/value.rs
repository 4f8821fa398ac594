//! JSON value codec with an embedded type tag.

use keyspace_core::{KeyspaceError, KeyspaceResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A cacheable value, tagged on the wire with its shape.
///
/// The wire form is `{"type": "...", "value": ...}` so a read can restore
/// the stored shape without the caller naming it. The set of shapes is
/// closed: unknown tags fail to deserialize instead of instantiating
/// arbitrary types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CacheValue {
    /// UTF-8 string.
    String(String),
    /// 32-bit signed integer.
    Integer(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// 16-bit signed integer.
    Short(i16),
    /// 8-bit signed integer.
    Byte(i8),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Boolean.
    Boolean(bool),
    /// Ordered list of values.
    List(Vec<CacheValue>),
    /// String-keyed map of values.
    Map(BTreeMap<String, CacheValue>),
    /// Explicit null.
    Null,
}

impl CacheValue {
    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> KeyspaceResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from the JSON wire form.
    pub fn from_json(json: &str) -> KeyspaceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Name of this value's shape, as used in mismatch errors.
    #[must_use]
    pub const fn shape_name(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Integer(_) => "Integer",
            Self::Long(_) => "Long",
            Self::Short(_) => "Short",
            Self::Byte(_) => "Byte",
            Self::Float(_) => "Float",
            Self::Double(_) => "Double",
            Self::Boolean(_) => "Boolean",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
            Self::Null => "Null",
        }
    }
}

impl From<String> for CacheValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for CacheValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i32> for CacheValue {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<i64> for CacheValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<i16> for CacheValue {
    fn from(value: i16) -> Self {
        Self::Short(value)
    }
}

impl From<i8> for CacheValue {
    fn from(value: i8) -> Self {
        Self::Byte(value)
    }
}

impl From<f32> for CacheValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<f64> for CacheValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<bool> for CacheValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<V: Into<CacheValue>> From<Vec<V>> for CacheValue {
    fn from(values: Vec<V>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, CacheValue>> for CacheValue {
    fn from(values: BTreeMap<String, CacheValue>) -> Self {
        Self::Map(values)
    }
}

/// Conversion between a Rust type and its tagged [`CacheValue`] shape.
///
/// Implemented for the primitive shapes the typed handles expose, plus
/// [`CacheValue`] itself for the shape-agnostic handle. Reading a stored
/// value through the wrong shape yields
/// [`KeyspaceError::ShapeMismatch`].
pub trait CacheShape: Sized + Send + Sync {
    /// Shape name as it appears in the wire tag.
    const NAME: &'static str;

    /// Wraps the value in its tagged form.
    fn into_value(self) -> CacheValue;

    /// Unwraps a tagged value, failing on a different shape.
    fn from_value(value: CacheValue) -> KeyspaceResult<Self>;
}

macro_rules! impl_cache_shape {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl CacheShape for $ty {
            const NAME: &'static str = $name;

            fn into_value(self) -> CacheValue {
                CacheValue::$variant(self)
            }

            fn from_value(value: CacheValue) -> KeyspaceResult<Self> {
                match value {
                    CacheValue::$variant(inner) => Ok(inner),
                    other => Err(KeyspaceError::ShapeMismatch {
                        expected: $name,
                        actual: other.shape_name(),
                    }),
                }
            }
        }
    };
}

impl_cache_shape!(String, String, "String");
impl_cache_shape!(i32, Integer, "Integer");
impl_cache_shape!(i64, Long, "Long");
impl_cache_shape!(i16, Short, "Short");
impl_cache_shape!(i8, Byte, "Byte");
impl_cache_shape!(f32, Float, "Float");
impl_cache_shape!(f64, Double, "Double");
impl_cache_shape!(bool, Boolean, "Boolean");

impl CacheShape for CacheValue {
    const NAME: &'static str = "Object";

    fn into_value(self) -> CacheValue {
        self
    }

    fn from_value(value: CacheValue) -> KeyspaceResult<Self> {
        Ok(value)
    }
}
