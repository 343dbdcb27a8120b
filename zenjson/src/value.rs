// SPDX-License-Identifier: Apache-2.0

//! The dynamically-typed JSON value tree.
//!
//! A [`Value`] owns its children exclusively: arrays own their elements and
//! objects own their entries, so the tree is acyclic by construction. Objects
//! keep their keys in insertion order.

use indexmap::IndexMap;

/// An ordered sequence of values.
pub type Array = Vec<Value>;

/// An insertion-ordered mapping from string keys to values.
pub type Object = IndexMap<String, Value>;

/// The discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Boolean,
    Integer,
    Fractional,
    String,
    Array,
    Object,
}

impl ValueType {
    /// Name used in diagnostics. Integers are called `bigint`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Boolean => "boolean",
            ValueType::Integer => "bigint",
            ValueType::Fractional => "fractional",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        }
    }
}

impl core::fmt::Display for ValueType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One JSON-shaped datum.
///
/// Exactly one of seven variants is active at any time. The `as_*` accessors
/// treat a variant mismatch as a programming error and panic; use the `is_*`
/// predicates (or match on the enum) when the shape of the data is not known.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Fractional(f64),
    String(String),
    Array(Array),
    Object(Object),
}

/// Generates the `is_*`, `as_*` and `as_*_mut` family for one variant.
macro_rules! accessors {
    ($variant:ident, $ty:ty, $is:ident, $as:ident, $as_mut:ident) => {
        #[doc = concat!("Returns `true` if this is a `", stringify!($variant), "` value.")]
        pub fn $is(&self) -> bool {
            matches!(self, Value::$variant(_))
        }

        #[doc = concat!("Borrows the `", stringify!($variant), "` payload.")]
        ///
        /// # Panics
        ///
        /// Panics if the value holds a different variant.
        #[track_caller]
        pub fn $as(&self) -> &$ty {
            match self {
                Value::$variant(v) => v,
                other => other.mismatch(ValueType::$variant),
            }
        }

        #[doc = concat!("Mutably borrows the `", stringify!($variant), "` payload.")]
        ///
        /// # Panics
        ///
        /// Panics if the value holds a different variant.
        #[track_caller]
        pub fn $as_mut(&mut self) -> &mut $ty {
            match self {
                Value::$variant(v) => v,
                other => other.mismatch(ValueType::$variant),
            }
        }
    };
}

impl Value {
    /// Creates an empty object.
    pub fn object() -> Self {
        Value::Object(Object::new())
    }

    /// Creates an empty array.
    pub fn array() -> Self {
        Value::Array(Array::new())
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Integer(_) => ValueType::Integer,
            Value::Fractional(_) => ValueType::Fractional,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` only for `Boolean(true)`.
    pub fn is_true(&self) -> bool {
        matches!(self, Value::Boolean(true))
    }

    accessors!(Boolean, bool, is_boolean, as_boolean, as_boolean_mut);
    accessors!(Integer, i64, is_integer, as_integer, as_integer_mut);
    accessors!(Fractional, f64, is_fractional, as_fractional, as_fractional_mut);
    accessors!(String, String, is_string, as_string, as_string_mut);
    accessors!(Array, Array, is_array, as_array, as_array_mut);
    accessors!(Object, Object, is_object, as_object, as_object_mut);

    #[cold]
    #[track_caller]
    fn mismatch(&self, expected: ValueType) -> ! {
        panic!(
            "expected a {} value, found {}",
            expected,
            self.value_type()
        )
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Integer(i64::from(v))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Fractional(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Fractional(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Value::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Value::Object(v)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Tears nested containers down with a heap worklist, so dropping a tree
/// does not recurse once per nesting level.
impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        match self {
            Value::Array(items) if !items.is_empty() => pending.append(items),
            Value::Object(entries) if !entries.is_empty() => {
                pending.extend(entries.drain(..).map(|(_, v)| v))
            }
            _ => return,
        }
        // Each popped child is emptied before it is dropped
        while let Some(mut value) = pending.pop() {
            match &mut value {
                Value::Array(items) => pending.append(items),
                Value::Object(entries) => pending.extend(entries.drain(..).map(|(_, v)| v)),
                _ => {}
            }
        }
    }
}
