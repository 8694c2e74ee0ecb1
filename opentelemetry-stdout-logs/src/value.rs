//! Conversion of application values into OTLP [`AnyValue`]s.
//!
//! [`Value`] is the closed set of shapes the emitter understands. Anything
//! else enters through [`Value::display`] or [`Value::debug`] and is carried
//! as already-rendered text, so [`encode`] is total.
use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    fmt,
};

use crate::proto::common::v1::{AnyValue, ArrayValue, KeyValue, KeyValueList};

/// Attributes attached to a single log record.
///
/// The map is unordered; the order of the emitted `attributes` list is
/// unspecified.
pub type Attributes = HashMap<String, Value>;

/// A value that can be attached to a log record.
///
/// Values are usually created through `From`/`Into`:
///
/// ```
/// use opentelemetry_stdout_logs::Value;
///
/// let count = Value::from(3u8);
/// let names = Value::from(vec!["a", "b"]);
/// let payload = Value::from(b"\x00\x01".as_slice());
/// assert_eq!(count, Value::I64(3));
/// # let _ = (names, payload);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text.
    String(String),
    /// A boolean.
    Bool(bool),
    /// A signed integer of any width.
    I64(i64),
    /// An unsigned integer of any width.
    U64(u64),
    /// A float of any width.
    F64(f64),
    /// A raw byte string.
    Bytes(Vec<u8>),
    /// An ordered sequence of values.
    List(Vec<Value>),
    /// String-keyed values. Iteration order is unspecified.
    Map(HashMap<String, Value>),
    /// The textual rendering of a value of an unsupported type.
    Opaque(String),
}

impl Value {
    /// Capture any [`Display`](fmt::Display) type as its textual representation.
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Value::Opaque(render(format_args!("{value}")))
    }

    /// Capture any [`Debug`](fmt::Debug) type as its textual representation.
    pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Value::Opaque(render(format_args!("{value:?}")))
    }
}

// Unlike `ToString`, a formatting impl that returns an error leaves whatever
// was written so far instead of panicking.
fn render(args: fmt::Arguments<'_>) -> String {
    let mut text = String::new();
    let _ = fmt::write(&mut text, args);
    text
}

macro_rules! impl_trivial_from {
    ($t:ty, $variant:path) => {
        impl From<$t> for Value {
            fn from(val: $t) -> Value {
                $variant(val.into())
            }
        }
    };
}

macro_rules! impl_cast_from {
    ($t:ty, $variant:path, $target:ty) => {
        impl From<$t> for Value {
            fn from(val: $t) -> Value {
                $variant(val as $target)
            }
        }
    };
}

impl_trivial_from!(i8, Value::I64);
impl_trivial_from!(i16, Value::I64);
impl_trivial_from!(i32, Value::I64);
impl_trivial_from!(i64, Value::I64);
impl_cast_from!(isize, Value::I64, i64);

impl_trivial_from!(u8, Value::U64);
impl_trivial_from!(u16, Value::U64);
impl_trivial_from!(u32, Value::U64);
impl_trivial_from!(u64, Value::U64);
impl_cast_from!(usize, Value::U64, u64);

impl_trivial_from!(f32, Value::F64);
impl_trivial_from!(f64, Value::F64);

impl_trivial_from!(bool, Value::Bool);

impl_trivial_from!(String, Value::String);
impl_trivial_from!(&str, Value::String);
impl_trivial_from!(&String, Value::String);
impl_trivial_from!(Cow<'_, str>, Value::String);
impl_trivial_from!(char, Value::String);

impl_trivial_from!(Vec<u8>, Value::Bytes);
impl_trivial_from!(&[u8], Value::Bytes);

macro_rules! impl_list_from {
    ($($t:ty),+ $(,)?) => {
        $(
            impl From<Vec<$t>> for Value {
                fn from(vals: Vec<$t>) -> Value {
                    Value::List(vals.into_iter().map(Value::from).collect())
                }
            }
        )+
    };
}

// `Vec<u8>` is a byte string, not a list.
impl_list_from!(
    String, &str, bool, i8, i16, i32, i64, isize, u16, u32, u64, usize, f32, f64, Value,
);

impl<K, V, S> From<HashMap<K, V, S>> for Value
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(map: HashMap<K, V, S>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K, V> From<BTreeMap<K, V>> for Value
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(map: BTreeMap<K, V>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` has no OTLP counterpart and falls back to its textual form.
    fn from(val: Option<T>) -> Self {
        match val {
            Some(val) => val.into(),
            None => Value::Opaque(String::from("None")),
        }
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    /// Creates a [`Value::List`] from a sequence of `Into<Value>` values.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::List(iter.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    /// Creates a [`Value::Map`] from a sequence of key-value pairs.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<Value> for AnyValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) | Value::Opaque(s) => AnyValue::String(s),
            Value::Bool(b) => AnyValue::Bool(b),
            Value::I64(i) => AnyValue::Int(i),
            // Values above `i64::MAX` wrap around.
            Value::U64(u) => AnyValue::Int(u as i64),
            Value::F64(f) => AnyValue::Double(f),
            Value::Bytes(b) => AnyValue::Bytes(b),
            Value::List(values) => AnyValue::Array(ArrayValue {
                values: values.into_iter().map(AnyValue::from).collect(),
            }),
            Value::Map(map) => AnyValue::Map(KeyValueList {
                values: map.into_iter().map(KeyValue::from).collect(),
            }),
        }
    }
}

impl From<(String, Value)> for KeyValue {
    fn from((key, value): (String, Value)) -> Self {
        KeyValue {
            key,
            value: value.into(),
        }
    }
}

/// Encode a value into its OTLP representation.
///
/// Never fails: values of unsupported types are expected to arrive as
/// [`Value::Opaque`] text. The encoding recurses without a depth limit.
pub fn encode(value: impl Into<Value>) -> AnyValue {
    AnyValue::from(value.into())
}

/// Encode a record's attributes. `None` yields no attributes.
pub(crate) fn encode_attributes(attributes: Option<Attributes>) -> Vec<KeyValue> {
    attributes
        .map(|attributes| attributes.into_iter().map(KeyValue::from).collect())
        .unwrap_or_default()
}

/// Build an [`Attributes`] map from `key => value` pairs.
///
/// ```
/// use opentelemetry_stdout_logs::{attributes, Value};
///
/// let attributes = attributes! { "count" => 3, "ok" => true };
/// assert_eq!(attributes["count"], Value::I64(3));
/// ```
#[macro_export]
macro_rules! attributes {
    () => {
        $crate::Attributes::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut attributes = $crate::Attributes::new();
        $(
            attributes.insert(::std::string::String::from($key), $crate::Value::from($value));
        )+
        attributes
    }};
}
