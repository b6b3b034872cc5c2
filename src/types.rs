//! Core types - dynamic values, attribute bags, shape flags.
//!
//! These are the plain data the node model and the property layer pass
//! around. Nothing here is reactive.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use indexmap::IndexMap;

// =============================================================================
// Value - dynamic attribute / prop value
// =============================================================================

/// A dynamically typed value carried by attributes and props.
///
/// Attribute bags come from render output that is not typed against the
/// receiving component, so values stay dynamic until a component reads them.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// True for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of `Int` and `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// String conversion used when a scalar becomes a text node.
///
/// Floats follow ECMAScript number formatting (see [`number_to_string`]),
/// lists join their items with `,` (null items print empty) and maps
/// collapse to `[object Object]`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", number_to_string(*x)),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    if !item.is_null() {
                        write!(f, "{}", item)?;
                    }
                }
                Ok(())
            }
            Value::Map(_) => write!(f, "[object Object]"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Value::Map(value)
    }
}

/// ECMAScript `Number::toString` for an `f64`.
///
/// Shortest round-trip digits; positional notation while the decimal
/// exponent is in `-7 < e < 21`, exponent form (`1e+21`, `1e-7`) outside it.
/// `-0` prints as `0`.
pub fn number_to_string(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. `1.5e-7`.
    let sci = format!("{:e}", x.abs());
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // Position of the decimal point relative to the digit string.
    let n = exp.parse::<i32>().unwrap_or(0) + 1;

    let mut out = String::new();
    if x < 0.0 {
        out.push('-');
    }
    if k <= n && n <= 21 {
        out.push_str(&digits);
        out.extend(std::iter::repeat_n('0', (n - k) as usize));
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        out.push_str(int);
        out.push('.');
        out.push_str(frac);
    } else if -6 < n && n <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', (-n) as usize));
        out.push_str(&digits);
    } else {
        let (first, rest) = digits.split_at(1);
        out.push_str(first);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        let e = n - 1;
        out.push('e');
        out.push(if e < 0 { '-' } else { '+' });
        out.push_str(&e.abs().to_string());
    }
    out
}

// =============================================================================
// Attribute bags
// =============================================================================

/// Attributes attached to a vnode, keyed by their external (hyphenated) name.
///
/// Insertion-ordered: prop ingestion walks attributes in the order they were
/// written, so when two names camelize to the same prop the later one wins.
pub type Attributes = IndexMap<String, Value>;

/// Plain (non-reactive) prop mapping keyed by camel-form prop name.
pub type PropMap = HashMap<String, Value>;

/// Build an attribute bag from literal pairs.
///
/// ```ignore
/// let attrs = attrs([("some-value", Value::from(2)), ("ref", "x".into())]);
/// ```
pub fn attrs<K, const N: usize>(pairs: [(K, Value); N]) -> Attributes
where
    K: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

// =============================================================================
// Shape Flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Node category and children arrangement packed into one word.
    ///
    /// The patcher branches on these instead of re-inspecting the node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ShapeFlags: u16 {
        const ELEMENT = 1 << 0;
        const TEXT = 1 << 1;
        const COMPONENT = 1 << 2;
        const TEXT_CHILDREN = 1 << 3;
        const ARRAY_CHILDREN = 1 << 4;
        /// Bits that describe the children arrangement.
        const CHILDREN_MASK = Self::TEXT_CHILDREN.bits() | Self::ARRAY_CHILDREN.bits();
    }
}

// =============================================================================
// Tests
// =============================================================================
