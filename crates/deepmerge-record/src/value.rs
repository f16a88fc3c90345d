//! Runtime values stored in property slots.

use std::fmt;

use crate::{NativeFn, Record, RecordRef, Symbol};

/// A value held by a data property or an array element.
///
/// Only [`Value::Object`] is a "deep object" that merges recurse into.
/// Arrays, functions and primitives are leaves as far as record merging is
/// concerned; whether arrays concatenate is up to the merge variant.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Function(NativeFn),
    Symbol(Symbol),
    Object(RecordRef),
}

impl Value {
    /// A fresh empty record.
    pub fn object() -> Self {
        Value::Object(RecordRef::new(Record::new()))
    }

    pub fn is_deep_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_record(&self) -> Option<&RecordRef> {
        match self {
            Value::Object(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Runtime category name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "Undefined",
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Function(_) => "Function",
            Value::Symbol(_) => "Symbol",
            Value::Object(_) => "Object",
        }
    }
}

/// Structural equality: arrays element-wise, records by their own enumerable
/// properties, functions and symbols by identity. `NaN` is unequal to itself.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.structurally_eq(b),
            _ => false,
        }
    }
}

pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Value::Function(func) => write!(f, "{:?}", func),
            Value::Symbol(symbol) => write!(f, "{}", symbol),
            Value::Object(_) => write!(f, "[object Object]"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<NativeFn> for Value {
    fn from(func: NativeFn) -> Self {
        Value::Function(func)
    }
}

impl From<Symbol> for Value {
    fn from(symbol: Symbol) -> Self {
        Value::Symbol(symbol)
    }
}

impl From<RecordRef> for Value {
    fn from(record: RecordRef) -> Self {
        Value::Object(record)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.into_ref())
    }
}
