//! The typed key-value store accumulated during a traversal.
//!
//! Modeled on the tagged-union shape `standout-seeker::Value` uses for its
//! query accessors, generalized to owned, list-capable variants: argument
//! values must outlive the token that produced them.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A value stored in [`Data`] under an argument or flag's name.
#[derive(Debug, Clone)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    StrList(Vec<String>),
    IntList(Vec<i64>),
    FloatList(Vec<f64>),
    BoolList(Vec<bool>),
    /// An opaque typed value for processor-defined data that doesn't fit
    /// the scalar/list shapes above. The `String` is a debug label, not a
    /// discriminant other processors are expected to match on.
    Opaque(Arc<dyn Any + Send + Sync>, &'static str),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::StrList(v) => write!(f, "{}", v.join(" ")),
            Value::IntList(v) => write!(f, "{}", join_display(v)),
            Value::FloatList(v) => write!(f, "{}", join_display(v)),
            Value::BoolList(v) => write!(f, "{}", join_display(v)),
            Value::Opaque(_, label) => write!(f, "<{label}>"),
        }
    }
}

fn join_display<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|x| x.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Host-OS capability reference carried alongside argument data so
/// processors (transformers, validators) can ask about the platform
/// without reaching for global state. Kept deliberately tiny: the rest of
/// the OS capability surface (shell emission) lives in `switchyard-shell`
/// and is injected by the top-level crate, not by `Data` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    BashLike,
    PowerShellLike,
}

/// The per-traversal accumulator that argument and flag processors read
/// from and write to.
#[derive(Debug, Clone, Default)]
pub struct Data {
    values: HashMap<String, Value>,
    host_os: Option<HostOs>,
}

impl Data {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host_os(host_os: HostOs) -> Self {
        Self {
            values: HashMap::new(),
            host_os: Some(host_os),
        }
    }

    pub fn host_os(&self) -> Option<HostOs> {
        self.host_os
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(Value::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(Value::Int(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        match self.values.get(key) {
            Some(Value::Float(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn get_str_list(&self, key: &str) -> Option<&[String]> {
        match self.values.get(key) {
            Some(Value::StrList(v)) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|s| s.as_str())
    }
}
