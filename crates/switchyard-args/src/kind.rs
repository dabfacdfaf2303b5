//! The scalar type an argument's popped values are converted to before
//! storage.

use switchyard_core::{CoreError, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Str,
    Int,
    Float,
    Bool,
}

impl ArgKind {
    fn parse_one(self, name: &str, raw: &str) -> Result<Value, CoreError> {
        match self {
            ArgKind::Str => Ok(Value::Str(raw.to_string())),
            ArgKind::Int => raw
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| CoreError::validation(name, "TypeParse", format!("\"{raw}\" is not an integer"))),
            ArgKind::Float => raw
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| CoreError::validation(name, "TypeParse", format!("\"{raw}\" is not a float"))),
            ArgKind::Bool => raw
                .parse::<bool>()
                .map(Value::Bool)
                .map_err(|_| CoreError::validation(name, "TypeParse", format!("\"{raw}\" is not a bool"))),
        }
    }

    /// Converts a batch of raw string values into a stored [`Value`].
    /// Single-valued declarations (required 1, optional 0) store a
    /// scalar; everything else (multiple required, bounded-optional, or
    /// unbounded) stores the corresponding list variant.
    pub fn values_to_stored(
        self,
        name: &str,
        raw: &[String],
        scalar: bool,
    ) -> Result<Value, CoreError> {
        if scalar {
            let only = raw.first().cloned().unwrap_or_default();
            return self.parse_one(name, &only);
        }
        match self {
            ArgKind::Str => Ok(Value::StrList(raw.to_vec())),
            ArgKind::Int => {
                let mut out = Vec::with_capacity(raw.len());
                for r in raw {
                    match self.parse_one(name, r)? {
                        Value::Int(i) => out.push(i),
                        _ => unreachable!(),
                    }
                }
                Ok(Value::IntList(out))
            }
            ArgKind::Float => {
                let mut out = Vec::with_capacity(raw.len());
                for r in raw {
                    match self.parse_one(name, r)? {
                        Value::Float(v) => out.push(v),
                        _ => unreachable!(),
                    }
                }
                Ok(Value::FloatList(out))
            }
            ArgKind::Bool => {
                let mut out = Vec::with_capacity(raw.len());
                for r in raw {
                    match self.parse_one(name, r)? {
                        Value::Bool(b) => out.push(b),
                        _ => unreachable!(),
                    }
                }
                Ok(Value::BoolList(out))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_int_parses_single_value() {
        let v = ArgKind::Int.values_to_stored("N", &["42".into()], true).unwrap();
        matches!(v, Value::Int(42));
    }

    #[test]
    fn list_str_keeps_all_values() {
        let v = ArgKind::Str
            .values_to_stored("NAMES", &["a".into(), "b".into()], false)
            .unwrap();
        match v {
            Value::StrList(l) => assert_eq!(l, vec!["a", "b"]),
            _ => panic!("expected StrList"),
        }
    }

    #[test]
    fn bad_int_reports_type_parse_rule() {
        let err = ArgKind::Int
            .values_to_stored("N", &["nope".into()], true)
            .unwrap_err();
        assert!(err.to_string().contains("[TypeParse]"));
    }
}
