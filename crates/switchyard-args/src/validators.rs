//! Named validators: predicates over a single popped value that report a
//! named rule on rejection.
//!
//! Error messages always have the shape `validation for "<ARG>" failed:
//! [<RuleName>] <explanation>`, assembled by the caller (an argument
//! processor) from the `(name, rule)` pair a validator reports.

use std::path::Path;
use std::sync::Arc;

use regex::Regex;

/// A named validator: `rule` names the failing rule in error messages,
/// `check` is the predicate itself.
#[derive(Clone)]
pub struct Validator {
    pub rule: &'static str,
    check: Arc<dyn Fn(&str) -> Result<(), String> + Send + Sync>,
}

impl Validator {
    pub fn new(
        rule: &'static str,
        check: impl Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            rule,
            check: Arc::new(check),
        }
    }

    pub fn run(&self, value: &str) -> Result<(), String> {
        (self.check)(value)
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator").field("rule", &self.rule).finish()
    }
}

/// `value` must match `pattern` in full.
pub fn matches_regex(pattern: &str) -> Validator {
    let re = Regex::new(pattern).expect("matches_regex: invalid pattern");
    Validator::new("MatchesRegex", move |v| {
        if re.is_match(v) {
            Ok(())
        } else {
            Err(format!("must match pattern {re}"))
        }
    })
}

/// `value` must be at least `min` characters long.
pub fn min_length(min: usize) -> Validator {
    Validator::new("MinLength", move |v| {
        if v.chars().count() >= min {
            Ok(())
        } else {
            Err(format!("must be at least {min} characters"))
        }
    })
}

/// `value` must be at most `max` characters long.
pub fn max_length(max: usize) -> Validator {
    Validator::new("MaxLength", move |v| {
        if v.chars().count() <= max {
            Ok(())
        } else {
            Err(format!("must be at most {max} characters"))
        }
    })
}

/// `value` must name an existing filesystem entry.
pub fn file_exists() -> Validator {
    Validator::new("FileExists", |v| {
        if Path::new(v).exists() {
            Ok(())
        } else {
            Err("file does not exist".to_string())
        }
    })
}

/// `value` must name an existing directory.
pub fn is_dir() -> Validator {
    Validator::new("IsDir", |v| {
        if Path::new(v).is_dir() {
            Ok(())
        } else {
            Err("not a directory".to_string())
        }
    })
}

/// `value` must be one of `choices`.
pub fn one_of(choices: Vec<String>) -> Validator {
    Validator::new("OneOf", move |v| {
        if choices.iter().any(|c| c == v) {
            Ok(())
        } else {
            Err(format!("must be one of [{}]", choices.join(" ")))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_length_rejects_short_values() {
        let v = min_length(3);
        assert!(v.run("ab").is_err());
        assert!(v.run("abc").is_ok());
    }

    #[test]
    fn regex_validator_matches_full_string() {
        let v = matches_regex(r"^[a-z]+$");
        assert!(v.run("abc").is_ok());
        assert!(v.run("abc123").is_err());
    }

    #[test]
    fn one_of_reports_choices_on_failure() {
        let v = one_of(vec!["a".into(), "b".into()]);
        let err = v.run("c").unwrap_err();
        assert_eq!(err, "must be one of [a b]");
    }
}
