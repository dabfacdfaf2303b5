//! Value transformers: run after validation, may replace the popped
//! string with a new one, and may themselves fail with a `Validation`
//! error.

use std::path::PathBuf;
use std::sync::Arc;

use switchyard_core::CoreError;

/// A value-to-value transform applied to a single popped token, after
/// validation and before type conversion and storage.
#[derive(Clone)]
pub struct Transformer {
    name: &'static str,
    apply: Arc<dyn Fn(&str) -> Result<String, String> + Send + Sync>,
}

impl Transformer {
    pub fn new(
        name: &'static str,
        apply: impl Fn(&str) -> Result<String, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            apply: Arc::new(apply),
        }
    }

    pub fn run(&self, arg_name: &str, value: &str) -> Result<String, CoreError> {
        (self.apply)(value).map_err(|e| CoreError::validation(arg_name, self.name, e))
    }
}

impl std::fmt::Debug for Transformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transformer").field("name", &self.name).finish()
    }
}

/// Replaces the string with its absolute filesystem form. The pattern the
/// spec calls out by name ("filepath absolutization").
pub fn absolutize_path() -> Transformer {
    Transformer::new("AbsolutizePath", |v| {
        let p = PathBuf::from(v);
        if p.is_absolute() {
            return Ok(p.to_string_lossy().into_owned());
        }
        std::env::current_dir()
            .map(|cwd| cwd.join(p).to_string_lossy().into_owned())
            .map_err(|e| format!("could not resolve current directory: {e}"))
    })
}

/// Lowercases the value.
pub fn lowercase() -> Transformer {
    Transformer::new("Lowercase", |v| Ok(v.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolutize_leaves_absolute_paths_alone() {
        let t = absolutize_path();
        let got = t.run("PATH", "/already/absolute").unwrap();
        assert_eq!(got, "/already/absolute");
    }

    #[test]
    fn absolutize_joins_relative_paths_with_cwd() {
        let t = absolutize_path();
        let got = t.run("PATH", "relative/file.txt").unwrap();
        assert!(std::path::Path::new(&got).is_absolute());
        assert!(got.ends_with("relative/file.txt"));
    }

    #[test]
    fn lowercase_transforms_value() {
        let t = lowercase();
        assert_eq!(t.run("ARG", "HELLO").unwrap(), "hello");
    }
}
