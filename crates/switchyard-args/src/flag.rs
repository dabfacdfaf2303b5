//! Flags: `--long`/`-short` tokens that may appear anywhere in the
//! remaining window and are consumed before positional matching begins.

use switchyard_core::{CoreError, CoreResult, Data, NodeRef, Processor, TokenStream, UsageSink, Value};

use crate::completer::Completer;
use crate::kind::ArgKind;
use crate::transformers::Transformer;
use crate::validators::Validator;

/// A declared flag, with an argument sub-declaration (count, type,
/// validators, transformer) just like a positional argument.
pub struct FlagDecl {
    pub(crate) long: String,
    pub(crate) short: Option<char>,
    kind: ArgKind,
    required: usize,
    optional: usize,
    description: String,
    validators: Vec<Validator>,
    transformer: Option<Transformer>,
    #[allow(dead_code)]
    completer: Option<Completer>,
}

impl FlagDecl {
    pub fn new(long: impl Into<String>, kind: ArgKind) -> Self {
        Self {
            long: long.into(),
            short: None,
            kind,
            required: 0,
            optional: 0,
            description: String::new(),
            validators: Vec::new(),
            transformer: None,
            completer: None,
        }
    }

    pub fn short(mut self, c: char) -> Self {
        self.short = Some(c);
        self
    }

    pub fn required(mut self, n: usize) -> Self {
        self.required = n;
        self
    }

    pub fn optional(mut self, n: usize) -> Self {
        self.optional = n;
        self
    }

    pub fn description(mut self, d: impl Into<String>) -> Self {
        self.description = d.into();
        self
    }

    pub fn validator(mut self, v: Validator) -> Self {
        self.validators.push(v);
        self
    }

    pub fn transformer(mut self, t: Transformer) -> Self {
        self.transformer = Some(t);
        self
    }

    pub fn completer(mut self, c: Completer) -> Self {
        self.completer = Some(c);
        self
    }

    /// A zero-argument flag is boolean: its presence alone stores `true`,
    /// and it is the only kind eligible for fused short-flag expansion
    /// (`-xyz` -> `-x -y -z`).
    pub fn is_boolean(&self) -> bool {
        self.required == 0 && self.optional == 0
    }

    fn is_scalar(&self) -> bool {
        self.required == 1 && self.optional == 0
    }

    fn take_value(&self, stream: &mut TokenStream, at: usize, data: &Data) -> CoreResult<Value> {
        if self.is_boolean() {
            return Ok(Value::Bool(true));
        }
        let mut raw = Vec::new();
        for _ in 0..self.required {
            match stream.pop_at(at, data) {
                Some(v) => raw.push(v),
                None => {
                    return Err(CoreError::NotEnoughArgs {
                        name: self.long.clone(),
                        needed: self.required,
                        got: raw.len(),
                    })
                }
            }
        }
        for _ in 0..self.optional {
            match stream.peek_at(at) {
                Some(v) if !v.starts_with('-') => {
                    raw.push(stream.pop_at(at, data).unwrap());
                }
                _ => break,
            }
        }
        for v in &raw {
            for validator in &self.validators {
                validator
                    .run(v)
                    .map_err(|e| CoreError::validation(&self.long, validator.rule, e))?;
            }
        }
        let raw = if let Some(t) = &self.transformer {
            raw.into_iter()
                .map(|v| t.run(&self.long, &v))
                .collect::<CoreResult<Vec<_>>>()?
        } else {
            raw
        };
        self.kind.values_to_stored(&self.long, &raw, self.is_scalar())
    }

    /// Long name without the candidate token's `--` prefix.
    fn matches_long(&self, token: &str) -> bool {
        token
            .strip_prefix("--")
            .map(|rest| rest == self.long)
            .unwrap_or(false)
    }
}

/// Scans the remaining window for declared flags and removes every match
/// (and its value arguments), storing each under its long name.
/// Short-flag fusion (`-xyz`) expands only when every letter names a
/// zero-arg boolean flag; otherwise the fused token is left untouched for
/// positional processing to deal with (or reject).
pub fn scan_and_consume(
    flags: &[FlagDecl],
    stream: &mut TokenStream,
    data: &mut Data,
) -> CoreResult<()> {
    let mut i = 0;
    loop {
        let Some(tok) = stream.peek_at(i).map(|s| s.to_string()) else {
            break;
        };

        if let Some(flag) = flags.iter().find(|f| f.matches_long(&tok)) {
            stream.pop_at(i, data);
            let value = flag.take_value(stream, i, data)?;
            data.set(flag.long.clone(), value);
            continue;
        }

        if let Some(rest) = tok.strip_prefix('-') {
            if rest.len() > 1 && !rest.starts_with('-') {
                let all_boolean_shorts = rest
                    .chars()
                    .all(|c| flags.iter().any(|f| f.short == Some(c) && f.is_boolean()));
                if all_boolean_shorts {
                    stream.pop_at(i, data);
                    for c in rest.chars() {
                        let flag = flags.iter().find(|f| f.short == Some(c)).unwrap();
                        data.set(flag.long.clone(), Value::Bool(true));
                    }
                    continue;
                }
            } else if rest.len() == 1 {
                let c = rest.chars().next().unwrap();
                if let Some(flag) = flags.iter().find(|f| f.short == Some(c)) {
                    stream.pop_at(i, data);
                    let value = flag.take_value(stream, i, data)?;
                    data.set(flag.long.clone(), value);
                    continue;
                }
            }
        }

        i += 1;
    }
    Ok(())
}

/// Registers every flag's display for the usage renderer.
pub fn usage_for(flags: &[FlagDecl], sink: &mut dyn UsageSink) {
    for f in flags {
        sink.add_flag(&f.long, f.short, &f.description);
    }
}

/// A composer that scans and strips declared flags from the entire
/// remaining window before delegating to the wrapped chain. Consumption
/// of a flag never advances positional progress: it happens before any
/// positional pop is attempted.
pub struct WithFlags {
    flags: Vec<FlagDecl>,
    inner: NodeRef,
}

impl WithFlags {
    pub fn new(flags: Vec<FlagDecl>, inner: NodeRef) -> Self {
        Self { flags, inner }
    }
}

impl Processor for WithFlags {
    fn execute(&self, ctx: &mut switchyard_core::ExecCtx) -> CoreResult<()> {
        scan_and_consume(&self.flags, ctx.stream, ctx.data)?;
        self.inner.execute(ctx)
    }

    fn complete(&self, ctx: &mut switchyard_core::CompleteCtx) -> CoreResult<()> {
        scan_and_consume(&self.flags, ctx.stream, ctx.data)?;
        self.inner.complete(ctx)
    }

    fn usage(&self, sink: &mut dyn UsageSink) {
        usage_for(&self.flags, sink);
        self.inner.usage(sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchyard_core::{Data, ExecCtx, ExecuteData, OutputSink, TokenStream};

    fn run_scan(flags: Vec<FlagDecl>, values: &[&str]) -> (Vec<String>, Data) {
        let mut stream = TokenStream::new(values.to_vec());
        let mut data = Data::new();
        scan_and_consume(&flags, &mut stream, &mut data).unwrap();
        (stream.remaining(), data)
    }

    #[test]
    fn boolean_flag_removed_without_touching_positionals() {
        let (remaining, data) = run_scan(
            vec![FlagDecl::new("verbose", ArgKind::Bool).short('v')],
            &["pos1", "--verbose", "pos2"],
        );
        assert_eq!(remaining, vec!["pos1", "pos2"]);
        assert_eq!(data.get_bool("verbose"), Some(true));
    }

    #[test]
    fn short_flag_with_value_is_consumed() {
        let (remaining, data) = run_scan(
            vec![FlagDecl::new("output", ArgKind::Str).short('o').required(1)],
            &["-o", "file.txt", "pos1"],
        );
        assert_eq!(remaining, vec!["pos1"]);
        assert_eq!(data.get_str("output"), Some("file.txt"));
    }

    #[test]
    fn fused_boolean_shorts_expand() {
        let (remaining, data) = run_scan(
            vec![
                FlagDecl::new("a", ArgKind::Bool).short('a'),
                FlagDecl::new("b", ArgKind::Bool).short('b'),
                FlagDecl::new("c", ArgKind::Bool).short('c'),
            ],
            &["-abc", "pos1"],
        );
        assert_eq!(remaining, vec!["pos1"]);
        assert_eq!(data.get_bool("a"), Some(true));
        assert_eq!(data.get_bool("b"), Some(true));
        assert_eq!(data.get_bool("c"), Some(true));
    }

    #[test]
    fn fused_shorts_left_alone_when_not_all_boolean() {
        // 'o' takes a value, so "-abo" cannot be fused.
        let (remaining, _data) = run_scan(
            vec![
                FlagDecl::new("a", ArgKind::Bool).short('a'),
                FlagDecl::new("b", ArgKind::Bool).short('b'),
                FlagDecl::new("out", ArgKind::Str).short('o').required(1),
            ],
            &["-abo", "pos1"],
        );
        assert_eq!(remaining, vec!["-abo", "pos1"]);
    }

    #[test]
    fn with_flags_wraps_execute() {
        struct NoOp;
        impl Processor for NoOp {
            fn execute(&self, _ctx: &mut ExecCtx) -> CoreResult<()> {
                Ok(())
            }
            fn complete(&self, _ctx: &mut switchyard_core::CompleteCtx) -> CoreResult<()> {
                Ok(())
            }
            fn usage(&self, _sink: &mut dyn UsageSink) {}
        }

        let node = WithFlags::new(
            vec![FlagDecl::new("verbose", ArgKind::Bool).short('v')],
            std::sync::Arc::new(NoOp),
        );
        let mut stream = TokenStream::new(["--verbose", "rest"]);
        let mut data = Data::new();
        let mut sink = OutputSink::default();
        let mut exec_data = ExecuteData::new();
        let mut ctx = ExecCtx {
            stream: &mut stream,
            data: &mut data,
            sink: &mut sink,
            exec_data: &mut exec_data,
        };
        node.execute(&mut ctx).unwrap();
        assert_eq!(ctx.stream.remaining(), vec!["rest"]);
        assert_eq!(ctx.data.get_bool("verbose"), Some(true));
    }
}
