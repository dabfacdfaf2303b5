//! The positional argument processor: pops `required + optional` tokens
//! (or all remaining, if optional is unbounded), validates, transforms,
//! and stores the typed result.

use switchyard_core::{
    BoxedBreaker, CompleteCtx, CoreError, CoreResult, Data, ExecCtx, Processor, UsageSink, Value,
};

use crate::completer::Completer;
use crate::kind::ArgKind;
use crate::transformers::Transformer;
use crate::validators::Validator;

/// A declared positional argument.
pub struct Argument {
    name: String,
    kind: ArgKind,
    required: usize,
    /// `None` means unbounded.
    optional: Option<usize>,
    description: String,
    validators: Vec<Validator>,
    transformer: Option<Transformer>,
    completer: Option<Completer>,
    breakers: Vec<BoxedBreaker>,
}

impl Argument {
    pub fn new(name: impl Into<String>, kind: ArgKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: 1,
            optional: Some(0),
            description: String::new(),
            validators: Vec::new(),
            transformer: None,
            completer: None,
            breakers: Vec::new(),
        }
    }

    pub fn required(mut self, n: usize) -> Self {
        self.required = n;
        self
    }

    pub fn optional(mut self, n: usize) -> Self {
        self.optional = Some(n);
        self
    }

    pub fn unbounded(mut self) -> Self {
        self.optional = None;
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

    pub fn breaker(mut self, b: BoxedBreaker) -> Self {
        self.breakers.push(b);
        self
    }

    fn is_scalar(&self) -> bool {
        self.required == 1 && self.optional == Some(0)
    }

    fn validate_and_transform(&self, raw: Vec<String>) -> CoreResult<Vec<String>> {
        let mut out = Vec::with_capacity(raw.len());
        for value in raw {
            for v in &self.validators {
                v.run(&value)
                    .map_err(|e| CoreError::validation(&self.name, v.rule, e))?;
            }
            let value = match &self.transformer {
                Some(t) => t.run(&self.name, &value)?,
                None => value,
            };
            out.push(value);
        }
        Ok(out)
    }

    fn pop(&self, stream: &mut switchyard_core::TokenStream, data: &Data) -> CoreResult<Vec<String>> {
        let (raw, enough) = stream.pop_n(self.required, self.optional, &self.breakers, data);
        if !enough {
            return Err(CoreError::NotEnoughArgs {
                name: self.name.clone(),
                needed: self.required,
                got: raw.len(),
            });
        }
        self.validate_and_transform(raw)
    }
}

impl Processor for Argument {
    fn execute(&self, ctx: &mut ExecCtx) -> CoreResult<()> {
        let values = self.pop(ctx.stream, ctx.data)?;
        let stored = self.kind.values_to_stored(&self.name, &values, self.is_scalar())?;
        ctx.data.set(self.name.clone(), stored);
        Ok(())
    }

    fn complete(&self, ctx: &mut CompleteCtx) -> CoreResult<()> {
        if ctx.at_completing_token() {
            if let Some(completer) = &self.completer {
                let prefix = ctx.stream.peek().unwrap_or("").to_string();
                let existing = match ctx.data.get(&self.name) {
                    Some(Value::StrList(l)) => l.clone(),
                    Some(Value::Str(s)) => vec![s.clone()],
                    _ => Vec::new(),
                };
                let completion = completer
                    .complete(&prefix, ctx.data)
                    .filter_prefix(&prefix)
                    .filter_distinct(&existing);
                ctx.result = Some(completion);
            }
            return Ok(());
        }

        let values = self.pop(ctx.stream, ctx.data)?;
        ctx.consumed_before += values.len();
        let stored = self.kind.values_to_stored(&self.name, &values, self.is_scalar())?;
        ctx.data.set(self.name.clone(), stored);
        Ok(())
    }

    fn usage(&self, sink: &mut dyn UsageSink) {
        sink.add_positional(&self.name, self.required, self.optional);
        if !self.description.is_empty() {
            sink.add_argument_description(&self.name, &self.description);
        }
    }
}
