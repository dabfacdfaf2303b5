//! Integration tests driving [`Argument`] and [`WithFlags`] together, the
//! way a composed chain would see them: flags stripped from the whole
//! remaining window before any positional pop is attempted.

use std::sync::Arc;

use switchyard_args::{validators, ArgKind, Argument, FlagDecl, WithFlags};
use switchyard_core::{CoreError, Data, ExecCtx, ExecuteData, OutputSink, Processor, TokenStream, Value};

fn exec(node: &dyn Processor, values: &[&str]) -> Result<Data, CoreError> {
    let mut stream = TokenStream::new(values.to_vec());
    let mut data = Data::new();
    let mut sink = OutputSink::default();
    let mut exec_data = ExecuteData::new();
    let mut ctx = ExecCtx {
        stream: &mut stream,
        data: &mut data,
        sink: &mut sink,
        exec_data: &mut exec_data,
    };
    node.execute(&mut ctx)?;
    Ok(data)
}

#[test]
fn flag_interleaved_anywhere_does_not_disturb_positional_matching() {
    let node = WithFlags::new(
        vec![FlagDecl::new("verbose", ArgKind::Bool).short('v')],
        Arc::new(Argument::new("NAME", ArgKind::Str)),
    );
    let data = exec(&node, &["--verbose", "alice"]).unwrap();
    assert_eq!(data.get_bool("verbose"), Some(true));
    assert_eq!(data.get_str("NAME"), Some("alice"));

    let data = exec(&node, &["alice", "--verbose"]).unwrap();
    assert_eq!(data.get_bool("verbose"), Some(true));
    assert_eq!(data.get_str("NAME"), Some("alice"));
}

#[test]
fn flag_with_value_consumed_before_positional_sees_remaining_window() {
    let node = WithFlags::new(
        vec![FlagDecl::new("output", ArgKind::Str).short('o').required(1)],
        Arc::new(Argument::new("NAME", ArgKind::Str)),
    );
    let data = exec(&node, &["-o", "out.txt", "alice"]).unwrap();
    assert_eq!(data.get_str("output"), Some("out.txt"));
    assert_eq!(data.get_str("NAME"), Some("alice"));
}

#[test]
fn validator_then_transformer_order_is_validate_first() {
    // A value too short fails MinLength before the lowercase transformer
    // ever gets a chance to run.
    let arg = Argument::new("NAME", ArgKind::Str)
        .validator(validators::min_length(4))
        .transformer(switchyard_args::transformers::lowercase());
    let err = exec(&arg, &["AB"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "validation for \"NAME\" failed: [MinLength] must be at least 4 characters"
    );
}

#[test]
fn one_of_validator_reports_choices_on_rejection() {
    let arg = Argument::new("COLOR", ArgKind::Str)
        .validator(validators::one_of(vec!["red".into(), "green".into()]));
    let err = exec(&arg, &["blue"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "validation for \"COLOR\" failed: [OneOf] must be one of [red green]"
    );
}

#[test]
fn bounded_optional_list_stores_up_to_the_cap() {
    let arg = Argument::new("IS", ArgKind::Int).required(1).optional(2);
    let data = exec(&arg, &["1", "2", "3"]).unwrap();
    match data.get("IS") {
        Some(Value::IntList(l)) => assert_eq!(l, &vec![1, 2, 3]),
        other => panic!("expected IntList, got {other:?}"),
    }
}

#[test]
fn unbounded_argument_following_flags_still_sees_whole_tail() {
    let node = WithFlags::new(
        vec![FlagDecl::new("all", ArgKind::Bool).short('a')],
        Arc::new(Argument::new("FILES", ArgKind::Str).required(0).unbounded()),
    );
    let data = exec(&node, &["--all", "a.txt", "b.txt", "c.txt"]).unwrap();
    match data.get("FILES") {
        Some(Value::StrList(l)) => assert_eq!(
            l,
            &vec!["a.txt".to_string(), "b.txt".to_string(), "c.txt".to_string()]
        ),
        other => panic!("expected StrList, got {other:?}"),
    }
}
