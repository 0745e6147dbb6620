// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for resolver chains.
//!
//! These tests verify that each source answers or delegates as a node in a
//! real chain, and that chains assembled with the builder behave end to end.


use cfgchain::adapters::{
    ArgumentSource, DefaultSource, EnvironmentSource, FileSource, JsonFileSource, MappingSource,
};
use cfgchain::domain::{ConfigError, ConfigMap, ConfigValue, Result};
use cfgchain::ports::Resolver;
use cfgchain::service::Chain;
use std::collections::HashMap;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use test_helpers::{
    create_temp_file, reached_no_next_handler, EnvGuard, MockResolver, NoNextHandler,
};

fn mapping(pairs: &[(&str, &str)]) -> ConfigMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), ConfigValue::from(*v)))
        .collect()
}

#[test]
fn test_end_to_end_falls_through_to_mapping() {
    let chain = ArgumentSource::from_args(vec!["--verbosity", "info"]).with_next(Box::new(
        EnvironmentSource::with_values(HashMap::new())
            .with_next(Box::new(MappingSource::new(mapping(&[("NAME", "fixme")])))),
    ));

    assert_eq!(chain.resolve("NAME").unwrap(), Some(ConfigValue::from("fixme")));
}

#[test]
fn test_end_to_end_with_builder_and_process_environment() {
    let mut guard = EnvGuard::new();
    guard.set("CFGCHAIN_IT_FROM_ENV", "warning");

    let chain = Chain::builder()
        .with_args(ArgumentSource::new())
        .with_env()
        .with_mapping(mapping(&[
            ("CFGCHAIN_IT_NAME", "fixme"),
            ("CFGCHAIN_IT_FROM_ENV", "shadowed"),
        ]))
        .build();

    assert_eq!(chain.resolve("CFGCHAIN_IT_NAME").unwrap(), Some(ConfigValue::from("fixme")));
    assert_eq!(
        chain.resolve("CFGCHAIN_IT_FROM_ENV").unwrap(),
        Some(ConfigValue::from("warning"))
    );
    assert_eq!(chain.resolve("CFGCHAIN_IT_UNSET").unwrap(), None);
}

#[test]
fn test_default_source_answers_every_key() {
    let handler = DefaultSource::new("hi there");
    assert_eq!(handler.resolve("").unwrap(), Some(ConfigValue::from("hi there")));
    assert_eq!(handler.resolve("anything").unwrap(), Some(ConfigValue::from("hi there")));
}

#[test]
fn test_argument_source_answers_without_delegating() {
    let handler =
        ArgumentSource::from_args(vec!["--verbosity", "error"]).with_next(NoNextHandler::boxed());
    assert_eq!(handler.resolve("verbosity").unwrap(), Some(ConfigValue::from("error")));
}

#[test]
fn test_argument_source_delegates_undefined_name() {
    let handler = ArgumentSource::from_args(Vec::<String>::new()).with_next(NoNextHandler::boxed());
    assert!(reached_no_next_handler(&handler.resolve("does-not-exist")));
}

#[test]
fn test_environment_source_answers_and_delegates() {
    let mut guard = EnvGuard::new();
    guard.set("CFGCHAIN_IT_APP_VERBOSITY", "warning");

    let handler = EnvironmentSource::from_process().with_next(NoNextHandler::boxed());
    assert_eq!(
        handler.resolve("CFGCHAIN_IT_APP_VERBOSITY").unwrap(),
        Some(ConfigValue::from("warning"))
    );
    assert!(reached_no_next_handler(&handler.resolve("does-not-exist")));
}

#[test]
fn test_mapping_source_in_memory() {
    let handler = MappingSource::new(mapping(&[("APP_VERBOSITY", "critical")]))
        .with_next(NoNextHandler::boxed());
    assert_eq!(
        handler.resolve("APP_VERBOSITY").unwrap(),
        Some(ConfigValue::from("critical"))
    );
    assert!(reached_no_next_handler(&handler.resolve("does-not-exist")));
}

#[test]
fn test_mapping_source_yaml_file() {
    let file = create_temp_file("---\nAPP_VERBOSITY: 'critical'\n");
    let handler = MappingSource::from_file(file.path())
        .unwrap()
        .with_next(NoNextHandler::boxed());
    assert_eq!(
        handler.resolve("APP_VERBOSITY").unwrap(),
        Some(ConfigValue::from("critical"))
    );
}

#[test]
fn test_file_source_reads_whole_file() {
    let file = create_temp_file("s3cret\n");
    let handler = FileSource::new(file.path()).with_next(NoNextHandler::boxed());
    assert_eq!(handler.resolve("password").unwrap(), Some(ConfigValue::from("s3cret\n")));
}

#[test]
fn test_file_source_mount_hook_answers_in_same_call() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mounted");
    let calls = Arc::new(AtomicUsize::new(0));

    let hook_path = path.clone();
    let counter = calls.clone();
    let handler = FileSource::new(&path)
        .with_mount_hook(move || -> Result<()> {
            counter.fetch_add(1, Ordering::SeqCst);
            fs::write(&hook_path, "mounted value")?;
            Ok(())
        })
        .with_next(NoNextHandler::boxed());

    assert_eq!(handler.resolve("k").unwrap(), Some(ConfigValue::from("mounted value")));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_file_source_missing_delegates() {
    let dir = TempDir::new().unwrap();
    let handler = FileSource::new(dir.path().join("absent")).with_next(NoNextHandler::boxed());
    assert!(reached_no_next_handler(&handler.resolve("k")));
}

#[test]
fn test_json_file_source() {
    let file = create_temp_file(r#"{"KEY": "value"}"#);
    let handler = JsonFileSource::new(file.path()).with_next(NoNextHandler::boxed());

    assert_eq!(handler.resolve("KEY").unwrap(), Some(ConfigValue::from("value")));
    assert!(reached_no_next_handler(&handler.resolve("does-not-exist")));
}

#[test]
fn test_malformed_json_is_fatal_even_before_a_default() {
    let file = create_temp_file("{ not json");
    let chain = Chain::builder()
        .with_json_file(file.path(), None)
        .or_default("fallback");

    assert!(matches!(chain.resolve("KEY"), Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_malformed_yaml_fails_construction() {
    let file = create_temp_file("key: [unclosed");
    assert!(Chain::builder().with_yaml_file(file.path()).is_err());
}

#[test]
fn test_answering_node_stops_traversal() {
    let first = MockResolver::new("first").with_value("k", "first");
    let second = MockResolver::new("second").with_value("k", "second");
    let (first_calls, second_calls) = (first.calls(), second.calls());

    let chain = Chain::builder().then(first).then(second).or_default("default");

    assert_eq!(chain.require("k").unwrap(), ConfigValue::from("first"));
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);

    assert_eq!(chain.require("other").unwrap(), ConfigValue::from("default"));
    assert_eq!(first_calls.load(Ordering::SeqCst), 2);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unanswered_key_visits_every_node_once() {
    let first = MockResolver::new("first");
    let second = MockResolver::new("second");
    let third = MockResolver::new("third");
    let counters = [first.calls(), second.calls(), third.calls()];

    let chain = first.with_next(Box::new(
        second.with_next(Box::new(third.with_next(NoNextHandler::boxed()))),
    ));
    assert!(reached_no_next_handler(&chain.resolve("missing")));
    for calls in &counters {
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    let chain = Chain::builder()
        .then(MockResolver::new("a"))
        .then(MockResolver::new("b"))
        .build();
    assert_eq!(chain.resolve("missing").unwrap(), None);
}

#[test]
fn test_chain_is_shared_across_threads() {
    let chain = Arc::new(
        Chain::builder()
            .with_mapping(mapping(&[("a", "1"), ("b", "2")]))
            .or_default("none"),
    );

    let handles: Vec<_> = ["a", "b", "c"]
        .into_iter()
        .map(|key| {
            let chain = chain.clone();
            std::thread::spawn(move || chain.require(key).unwrap())
        })
        .collect();

    let answers: Vec<ConfigValue> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        answers,
        vec![
            ConfigValue::from("1"),
            ConfigValue::from("2"),
            ConfigValue::from("none")
        ]
    );
}
