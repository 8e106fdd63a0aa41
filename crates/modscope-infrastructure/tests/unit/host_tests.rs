//! Graph construction tests

use std::sync::{Arc, Mutex};

use modscope_domain::error::Result;
use modscope_domain::ports::{GraphStep, HostRuntime, Injector, ModuleRegistry};
use modscope_domain::value_objects::Declaration;
use modscope_infrastructure::{InMemoryHostRuntime, InMemoryModuleRegistry};
use serde_json::json;

type Trace = Arc<Mutex<Vec<String>>>;

fn recorder(trace: &Trace, label: &str) -> impl Fn(&dyn Injector) -> Result<()> + Send + Sync + 'static {
    let trace = Arc::clone(trace);
    let label = label.to_string();
    move |_: &dyn Injector| {
        trace.lock().expect("trace lock").push(label.clone());
        Ok(())
    }
}

fn runtime(registry: &Arc<InMemoryModuleRegistry>) -> InMemoryHostRuntime {
    InMemoryHostRuntime::new(registry.clone())
}

#[test]
fn test_requires_load_first_and_once() {
    let registry = Arc::new(InMemoryModuleRegistry::new());
    let trace: Trace = Arc::default();
    registry.create_module("A", &[]).expect("A").config(recorder(&trace, "A"));
    registry.create_module("B", &["A"]).expect("B").config(recorder(&trace, "B"));
    registry.create_module("C", &["A"]).expect("C").config(recorder(&trace, "C"));
    registry
        .create_module("D", &["B", "C", "A"])
        .expect("D")
        .config(recorder(&trace, "D"));

    runtime(&registry)
        .build_graph(vec![GraphStep::Module("D".to_string())])
        .expect("graph built");

    assert_eq!(*trace.lock().expect("trace lock"), vec!["A", "B", "C", "D"]);
}

#[test]
fn test_queue_drains_before_config_blocks() {
    let registry = Arc::new(InMemoryModuleRegistry::new());
    let seen: Trace = Arc::default();
    let observed = Arc::clone(&seen);
    registry
        .create_module("app", &[])
        .expect("app")
        .config(move |injector: &dyn Injector| -> Result<()> {
            let value = injector.service("greeting")?;
            let text = value.as_value().and_then(|v| v.as_str()).unwrap_or_default();
            observed.lock().expect("lock").push(text.to_string());
            Ok(())
        })
        .value("greeting", Declaration::value("hello"));

    runtime(&registry)
        .build_graph(vec![GraphStep::Module("app".to_string())])
        .expect("graph built");

    assert_eq!(*seen.lock().expect("lock"), vec!["hello"]);
}

#[test]
fn test_steps_run_in_order() {
    let registry = Arc::new(InMemoryModuleRegistry::new());
    let trace: Trace = Arc::default();
    registry.create_module("A", &[]).expect("A").config(recorder(&trace, "A"));

    runtime(&registry)
        .build_graph(vec![
            GraphStep::config(recorder(&trace, "before")),
            GraphStep::Module("A".to_string()),
            GraphStep::config(recorder(&trace, "after")),
            GraphStep::Module("A".to_string()),
        ])
        .expect("graph built");

    assert_eq!(
        *trace.lock().expect("trace lock"),
        vec!["before", "A", "after"]
    );
}

#[test]
fn test_intrinsic_provide_is_defined() {
    let registry = Arc::new(InMemoryModuleRegistry::new());
    let injector = runtime(&registry).build_graph(Vec::new()).expect("graph");

    let provide = injector.provider("$provide").expect("$provide");
    assert!(provide.get_declaration().is_none());
    assert!(provide.capability().is_some());
}

#[test]
fn test_unknown_module_fails() {
    let registry = Arc::new(InMemoryModuleRegistry::new());
    let Err(err) = runtime(&registry).build_graph(vec![GraphStep::Module("ghost".to_string())])
    else {
        panic!("unknown module should fail");
    };
    assert!(err.to_string().contains("Module 'ghost' is not available!"));
}

#[test]
fn test_registration_on_unknown_provider_fails() {
    let registry = Arc::new(InMemoryModuleRegistry::new());
    registry
        .create_module("app", &[])
        .expect("app")
        .filter("shout", Declaration::value(1));

    let Err(err) = runtime(&registry).build_graph(vec![GraphStep::Module("app".to_string())])
    else {
        panic!("no $filterProvider without ng");
    };
    assert_eq!(err.to_string(), "Runtime error: Unknown provider: $filterProvider");
}

#[test]
fn test_constant_wins_over_later_value() {
    let registry = Arc::new(InMemoryModuleRegistry::new());
    registry
        .create_module("app", &[])
        .expect("app")
        .value("k", Declaration::value(2))
        .constant("k", Declaration::value(1));

    let injector = runtime(&registry)
        .build_graph(vec![GraphStep::Module("app".to_string())])
        .expect("graph built");
    let k = injector.service("k").expect("k");
    assert_eq!(k.as_value(), Some(&json!(1)));
}
