//! Tests for the static declaration resolver

use std::sync::Arc;

use modscope_application::domain_services::DeclarationResolver;
use modscope_domain::PROVIDE_METHODS;
use modscope_domain::error::Error;
use modscope_domain::ports::ModuleRegistry;
use modscope_domain::value_objects::{Declaration, Function, Instance, RegistrationArgument};
use modscope_infrastructure::InMemoryModuleRegistry;
use serde_json::json;

fn fixture() -> (Arc<InMemoryModuleRegistry>, DeclarationResolver) {
    let registry = Arc::new(InMemoryModuleRegistry::new());
    let resolver = DeclarationResolver::with_built_in_metadata(registry.clone());
    (registry, resolver)
}

fn noop(name: &str) -> Function {
    Function::returning(name, Vec::<String>::new(), Instance::value(name))
}

fn resolve_service(
    resolver: &DeclarationResolver,
    root: &str,
    name: &str,
) -> Option<(String, Declaration)> {
    resolver
        .resolve(root, "$provide", &PROVIDE_METHODS, name)
        .expect("resolution succeeds")
        .map(|declaration| (declaration.provider_method, declaration.raw_declaration))
}

#[test]
fn test_constant_then_value_same_module() {
    let (registry, resolver) = fixture();
    registry
        .create_module("A", &[])
        .expect("module A")
        .constant("k", Declaration::value(1))
        .value("k", Declaration::value(2));
    registry.create_module("B", &["A"]).expect("module B");

    assert_eq!(
        resolve_service(&resolver, "B", "k"),
        Some(("constant".to_string(), Declaration::value(1)))
    );
}

#[test]
fn test_first_constant_wins_within_module() {
    let (registry, resolver) = fixture();
    registry
        .create_module("M", &[])
        .expect("module M")
        .constant("x", Declaration::value("first"))
        .constant("x", Declaration::value("second"));

    let (_, declaration) = resolve_service(&resolver, "M", "x").expect("resolved");
    assert_eq!(declaration, Declaration::value("first"));
}

#[test]
fn test_required_constant_beats_requiring_value() {
    let (registry, resolver) = fixture();
    registry
        .create_module("A", &[])
        .expect("module A")
        .constant("x", Declaration::value("A"));
    registry
        .create_module("B", &["A"])
        .expect("module B")
        .value("x", Declaration::value("B"));

    assert_eq!(
        resolve_service(&resolver, "B", "x"),
        Some(("constant".to_string(), Declaration::value("A")))
    );
}

#[test]
fn test_requiring_constant_beats_required_constant() {
    let (registry, resolver) = fixture();
    registry
        .create_module("A", &[])
        .expect("module A")
        .constant("x", Declaration::value("A"));
    registry
        .create_module("B", &["A"])
        .expect("module B")
        .constant("x", Declaration::value("B"));

    let (_, declaration) = resolve_service(&resolver, "B", "x").expect("resolved");
    assert_eq!(declaration, Declaration::value("B"));
}

#[test]
fn test_last_value_wins() {
    let (registry, resolver) = fixture();
    registry
        .create_module("M", &[])
        .expect("module M")
        .value("x", Declaration::value("A"))
        .value("x", Declaration::value("B"));

    let (method, declaration) = resolve_service(&resolver, "M", "x").expect("resolved");
    assert_eq!(method, "value");
    assert_eq!(declaration, Declaration::value("B"));
}

#[test]
fn test_requiring_module_value_overrides() {
    let (registry, resolver) = fixture();
    registry
        .create_module("A", &[])
        .expect("module A")
        .value("k", Declaration::value(json!({ "n": 1 })));
    registry
        .create_module("B", &["A"])
        .expect("module B")
        .value("k", Declaration::value(json!({ "n": 2 })));

    let (_, declaration) = resolve_service(&resolver, "B", "k").expect("resolved");
    assert_eq!(declaration, Declaration::value(json!({ "n": 2 })));
}

#[test]
fn test_diamond_requires_visit_each_module_once() {
    let (registry, resolver) = fixture();
    registry
        .create_module("A", &[])
        .expect("module A")
        .value("k", Declaration::value("a"));
    registry
        .create_module("B", &["A"])
        .expect("module B")
        .value("k", Declaration::value("b"));
    registry.create_module("C", &["A"]).expect("module C");
    registry.create_module("D", &["B", "C"]).expect("module D");

    let (_, declaration) = resolve_service(&resolver, "D", "k").expect("resolved");
    assert_eq!(declaration, Declaration::value("b"));
}

#[test]
fn test_resolution_is_idempotent() {
    let (registry, resolver) = fixture();
    let factory = Function::returning("api", ["$http"], Instance::value("api"));
    registry
        .create_module("M", &[])
        .expect("module M")
        .factory("api", factory);

    let first = resolver
        .resolve("M", "$provide", &PROVIDE_METHODS, "api")
        .expect("first resolution");
    let second = resolver
        .resolve("M", "$provide", &PROVIDE_METHODS, "api")
        .expect("second resolution");

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn test_map_registration_is_found() {
    let (registry, resolver) = fixture();
    registry.create_module("M", &[]).expect("module M").queue(
        "$provide",
        "value",
        modscope_domain::RegistrationCall::map([
            ("a", Declaration::value(1)),
            ("b", Declaration::value(2)),
        ]),
    );

    let (_, declaration) = resolve_service(&resolver, "M", "b").expect("resolved");
    assert_eq!(declaration, Declaration::value(2));
}

#[test]
fn test_methods_outside_the_set_are_ignored() {
    let (registry, resolver) = fixture();
    registry
        .create_module("M", &[])
        .expect("module M")
        .constant("x", Declaration::value(1))
        .value("x", Declaration::value(2));

    let resolved = resolver
        .resolve("M", "$provide", &["value"], "x")
        .expect("resolution succeeds")
        .expect("resolved");
    assert_eq!(resolved.raw_declaration, Declaration::value(2));
}

#[test]
fn test_unregistered_item_resolves_to_none() {
    let (registry, resolver) = fixture();
    registry.create_module("M", &[]).expect("module M");

    assert_eq!(resolve_service(&resolver, "M", "missing"), None);
}

#[test]
fn test_directives_accumulate_across_modules() {
    let (registry, resolver) = fixture();
    let first = Declaration::annotated(["$log"], noop("d1"));
    let second = Declaration::annotated(["$q"], noop("d2"));
    registry
        .create_module("A", &[])
        .expect("module A")
        .directive("widget", first.clone());
    registry
        .create_module("B", &["A"])
        .expect("module B")
        .directive("widget", second.clone());

    let declarations = resolver
        .resolve_all("B", "$compileProvider", &["directive", "component"], "widget")
        .expect("resolution succeeds");

    assert_eq!(declarations.len(), 2);
    assert_eq!(declarations[0].raw_declaration, first);
    assert_eq!(declarations[1].raw_declaration, second);
    assert_eq!(declarations[1].injected_services, vec!["$q".to_string()]);
}

#[test]
fn test_standard_modules_are_tagged_built_in() {
    let registry = Arc::new(InMemoryModuleRegistry::with_standard_library());
    let resolver = DeclarationResolver::with_built_in_metadata(registry.clone());

    let declaration = resolver
        .resolve("ngMock", "$provide", &PROVIDE_METHODS, "$log")
        .expect("resolution succeeds")
        .expect("ngMock registers $log");
    assert!(declaration.built_in);
    assert_eq!(declaration.provider_method, "provider");
}

#[test]
fn test_phased_resolution_tags_by_load_phase() {
    let registry = Arc::new(InMemoryModuleRegistry::with_standard_library());
    let resolver = DeclarationResolver::with_built_in_metadata(registry.clone());
    registry
        .create_module("app", &["ngMock"])
        .expect("module app")
        .value("greeting", Declaration::value("hi"));

    let log = resolver
        .resolve_phased(&["ng"], &["app"], "$provide", &PROVIDE_METHODS, "$log")
        .expect("resolution succeeds");
    let log = log.winner().expect("ngMock registers $log");
    assert!(!log.built_in);

    let standalone = resolver
        .resolve("app", "$provide", &PROVIDE_METHODS, "$log")
        .expect("resolution succeeds")
        .expect("ngMock registers $log");
    assert!(standalone.built_in);
}

#[test]
fn test_unknown_required_module_errors() {
    let (registry, resolver) = fixture();
    registry.create_module("M", &["missing"]).expect("module M");

    let err = resolver
        .resolve("M", "$provide", &PROVIDE_METHODS, "x")
        .expect_err("missing module");
    assert!(matches!(err, Error::Runtime { .. }));
    assert!(err.to_string().contains("Module 'missing' is not available!"));
}

#[test]
fn test_malformed_entry_errors() {
    let (registry, resolver) = fixture();
    registry.create_module("M", &[]).expect("module M").invoke_later(
        "$provide",
        "value",
        vec![RegistrationArgument::Name("x".to_string())],
    );

    let err = resolver
        .resolve("M", "$provide", &PROVIDE_METHODS, "x")
        .expect_err("malformed entry");
    assert!(matches!(err, Error::MalformedRegistration { .. }));
}
