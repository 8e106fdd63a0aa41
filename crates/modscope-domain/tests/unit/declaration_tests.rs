//! Unit tests for declarations, functions and instances

use modscope_domain::value_objects::{
    ComponentDeclaration, Declaration, Function, Instance, ProviderDeclaration, ProviderInstance,
};
use serde_json::json;

fn noop(name: &str, params: &[&str]) -> Function {
    Function::returning(name, params.iter().copied(), Instance::value(json!(null)))
}

#[test]
fn test_annotated_declaration_strips_to_function() {
    let factory = noop("factory", &["a", "b"]);
    let declaration = Declaration::annotated(["dep1", "dep2"], factory.clone());

    assert_eq!(declaration.strip(), Declaration::Function(factory));
    assert_eq!(declaration.annotate(), vec!["dep1", "dep2"]);
}

#[test]
fn test_bare_function_uses_declared_params() {
    let factory = noop("factory", &["$http", "$q", "$http"]);
    let declaration = Declaration::Function(factory.clone());

    assert_eq!(declaration.strip(), declaration);
    assert_eq!(declaration.annotate(), vec!["$http", "$q", "$http"]);
}

#[test]
fn test_inject_list_replaces_params() {
    let factory = noop("factory", &["a"]).with_inject(["$log"]);

    assert_eq!(factory.params(), ["a".to_string()]);
    assert_eq!(Declaration::Function(factory).annotate(), vec!["$log"]);
}

#[test]
fn test_values_and_objects_have_no_dependencies() {
    let value = Declaration::value(json!({"n": 1}));
    let object = Declaration::provider_object(noop("$get", &["$log"]));

    assert!(value.annotate().is_empty());
    assert!(object.annotate().is_empty());
    assert_eq!(value.strip(), value);
    assert_eq!(object.strip(), object);
}

#[test]
fn test_function_identity() {
    let first = noop("f", &[]);
    let second = noop("f", &[]);

    assert_eq!(first, first.clone());
    assert_ne!(first, second);
    assert_ne!(first.clone().with_inject(Vec::<String>::new()), first);
}

#[test]
fn test_component_declaration_derives_from_raw() {
    let factory = noop("f", &["x"]);
    let record = ComponentDeclaration::new(
        "factory",
        "thing",
        Declaration::annotated(["$q"], factory.clone()),
        false,
    );

    assert_eq!(record.stripped_declaration, Declaration::Function(factory));
    assert_eq!(record.injected_services, vec!["$q"]);
    assert!(!record.is_constant());
    assert!(ComponentDeclaration::new("constant", "k", Declaration::value(1), false).is_constant());
}

#[test]
fn test_provider_declaration_from_constructor() {
    let ctor = noop("ThingProvider", &["$provide"]);
    let record = ProviderDeclaration::new(Declaration::Function(ctor.clone()), true);

    assert_eq!(record.injected_providers, vec!["$provide"]);
    assert_eq!(record.stripped_declaration, Declaration::Function(ctor));
    assert!(record.built_in);
}

#[test]
fn test_provider_instance_from_object() {
    let get = noop("$get", &["$log"]);
    let object = Declaration::provider_object(get.clone());

    let provider = ProviderInstance::from_object(&object).expect("object has $get");
    assert_eq!(provider.get_declaration(), Some(&Declaration::Function(get)));
    assert!(provider.capability().is_none());
    assert!(ProviderInstance::from_object(&Declaration::value(1)).is_none());
}

#[test]
fn test_instance_into_provider_requires_get() {
    let err = Instance::value(1)
        .into_provider()
        .expect_err("a value is not a provider");
    assert!(err.to_string().contains("$get"));

    let object = Declaration::provider_object(noop("$get", &[]));
    assert!(Instance::from(object).into_provider().is_ok());
}

#[test]
fn test_instance_from_value_declaration() {
    assert!(matches!(
        Instance::from(Declaration::value("x")),
        Instance::Value(_)
    ));
}
