//! Two-phase injector tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use modscope_domain::ports::{Injector, RegistrationCapability};
use modscope_domain::value_objects::{
    Declaration, Function, Instance, Locals, ProviderInstance, RegistrationCall,
};
use modscope_infrastructure::GraphInjector;
use modscope_infrastructure::runtime::ProvideCapability;
use serde_json::json;

fn injector() -> GraphInjector {
    let injector = GraphInjector::new();
    injector
        .define_provider("$provide", ProviderInstance::intrinsic(Arc::new(ProvideCapability)))
        .expect("$provide");
    injector
}

fn provide(injector: &GraphInjector, method: &str, name: &str, declaration: Declaration) {
    injector
        .provider("$provide")
        .expect("$provide")
        .call(injector, method, RegistrationCall::named(name, declaration))
        .expect("registration succeeds");
}

/// Function returning the values of its arguments as a JSON array
fn collecting_fn(name: &str, params: &[&str]) -> Function {
    Function::named(name, params.iter().copied(), |invocation| {
        let values: Vec<_> = invocation
            .args
            .iter()
            .map(|arg| arg.as_value().cloned().unwrap_or_default())
            .collect();
        Ok(Instance::value(values))
    })
}

fn collecting(name: &str, params: &[&str]) -> Declaration {
    collecting_fn(name, params).into()
}

#[test]
fn test_value_and_constant_services() {
    let injector = injector();
    provide(&injector, "value", "greeting", Declaration::value("hello"));
    provide(&injector, "constant", "limit", Declaration::value(10));

    let greeting = injector.service("greeting").expect("greeting");
    assert_eq!(greeting.as_value(), Some(&json!("hello")));
    let limit = injector.service("limit").expect("limit");
    assert_eq!(limit.as_value(), Some(&json!(10)));
    assert!(injector.has_constant("limit"));
    assert!(injector.has_provider("greetingProvider"));
    assert!(!injector.has_provider("limitProvider"));
}

#[test]
fn test_factory_receives_dependencies_in_order() {
    let injector = injector();
    provide(&injector, "value", "a", Declaration::value(1));
    provide(&injector, "value", "b", Declaration::value(2));
    provide(
        &injector,
        "factory",
        "pair",
        Declaration::annotated(["b", "a"], collecting_fn("pair", &[])),
    );

    let pair = injector.service("pair").expect("pair");
    assert_eq!(pair.as_value(), Some(&json!([2, 1])));
}

#[test]
fn test_service_constructor_is_invoked() {
    let injector = injector();
    provide(&injector, "value", "name", Declaration::value("modscope"));
    provide(&injector, "service", "greeter", collecting("Greeter", &["name"]));

    let greeter = injector.service("greeter").expect("greeter");
    assert_eq!(greeter.as_value(), Some(&json!(["modscope"])));
}

#[test]
fn test_services_are_cached() {
    let injector = injector();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let factory = Function::named("counted", Vec::<String>::new(), move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Instance::value("built"))
    });
    provide(&injector, "factory", "counted", factory.into());

    injector.service("counted").expect("first");
    injector.service("counted").expect("second");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unknown_service_error() {
    let injector = injector();
    let err = injector.service("missing").expect_err("unknown");
    assert_eq!(
        err.to_string(),
        "Runtime error: Unknown provider: missingProvider <- missing"
    );
}

#[test]
fn test_circular_dependency_detected() {
    let injector = injector();
    provide(&injector, "factory", "a", collecting("a", &["b"]));
    provide(&injector, "factory", "b", collecting("b", &["a"]));

    let err = injector.service("a").expect_err("cycle");
    assert!(
        err.to_string().contains("Circular dependency found: a <- b <- a"),
        "{err}"
    );
    // The path is unwound, so an unrelated service still builds
    provide(&injector, "value", "c", Declaration::value(3));
    assert!(injector.service("c").is_ok());
}

#[test]
fn test_locals_take_precedence() {
    let injector = injector();
    provide(&injector, "value", "x", Declaration::value("injected"));
    let mut locals = Locals::new();
    locals.insert("x".to_string(), Instance::value("local"));

    let result = injector
        .invoke(&collecting("f", &["x"]), &locals)
        .expect("invoked");
    assert_eq!(result.as_value(), Some(&json!(["local"])));
}

#[test]
fn test_invoke_requires_function() {
    let injector = injector();
    let err = injector
        .invoke(&Declaration::value(1), &Locals::new())
        .expect_err("not a function");
    assert_eq!(
        err.to_string(),
        "Runtime error: Argument 'fn' is not a function, got value"
    );
}

#[test]
fn test_provider_registration_with_provider_dependency() {
    let injector = injector();
    let constructor = Function::named("ApiProvider", ["$provide"], |invocation| {
        invocation.provider(0)?;
        Ok(Instance::Declaration(Declaration::provider_object(
            Function::returning("$get", Vec::<String>::new(), Instance::value("api")),
        )))
    });
    provide(&injector, "provider", "api", constructor.into());

    assert!(injector.has_provider("apiProvider"));
    let api = injector.service("api").expect("api");
    assert_eq!(api.as_value(), Some(&json!("api")));
}

#[test]
fn test_provider_without_get_fails_on_service_lookup() {
    let injector = injector();
    let err = injector
        .instantiate_provider(&Declaration::value(1), &Locals::new())
        .expect_err("value provider");
    assert!(err.to_string().contains("got value"));

    let err = injector
        .instantiate_provider(
            &Declaration::object([("x", Declaration::value(1))]),
            &Locals::new(),
        )
        .expect_err("object without $get");
    assert!(err.to_string().contains("must define $get"));
}

struct Recording {
    inner: Arc<dyn RegistrationCapability>,
    calls: Arc<AtomicUsize>,
}

impl RegistrationCapability for Recording {
    fn methods(&self) -> Vec<String> {
        self.inner.methods()
    }

    fn call(
        &self,
        injector: &dyn Injector,
        method: &str,
        call: RegistrationCall,
    ) -> modscope_domain::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.call(injector, method, call)
    }
}

#[test]
fn test_decorate_capability() {
    let injector = injector();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    injector
        .decorate_capability(
            "$provide",
            &|inner: Arc<dyn RegistrationCapability>| -> Arc<dyn RegistrationCapability> {
                Arc::new(Recording {
                    inner,
                    calls: Arc::clone(&seen),
                })
            },
        )
        .expect("decorated");

    provide(&injector, "value", "v", Declaration::value(1));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(injector.has_provider("vProvider"));
    assert_eq!(
        injector.provider_names().expect("names"),
        vec!["$provide", "vProvider"]
    );
}

#[test]
fn test_decorate_capability_requires_capability() {
    let injector = injector();
    provide(&injector, "value", "v", Declaration::value(1));

    let err = injector
        .decorate_capability(
            "vProvider",
            &|inner: Arc<dyn RegistrationCapability>| -> Arc<dyn RegistrationCapability> { inner },
        )
        .expect_err("no registration methods");
    assert!(err.to_string().contains("has no registration methods"));
}

#[test]
fn test_unknown_registration_method() {
    let injector = injector();
    let err = injector
        .provider("$provide")
        .expect("$provide")
        .call(
            &injector,
            "decorator",
            RegistrationCall::named("x", Declaration::value(1)),
        )
        .expect_err("unsupported");
    assert!(err.to_string().contains("no registration method 'decorator'"));
}
