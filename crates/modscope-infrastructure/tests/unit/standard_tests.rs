//! Standard library module tests

use std::sync::Arc;

use modscope_domain::ports::{GraphStep, HostRuntime, Injector, RegistrationCapability};
use modscope_domain::value_objects::{
    Declaration, Function, Instance, Locals, ProviderInstance, RegistrationCall,
};
use modscope_infrastructure::runtime::ProvideCapability;
use modscope_infrastructure::runtime::standard::CompileCapability;
use modscope_infrastructure::{GraphInjector, InMemoryHostRuntime, InMemoryModuleRegistry};
use serde_json::json;

const CORE_SERVICES: [&str; 18] = [
    "$filter",
    "$controller",
    "$compile",
    "$animate",
    "$http",
    "$httpBackend",
    "$locale",
    "$interpolate",
    "$parse",
    "$rootScope",
    "$q",
    "$browser",
    "$log",
    "$exceptionHandler",
    "$timeout",
    "$window",
    "currencyFilter",
    "ngIfDirective",
];

fn standard_graph(modules: &[&str]) -> Arc<dyn Injector> {
    let registry = Arc::new(InMemoryModuleRegistry::with_standard_library());
    let steps = modules
        .iter()
        .map(|name| GraphStep::Module((*name).to_string()))
        .collect();
    InMemoryHostRuntime::new(registry)
        .build_graph(steps)
        .expect("standard graph builds")
}

#[test]
fn test_every_core_service_builds() {
    let injector = standard_graph(&["ng"]);
    for service in CORE_SERVICES {
        assert!(
            injector.service(service).is_ok(),
            "{service} should be instantiable"
        );
    }
}

#[test]
fn test_registration_providers_expose_methods() {
    let injector = standard_graph(&["ng"]);
    for (provider, method) in [
        ("$filterProvider", "register"),
        ("$controllerProvider", "register"),
        ("$animateProvider", "register"),
        ("$compileProvider", "directive"),
        ("$compileProvider", "component"),
    ] {
        let capability = injector
            .provider(provider)
            .expect("provider")
            .capability()
            .cloned()
            .expect("capability");
        assert!(
            capability.methods().iter().any(|m| m == method),
            "{provider} should expose {method}"
        );
    }
}

#[test]
fn test_locale_service_value() {
    let injector = standard_graph(&["ng"]);
    let locale = injector.service("$locale").expect("$locale");
    assert_eq!(locale.as_value(), Some(&json!({ "id": "en-us" })));
}

#[test]
fn test_filter_registration_defines_suffixed_factory() {
    let injector = standard_graph(&["ng"]);
    let shout = Function::returning("shoutFilter", ["$locale"], Instance::value("SHOUT"));
    injector
        .provider("$filterProvider")
        .expect("$filterProvider")
        .call(
            injector.as_ref(),
            "register",
            RegistrationCall::named("shout", shout),
        )
        .expect("registered");

    assert!(injector.has_provider("shoutFilterProvider"));
    let filter = injector.service("shoutFilter").expect("shoutFilter");
    assert_eq!(filter.as_value(), Some(&json!("SHOUT")));
}

#[test]
fn test_animation_registration_defines_suffixed_factory() {
    let injector = standard_graph(&["ng"]);
    injector
        .provider("$animateProvider")
        .expect("$animateProvider")
        .call(
            injector.as_ref(),
            "register",
            RegistrationCall::named(".fade", Declaration::annotated(["$timeout"], noop("fade"))),
        )
        .expect("registered");

    assert!(injector.has_provider(".fade-animationProvider"));
}

#[test]
fn test_mock_module_overrides_http_backend() {
    let plain = standard_graph(&["ng"]);
    let mocked = standard_graph(&["ngMock"]);

    let plain_get = plain
        .provider("$httpBackendProvider")
        .expect("provider")
        .get_declaration()
        .cloned()
        .expect("$get");
    let mocked_get = mocked
        .provider("$httpBackendProvider")
        .expect("provider")
        .get_declaration()
        .cloned()
        .expect("$get");

    assert_eq!(plain_get.annotate(), vec!["$browser", "$window"]);
    assert_eq!(mocked_get.annotate(), vec!["$rootScope"]);
    assert!(mocked.service("$httpBackend").is_ok());
}

fn noop(name: &str) -> Function {
    Function::returning(name, Vec::<String>::new(), Instance::value(name))
}

fn compile_fixture() -> (GraphInjector, CompileCapability) {
    let injector = GraphInjector::new();
    injector
        .define_provider("$provide", ProviderInstance::intrinsic(Arc::new(ProvideCapability)))
        .expect("$provide");
    let provide = injector.provider("$provide").expect("$provide");
    (injector, CompileCapability::new(provide))
}

#[test]
fn test_directives_share_one_factory() {
    let (injector, compile) = compile_fixture();
    let definition = |priority: i64| {
        Instance::Declaration(Declaration::object([("priority", Declaration::value(priority))]))
    };
    compile
        .call(
            &injector,
            "directive",
            RegistrationCall::named("tabs", Function::returning("t1", Vec::<String>::new(), definition(1))),
        )
        .expect("first");
    compile
        .call(
            &injector,
            "directive",
            RegistrationCall::named("tabs", Function::returning("t2", Vec::<String>::new(), definition(2))),
        )
        .expect("second");

    assert_eq!(compile.directive_factories("tabs").expect("factories").len(), 2);
    let definitions = injector.service("tabsDirective").expect("tabsDirective");
    let definitions = definitions.as_declaration().expect("definitions");
    assert_eq!(
        definitions
            .member("1")
            .and_then(|d| d.member("priority"))
            .and_then(Declaration::as_value),
        Some(&json!(2))
    );
}

#[test]
fn test_component_becomes_element_directive() {
    let (injector, compile) = compile_fixture();
    let controller = Declaration::annotated(["$scope"], noop("CardController"));
    compile
        .call(
            &injector,
            "component",
            RegistrationCall::named(
                "card",
                Declaration::object([
                    ("controller", controller.clone()),
                    ("template", Declaration::value("<div></div>")),
                ]),
            ),
        )
        .expect("component");

    let factories = compile.directive_factories("card").expect("factories");
    assert_eq!(factories.len(), 1);
    let definition = injector
        .invoke(&factories[0], &Locals::new())
        .expect("definition");
    let definition = definition.as_declaration().expect("object");
    assert_eq!(definition.member("restrict"), Some(&Declaration::value("E")));
    assert_eq!(definition.member("controller"), Some(&controller));
    assert_eq!(
        definition.member("template"),
        Some(&Declaration::value("<div></div>"))
    );
}

#[test]
fn test_compile_rejects_unknown_method() {
    let (injector, compile) = compile_fixture();
    let err = compile
        .call(
            &injector,
            "register",
            RegistrationCall::named("x", Declaration::value(1)),
        )
        .expect_err("unsupported");
    assert!(err.to_string().contains("$compileProvider has no registration method"));
}
