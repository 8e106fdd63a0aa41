//! Tests for controllers embedded in components and directive definitions

use modscope_domain::error::Error;
use modscope_domain::ports::ModuleRegistry;
use modscope_domain::value_objects::{Declaration, Function, Instance};

use crate::helpers::{annotated, introspect, standard_registry};

fn component_options(controller: Declaration) -> Declaration {
    Declaration::object([
        ("template", Declaration::value("<div>{{$ctrl.name}}</div>")),
        ("controller", controller),
    ])
}

#[test]
fn test_component_controller_inline() {
    let registry = standard_registry();
    let controller = annotated(&["$http", "$element"], "UserCardController");
    registry
        .create_module("M", &[])
        .expect("module M")
        .component("userCard", component_options(controller.clone()));

    let introspector = introspect(&registry, &["M"]);
    let declarations = introspector
        .get_directive_declaration("userCard")
        .expect("userCard");
    assert_eq!(declarations.len(), 1);
    assert_eq!(declarations[0].provider_method, "component");

    let controllers = introspector
        .get_ng15_component_controllers("userCard")
        .expect("controllers");
    assert_eq!(controllers.len(), 1);
    assert_eq!(controllers[0].raw_declaration, controller);
    assert_eq!(controllers[0].injected_services, vec!["$http", "$element"]);
    assert_eq!(controllers[0].component_name, "userCard");
}

#[test]
fn test_component_controller_by_name() {
    let registry = standard_registry();
    let controller = annotated(&["$q"], "ProfileController");
    registry
        .create_module("M", &[])
        .expect("module M")
        .controller("ProfileController", controller.clone())
        .component(
            "profile",
            component_options(Declaration::value("ProfileController as vm")),
        );

    let introspector = introspect(&registry, &["M"]);
    let controllers = introspector
        .get_ng15_component_controllers("profile")
        .expect("controllers");

    assert_eq!(controllers.len(), 1);
    assert_eq!(controllers[0].raw_declaration, controller);
    assert_eq!(controllers[0].provider_method, "register");
}

#[test]
fn test_component_without_controller() {
    let registry = standard_registry();
    registry
        .create_module("M", &[])
        .expect("module M")
        .component(
            "banner",
            Declaration::object([("template", Declaration::value("<h1></h1>"))]),
        );

    let introspector = introspect(&registry, &["M"]);
    let controllers = introspector
        .get_ng15_component_controllers("banner")
        .expect("controllers");
    assert!(controllers.is_empty());
}

#[test]
fn test_component_controllers_of_directive_is_shape_mismatch() {
    let registry = standard_registry();
    registry.create_module("M", &[]).expect("module M");
    let introspector = introspect(&registry, &["M"]);

    let err = introspector
        .get_ng15_component_controllers("ngIf")
        .expect_err("ngIf is a directive");
    assert!(matches!(err, Error::ShapeMismatch { .. }));
    assert_eq!(
        err.to_string(),
        "Component \"ngIf\" was registered as a directive, but was requested as a component"
    );
}

#[test]
fn test_built_in_directive_controller() {
    let registry = standard_registry();
    registry.create_module("M", &[]).expect("module M");
    let introspector = introspect(&registry, &["M"]);

    let controllers = introspector
        .get_directive_controllers("ngModel")
        .expect("controllers");

    assert_eq!(controllers.len(), 1);
    assert!(controllers[0].built_in);
    assert_eq!(controllers[0].injected_services.len(), 10);
    assert_eq!(controllers[0].injected_services[0], "$scope");
}

#[test]
fn test_user_directive_controller() {
    let registry = standard_registry();
    let controller = annotated(&["$scope", "$log"], "TabsController");
    let definition = Declaration::object([
        ("restrict", Declaration::value("E")),
        ("controller", controller.clone()),
    ]);
    let factory = Function::returning("tabs", ["$timeout"], Instance::Declaration(definition));
    registry
        .create_module("M", &[])
        .expect("module M")
        .directive("tabs", factory);

    let introspector = introspect(&registry, &["M"]);
    let controllers = introspector
        .get_directive_controllers("tabs")
        .expect("controllers");

    assert_eq!(controllers.len(), 1);
    assert_eq!(controllers[0].raw_declaration, controller);
    assert!(!controllers[0].built_in);
}

#[test]
fn test_directive_returning_link_function_has_no_controller() {
    let registry = standard_registry();
    let link = Function::returning("link", Vec::<String>::new(), Instance::value("linked"));
    let factory = Function::returning(
        "focusOn",
        Vec::<String>::new(),
        Instance::Declaration(link.into()),
    );
    registry
        .create_module("M", &[])
        .expect("module M")
        .directive("focusOn", factory);

    let introspector = introspect(&registry, &["M"]);
    let controllers = introspector
        .get_directive_controllers("focusOn")
        .expect("controllers");
    assert!(controllers.is_empty());
}

#[test]
fn test_directive_controllers_of_component_is_shape_mismatch() {
    let registry = standard_registry();
    registry
        .create_module("M", &[])
        .expect("module M")
        .component("card", component_options(annotated(&[], "CardController")));

    let introspector = introspect(&registry, &["M"]);
    let err = introspector
        .get_directive_controllers("card")
        .expect_err("card is a component");
    assert!(matches!(err, Error::ShapeMismatch { .. }));
}
