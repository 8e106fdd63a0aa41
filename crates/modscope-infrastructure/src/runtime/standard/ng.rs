//! The `ng` module
//!
//! Everything is registered from a single config block through the
//! provider-phase `$provide`, so whatever wraps `$provide` before `ng` loads
//! sees these registrations too.

use std::sync::Arc;

use modscope_domain::constants::{
    COMPILE_PROVIDER, FILTER_SUFFIX, METHOD_DIRECTIVE, METHOD_PROVIDER, METHOD_REGISTER, PROVIDE,
    STANDARD_MODULE,
};
use modscope_domain::entities::ModuleNode;
use modscope_domain::error::Result;
use modscope_domain::ports::{Injector, RegistrationCapability};
use modscope_domain::value_objects::{
    Declaration, Function, Instance, Invocation, ProviderInstance, RegistrationCall,
};
use serde_json::{Value, json};

use super::capabilities::{
    AnimateCapability, CompileCapability, ControllerCapability, FilterCapability,
};
use super::{annotated_getter, getter, plain_provider};

/// Build the `ng` module
pub fn module() -> ModuleNode {
    let ng = ModuleNode::standard(STANDARD_MODULE, Vec::new());
    ng.config(configure);
    ng
}

fn configure(injector: &dyn Injector) -> Result<()> {
    let provide = injector.provider(PROVIDE)?;

    provide.call(
        injector,
        METHOD_PROVIDER,
        RegistrationCall::named("$compile", compile_provider()),
    )?;
    injector.provider(COMPILE_PROVIDER)?.call(
        injector,
        METHOD_DIRECTIVE,
        RegistrationCall::map(built_in_directives()),
    )?;
    provide.call(
        injector,
        METHOD_PROVIDER,
        RegistrationCall::map(core_providers()),
    )
}

/// The `$provide` injected into a registration provider constructor
fn injected_provide(invocation: &Invocation<'_>) -> Result<ProviderInstance> {
    invocation.provider(0).cloned()
}

fn compile_provider() -> Declaration {
    Function::named("$CompileProvider", ["$provide"], |invocation| {
        let capability = Arc::new(CompileCapability::new(injected_provide(invocation)?));
        let get = getter(
            "$compile",
            &[
                "$interpolate",
                "$exceptionHandler",
                "$parse",
                "$controller",
                "$rootScope",
            ],
        );
        Ok(Instance::Provider(
            ProviderInstance::new(get.into()).with_capability(capability),
        ))
    })
    .into()
}

fn filter_provider() -> Declaration {
    Function::named("$FilterProvider", ["$provide"], |invocation| {
        let capability = Arc::new(FilterCapability::new(injected_provide(invocation)?));
        capability.call(
            invocation.injector,
            METHOD_REGISTER,
            RegistrationCall::map(built_in_filters()),
        )?;
        Ok(Instance::Provider(
            ProviderInstance::new(getter("$filter", &[]).into()).with_capability(capability),
        ))
    })
    .into()
}

fn controller_provider() -> Declaration {
    Function::named("$ControllerProvider", Vec::<String>::new(), |_| {
        Ok(Instance::Provider(
            ProviderInstance::new(getter("$controller", &["$window"]).into())
                .with_capability(Arc::new(ControllerCapability::new())),
        ))
    })
    .into()
}

fn animate_provider() -> Declaration {
    Function::named("$AnimateProvider", ["$provide"], |invocation| {
        let capability = Arc::new(AnimateCapability::new(injected_provide(invocation)?));
        let get = annotated_getter("$animate", &["$rootScope", "$timeout"]);
        Ok(Instance::Provider(
            ProviderInstance::new(get).with_capability(capability),
        ))
    })
    .into()
}

fn core_providers() -> Vec<(&'static str, Declaration)> {
    vec![
        ("$filter", filter_provider()),
        ("$controller", controller_provider()),
        ("$animate", animate_provider()),
        (
            "$http",
            plain_provider(
                "$HttpProvider",
                annotated_getter("$http", &["$httpBackend", "$browser", "$q", "$rootScope"]),
            ),
        ),
        (
            "$httpBackend",
            Declaration::provider_object(getter("$httpBackend", &["$browser", "$window"])),
        ),
        (
            "$locale",
            plain_provider(
                "$LocaleProvider",
                Function::returning(
                    "$get",
                    Vec::<String>::new(),
                    Instance::value(json!({ "id": "en-us" })),
                )
                .into(),
            ),
        ),
        (
            "$interpolate",
            plain_provider(
                "$InterpolateProvider",
                annotated_getter("$interpolate", &["$parse", "$exceptionHandler"]),
            ),
        ),
        (
            "$parse",
            plain_provider("$ParseProvider", annotated_getter("$parse", &["$filter"])),
        ),
        (
            "$rootScope",
            plain_provider(
                "$RootScopeProvider",
                annotated_getter("$rootScope", &["$exceptionHandler", "$parse", "$browser"]),
            ),
        ),
        (
            "$q",
            plain_provider(
                "$QProvider",
                annotated_getter("$q", &["$rootScope", "$exceptionHandler"]),
            ),
        ),
        (
            "$browser",
            plain_provider(
                "$BrowserProvider",
                annotated_getter("$browser", &["$window", "$log"]),
            ),
        ),
        (
            "$log",
            plain_provider("$LogProvider", getter("$log", &["$window"]).into()),
        ),
        (
            "$exceptionHandler",
            plain_provider(
                "$ExceptionHandlerProvider",
                annotated_getter("$exceptionHandler", &["$log"]),
            ),
        ),
        (
            "$timeout",
            plain_provider(
                "$TimeoutProvider",
                annotated_getter(
                    "$timeout",
                    &["$rootScope", "$browser", "$q", "$exceptionHandler"],
                ),
            ),
        ),
        (
            "$window",
            Declaration::provider_object(getter("$window", &[])),
        ),
    ]
}

/// A filter factory: invoked with its dependencies, returns the filter function
fn filter_factory(name: &str, params: &[&str]) -> Function {
    let filter = Function::returning(name, ["input"], Instance::value(Value::Null));
    Function::returning(
        format!("{name}{FILTER_SUFFIX}"),
        params.iter().copied(),
        Instance::Declaration(filter.into()),
    )
}

fn built_in_filters() -> Vec<(&'static str, Declaration)> {
    [
        ("currency", &["$locale"][..]),
        ("date", &["$locale"][..]),
        ("number", &["$locale"][..]),
        ("json", &[][..]),
        ("lowercase", &[][..]),
        ("uppercase", &[][..]),
        ("limitTo", &[][..]),
        ("orderBy", &["$parse"][..]),
        ("filter", &[][..]),
    ]
    .into_iter()
    .map(|(name, params)| (name, filter_factory(name, params).into()))
    .collect()
}

/// A directive factory returning the given definition object
fn directive(name: &str, dependencies: &[&str], definition: Declaration) -> Declaration {
    let factory = Function::returning(name, Vec::<String>::new(), Instance::Declaration(definition));
    Declaration::annotated(dependencies.iter().copied(), factory)
}

fn definition(restrict: &str, priority: i64) -> Vec<(&'static str, Declaration)> {
    vec![
        ("restrict", Declaration::value(restrict)),
        ("priority", Declaration::value(priority)),
    ]
}

fn built_in_directives() -> Vec<(&'static str, Declaration)> {
    let ng_model_controller = Function::returning(
        "NgModelController",
        Vec::<String>::new(),
        Instance::value(Value::Null),
    )
    .with_inject([
        "$scope",
        "$exceptionHandler",
        "$attrs",
        "$element",
        "$parse",
        "$animate",
        "$timeout",
        "$rootScope",
        "$q",
        "$interpolate",
    ]);

    let mut ng_model = definition("A", 1);
    ng_model.push(("controller", ng_model_controller.into()));

    let mut input = definition("E", 0);
    input.push(("require", Declaration::value(json!(["?ngModel"]))));

    vec![
        (
            "option",
            directive(
                "optionDirective",
                &["$interpolate"],
                Declaration::object(definition("E", 100)),
            ),
        ),
        (
            "ngIf",
            directive(
                "ngIfDirective",
                &["$animate", "$compile"],
                Declaration::object(definition("A", 600)),
            ),
        ),
        (
            "ngRepeat",
            directive(
                "ngRepeatDirective",
                &["$parse", "$animate", "$compile"],
                Declaration::object(definition("A", 1000)),
            ),
        ),
        (
            "input",
            directive("inputDirective", &["$browser"], Declaration::object(input)),
        ),
        (
            "ngModel",
            directive("ngModelDirective", &["$rootScope"], Declaration::object(ng_model)),
        ),
    ]
}
