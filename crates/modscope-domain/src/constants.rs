//! Domain layer constants
//!
//! Provider names, registration method names and naming conventions of the
//! host dependency-injection runtime. Every layer matches registrations
//! against these values, so they live here rather than in infrastructure.

// ============================================================================
// PROVIDER NAMES
// ============================================================================

/// The service registration provider
pub const PROVIDE: &str = "$provide";

/// The filter registration provider
pub const FILTER_PROVIDER: &str = "$filterProvider";

/// The controller registration provider
pub const CONTROLLER_PROVIDER: &str = "$controllerProvider";

/// The directive/component registration provider
pub const COMPILE_PROVIDER: &str = "$compileProvider";

/// The animation registration provider
pub const ANIMATE_PROVIDER: &str = "$animateProvider";

/// Provider names whose registration methods are intercepted out of the box
pub const BUILT_IN_REGISTRATION_PROVIDERS: [&str; 5] = [
    PROVIDE,
    FILTER_PROVIDER,
    CONTROLLER_PROVIDER,
    COMPILE_PROVIDER,
    ANIMATE_PROVIDER,
];

/// Service produced by the filter provider
pub const FILTER_SERVICE: &str = "$filter";

// ============================================================================
// REGISTRATION METHODS
// ============================================================================

/// `$provide.constant`
pub const METHOD_CONSTANT: &str = "constant";

/// `$provide.value`
pub const METHOD_VALUE: &str = "value";

/// `$provide.service`
pub const METHOD_SERVICE: &str = "service";

/// `$provide.factory`
pub const METHOD_FACTORY: &str = "factory";

/// `$provide.provider`
pub const METHOD_PROVIDER: &str = "provider";

/// `$provide.decorator`
pub const METHOD_DECORATOR: &str = "decorator";

/// `register` on the filter, controller and animate providers
pub const METHOD_REGISTER: &str = "register";

/// `$compileProvider.directive`
pub const METHOD_DIRECTIVE: &str = "directive";

/// `$compileProvider.component`
pub const METHOD_COMPONENT: &str = "component";

/// Every `$provide` registration method, in the order the runtime documents them
pub const PROVIDE_METHODS: [&str; 5] = [
    METHOD_PROVIDER,
    METHOD_FACTORY,
    METHOD_SERVICE,
    METHOD_VALUE,
    METHOD_CONSTANT,
];

// ============================================================================
// NAMING CONVENTIONS
// ============================================================================

/// Suffix appended to a service name to name its provider
pub const PROVIDER_SUFFIX: &str = "Provider";

/// Suffix the filter provider appends to filter factories registered on `$provide`
pub const FILTER_SUFFIX: &str = "Filter";

/// Suffix the compile provider appends to directive factories registered on `$provide`
pub const DIRECTIVE_SUFFIX: &str = "Directive";

/// Member of a provider object holding the service factory
pub const GET_MEMBER: &str = "$get";

/// Member of a directive definition or component options object naming its controller
pub const CONTROLLER_MEMBER: &str = "controller";

// ============================================================================
// STANDARD MODULES
// ============================================================================

/// The host runtime's standard library module
pub const STANDARD_MODULE: &str = "ng";

/// The host runtime's test-support module
pub const TEST_SUPPORT_MODULE: &str = "ngMock";

/// Returns the provider name for a service (`$http` -> `$httpProvider`)
pub fn provider_name_for(service_name: &str) -> String {
    format!("{service_name}{PROVIDER_SUFFIX}")
}

/// Whether `(provider_name, method)` is a constant registration
///
/// Constants are the only registrations that cannot be overridden by a later
/// non-constant registration of the same name.
pub fn is_constant_registration(provider_name: &str, method: &str) -> bool {
    provider_name == PROVIDE && method == METHOD_CONSTANT
}
