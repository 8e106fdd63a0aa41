//! The `ngMock` module
//!
//! Replaces I/O-facing services of `ng` with test doubles. Unlike `ng`, the
//! overrides are queued on the module and drained when it loads.

use modscope_domain::constants::{METHOD_PROVIDER, PROVIDE, STANDARD_MODULE, TEST_SUPPORT_MODULE};
use modscope_domain::entities::ModuleNode;
use modscope_domain::value_objects::{Declaration, RegistrationCall};

use super::{annotated_getter, getter, plain_provider};

/// Build the `ngMock` module
pub fn module() -> ModuleNode {
    let ng_mock = ModuleNode::standard(TEST_SUPPORT_MODULE, vec![STANDARD_MODULE.to_string()]);
    ng_mock.queue(
        PROVIDE,
        METHOD_PROVIDER,
        RegistrationCall::map([
            (
                "$browser",
                Declaration::provider_object(getter("$browser", &[])),
            ),
            (
                "$exceptionHandler",
                plain_provider(
                    "$ExceptionHandlerProvider",
                    annotated_getter("$exceptionHandler", &["$log"]),
                ),
            ),
            ("$log", plain_provider("$LogProvider", getter("$log", &[]).into())),
            (
                "$httpBackend",
                Declaration::provider_object(annotated_getter("$httpBackend", &["$rootScope"])),
            ),
        ]),
    );
    ng_mock
}
