/// Usage reporting domain - pure business logic for service instance usage
///
/// Nothing in this module performs I/O. Records come in from the ports,
/// reports go out to the formatters.
pub mod domain;
pub mod policies;
pub mod services;
