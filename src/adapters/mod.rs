/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: the Cloud Controller
/// client, the CF CLI session reader, console progress and report output.
pub mod outbound;
