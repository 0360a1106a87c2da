/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the ports,
/// providing the actual integration with external systems, plus the
/// inbound servers that drive the use cases.
pub mod inbound;
pub mod outbound;
