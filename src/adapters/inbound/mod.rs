/// Inbound adapters - Entry points that drive the use cases
///
/// The CLI lives in the binary; this module holds the protocol servers
/// that expose the same pipeline to other programs.
pub mod mcp;
