/// SBOM generator adapters
mod cdxgen_tool;

pub use cdxgen_tool::CdxgenSbomTool;
