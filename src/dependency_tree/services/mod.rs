pub mod coordinate_parser;
pub mod depth_inference;
pub mod go_module_graph;
pub mod hierarchy_builder;
pub mod pipgrip_normalizer;
pub mod serializer;
pub mod tokenizer;
pub mod tree_parser;

pub use coordinate_parser::{normalize_notation, parse_for_dialect, parse_notation};
pub use depth_inference::{depth_of_line, infer_depth};
pub use go_module_graph::GoModuleGraph;
pub use hierarchy_builder::HierarchyBuilder;
pub use pipgrip_normalizer::PipgripNormalizer;
pub use serializer::HierarchySerializer;
pub use tokenizer::{classify_line, TreeLine, Tokenizer};
pub use tree_parser::{parse, parse_with_dialect, TreeParser};
