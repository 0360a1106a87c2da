//! Dependency-tree text parsing
//!
//! Build tools print their dependency graphs as indented trees drawn with
//! ASCII (`+-`, `|`, `\-`) or Unicode box glyphs (`├─`, `│`, `└─`). This
//! module turns that text back into nested [`domain::DependencyRecord`]s.

pub mod domain;
pub mod services;

pub use domain::{Configuration, DependencyHierarchy, DependencyRecord, TreeDialect};
pub use services::{parse, parse_with_dialect, HierarchySerializer};
