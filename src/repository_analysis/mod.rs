//! Repository inspection: what is in a checkout and how it is built
pub mod domain;
pub mod services;
