// LogLens - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: app, platform, or any I/O crate directly.

pub mod aggregate;
pub mod analysis;
pub mod categories;
pub mod categorizer;
pub mod export;
pub mod filter;
pub mod level;
pub mod model;
pub mod parser;
pub mod storage;
