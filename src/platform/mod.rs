// LogLens - platform/mod.rs
//
// Platform abstraction layer: directories, config files, on-disk uploads.
// Dependencies: core (for the storage trait and model types), directories crate.
// Must NOT depend on: app.

pub mod config;
pub mod fs;
pub mod storage;
