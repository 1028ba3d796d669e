// LogLens - app/mod.rs
//
// Application layer: HTTP routes, shared state, server lifecycle.
// Dependencies: core layer for analysis, util for errors.
// Concrete storage backends are injected by main.rs.

pub mod handlers;
pub mod server;
pub mod state;
