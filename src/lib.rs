//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under `blockfall::{core,input,term,types}`
//! and hosts the application glue shared by the binary: environment
//! configuration, logger setup and the headless runner.

pub mod config;
pub mod headless;
pub mod logging;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::AppConfig;
