// src/config/mod.rs

//! Execution configuration for retryexec.
//!
//! Responsibilities:
//! - Define the plain-data config value a caller hands to the engine
//!   (`model.rs`).
//! - Validate it before anything is launched (`validate.rs`).

pub mod model;
pub mod validate;

pub use model::ExecConfig;
pub use validate::validate_config;
