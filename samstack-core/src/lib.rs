//! Core types for SamStack
//!
//! This crate provides the module model, path mappings and error types
//! shared by the other SamStack crates.

pub mod error;
pub mod module;
pub mod path_mapping;

pub use error::{ErrorCode, SamError};
pub use module::{Module, ModuleError, SAM_BUILD_DIR};
pub use path_mapping::{PathMapping, TASK_PATH};
