//! Lambda build support for SamStack
//!
//! Resolves where a function's sources live, where its build output goes, and
//! how both map onto `/var/task` inside the Lambda container.

pub mod builder;
pub mod nodejs;
pub mod python;
pub mod resolve;
pub mod runtime;
pub mod template;

pub use builder::{builder_for, builder_for_group, require_builder, BuilderError, LambdaBuilder};
pub use nodejs::NodeJsLambdaBuilder;
pub use python::PythonLambdaBuilder;
pub use resolve::resolve_base_directory;
pub use runtime::{Runtime, RuntimeGroup};
pub use template::{SamTemplate, TemplateError, TemplateFunction};
