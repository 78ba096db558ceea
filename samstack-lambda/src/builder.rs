//! Lambda builders
//!
//! A builder knows how a runtime group lays out function sources: which
//! manifest marks a function's base directory and how a handler string maps
//! to a source file. From that it derives build directories and the default
//! path mappings a debugger uses to line up local files with `/var/task`.

use crate::nodejs::NodeJsLambdaBuilder;
use crate::python::PythonLambdaBuilder;
use crate::resolve::{find_marker_directory, resolve_base_directory};
use crate::runtime::{Runtime, RuntimeGroup};
use crate::template::{SamTemplate, TemplateError};
use samstack_core::{ErrorCode, Module, PathMapping, SamError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Function {logical_id} not found in {template}")]
    FunctionNotFound {
        logical_id: String,
        template: PathBuf,
    },

    #[error("Function {0} has no local CodeUri")]
    MissingCodeUri(String),

    #[error("No builder for runtime {0}")]
    UnsupportedRuntime(String),
}

impl From<BuilderError> for SamError {
    fn from(err: BuilderError) -> Self {
        let message = err.to_string();
        match err {
            BuilderError::Template(TemplateError::NotFound(path)) => {
                Self::new(ErrorCode::TemplateNotFound, message)
                    .with_resource(path.display().to_string())
            }
            BuilderError::Template(TemplateError::Io(_)) => {
                Self::new(ErrorCode::InternalError, message)
            }
            BuilderError::Template(
                TemplateError::Parse { path, .. } | TemplateError::NoResources(path),
            ) => {
                Self::new(ErrorCode::InvalidTemplate, message)
                    .with_resource(path.display().to_string())
            }
            BuilderError::FunctionNotFound { logical_id, .. } => {
                Self::new(ErrorCode::FunctionNotFound, message).with_resource(logical_id)
            }
            BuilderError::MissingCodeUri(logical_id) => {
                Self::new(ErrorCode::MissingCodeUri, message).with_resource(logical_id)
            }
            BuilderError::UnsupportedRuntime(runtime) => {
                Self::new(ErrorCode::UnsupportedRuntime, message).with_resource(runtime)
            }
        }
    }
}

pub trait LambdaBuilder: Send + Sync {
    fn runtime_group(&self) -> RuntimeGroup;

    /// Name of the dependency manifest marking a function's base directory
    fn manifest_file(&self) -> &'static str;

    /// Locate the source file a handler string refers to within `code_dir`
    fn handler_file(&self, code_dir: &Path, handler: &str) -> Option<PathBuf>;

    /// Nearest directory above the handler holding the manifest, within the module
    fn handler_base_directory(&self, module: &Module, handler_file: &Path) -> Option<PathBuf> {
        let base = resolve_base_directory(module, handler_file, self.manifest_file());
        match &base {
            Some(dir) => debug!(
                handler = %handler_file.display(),
                base_directory = %dir.display(),
                "Resolved handler base directory"
            ),
            None => debug!(
                handler = %handler_file.display(),
                manifest = self.manifest_file(),
                "No manifest found for handler"
            ),
        }
        base
    }

    /// Root under which per-function build output is written
    fn build_directory(&self, module: &Module) -> PathBuf {
        module.build_root().to_path_buf()
    }

    fn build_directory_for(&self, module: &Module, logical_id: &str) -> PathBuf {
        self.build_directory(module).join(logical_id)
    }

    /// Mappings for a template function: its build output first, then its sources
    fn default_path_mappings(
        &self,
        template_path: &Path,
        logical_id: &str,
        build_dir: &Path,
    ) -> Result<Vec<PathMapping>, BuilderError> {
        let template = SamTemplate::load(template_path)?;
        let function = template
            .function(logical_id)
            .ok_or_else(|| BuilderError::FunctionNotFound {
                logical_id: logical_id.to_string(),
                template: template_path.to_path_buf(),
            })?;
        let code_dir = template
            .code_directory(function)
            .ok_or_else(|| BuilderError::MissingCodeUri(logical_id.to_string()))?;

        let base_dir = function
            .handler
            .as_deref()
            .and_then(|handler| self.handler_file(&code_dir, handler))
            .and_then(|file| find_marker_directory(&file, &code_dir, self.manifest_file()))
            .unwrap_or_else(|| code_dir.clone());

        let mappings = vec![
            PathMapping::to_task(build_dir.join(logical_id)),
            PathMapping::to_task(base_dir),
        ];

        info!(
            logical_id,
            template = %template_path.display(),
            "Computed default path mappings"
        );

        Ok(mappings)
    }
}

static NODEJS: NodeJsLambdaBuilder = NodeJsLambdaBuilder;
static PYTHON: PythonLambdaBuilder = PythonLambdaBuilder;

/// The builder for a runtime group; custom runtimes have none
pub fn builder_for_group(group: RuntimeGroup) -> Option<&'static dyn LambdaBuilder> {
    match group {
        RuntimeGroup::NodeJs => Some(&NODEJS),
        RuntimeGroup::Python => Some(&PYTHON),
        RuntimeGroup::Provided => None,
    }
}

pub fn builder_for(runtime: Runtime) -> Option<&'static dyn LambdaBuilder> {
    builder_for_group(runtime.group())
}

/// Like [`builder_for`], but failing for runtimes without a builder
pub fn require_builder(runtime: Runtime) -> Result<&'static dyn LambdaBuilder, BuilderError> {
    builder_for(runtime).ok_or_else(|| BuilderError::UnsupportedRuntime(runtime.to_string()))
}
