//! SAM / CloudFormation template reading
//!
//! Only the parts of a template needed to locate function sources are read:
//! resource types, `CodeUri`/`Code`, `Handler`, `Runtime` and the
//! `Globals.Function` section. JSON templates parse as YAML.

use crate::runtime::Runtime;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const SERVERLESS_FUNCTION_TYPE: &str = "AWS::Serverless::Function";
pub const LAMBDA_FUNCTION_TYPE: &str = "AWS::Lambda::Function";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid template {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Template {0} has no Resources section")]
    NoResources(PathBuf),
}

/// A function resource as declared in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFunction {
    pub logical_id: String,
    /// Local code location; absent when the code lives in S3 or is computed
    pub code_uri: Option<String>,
    pub handler: Option<String>,
    pub runtime: Option<String>,
}

impl TemplateFunction {
    /// The declared runtime, if it is one we know
    pub fn runtime(&self) -> Option<Runtime> {
        self.runtime.as_deref().and_then(Runtime::from_str)
    }
}

/// A parsed deployment template
#[derive(Debug, Clone)]
pub struct SamTemplate {
    path: PathBuf,
    functions: Vec<TemplateFunction>,
}

impl SamTemplate {
    /// Read and parse the template at `path`
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        if !path.is_file() {
            return Err(TemplateError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, path)
    }

    /// Parse template text; `path` anchors relative code locations
    pub fn parse(text: &str, path: &Path) -> Result<Self, TemplateError> {
        let document: Value = serde_yaml::from_str(text).map_err(|source| TemplateError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let resources = document
            .get("Resources")
            .and_then(Value::as_mapping)
            .ok_or_else(|| TemplateError::NoResources(path.to_path_buf()))?;

        let globals = document.get("Globals").and_then(|g| g.get("Function"));

        let functions = resources
            .iter()
            .filter_map(|(key, resource)| {
                let logical_id = key.as_str()?;
                parse_function(logical_id, resource, globals)
            })
            .collect::<Vec<_>>();

        debug!(
            template = %path.display(),
            functions = functions.len(),
            "Parsed template"
        );

        Ok(Self {
            path: path.to_path_buf(),
            functions,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn functions(&self) -> &[TemplateFunction] {
        &self.functions
    }

    pub fn function(&self, logical_id: &str) -> Option<&TemplateFunction> {
        self.functions.iter().find(|f| f.logical_id == logical_id)
    }

    /// The function's code directory, resolved against the template's directory
    pub fn code_directory(&self, function: &TemplateFunction) -> Option<PathBuf> {
        let code_uri = function.code_uri.as_deref()?;
        let base = self.path.parent().unwrap_or_else(|| Path::new(""));
        Some(base.join(code_uri).components().collect())
    }
}

fn parse_function(
    logical_id: &str,
    resource: &Value,
    globals: Option<&Value>,
) -> Option<TemplateFunction> {
    let resource_type = resource.get("Type")?.as_str()?;
    let properties = resource.get("Properties");

    let function = match resource_type {
        SERVERLESS_FUNCTION_TYPE => TemplateFunction {
            logical_id: logical_id.to_string(),
            code_uri: string_property(properties, "CodeUri")
                .or_else(|| string_property(globals, "CodeUri")),
            handler: string_property(properties, "Handler")
                .or_else(|| string_property(globals, "Handler")),
            runtime: string_property(properties, "Runtime")
                .or_else(|| string_property(globals, "Runtime")),
        },
        LAMBDA_FUNCTION_TYPE => TemplateFunction {
            logical_id: logical_id.to_string(),
            code_uri: string_property(properties, "Code"),
            handler: string_property(properties, "Handler"),
            runtime: string_property(properties, "Runtime"),
        },
        _ => return None,
    };

    Some(function)
}

fn string_property(properties: Option<&Value>, name: &str) -> Option<String> {
    properties?.get(name)?.as_str().map(str::to_string)
}
