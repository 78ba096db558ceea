//! Project module model

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory SAM writes its build output under, relative to the content root
pub const SAM_BUILD_DIR: &str = ".aws-sam/build";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModuleError {
    #[error("Module {0} has no content roots")]
    NoContentRoots(String),
}

/// A unit of a project: one or more source trees plus a build output root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    name: String,
    content_roots: Vec<PathBuf>,
    build_root: PathBuf,
}

impl Module {
    /// Create a module; the build root defaults to `.aws-sam/build` under the first content root
    pub fn new(
        name: impl Into<String>,
        content_roots: Vec<PathBuf>,
    ) -> Result<Self, ModuleError> {
        let name = name.into();
        let Some(first) = content_roots.first() else {
            return Err(ModuleError::NoContentRoots(name));
        };
        let build_root = first.join(SAM_BUILD_DIR);

        Ok(Self {
            name,
            content_roots,
            build_root,
        })
    }

    pub fn with_build_root(mut self, build_root: impl Into<PathBuf>) -> Self {
        self.build_root = build_root.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_roots(&self) -> &[PathBuf] {
        &self.content_roots
    }

    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    /// The deepest content root containing `path`, if any
    pub fn content_root_for(&self, path: &Path) -> Option<&Path> {
        self.content_roots
            .iter()
            .filter(|root| path.starts_with(root))
            .max_by_key(|root| root.components().count())
            .map(PathBuf::as_path)
    }
}
