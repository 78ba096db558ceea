//! Configuration management

use samstack_core::{Module, ModuleError};
use samstack_tags::TagFilterSet;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub module: ModuleConfig,

    #[serde(default)]
    pub tag_filters: TagFilterSet,

    /// Known tag keys offered for completion
    #[serde(default)]
    pub tag_keys: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ModuleConfig {
    #[serde(default = "default_module_name")]
    pub name: String,

    #[serde(default)]
    pub content_roots: Vec<PathBuf>,

    #[serde(default)]
    pub build_root: Option<PathBuf>,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            name: default_module_name(),
            content_roots: Vec::new(),
            build_root: None,
        }
    }
}

fn default_module_name() -> String {
    "main".to_string()
}

impl ModuleConfig {
    /// Build the module, letting non-empty command line values win.
    /// With no content roots anywhere, `cwd` is the only root.
    pub fn to_module(
        &self,
        content_roots: &[PathBuf],
        build_root: Option<&Path>,
        cwd: &Path,
    ) -> Result<Module, ModuleError> {
        let roots = if !content_roots.is_empty() {
            content_roots.to_vec()
        } else if !self.content_roots.is_empty() {
            self.content_roots.clone()
        } else {
            vec![cwd.to_path_buf()]
        };
        let roots = roots.iter().map(|root| absolute(root, cwd)).collect();

        let module = Module::new(self.name.clone(), roots)?;
        match build_root.or(self.build_root.as_deref()) {
            Some(build_root) => Ok(module.with_build_root(absolute(build_root, cwd))),
            None => Ok(module),
        }
    }
}

/// `path` made absolute against `cwd`, with `.` components dropped
pub fn absolute(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.components().collect()
    } else {
        cwd.join(path).components().collect()
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_from(path, None)
    }

    /// Like [`Config::load`], reading variables from `env` instead of the process environment
    pub fn load_from(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("samstack").required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("SAMSTACK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("module.content_roots")
                    .with_list_parse_key("tag_keys")
                    .source(env),
            )
            .build()?;

        Ok(config.try_deserialize::<Config>()?)
    }
}
