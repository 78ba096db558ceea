//! Subcommand implementations
//!
//! Each command resolves its inputs against the configured module and
//! returns a JSON document for stdout.

use crate::config::{absolute, Config};
use samstack_core::{ErrorCode, Module, SamError};
use samstack_lambda::{require_builder, BuilderError, LambdaBuilder, Runtime, SamTemplate};
use samstack_tags::{StaticTagKeys, TagKeyProvider};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Module selection shared by the path commands
pub struct ModuleSelection<'a> {
    pub content_roots: &'a [PathBuf],
    pub build_root: Option<&'a Path>,
}

pub struct Context<'a> {
    pub config: &'a Config,
    pub cwd: PathBuf,
}

impl Context<'_> {
    fn module(&self, selection: &ModuleSelection<'_>) -> Result<Module, SamError> {
        Ok(self
            .config
            .module
            .to_module(selection.content_roots, selection.build_root, &self.cwd)?)
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        absolute(path, &self.cwd)
    }
}

fn parse_runtime(runtime: &str) -> Result<Runtime, SamError> {
    Runtime::from_str(runtime).ok_or_else(|| {
        SamError::new(ErrorCode::UnsupportedRuntime, format!("Unknown runtime {runtime}"))
            .with_resource(runtime)
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, SamError> {
    serde_json::to_value(value).map_err(|e| SamError::new(ErrorCode::InternalError, e.to_string()))
}

fn builder(runtime: Runtime) -> Result<&'static dyn LambdaBuilder, SamError> {
    Ok(require_builder(runtime)?)
}

pub fn base_dir(
    ctx: &Context<'_>,
    handler: &Path,
    runtime: &str,
    selection: &ModuleSelection<'_>,
) -> Result<Value, SamError> {
    let module = ctx.module(selection)?;
    let builder = builder(parse_runtime(runtime)?)?;
    let handler = ctx.absolute(handler);

    let base_dir = builder.handler_base_directory(&module, &handler);
    if base_dir.is_none() {
        info!(
            handler = %handler.display(),
            manifest = builder.manifest_file(),
            "Base directory could not be determined"
        );
    }

    Ok(json!({ "baseDirectory": to_json(&base_dir)? }))
}

pub fn build_dir(
    ctx: &Context<'_>,
    logical_id: &str,
    selection: &ModuleSelection<'_>,
) -> Result<Value, SamError> {
    let module = ctx.module(selection)?;
    let build_dir = module.build_root().join(logical_id);

    Ok(json!({ "buildDirectory": to_json(&build_dir)? }))
}

pub fn path_mappings(
    ctx: &Context<'_>,
    template: &Path,
    logical_id: &str,
    build_dir: Option<&Path>,
    runtime: Option<&str>,
    selection: &ModuleSelection<'_>,
) -> Result<Value, SamError> {
    let template = ctx.absolute(template);

    let runtime = match runtime {
        Some(runtime) => parse_runtime(runtime)?,
        None => template_runtime(&template, logical_id)?,
    };
    let builder = builder(runtime)?;

    let build_dir = match build_dir {
        Some(dir) => ctx.absolute(dir),
        None => builder.build_directory(&ctx.module(selection)?),
    };

    let mappings = builder.default_path_mappings(&template, logical_id, &build_dir)?;
    to_json(&mappings)
}

/// The runtime a template declares for `logical_id`
fn template_runtime(template: &Path, logical_id: &str) -> Result<Runtime, SamError> {
    let parsed = SamTemplate::load(template).map_err(BuilderError::from)?;
    let function = parsed
        .function(logical_id)
        .ok_or_else(|| BuilderError::FunctionNotFound {
            logical_id: logical_id.to_string(),
            template: template.to_path_buf(),
        })?;

    match function.runtime.as_deref() {
        Some(runtime) => parse_runtime(runtime),
        None => Err(SamError::new(
            ErrorCode::UnsupportedRuntime,
            format!("Function {logical_id} declares no runtime; pass --runtime"),
        )
        .with_resource(logical_id)),
    }
}

pub fn tag_filters(ctx: &Context<'_>) -> Value {
    json!({ "TagFilters": ctx.config.tag_filters.active() })
}

pub async fn tag_keys(ctx: &Context<'_>, prefix: &str) -> Value {
    let source = Arc::new(StaticTagKeys(ctx.config.tag_keys.clone()));
    let provider = TagKeyProvider::spawn(source);
    provider.wait().await;

    json!({ "TagKeys": provider.completions(prefix) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use samstack_tags::TagFilter;
    use std::fs;

    fn context<'a>(config: &'a Config, cwd: &Path) -> Context<'a> {
        Context {
            config,
            cwd: cwd.to_path_buf(),
        }
    }

    fn no_selection() -> ModuleSelection<'static> {
        ModuleSelection {
            content_roots: &[],
            build_root: None,
        }
    }

    #[test]
    fn test_base_dir_relative_handler() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("hello-world/foo-bar")).unwrap();
        fs::write(temp.path().join("hello-world/package.json"), "{}").unwrap();

        let config = Config::default();
        let ctx = context(&config, temp.path());

        let result = base_dir(
            &ctx,
            Path::new("hello-world/foo-bar/app.js"),
            "nodejs20.x",
            &no_selection(),
        )
        .unwrap();
        assert_eq!(
            result["baseDirectory"],
            json!(temp.path().join("hello-world"))
        );
    }

    #[test]
    fn test_base_dir_not_found_is_null() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config::default();
        let ctx = context(&config, temp.path());

        let result = base_dir(&ctx, Path::new("app.js"), "nodejs20.x", &no_selection()).unwrap();
        assert!(result["baseDirectory"].is_null());
    }

    #[test]
    fn test_base_dir_unknown_runtime() {
        let config = Config::default();
        let ctx = context(&config, Path::new("/work"));

        let err = base_dir(&ctx, Path::new("app.js"), "cobol1.0", &no_selection()).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedRuntime);

        let err = base_dir(&ctx, Path::new("app.js"), "provided.al2", &no_selection()).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedRuntime);
    }

    #[test]
    fn test_build_dir() {
        let config = Config::default();
        let ctx = context(&config, Path::new("/work"));

        let result = build_dir(&ctx, "SomeFunction", &no_selection()).unwrap();
        assert_eq!(
            result["buildDirectory"],
            json!("/work/.aws-sam/build/SomeFunction")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_build_dir_non_utf8_path_is_an_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let config = Config::default();
        let ctx = context(&config, Path::new("/work"));
        let build_root = Path::new(OsStr::from_bytes(b"/work/out-\xff"));
        let selection = ModuleSelection {
            content_roots: &[],
            build_root: Some(build_root),
        };

        let err = build_dir(&ctx, "SomeFunction", &selection).unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalError);
    }

    #[test]
    fn test_path_mappings_use_template_runtime() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/app.py"), "").unwrap();
        fs::write(
            temp.path().join("template.yaml"),
            r"
Resources:
  PyFunction:
    Type: AWS::Serverless::Function
    Properties:
      CodeUri: src
      Handler: app.handler
      Runtime: python3.12
",
        )
        .unwrap();

        let config = Config::default();
        let ctx = context(&config, temp.path());

        let result = path_mappings(
            &ctx,
            Path::new("template.yaml"),
            "PyFunction",
            None,
            None,
            &no_selection(),
        )
        .unwrap();

        let mappings = result.as_array().unwrap();
        assert_eq!(mappings.len(), 2);
        assert_eq!(
            mappings[0]["localRoot"],
            json!(temp.path().join(".aws-sam/build/PyFunction"))
        );
        assert_eq!(mappings[1]["localRoot"], json!(temp.path().join("src")));
        assert_eq!(mappings[1]["remoteRoot"], "/var/task");
    }

    #[test]
    fn test_path_mappings_missing_template() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config::default();
        let ctx = context(&config, temp.path());

        let err = path_mappings(
            &ctx,
            Path::new("template.yaml"),
            "Fn",
            None,
            None,
            &no_selection(),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::TemplateNotFound);
    }

    #[test]
    fn test_tag_filters() {
        let mut config = Config::default();
        config
            .tag_filters
            .push(TagFilter::new("env", vec!["dev".to_string()]));
        config.tag_filters.add_row();
        let ctx = context(&config, Path::new("/work"));

        assert_eq!(
            tag_filters(&ctx),
            json!({ "TagFilters": [{ "Key": "env", "Values": ["dev"] }] })
        );
    }

    #[tokio::test]
    async fn test_tag_keys() {
        let config = Config {
            tag_keys: vec!["env".to_string(), "team".to_string()],
            ..Default::default()
        };
        let ctx = context(&config, Path::new("/work"));

        assert_eq!(tag_keys(&ctx, "t").await, json!({ "TagKeys": ["team"] }));
    }
}
