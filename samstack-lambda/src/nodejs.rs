//! Node.js builder

use crate::builder::LambdaBuilder;
use crate::runtime::RuntimeGroup;
use std::path::{Path, PathBuf};

const SOURCE_EXTENSIONS: [&str; 3] = ["js", "mjs", "cjs"];

/// Builder for `nodejs*` runtimes; sources are rooted at `package.json`
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeJsLambdaBuilder;

impl LambdaBuilder for NodeJsLambdaBuilder {
    fn runtime_group(&self) -> RuntimeGroup {
        RuntimeGroup::NodeJs
    }

    fn manifest_file(&self) -> &'static str {
        "package.json"
    }

    /// `src/app.handler` names `src/app.js` (or `.mjs`/`.cjs`)
    fn handler_file(&self, code_dir: &Path, handler: &str) -> Option<PathBuf> {
        let (module_path, _function) = handler.rsplit_once('.')?;
        SOURCE_EXTENSIONS
            .iter()
            .map(|ext| code_dir.join(format!("{module_path}.{ext}")))
            .find(|candidate| candidate.is_file())
    }
}
