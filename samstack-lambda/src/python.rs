//! Python builder

use crate::builder::LambdaBuilder;
use crate::runtime::RuntimeGroup;
use std::path::{Path, PathBuf};

/// Builder for `python*` runtimes; sources are rooted at `requirements.txt`
#[derive(Debug, Default, Clone, Copy)]
pub struct PythonLambdaBuilder;

impl LambdaBuilder for PythonLambdaBuilder {
    fn runtime_group(&self) -> RuntimeGroup {
        RuntimeGroup::Python
    }

    fn manifest_file(&self) -> &'static str {
        "requirements.txt"
    }

    /// `pkg.module.handler` names `pkg/module.py`
    fn handler_file(&self, code_dir: &Path, handler: &str) -> Option<PathBuf> {
        let (module_path, _function) = handler.rsplit_once('.')?;
        let mut file = module_path
            .split(['.', '/'])
            .fold(code_dir.to_path_buf(), |path, segment| path.join(segment));
        file.set_extension("py");
        file.is_file().then_some(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_handler_file() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("pkg")).unwrap();
        fs::write(temp.path().join("pkg/module.py"), "").unwrap();
        fs::write(temp.path().join("app.py"), "").unwrap();

        let builder = PythonLambdaBuilder;
        assert_eq!(
            builder.handler_file(temp.path(), "pkg.module.handler"),
            Some(temp.path().join("pkg/module.py"))
        );
        assert_eq!(
            builder.handler_file(temp.path(), "app.lambda_handler"),
            Some(temp.path().join("app.py"))
        );
        assert_eq!(builder.handler_file(temp.path(), "other.handler"), None);
    }
}
