//! Handler base directory resolution
//!
//! A function's base directory is the nearest directory, walking up from its
//! handler file, that contains the runtime's dependency manifest. The walk
//! never leaves the source tree it started in.

use samstack_core::Module;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Find the nearest ancestor of `handler_file` containing `marker`, bounded by
/// the module content root that holds the handler.
///
/// Returns `None` when no directory up to and including that content root has
/// the marker, or when the handler lies outside every content root.
pub fn resolve_base_directory(
    module: &Module,
    handler_file: &Path,
    marker: &str,
) -> Option<PathBuf> {
    let Some(content_root) = module.content_root_for(handler_file) else {
        debug!(
            module = %module.name(),
            handler = %handler_file.display(),
            "Handler is outside every content root"
        );
        return None;
    };

    find_marker_directory(handler_file, content_root, marker)
}

/// Walk from the directory containing `file` up to `boundary` (inclusive),
/// returning the first directory containing `marker`.
pub fn find_marker_directory(file: &Path, boundary: &Path, marker: &str) -> Option<PathBuf> {
    let mut current = file.parent()?;

    loop {
        if !current.starts_with(boundary) {
            return None;
        }

        debug!(directory = %current.display(), marker, "Probing for manifest");
        if current.join(marker).exists() {
            return Some(current.to_path_buf());
        }

        if current == boundary {
            return None;
        }
        current = current.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn module_at(root: &Path) -> Module {
        Module::new("main", vec![root.to_path_buf()]).unwrap()
    }

    #[test]
    fn test_marker_next_to_handler() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("main");
        let dir = root.join("hello-world");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("package.json"), "{}").unwrap();

        let base = resolve_base_directory(&module_at(&root), &dir.join("app.js"), "package.json");
        assert_eq!(base, Some(dir));
    }

    #[test]
    fn test_nearest_marker_wins() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("main");
        let outer = root.join("hello-world");
        let inner = outer.join("foo-bar");
        fs::create_dir_all(&inner).unwrap();
        fs::write(root.join("package.json"), "{}").unwrap();
        fs::write(outer.join("package.json"), "{}").unwrap();

        let base = resolve_base_directory(&module_at(&root), &inner.join("app.js"), "package.json");
        assert_eq!(base, Some(outer));
    }

    #[test]
    fn test_marker_at_content_root() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("main");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("package.json"), "{}").unwrap();

        let base = resolve_base_directory(&module_at(&root), &root.join("app.js"), "package.json");
        assert_eq!(base, Some(root));
    }

    #[test]
    fn test_marker_above_content_root_is_ignored() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("main");
        let dir = root.join("hello-world");
        fs::create_dir_all(&dir).unwrap();
        fs::write(temp.path().join("package.json"), "{}").unwrap();

        let base = resolve_base_directory(&module_at(&root), &dir.join("app.js"), "package.json");
        assert_eq!(base, None);
    }

    #[test]
    fn test_handler_outside_module() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("main");
        let other = temp.path().join("other");
        fs::create_dir_all(&other).unwrap();
        fs::write(other.join("package.json"), "{}").unwrap();

        let base = resolve_base_directory(&module_at(&root), &other.join("app.js"), "package.json");
        assert_eq!(base, None);
    }
}
