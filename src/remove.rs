//! Depth-bounded recursive deletion.
//!
//! Failures are collected per item instead of stopping at the first one, so a
//! partially removable tree is emptied as far as possible.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Maximum directory nesting descended when no override is configured.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// One path that could not be removed.
#[derive(Debug)]
pub struct RemoveFailure {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct RemoveReport {
    /// Files, links and directories actually removed.
    pub removed: usize,
    pub failures: Vec<RemoveFailure>,
}

impl RemoveReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, path: &Path, err: impl ToString) {
        self.failures.push(RemoveFailure {
            path: path.to_path_buf(),
            reason: err.to_string(),
        });
    }
}

/// Remove `path` and everything below it. Symlinks are unlinked, never followed.
///
/// Directories more than `max_depth` levels below `path` are not descended
/// into; each such subtree is reported as a failure.
pub fn remove_recursive(path: &Path, max_depth: usize) -> RemoveReport {
    let mut report = RemoveReport::default();
    remove_path(path, 0, max_depth, &mut report);
    report
}

fn remove_path(path: &Path, depth: usize, max_depth: usize, report: &mut RemoveReport) {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) => {
            report.fail(path, err);
            return;
        }
    };

    if !metadata.is_dir() {
        match fs::remove_file(path) {
            Ok(()) => report.removed += 1,
            Err(err) => report.fail(path, err),
        }
        return;
    }

    if depth >= max_depth {
        // An empty directory at the limit can still go.
        match fs::remove_dir(path) {
            Ok(()) => report.removed += 1,
            Err(err) if err.kind() == io::ErrorKind::DirectoryNotEmpty => report.fail(
                path,
                format!("directory nesting exceeds {max_depth} levels"),
            ),
            Err(err) => report.fail(path, err),
        }
        return;
    }

    match fs::read_dir(path) {
        Ok(children) => {
            for child in children {
                match child {
                    Ok(child) => remove_path(&child.path(), depth + 1, max_depth, report),
                    Err(err) => report.fail(path, err),
                }
            }
        }
        Err(err) => {
            report.fail(path, err);
            return;
        }
    }

    match fs::remove_dir(path) {
        Ok(()) => report.removed += 1,
        Err(err) => report.fail(path, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, b"x").expect("write file");
    }

    #[test]
    fn removes_single_file() {
        let tmp = TempDir::new().expect("tempdir");
        let file = tmp.path().join("a.txt");
        touch(&file);

        let report = remove_recursive(&file, DEFAULT_MAX_DEPTH);
        assert!(report.is_clean(), "{:?}", report.failures);
        assert_eq!(report.removed, 1);
        assert!(!file.exists());
    }

    #[test]
    fn removes_nested_tree() {
        let tmp = TempDir::new().expect("tempdir");
        let root = tmp.path().join("tree");
        fs::create_dir_all(root.join("a/b/c")).expect("mkdirs");
        touch(&root.join("top.txt"));
        touch(&root.join("a/b/mid.txt"));
        touch(&root.join("a/b/c/leaf.txt"));

        let report = remove_recursive(&root, DEFAULT_MAX_DEPTH);
        assert!(report.is_clean(), "{:?}", report.failures);
        assert_eq!(report.removed, 7);
        assert!(!root.exists());
    }

    #[test]
    fn missing_path_is_reported() {
        let tmp = TempDir::new().expect("tempdir");
        let report = remove_recursive(&tmp.path().join("nope"), DEFAULT_MAX_DEPTH);
        assert_eq!(report.removed, 0);
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn depth_limit_keeps_deep_subtree() {
        let tmp = TempDir::new().expect("tempdir");
        let root = tmp.path().join("tree");
        fs::create_dir_all(root.join("a/b")).expect("mkdirs");
        touch(&root.join("a/b/deep.txt"));
        touch(&root.join("shallow.txt"));

        let report = remove_recursive(&root, 1);
        assert!(!report.is_clean());
        assert!(report
            .failures
            .iter()
            .any(|failure| failure.path == root.join("a")));
        assert!(!root.join("shallow.txt").exists());
        assert!(root.join("a/b/deep.txt").exists());
    }

    #[test]
    fn empty_directory_at_limit_is_removed() {
        let tmp = TempDir::new().expect("tempdir");
        let root = tmp.path().join("tree");
        fs::create_dir_all(root.join("empty")).expect("mkdirs");

        let report = remove_recursive(&root, 1);
        assert!(report.is_clean(), "{:?}", report.failures);
        assert!(!root.exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_unlinked_not_followed() {
        let tmp = TempDir::new().expect("tempdir");
        let target = tmp.path().join("keep");
        fs::create_dir(&target).expect("mkdir");
        touch(&target.join("precious.txt"));
        let root = tmp.path().join("tree");
        fs::create_dir(&root).expect("mkdir");
        std::os::unix::fs::symlink(&target, root.join("link")).expect("symlink");

        let report = remove_recursive(&root, DEFAULT_MAX_DEPTH);
        assert!(report.is_clean(), "{:?}", report.failures);
        assert!(!root.exists());
        assert!(target.join("precious.txt").exists());
    }
}
