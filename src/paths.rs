//! File-path helpers.

use std::io;
use std::path::{Path, PathBuf};
use std::{env, fs};

use crate::ext::StrExt;

/// Joins `file_name` onto the current working directory.
pub fn combine_app_path(file_name: impl AsRef<Path>) -> io::Result<PathBuf> {
    Ok(env::current_dir()?.join(file_name))
}

/// Joins a subfolder and file name onto the current working directory,
/// optionally creating the folder.
pub fn combine_subfolder(
    subfolder: impl AsRef<Path>,
    file_name: impl AsRef<Path>,
    create: bool,
) -> io::Result<PathBuf> {
    let folder = env::current_dir()?.join(subfolder);
    if create && !folder.exists() {
        fs::create_dir_all(&folder)?;
    }
    Ok(folder.join(file_name))
}

/// Shortens a path to its file name; falls back to the full path when there
/// is none (e.g. `..`).
pub fn short_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Checks whether a path is usable as a folder: with `must_exist`, whether
/// it is an existing directory; otherwise, whether it is absolute.
pub fn is_valid_folder_path(path: &Path, must_exist: bool) -> bool {
    if must_exist {
        path.is_dir()
    } else {
        path.is_absolute()
    }
}

/// Returns `path` if nothing exists there, otherwise the first free sibling
/// with a bumped trailing counter in the file stem (`out.sbx`, `out-2.sbx`,
/// `out-3.sbx`, ...).
pub fn next_available_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path.extension().map(|e| e.to_string_lossy().into_owned());

    let (base, start) = match stem.trailing_number() {
        Some((n, idx)) => (stem[..idx].to_string(), n + 1),
        None => (format!("{stem}-"), 2),
    };

    let mut counter = start;
    loop {
        let name = match &ext {
            Some(e) => format!("{base}{counter}.{e}"),
            None => format!("{base}{counter}"),
        };
        let candidate = path.with_file_name(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // both helpers depend on the process-wide cwd, so they share one test
    #[test]
    fn cwd_relative_helpers() {
        let cwd = env::current_dir().unwrap();
        let combined = combine_app_path("data.sbx").unwrap();
        assert_eq!(combined, cwd.join("data.sbx"));

        let dir = tempdir().unwrap();
        env::set_current_dir(dir.path()).unwrap();
        let path = combine_subfolder("nested", "data.sbx", true).unwrap();
        assert!(path.parent().unwrap().is_dir());
        assert!(path.ends_with("nested/data.sbx"));
        env::set_current_dir(cwd).unwrap();
    }

    #[test]
    fn short_file_name_strips_directories() {
        assert_eq!(short_file_name(Path::new("/a/b/c.txt")), "c.txt");
        assert_eq!(short_file_name(Path::new("..")), "..");
    }

    #[test]
    fn folder_path_validity() {
        let dir = tempdir().unwrap();
        assert!(is_valid_folder_path(dir.path(), true));
        assert!(!is_valid_folder_path(&dir.path().join("missing"), true));
        assert!(is_valid_folder_path(Path::new("/tmp/whatever"), false));
        assert!(!is_valid_folder_path(Path::new("relative/dir"), false));
    }

    #[test]
    fn next_available_path_returns_free_path_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.sbx");
        assert_eq!(next_available_path(&path), path);
    }

    #[test]
    fn next_available_path_bumps_counter() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.sbx");
        fs::write(&path, b"x").unwrap();

        let second = next_available_path(&path);
        assert_eq!(second, dir.path().join("out-2.sbx"));

        fs::write(&second, b"x").unwrap();
        assert_eq!(next_available_path(&path), dir.path().join("out-3.sbx"));
        assert_eq!(next_available_path(&second), dir.path().join("out-3.sbx"));
    }

    #[test]
    fn next_available_path_without_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out");
        fs::write(&path, b"x").unwrap();
        assert_eq!(next_available_path(&path), dir.path().join("out-2"));
    }
}
