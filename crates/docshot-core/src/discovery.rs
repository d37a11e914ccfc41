//! Screenshot discovery

use std::path::{Component, Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{DocshotError, Result};
use crate::types::SCREENSHOT_EXTENSION;

/// Recursively find every image file under `root`.
///
/// Matches on the extension, case-insensitively. Paths are returned in the
/// order the filesystem enumerates them; no sorting is applied. Symlinks are
/// followed the same way a `stat` would.
pub fn find_images(root: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        if is_image(entry.path()) {
            images.push(entry.into_path());
        }
    }

    debug!(root = %root.display(), count = images.len(), "discovered images");
    Ok(images)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(SCREENSHOT_EXTENSION))
}

/// Path of `file` relative to `root`, joined with `/` on every platform.
pub fn relative_key_path(root: &Path, file: &Path) -> Result<String> {
    let relative = file
        .strip_prefix(root)
        .map_err(|_| DocshotError::OutsideRoot {
            path: file.to_path_buf(),
            root: root.to_path_buf(),
        })?;

    let segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    Ok(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, b"\x89PNG").unwrap();
    }

    #[test]
    fn test_find_images_filters_by_extension() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a.png"));
        touch(&temp.path().join("b.PNG"));
        touch(&temp.path().join("notes.md"));
        touch(&temp.path().join("photo.jpg"));
        touch(&temp.path().join("png"));

        let mut found = find_images(temp.path()).unwrap();
        found.sort();

        assert_eq!(
            found,
            vec![temp.path().join("a.png"), temp.path().join("b.PNG")]
        );
    }

    #[test]
    fn test_find_images_descends_without_depth_limit() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("top.png"));
        touch(&temp.path().join("one/two/three/deep.png"));
        touch(&temp.path().join("one/skip.txt"));

        let found = find_images(temp.path()).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.contains(&temp.path().join("one/two/three/deep.png")));
    }

    #[test]
    fn test_find_images_ignores_directories_named_like_images() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("folder.png")).unwrap();
        touch(&temp.path().join("folder.png/inner.png"));

        let found = find_images(temp.path()).unwrap();
        assert_eq!(found, vec![temp.path().join("folder.png/inner.png")]);
    }

    #[test]
    fn test_find_images_empty_directory() {
        let temp = TempDir::new().unwrap();
        assert!(find_images(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_find_images_missing_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(find_images(&temp.path().join("absent")).is_err());
    }

    #[test]
    fn test_relative_key_path() {
        let root = Path::new("screenshots");
        let file = root.join("nested").join("widget.png");
        assert_eq!(relative_key_path(root, &file).unwrap(), "nested/widget.png");
        assert_eq!(
            relative_key_path(root, &root.join("widget.png")).unwrap(),
            "widget.png"
        );
    }

    #[test]
    fn test_relative_key_path_outside_root() {
        let err =
            relative_key_path(Path::new("screenshots"), Path::new("other/a.png")).unwrap_err();
        assert!(matches!(err, DocshotError::OutsideRoot { .. }));
    }
}
