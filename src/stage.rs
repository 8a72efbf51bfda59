use std::fs;
use std::io;
use std::path::Path;

use dircpy::CopyBuilder;

use crate::error::Result;

/// Copy a directory tree into `dst`, merging with existing contents.
/// Files already present in `dst` are overwritten when `src` has a
/// counterpart and kept otherwise.
pub fn copy_dir_merge(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)?;
    // dircpy skips existing destination files unless overwrite is on.
    CopyBuilder::new(src, dst).overwrite(true).run()?;
    Ok(())
}

/// Copy files matching repo-root-relative glob patterns into `dest_dir`,
/// keeping their root-relative directory structure. Patterns that match
/// nothing are skipped, as are matched directories.
pub fn copy_repo_relative_to_dir(
    repo_root: &Path,
    patterns: &[&str],
    dest_dir: &Path,
) -> Result<()> {
    // The root is a literal path; only `patterns` may contain glob syntax.
    let escaped_root = glob::Pattern::escape(&repo_root.to_string_lossy());
    let escaped_root = Path::new(&escaped_root);

    for pattern in patterns {
        let full_pattern = escaped_root.join(pattern);
        let matches = glob::glob(&full_pattern.to_string_lossy())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        for path in matches.filter_map(|entry| entry.ok()) {
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(repo_root).unwrap();
            let dst = dest_dir.join(relative);
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&path, &dst)?;
        }
    }

    Ok(())
}
