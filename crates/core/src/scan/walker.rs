use std::collections::HashSet;
use std::io;
use std::path::Path;

use ignore::WalkBuilder;
use tracing::debug;

use crate::error::{Error, Result};

use super::make_rel_path;

/// Lists the files under `root` as sorted `/`-separated relative paths.
///
/// Symlinks are never followed and directories named in `ignore_dirs` are pruned.
pub(crate) fn list_project_files(
    root: &Path,
    ignore_dirs: &HashSet<String>,
    respect_gitignore: bool,
) -> Result<Vec<String>> {
    let ignore_dirs = ignore_dirs.clone();
    let is_git_repo = root.join(".git").exists();

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(false)
        .follow_links(false)
        .ignore(false)
        .git_ignore(respect_gitignore)
        .git_global(respect_gitignore && is_git_repo)
        .git_exclude(respect_gitignore && is_git_repo)
        .parents(false)
        .require_git(false);

    let walker = builder
        .filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            if entry.path_is_symlink() {
                return false;
            }
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            if !is_dir {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !ignore_dirs_contains(&ignore_dirs, name))
        })
        .build();

    let mut files = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                if let Some(io_err) = err.io_error()
                    && io_err.kind() == io::ErrorKind::NotFound
                {
                    debug!(root = %root.display(), "entry vanished during walk: {err}");
                    continue;
                }
                let kind = err
                    .io_error()
                    .map_or(io::ErrorKind::Other, io::Error::kind);
                return Err(Error::io(
                    root.display().to_string(),
                    io::Error::new(kind, err.to_string()),
                ));
            }
        };

        if entry.depth() == 0 {
            continue;
        }
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        files.push(make_rel_path(root, entry.path()));
    }

    files.sort();
    Ok(files)
}

fn ignore_dirs_contains(ignore_dirs: &HashSet<String>, name: &str) -> bool {
    if ignore_dirs.contains(name) {
        return true;
    }
    #[cfg(windows)]
    {
        ignore_dirs.iter().any(|d| d.eq_ignore_ascii_case(name))
    }
    #[cfg(not(windows))]
    {
        false
    }
}
