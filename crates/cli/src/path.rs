use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Absolute, lexically normalized form of `p`; canonical when the path exists.
pub(crate) fn resolve_path(p: &Path) -> io::Result<PathBuf> {
    let base = if p.is_absolute() {
        PathBuf::new()
    } else {
        env::current_dir()?
    };
    let normalized = normalize_path(&base.join(p));
    Ok(fs::canonicalize(&normalized).unwrap_or(normalized))
}

/// Projects are identified by their resolved root, so the same directory given twice
/// (even spelled differently) is recognized as one project.
pub(crate) fn project_id(root: &Path) -> String {
    root.to_string_lossy().replace('\\', "/")
}

/// Extension of `path` without the leading dot, or `""`.
pub(crate) fn extension_of(path: &Path) -> &str {
    path.extension().and_then(|ext| ext.to_str()).unwrap_or("")
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<OsString> = Vec::new();
    let mut min_len = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                parts.clear();
                parts.push(prefix.as_os_str().to_owned());
                min_len = parts.len();
            }
            Component::RootDir => {
                parts.push(component.as_os_str().to_owned());
                min_len = parts.len();
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.len() > min_len {
                    parts.pop();
                } else if min_len == 0 {
                    parts.push(component.as_os_str().to_owned());
                }
            }
            Component::Normal(part) => parts.push(part.to_owned()),
        }
    }

    parts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_components_never_climb_above_root() {
        assert_eq!(
            normalize_path(Path::new("/srv/./subs/../alice/..")),
            PathBuf::from("/srv")
        );
        assert_eq!(normalize_path(Path::new("/../x")), PathBuf::from("/x"));
    }

    #[test]
    fn extensions_come_without_dot() {
        assert_eq!(extension_of(Path::new("dir/main.py")), "py");
        assert_eq!(extension_of(Path::new("Makefile")), "");
    }
}
