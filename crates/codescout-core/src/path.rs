//! Path sandboxing
//!
//! Every path a tool call names is resolved through [`safe_join`] so the
//! agent can never reach outside the project root, whether by absolute
//! path or by `..` traversal. Resolution is lexical: write targets that do
//! not exist yet still resolve, and symlinks are not followed.

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` components and resolve `..`
/// against preceding components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    // Walking above the filesystem root; keep the component
                    // so the containment check below fails loudly.
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Join `relative` onto `root` and reject any result outside `root`.
///
/// `root` should already be absolute (settings canonicalize it at startup).
/// An absolute `relative` is accepted only if it stays inside the root.
pub fn safe_join(root: &Path, relative: impl AsRef<Path>) -> Result<PathBuf> {
    let relative = relative.as_ref();
    let root = normalize(root);
    let candidate = if relative.is_absolute() {
        relative.to_path_buf()
    } else {
        root.join(relative)
    };
    let resolved = normalize(&candidate);
    if resolved.starts_with(&root) {
        Ok(resolved)
    } else {
        Err(Error::path_escape(resolved, root))
    }
}
