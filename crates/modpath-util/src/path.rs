//! Lexical path helpers.
//!
//! Nothing here touches the filesystem: symlinks, case-folding and drive
//! letters are left to the caller.

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` components lexically.
///
/// A `..` directly under the root is dropped; a leading `..` in a relative
/// path is kept.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(name) => out.push(name),
        }
    }

    out
}

/// Posix-style relative path from `root` to `path`.
///
/// Both sides are normalized first. Equal paths yield an empty string and a
/// `path` outside of `root` is reached through `..` segments.
#[must_use]
pub fn relative(root: &Path, path: &Path) -> String {
    let root = normalize(root);
    let path = normalize(path);

    let from = segments(&root);
    let to = segments(&path);
    let from: Vec<&str> = from.iter().map(String::as_str).collect();
    let to: Vec<&str> = to.iter().map(String::as_str).collect();

    relative_segments(&from, &to).join("/")
}

/// Minimal segment walk from directory `from` to `to`: one `..` per segment
/// of `from` past the shared prefix, then the rest of `to`.
#[must_use]
pub fn relative_segments<'a>(from: &[&'a str], to: &[&'a str]) -> Vec<&'a str> {
    let shared = from.iter().zip(to).take_while(|(a, b)| a == b).count();

    let mut parts = vec![".."; from.len() - shared];
    parts.extend_from_slice(&to[shared..]);
    parts
}

/// Render a path with `/` separators, keeping a leading `/` for rooted paths.
#[must_use]
pub fn to_posix(path: &Path) -> String {
    let joined = segments(path).join("/");
    if path.has_root() {
        format!("/{joined}")
    } else {
        joined
    }
}

fn segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect()
}
