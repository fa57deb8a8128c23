//! Specifier formatting: module names, same-package relative paths and
//! bare package specifiers.

use super::classify::Classification;
use modpath_util::path::relative_segments;
use serde::Serialize;

/// Extensions a loader adds back when resolving a module name.
pub const MODULE_EXTENSIONS: &[&str] = &[".js", ".mjs", ".cjs"];

/// File stem that stands for its containing directory.
pub const INDEX_SEGMENT: &str = "index";

/// Which branch produced a specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecifierKind {
    /// Input did not classify and is returned unchanged.
    Passthrough,
    /// Project-root module, always `./`-relative.
    ProjectRoot,
    /// Same package as the importer.
    Relative,
    /// `<package>[/<module name>]`.
    Bare,
}

impl SpecifierKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passthrough => "passthrough",
            Self::ProjectRoot => "project_root",
            Self::Relative => "relative",
            Self::Bare => "bare",
        }
    }
}

/// Module name for an in-package path: one module extension stripped from
/// the last segment, then that segment dropped if it is `index`.
///
/// `addon.js` -> `addon`, `lib/index.js` -> `lib`, `index.js` -> ``.
#[must_use]
pub fn module_name(rel_path: &str) -> String {
    let (dir, file) = split_dir(rel_path);
    match file_segment(file) {
        "" => dir.to_string(),
        stem if dir.is_empty() => stem.to_string(),
        stem => format!("{dir}/{stem}"),
    }
}

/// Minimal `..`-then-descend path between two in-package directories.
///
/// Returns `""` for equal directories; the caller adds the `./` prefix.
#[must_use]
pub fn relative_dir(from_dir: &str, to_dir: &str) -> String {
    let from: Vec<&str> = from_dir.split('/').filter(|s| !s.is_empty()).collect();
    let to: Vec<&str> = to_dir.split('/').filter(|s| !s.is_empty()).collect();
    relative_segments(&from, &to).join("/")
}

/// Produce the specifier for `id` as imported from `parent`.
///
/// `original` is returned untouched when `id` did not classify.
#[must_use]
pub fn format_specifier(
    original: &str,
    id: &Classification,
    parent: Option<&Classification>,
) -> (String, SpecifierKind) {
    match id {
        Classification::Unclassified => (original.to_string(), SpecifierKind::Passthrough),

        // Project-root modules are injected next to every importer by the
        // build. This is a one-off rule for this root only; new root kinds
        // must not fall into it.
        Classification::ProjectRootFile { rel_path } => (
            format!("./{}", module_name(rel_path)),
            SpecifierKind::ProjectRoot,
        ),

        Classification::AppOrAddon {
            package, rel_path, ..
        }
        | Classification::External {
            package, rel_path, ..
        } => match parent.filter(|p| id.same_package(p)) {
            Some(parent) => (
                same_package_specifier(rel_path, parent.rel_path().unwrap_or_default()),
                SpecifierKind::Relative,
            ),
            None => (bare_specifier(package, rel_path), SpecifierKind::Bare),
        },
    }
}

fn same_package_specifier(id_rel: &str, parent_rel: &str) -> String {
    let (id_dir, file) = split_dir(id_rel);
    let (parent_dir, _) = split_dir(parent_rel);
    let segment = file_segment(file);

    if id_dir == parent_dir {
        // `.` rather than `./` so a loader does not append a trailing slash.
        return if segment.is_empty() {
            ".".to_string()
        } else {
            format!("./{segment}")
        };
    }

    let rel = relative_dir(parent_dir, id_dir);
    let prefix = if rel == ".." || rel.starts_with("../") {
        rel
    } else {
        format!("./{rel}")
    };

    if segment.is_empty() {
        prefix
    } else {
        format!("{prefix}/{segment}")
    }
}

fn bare_specifier(package: &str, rel_path: &str) -> String {
    let name = module_name(rel_path);
    if name.is_empty() {
        package.to_string()
    } else {
        format!("{package}/{name}")
    }
}

fn split_dir(rel_path: &str) -> (&str, &str) {
    rel_path.rsplit_once('/').unwrap_or(("", rel_path))
}

/// Last segment as it appears in a specifier: extension stripped, `index`
/// collapsed to nothing.
fn file_segment(file: &str) -> &str {
    let stem = MODULE_EXTENSIONS
        .iter()
        .find_map(|ext| file.strip_suffix(ext).filter(|s| !s.is_empty()))
        .unwrap_or(file);

    if stem == INDEX_SEGMENT {
        ""
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RootKind;

    fn external(package: &str, rel_path: &str) -> Classification {
        Classification::External {
            root: RootKind::NodeModulesSrc,
            package: package.to_string(),
            rel_path: rel_path.to_string(),
        }
    }

    #[test]
    fn test_module_name_strips_extension() {
        assert_eq!(module_name("addon.js"), "addon");
        assert_eq!(module_name("utils/string.mjs"), "utils/string");
        assert_eq!(module_name("data.json"), "data.json");
    }

    #[test]
    fn test_module_name_drops_index() {
        assert_eq!(module_name("index.js"), "");
        assert_eq!(module_name("lib/index.js"), "lib");
        assert_eq!(module_name("lib/indexes.js"), "lib/indexes");
    }

    #[test]
    fn test_module_name_is_idempotent() {
        for rel in ["addon.js", "lib/index.js", "config/environment.js", "a/b/c.cjs"] {
            let once = module_name(rel);
            assert_eq!(module_name(&once), once, "not idempotent for {rel}");
        }
    }

    #[test]
    fn test_module_name_keeps_dotfile() {
        assert_eq!(module_name(".js"), ".js");
    }

    #[test]
    fn test_relative_dir() {
        assert_eq!(relative_dir("lib", "lib"), "");
        assert_eq!(relative_dir("lib", ""), "..");
        assert_eq!(relative_dir("", "config"), "config");
        assert_eq!(relative_dir("a/b/c", "a/x"), "../../x");
    }

    #[test]
    fn test_format_unclassified_passthrough() {
        let (s, kind) = format_specifier("my-addon/addon", &Classification::Unclassified, None);
        assert_eq!(s, "my-addon/addon");
        assert_eq!(kind, SpecifierKind::Passthrough);
    }

    #[test]
    fn test_format_project_root_ignores_parent() {
        let id = Classification::ProjectRootFile {
            rel_path: "config/environment.js".to_string(),
        };
        let parent = external("lodash", "lib/deep/x.js");

        assert_eq!(
            format_specifier("", &id, Some(&parent)).0,
            "./config/environment"
        );
        assert_eq!(format_specifier("", &id, None).0, "./config/environment");
    }

    #[test]
    fn test_format_bare_without_parent() {
        let id = external("lodash", "multiply.js");
        assert_eq!(
            format_specifier("", &id, None),
            ("lodash/multiply".to_string(), SpecifierKind::Bare)
        );
    }

    #[test]
    fn test_format_bare_index_is_package_name() {
        let id = external("lodash", "index.js");
        assert_eq!(format_specifier("", &id, None).0, "lodash");
    }

    #[test]
    fn test_format_same_dir() {
        let id = external("lodash", "multiply.js");
        let parent = external("lodash", "lodash.js");
        assert_eq!(
            format_specifier("", &id, Some(&parent)),
            ("./multiply".to_string(), SpecifierKind::Relative)
        );
    }

    #[test]
    fn test_format_ascends() {
        let id = external("lodash", "multiply.js");
        let parent = external("lodash", "lib/deep/index.js");
        assert_eq!(format_specifier("", &id, Some(&parent)).0, "../../multiply");
    }

    #[test]
    fn test_format_descends() {
        let id = external("lodash", "lib/math/multiply.js");
        let parent = external("lodash", "lodash.js");
        assert_eq!(format_specifier("", &id, Some(&parent)).0, "./lib/math/multiply");
    }

    #[test]
    fn test_format_sideways() {
        let id = external("lodash", "lib/math/multiply.js");
        let parent = external("lodash", "lib/string/pad.js");
        assert_eq!(format_specifier("", &id, Some(&parent)).0, "../math/multiply");
    }

    #[test]
    fn test_format_same_package_index_target() {
        let id = external("lodash", "lib/index.js");
        let parent = external("lodash", "lodash.js");
        assert_eq!(format_specifier("", &id, Some(&parent)).0, "./lib");

        let parent = external("lodash", "lib/deep/x.js");
        assert_eq!(format_specifier("", &id, Some(&parent)).0, "..");
    }

    #[test]
    fn test_format_same_package_index_target_same_dir() {
        let id = external("lodash", "lib/index.js");
        let parent = external("lodash", "lib/x.js");
        assert_eq!(
            format_specifier("", &id, Some(&parent)),
            (".".to_string(), SpecifierKind::Relative)
        );

        let id = external("lodash", "index.js");
        let parent = external("lodash", "lodash.js");
        assert_eq!(format_specifier("", &id, Some(&parent)).0, ".");
    }

    #[test]
    fn test_format_unclassified_parent_is_cross_package() {
        let id = external("lodash", "multiply.js");
        assert_eq!(
            format_specifier("", &id, Some(&Classification::Unclassified)).0,
            "lodash/multiply"
        );
    }

    #[test]
    fn test_format_other_package_is_bare() {
        let id = external("lodash", "multiply.js");
        let parent = external("underscore", "multiply.js");
        assert_eq!(format_specifier("", &id, Some(&parent)).0, "lodash/multiply");
    }

    #[test]
    fn test_format_dot_prefixed_directory_still_gets_dot_slash() {
        let id = external("pkg", "..hidden/x.js");
        let parent = external("pkg", "y.js");
        assert_eq!(format_specifier("", &id, Some(&parent)).0, "./..hidden/x");
    }

    #[test]
    fn test_specifier_kind_as_str_matches_serde() {
        for kind in [
            SpecifierKind::Passthrough,
            SpecifierKind::ProjectRoot,
            SpecifierKind::Relative,
            SpecifierKind::Bare,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
