//! Root classification: which root tree a path lives under, and which
//! package inside it.

use crate::config::{RootConfig, RootKind};
use serde::Serialize;
use std::path::{Component, Path};

/// Output tree inside the `appAndAddons` root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppTree {
    App,
    Addon,
}

impl AppTree {
    /// Directory name of this tree directly under the root.
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::App => "app-tree-output",
            Self::Addon => "addon-tree-output",
        }
    }

    fn from_dir_name(name: &str) -> Option<Self> {
        match name {
            "app-tree-output" => Some(Self::App),
            "addon-tree-output" => Some(Self::Addon),
            _ => None,
        }
    }
}

/// Where an absolute path sits relative to the configured roots.
///
/// `rel_path` is posix-style, relative to the package directory (or to the
/// project root), with its extension intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// Outside every root, or inside a root but not in a recognised layout.
    Unclassified,
    AppOrAddon {
        tree: AppTree,
        package: String,
        rel_path: String,
    },
    /// Vendored package; `root` is `AmdModules` or `NodeModulesSrc`.
    External {
        root: RootKind,
        package: String,
        rel_path: String,
    },
    /// Build-injected module with no package.
    ProjectRootFile { rel_path: String },
}

impl Classification {
    #[must_use]
    pub fn root_kind(&self) -> Option<RootKind> {
        match self {
            Self::Unclassified => None,
            Self::AppOrAddon { .. } => Some(RootKind::AppAndAddons),
            Self::External { root, .. } => Some(*root),
            Self::ProjectRootFile { .. } => Some(RootKind::ProjectRoot),
        }
    }

    /// Package name, for package-bearing classifications only.
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        match self {
            Self::AppOrAddon { package, .. } | Self::External { package, .. } => Some(package),
            Self::Unclassified | Self::ProjectRootFile { .. } => None,
        }
    }

    #[must_use]
    pub fn rel_path(&self) -> Option<&str> {
        match self {
            Self::Unclassified => None,
            Self::AppOrAddon { rel_path, .. }
            | Self::External { rel_path, .. }
            | Self::ProjectRootFile { rel_path } => Some(rel_path),
        }
    }

    /// Same root kind and same package name. App and addon trees share a
    /// root kind, so `app-tree-output/x` and `addon-tree-output/x` match.
    #[must_use]
    pub fn same_package(&self, other: &Classification) -> bool {
        match (self.package(), other.package()) {
            (Some(a), Some(b)) => a == b && self.root_kind() == other.root_kind(),
            _ => false,
        }
    }
}

/// Classify an absolute, normalized path against `roots`.
///
/// Roots are tried in classification order and the first prefix match
/// decides; a path that matches a root but not its layout is unclassified.
#[must_use]
pub fn classify(roots: &RootConfig, path: &Path) -> Classification {
    for (kind, root) in roots.roots() {
        let Ok(rest) = path.strip_prefix(root) else {
            continue;
        };

        let Some(segments) = utf8_segments(rest) else {
            tracing::debug!(path = %path.display(), "non-normal or non-UTF-8 path segment");
            return Classification::Unclassified;
        };

        return classify_within(kind, &segments);
    }

    tracing::trace!(path = %path.display(), "path is outside all roots");
    Classification::Unclassified
}

fn classify_within(kind: RootKind, segments: &[&str]) -> Classification {
    match kind {
        RootKind::AppAndAddons => match segments {
            [tree, package, rest @ ..] => match AppTree::from_dir_name(tree) {
                Some(tree) => Classification::AppOrAddon {
                    tree,
                    package: (*package).to_string(),
                    rel_path: rest.join("/"),
                },
                None => Classification::Unclassified,
            },
            _ => Classification::Unclassified,
        },
        RootKind::AmdModules | RootKind::NodeModulesSrc => match segments {
            [package, rest @ ..] => Classification::External {
                root: kind,
                package: (*package).to_string(),
                rel_path: rest.join("/"),
            },
            [] => Classification::Unclassified,
        },
        RootKind::ProjectRoot => Classification::ProjectRootFile {
            rel_path: segments.join("/"),
        },
    }
}

fn utf8_segments(path: &Path) -> Option<Vec<&str>> {
    path.components()
        .map(|c| match c {
            Component::Normal(name) => name.to_str(),
            _ => None,
        })
        .collect()
}
