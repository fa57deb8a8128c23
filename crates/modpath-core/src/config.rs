use crate::error::Error;
use modpath_util::hash::blake3_fields;
use modpath_util::path::{normalize, to_posix};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Runtime configuration for the modpath CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Current working directory.
    pub cwd: PathBuf,

    /// Whether to emit JSON logs.
    pub json_logs: bool,

    /// Verbosity level (0 = INFO, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            json_logs: false,
            verbosity: 0,
        }
    }
}

impl Config {
    /// Create a new config with the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            ..Default::default()
        }
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON log output.
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }
}

/// The four root trees a bundle is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RootKind {
    /// `app-tree-output/<pkg>/…` and `addon-tree-output/<pkg>/…`.
    AppAndAddons,
    /// Vendored pre-built AMD packages.
    AmdModules,
    /// Vendored source packages.
    NodeModulesSrc,
    /// Build-injected modules with no package.
    ProjectRoot,
}

impl RootKind {
    /// All kinds, in classification order.
    pub const ALL: [RootKind; 4] = [
        Self::AppAndAddons,
        Self::AmdModules,
        Self::NodeModulesSrc,
        Self::ProjectRoot,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AppAndAddons => "appAndAddons",
            Self::AmdModules => "amdModules",
            Self::NodeModulesSrc => "nodeModulesSrc",
            Self::ProjectRoot => "projectRoot",
        }
    }
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Absolute root directories supplied by the build pipeline.
///
/// Construction does not validate; [`RootConfig::validate`] runs once when
/// an [`ImportRewriter`](crate::ImportRewriter) is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootConfig {
    pub app_and_addons: PathBuf,
    pub amd_modules: PathBuf,
    pub node_modules_src: PathBuf,
    pub project_root: PathBuf,
}

impl RootConfig {
    #[must_use]
    pub fn new(
        app_and_addons: impl Into<PathBuf>,
        amd_modules: impl Into<PathBuf>,
        node_modules_src: impl Into<PathBuf>,
        project_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            app_and_addons: app_and_addons.into(),
            amd_modules: amd_modules.into(),
            node_modules_src: node_modules_src.into(),
            project_root: project_root.into(),
        }
    }

    /// Load roots from a JSON file with camelCase keys.
    ///
    /// Relative entries are taken relative to the file's directory; a
    /// relative `path` is itself resolved against the current directory.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let content =
            modpath_util::fs::read_to_string_lossy(path).map_err(|source| Error::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;

        let config: Self = serde_json::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        let base = if path.is_absolute() {
            config_dir(path, Path::new("/"))
        } else {
            config_dir(path, &std::env::current_dir()?)
        };
        Ok(config.relative_to(&base))
    }

    /// Join every relative root onto `base`. Absolute roots are kept.
    #[must_use]
    pub fn relative_to(self, base: &Path) -> Self {
        let join = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        Self {
            app_and_addons: join(self.app_and_addons),
            amd_modules: join(self.amd_modules),
            node_modules_src: join(self.node_modules_src),
            project_root: join(self.project_root),
        }
    }

    /// Roots in classification order.
    pub fn roots(&self) -> impl Iterator<Item = (RootKind, &Path)> {
        RootKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    #[must_use]
    pub fn get(&self, kind: RootKind) -> &Path {
        match kind {
            RootKind::AppAndAddons => &self.app_and_addons,
            RootKind::AmdModules => &self.amd_modules,
            RootKind::NodeModulesSrc => &self.node_modules_src,
            RootKind::ProjectRoot => &self.project_root,
        }
    }

    /// Check that every root is absolute and that no root contains another.
    pub fn validate(&self) -> Result<(), Error> {
        for (kind, path) in self.roots() {
            if !path.is_absolute() {
                return Err(Error::RootNotAbsolute {
                    kind,
                    path: path.to_path_buf(),
                });
            }
        }

        let normalized: Vec<(RootKind, PathBuf)> =
            self.roots().map(|(kind, p)| (kind, normalize(p))).collect();

        for (i, (first, a)) in normalized.iter().enumerate() {
            for (second, b) in &normalized[i + 1..] {
                if a.starts_with(b) || b.starts_with(a) {
                    return Err(Error::RootsOverlap {
                        first: *first,
                        first_path: a.clone(),
                        second: *second,
                        second_path: b.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Copy with every root lexically normalized.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            app_and_addons: normalize(&self.app_and_addons),
            amd_modules: normalize(&self.amd_modules),
            node_modules_src: normalize(&self.node_modules_src),
            project_root: normalize(&self.project_root),
        }
    }

    /// BLAKE3 digest of the normalized roots.
    ///
    /// Rewrite output depends only on the roots and the two inputs, so this is
    /// a sufficient cache key for a pipeline memoizing rewrites.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let normalized = self.normalized();
        let fields: Vec<String> = normalized
            .roots()
            .flat_map(|(kind, p)| [kind.as_str().to_string(), to_posix(p)])
            .collect();
        blake3_fields(&fields)
    }
}

/// Absolute directory of a config file, given the directory it is relative to.
fn config_dir(path: &Path, cwd: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => cwd.join(p),
        _ => cwd.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn fixture() -> RootConfig {
        RootConfig::new(
            "/path/to/appAndAddons",
            "/path/to/amdModules",
            "/path/to/nodeModulesSrc",
            "/path/to/projectRoot",
        )
    }

    #[test]
    fn test_roots_in_classification_order() {
        let config = fixture();
        let kinds: Vec<RootKind> = config.roots().map(|(k, _)| k).collect();
        assert_eq!(kinds, RootKind::ALL.to_vec());
    }

    #[test]
    fn test_validate_accepts_disjoint_roots() {
        assert!(fixture().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_relative_root() {
        let mut config = fixture();
        config.amd_modules = PathBuf::from("amdModules");

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::RootNotAbsolute {
                kind: RootKind::AmdModules,
                ..
            }
        ));
        assert_eq!(err.code(), "ROOT_NOT_ABSOLUTE");
    }

    #[test]
    fn test_validate_rejects_nested_roots() {
        let mut config = fixture();
        config.project_root = PathBuf::from("/path/to/appAndAddons/config");

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::RootsOverlap {
                first: RootKind::AppAndAddons,
                second: RootKind::ProjectRoot,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_roots_after_normalizing() {
        let mut config = fixture();
        config.node_modules_src = PathBuf::from("/path/to/x/../amdModules/");

        assert!(matches!(
            config.validate(),
            Err(Error::RootsOverlap { .. })
        ));
    }

    #[test]
    fn test_validate_sibling_prefix_is_not_overlap() {
        let mut config = fixture();
        config.project_root = PathBuf::from("/path/to/appAndAddonsExtra");

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_resolves_relative_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roots.json");
        fs::write(
            &path,
            r#"{
                "appAndAddons": "tmp/appAndAddons",
                "amdModules": "/abs/amdModules",
                "nodeModulesSrc": "tmp/nodeModulesSrc",
                "projectRoot": "."
            }"#,
        )
        .unwrap();

        let config = RootConfig::from_file(&path).unwrap();
        assert_eq!(
            config.app_and_addons,
            dir.path().join("tmp/appAndAddons")
        );
        assert_eq!(config.amd_modules, PathBuf::from("/abs/amdModules"));
        assert_eq!(config.project_root, dir.path().join("."));
    }

    #[test]
    fn test_config_dir_bare_file_name_is_cwd() {
        assert_eq!(
            config_dir(Path::new("roots.json"), Path::new("/work")),
            PathBuf::from("/work")
        );
    }

    #[test]
    fn test_config_dir_relative_and_absolute() {
        assert_eq!(
            config_dir(Path::new("build/roots.json"), Path::new("/work")),
            PathBuf::from("/work/build")
        );
        assert_eq!(
            config_dir(Path::new("/etc/modpath/roots.json"), Path::new("/work")),
            PathBuf::from("/etc/modpath")
        );
    }

    #[test]
    fn test_from_file_missing() {
        let err = RootConfig::from_file(Path::new("/nonexistent/roots.json")).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }

    #[test]
    fn test_from_file_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roots.json");
        fs::write(&path, r#"{"appAndAddons": 1}"#).unwrap();

        let err = RootConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert_eq!(err.code(), "CONFIG_PARSE_FAILED");
    }

    #[test]
    fn test_fingerprint_ignores_trailing_slashes() {
        let mut other = fixture();
        other.project_root = PathBuf::from("/path/to/projectRoot/");
        assert_eq!(fixture().fingerprint(), other.fingerprint());
    }

    #[test]
    fn test_fingerprint_changes_with_roots() {
        let mut other = fixture();
        other.project_root = PathBuf::from("/path/to/elsewhere");
        assert_ne!(fixture().fingerprint(), other.fingerprint());
    }

    #[test]
    fn test_root_kind_serde_uses_config_keys() {
        let json = serde_json::to_string(&RootKind::NodeModulesSrc).unwrap();
        assert_eq!(json, "\"nodeModulesSrc\"");
    }
}
