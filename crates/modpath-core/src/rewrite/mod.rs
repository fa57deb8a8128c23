//! Import specifier rewriting for bundle assembly.
//!
//! Turns filesystem-derived module ids into specifiers a module loader can
//! resolve inside the bundle's flat namespace:
//! - Same package as the importer → `./x`, `../x`
//! - Another package → `package/x`
//! - Project-root modules → `./x`, always
//! - Anything outside the roots → unchanged

mod classify;
mod format;
pub mod trace;

pub use classify::{classify, AppTree, Classification};
pub use format::{
    format_specifier, module_name, relative_dir, SpecifierKind, INDEX_SEGMENT, MODULE_EXTENSIONS,
};
pub use trace::{steps, RewriteOutcome, RewriteTrace, RewriteTraceStep};

use crate::config::RootConfig;
use crate::error::Error;
use modpath_util::path::normalize;
use std::path::{Path, PathBuf};

/// Rewrites module ids against a fixed set of roots.
///
/// Immutable after construction; share it freely across threads.
#[derive(Debug, Clone)]
pub struct ImportRewriter {
    /// Validated, normalized roots.
    roots: RootConfig,
}

impl ImportRewriter {
    /// Validate `roots` and build a rewriter.
    pub fn new(roots: RootConfig) -> Result<Self, Error> {
        roots.validate()?;
        Ok(Self {
            roots: roots.normalized(),
        })
    }

    #[must_use]
    pub fn roots(&self) -> &RootConfig {
        &self.roots
    }

    /// Rewrite `id` as imported from `parent`.
    ///
    /// Ids and parents that are not absolute are taken relative to the
    /// `appAndAddons` root. An id that does not classify is returned as given.
    #[must_use]
    pub fn rewrite(&self, id: &str, parent: Option<&str>) -> String {
        self.run(id, parent, None).0
    }

    /// Rewrite and report which branch produced the specifier.
    #[must_use]
    pub fn rewrite_with_kind(&self, id: &str, parent: Option<&str>) -> (String, SpecifierKind) {
        self.run(id, parent, None)
    }

    /// Like [`rewrite`](Self::rewrite), also reporting the branch taken and
    /// every step along the way.
    #[must_use]
    pub fn rewrite_with_trace(&self, id: &str, parent: Option<&str>) -> RewriteOutcome {
        let mut trace = RewriteTrace::new();
        let (specifier, kind) = self.run(id, parent, Some(&mut trace));
        RewriteOutcome {
            specifier,
            kind,
            trace,
        }
    }

    /// Classify an id or path, resolving it the same way `rewrite` does.
    #[must_use]
    pub fn classify(&self, id: &str) -> Classification {
        classify(&self.roots, &self.resolve(id))
    }

    /// Posix path of `path` relative to the `appAndAddons` root.
    #[must_use]
    pub fn relative(&self, path: &Path) -> String {
        modpath_util::path::relative(&self.roots.app_and_addons, path)
    }

    fn resolve(&self, id: &str) -> PathBuf {
        let path = Path::new(id);
        if path.is_absolute() {
            normalize(path)
        } else {
            normalize(&self.roots.app_and_addons.join(path))
        }
    }

    fn run(
        &self,
        id: &str,
        parent: Option<&str>,
        mut trace: Option<&mut RewriteTrace>,
    ) -> (String, SpecifierKind) {
        let id_path = self.resolve(id);
        if let Some(t) = &mut trace {
            let detail = if Path::new(id).is_absolute() {
                "absolute id"
            } else {
                "resolved against appAndAddons"
            };
            t.add_step(RewriteTraceStep::new(steps::RESOLVE_ID, true, detail).with_path(&id_path));
        }

        let id_class = classify(&self.roots, &id_path);
        if let Some(t) = &mut trace {
            t.add_step(classification_step(steps::CLASSIFY_ID, &id_class, &id_path));
        }

        // Parents only matter for package-bearing ids.
        let parent_class = match (&id_class, parent) {
            (Classification::AppOrAddon { .. } | Classification::External { .. }, Some(p)) => {
                let parent_path = self.resolve(p);
                let class = classify(&self.roots, &parent_path);
                if let Some(t) = &mut trace {
                    t.add_step(classification_step(
                        steps::CLASSIFY_PARENT,
                        &class,
                        &parent_path,
                    ));
                }
                Some(class)
            }
            _ => None,
        };

        let (specifier, kind) = format_specifier(id, &id_class, parent_class.as_ref());

        match kind {
            SpecifierKind::Passthrough => tracing::debug!(id, "id outside roots, passing through"),
            _ => tracing::trace!(id, ?parent, specifier = %specifier, kind = kind.as_str(), "rewrote import"),
        }

        if let Some(t) = &mut trace {
            t.add_step(decision_step(kind, &specifier, &id_class));
        }

        (specifier, kind)
    }
}

fn classification_step(code: &'static str, class: &Classification, path: &Path) -> RewriteTraceStep {
    match class {
        Classification::Unclassified => {
            RewriteTraceStep::new(code, false, "not under any root layout").with_path(path)
        }
        Classification::AppOrAddon { tree, package, .. } => {
            RewriteTraceStep::new(code, true, format!("appAndAddons/{}", tree.dir_name()))
                .with_path(path)
                .with_package(package.as_str())
        }
        Classification::External { root, package, .. } => {
            RewriteTraceStep::new(code, true, root.as_str())
                .with_path(path)
                .with_package(package.as_str())
        }
        Classification::ProjectRootFile { .. } => {
            RewriteTraceStep::new(code, true, "projectRoot (no package)").with_path(path)
        }
    }
}

fn decision_step(kind: SpecifierKind, specifier: &str, id: &Classification) -> RewriteTraceStep {
    let module = id.rel_path().map(module_name).unwrap_or_default();
    match kind {
        SpecifierKind::Passthrough => {
            RewriteTraceStep::new(steps::PASSTHROUGH, true, format!("kept `{specifier}`"))
        }
        SpecifierKind::ProjectRoot => RewriteTraceStep::new(
            steps::PROJECT_ROOT,
            true,
            format!("module `{module}` is a sibling of every importer: `{specifier}`"),
        ),
        SpecifierKind::Relative => RewriteTraceStep::new(
            steps::SAME_PACKAGE,
            true,
            format!("importer shares the package: `{specifier}`"),
        ),
        SpecifierKind::Bare => RewriteTraceStep::new(
            steps::BARE,
            true,
            format!("module `{module}` in another package: `{specifier}`"),
        ),
    }
}
