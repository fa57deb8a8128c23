pub mod batch;
pub mod explain;
mod output;
pub mod rewrite;
pub mod roots;
pub mod version;

use miette::{IntoDiagnostic, Result};
use modpath_core::{Error, ImportRewriter, RootConfig};
use std::path::{Path, PathBuf};

/// Where the four roots come from: a JSON file or one flag per root.
#[derive(clap::Args, Debug, Default)]
pub struct RootArgs {
    /// JSON file with `appAndAddons`, `amdModules`, `nodeModulesSrc` and `projectRoot`
    #[arg(long = "roots", global = true, value_name = "FILE", env = "MODPATH_ROOTS")]
    pub roots_file: Option<PathBuf>,

    /// Directory holding `app-tree-output/` and `addon-tree-output/`
    #[arg(long, global = true, value_name = "DIR")]
    pub app_and_addons: Option<PathBuf>,

    /// Directory of vendored AMD packages
    #[arg(long, global = true, value_name = "DIR")]
    pub amd_modules: Option<PathBuf>,

    /// Directory of vendored source packages
    #[arg(long, global = true, value_name = "DIR")]
    pub node_modules_src: Option<PathBuf>,

    /// Directory of build-injected modules
    #[arg(long, global = true, value_name = "DIR")]
    pub project_root: Option<PathBuf>,
}

impl RootArgs {
    /// Build the root config, resolving relative paths against `cwd`.
    pub fn to_config(&self, cwd: &Path) -> Result<RootConfig, Error> {
        if let Some(file) = &self.roots_file {
            return RootConfig::from_file(&cwd.join(file));
        }

        let (Some(a), Some(amd), Some(nm), Some(p)) = (
            &self.app_and_addons,
            &self.amd_modules,
            &self.node_modules_src,
            &self.project_root,
        ) else {
            return Err(Error::other(
                "roots not configured: pass --roots <FILE> or all of --app-and-addons, \
                 --amd-modules, --node-modules-src and --project-root",
            ));
        };

        Ok(RootConfig::new(a, amd, nm, p).relative_to(cwd))
    }
}

pub use output::fail_json;

/// Load roots and build the rewriter.
///
/// In JSON mode a configuration error is printed as `{ ok: false, error }`
/// and the process exits with status 1.
pub fn load_rewriter(cwd: &Path, args: &RootArgs, json: bool) -> Result<ImportRewriter> {
    match args.to_config(cwd).and_then(ImportRewriter::new) {
        Ok(rewriter) => {
            tracing::debug!(fingerprint = %rewriter.roots().fingerprint(), "roots loaded");
            Ok(rewriter)
        }
        Err(e) if json => fail_json(e.code(), e.to_string()),
        Err(e) => Err(e).into_diagnostic(),
    }
}
