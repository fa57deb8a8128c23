use miette::{IntoDiagnostic, Result};
use modpath_core::version::SCHEMA_VERSION;
use modpath_core::{ImportRewriter, RootConfig};
use serde::Serialize;

/// Roots result for JSON output.
#[derive(Serialize)]
struct RootsResult<'a> {
    schema_version: u32,
    ok: bool,
    roots: &'a RootConfig,
    fingerprint: String,
}

/// Run the roots command.
pub fn run(rewriter: &ImportRewriter, json: bool) -> Result<()> {
    let roots = rewriter.roots();

    if json {
        let result = RootsResult {
            schema_version: SCHEMA_VERSION,
            ok: true,
            roots,
            fingerprint: roots.fingerprint(),
        };
        println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
        return Ok(());
    }

    for (kind, path) in roots.roots() {
        println!("{:<16}{}", kind.as_str(), path.display());
    }
    println!();
    println!("Fingerprint: {}", roots.fingerprint());

    Ok(())
}
