use miette::{IntoDiagnostic, Result};
use modpath_core::version::SCHEMA_VERSION;
use modpath_core::{ImportRewriter, SpecifierKind};
use serde::Serialize;

/// Rewrite result for JSON output.
#[derive(Serialize)]
struct RewriteResult<'a> {
    schema_version: u32,
    ok: bool,
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<&'a str>,
    specifier: String,
    kind: SpecifierKind,
}

/// Run the rewrite command.
pub fn run(rewriter: &ImportRewriter, id: &str, parent: Option<&str>, json: bool) -> Result<()> {
    let (specifier, kind) = rewriter.rewrite_with_kind(id, parent);

    if json {
        let result = RewriteResult {
            schema_version: SCHEMA_VERSION,
            ok: true,
            id,
            parent,
            specifier,
            kind,
        };
        println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
    } else {
        println!("{specifier}");
    }

    Ok(())
}
