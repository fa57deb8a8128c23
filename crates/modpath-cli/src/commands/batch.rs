use super::fail_json;
use miette::{miette, IntoDiagnostic, Result};
use modpath_core::version::SCHEMA_VERSION;
use modpath_core::{ImportRewriter, RewriteRequest};
use modpath_util::fs::{atomic_write, read_to_string_lossy};
use serde::Serialize;
use std::path::Path;

/// Summary printed when results go to a file.
#[derive(Serialize)]
struct BatchSummary<'a> {
    schema_version: u32,
    ok: bool,
    count: usize,
    out: &'a Path,
}

/// Run the batch command.
///
/// Reads a JSON array of requests and writes a JSON array of responses, in
/// the same order, to stdout or atomically to `out`.
pub fn run(
    rewriter: &ImportRewriter,
    cwd: &Path,
    file: &Path,
    out: Option<&Path>,
    json: bool,
) -> Result<()> {
    let path = cwd.join(file);
    let content = match read_to_string_lossy(&path) {
        Ok(content) => content,
        Err(e) => {
            let message = format!("Failed to read {}: {e}", path.display());
            if json {
                fail_json("BATCH_READ_FAILED", message);
            }
            return Err(miette!("{message}"));
        }
    };
    let requests: Vec<RewriteRequest> = match serde_json::from_str(&content) {
        Ok(requests) => requests,
        Err(e) => {
            let message = format!("Failed to parse {}: {e}", path.display());
            if json {
                fail_json("BATCH_PARSE_FAILED", message);
            }
            return Err(miette!("{message}"));
        }
    };

    let responses = rewriter.rewrite_batch(&requests);
    let body = serde_json::to_string_pretty(&responses).into_diagnostic()?;

    let Some(out) = out else {
        println!("{body}");
        return Ok(());
    };

    let out_path = cwd.join(out);
    atomic_write(&out_path, body.as_bytes()).into_diagnostic()?;
    tracing::info!(count = responses.len(), out = %out_path.display(), "batch written");

    if json {
        let summary = BatchSummary {
            schema_version: SCHEMA_VERSION,
            ok: true,
            count: responses.len(),
            out: &out_path,
        };
        println!("{}", serde_json::to_string_pretty(&summary).into_diagnostic()?);
    } else {
        println!("Rewrote {} ids into {}", responses.len(), out_path.display());
    }

    Ok(())
}
