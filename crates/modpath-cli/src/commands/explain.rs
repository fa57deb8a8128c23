use miette::{IntoDiagnostic, Result};
use modpath_core::rewrite::trace::REWRITE_TRACE_SCHEMA_VERSION;
use modpath_core::{
    Classification, ImportRewriter, RewriteOutcome, RewriteTraceStep, SpecifierKind,
};
use serde::Serialize;

/// Explain result for JSON output.
#[derive(Serialize)]
struct ExplainResult<'a> {
    schema_version: u32,
    ok: bool,
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<&'a str>,
    id_classification: &'a Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_classification: Option<&'a Classification>,
    specifier: &'a str,
    kind: SpecifierKind,
    trace: &'a [RewriteTraceStep],
}

/// Run the explain command.
pub fn run(rewriter: &ImportRewriter, id: &str, parent: Option<&str>, json: bool) -> Result<()> {
    let outcome = rewriter.rewrite_with_trace(id, parent);
    let id_class = rewriter.classify(id);
    let parent_class = parent.map(|p| rewriter.classify(p));

    if json {
        let result = ExplainResult {
            schema_version: REWRITE_TRACE_SCHEMA_VERSION,
            ok: true,
            id,
            parent,
            id_classification: &id_class,
            parent_classification: parent_class.as_ref(),
            specifier: &outcome.specifier,
            kind: outcome.kind,
            trace: &outcome.trace.steps,
        };
        println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
    } else {
        print_explain_human(id, parent, &id_class, parent_class.as_ref(), &outcome);
    }

    Ok(())
}

fn print_explain_human(
    id: &str,
    parent: Option<&str>,
    id_class: &Classification,
    parent_class: Option<&Classification>,
    outcome: &RewriteOutcome,
) {
    println!("Id: {id}");
    println!("  {}", describe(id_class));
    println!("Parent: {}", parent.unwrap_or("(none)"));
    if let Some(class) = parent_class {
        println!("  {}", describe(class));
    }
    println!();
    println!("Specifier: {}", outcome.specifier);
    println!("Kind: {}", outcome.kind.as_str());
    println!();

    println!("Rewrite trace:");
    for (i, step) in outcome.trace.steps.iter().enumerate() {
        let status = if step.ok { "OK" } else { "MISS" };
        println!("  {}. [{}] {}: {}", i + 1, status, step.step, step.detail);

        if let Some(ref path) = step.path {
            println!("      path: {}", path.display());
        }
        if let Some(ref package) = step.package {
            println!("      package: {package}");
        }
    }
}

fn describe(class: &Classification) -> String {
    match (class.root_kind(), class.package()) {
        (None, _) => "unclassified".to_string(),
        (Some(root), Some(package)) => format!(
            "root: {root}, package: {package}, path: {}",
            class.rel_path().unwrap_or_default()
        ),
        (Some(root), None) => format!("root: {root}, path: {}", class.rel_path().unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modpath_core::RootKind;

    #[test]
    fn test_describe_classifications() {
        assert_eq!(describe(&Classification::Unclassified), "unclassified");

        let class = Classification::External {
            root: RootKind::NodeModulesSrc,
            package: "lodash".to_string(),
            rel_path: "lib/index.js".to_string(),
        };
        assert_eq!(
            describe(&class),
            "root: nodeModulesSrc, package: lodash, path: lib/index.js"
        );

        let class = Classification::ProjectRootFile {
            rel_path: "config/environment.js".to_string(),
        };
        assert_eq!(describe(&class), "root: projectRoot, path: config/environment.js");
    }
}
