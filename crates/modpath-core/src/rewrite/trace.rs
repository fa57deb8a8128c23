//! Rewrite tracing for the `explain` command.
//!
//! Records each decision taken while turning an id into a specifier.

use super::format::SpecifierKind;
use serde::Serialize;
use std::path::PathBuf;

/// Schema version for the explain output format.
/// Bump when the trace structure changes incompatibly.
pub const REWRITE_TRACE_SCHEMA_VERSION: u32 = 1;

/// A single step in the rewrite trace.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteTraceStep {
    /// Step code (one of [`steps`]).
    pub step: &'static str,
    pub ok: bool,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

impl RewriteTraceStep {
    pub fn new(step: &'static str, ok: bool, detail: impl Into<String>) -> Self {
        Self {
            step,
            ok,
            detail: detail.into(),
            path: None,
            package: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }
}

/// Ordered steps of one rewrite.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RewriteTrace {
    pub steps: Vec<RewriteTraceStep>,
}

impl RewriteTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, step: RewriteTraceStep) {
        self.steps.push(step);
    }

    /// Codes of all recorded steps, in order.
    pub fn step_codes(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.step).collect()
    }
}

/// A specifier together with how it was derived.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteOutcome {
    pub specifier: String,
    pub kind: SpecifierKind,
    pub trace: RewriteTrace,
}

/// Step codes.
pub mod steps {
    /// Turn the id into an absolute, normalized path.
    pub const RESOLVE_ID: &str = "resolve_id";
    /// Match the id against the roots.
    pub const CLASSIFY_ID: &str = "classify_id";
    /// Match the importer against the roots.
    pub const CLASSIFY_PARENT: &str = "classify_parent";
    /// Unclassified id returned unchanged.
    pub const PASSTHROUGH: &str = "passthrough";
    /// Project-root sibling rule.
    pub const PROJECT_ROOT: &str = "project_root";
    /// Importer and id share a package.
    pub const SAME_PACKAGE: &str = "same_package";
    /// Bare package-qualified specifier.
    pub const BARE: &str = "bare";
}
