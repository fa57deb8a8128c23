//! Parallel rewriting of many import references at once.
//!
//! Rewrites are independent of each other, so a batch is split across the
//! rayon pool; output order always matches input order.

use crate::rewrite::{ImportRewriter, SpecifierKind};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One import reference to rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRequest {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl RewriteRequest {
    #[must_use]
    pub fn new(id: impl Into<String>, parent: Option<String>) -> Self {
        Self {
            id: id.into(),
            parent,
        }
    }
}

/// Result for one [`RewriteRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub specifier: String,
    pub kind: SpecifierKind,
}

impl ImportRewriter {
    /// Rewrite every request, in parallel, preserving order.
    #[must_use]
    pub fn rewrite_batch(&self, requests: &[RewriteRequest]) -> Vec<RewriteResponse> {
        tracing::debug!(count = requests.len(), "rewriting batch");

        requests
            .par_iter()
            .map(|req| {
                let (specifier, kind) = self.rewrite_with_kind(&req.id, req.parent.as_deref());
                RewriteResponse {
                    id: req.id.clone(),
                    parent: req.parent.clone(),
                    specifier,
                    kind,
                }
            })
            .collect()
    }
}
