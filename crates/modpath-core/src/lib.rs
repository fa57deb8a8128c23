#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

pub mod batch;
pub mod config;
pub mod error;
pub mod rewrite;
pub mod version;

pub use batch::{RewriteRequest, RewriteResponse};
pub use config::{Config, RootConfig, RootKind};
pub use error::Error;
pub use rewrite::{
    classify, module_name, relative_dir, AppTree, Classification, ImportRewriter, RewriteOutcome,
    RewriteTrace, RewriteTraceStep, SpecifierKind,
};
pub use version::VERSION;
