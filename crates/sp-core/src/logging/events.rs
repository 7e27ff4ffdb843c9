//! Structured event vocabulary.
//!
//! Every CLI-level event carries the run ID, a [`Stage`] and one of the
//! [`event_names`] as its target, so JSONL logs can be filtered by stage.

use serde::{Deserialize, Serialize};

/// Pipeline stages of one spamplan invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Startup and configuration loading.
    Init,
    /// Per-word classifier table construction.
    Build,
    /// Choosing which classifiers answer a query.
    Select,
    /// Running the combination strategy.
    Combine,
    /// Rendering output.
    Report,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Init => "init",
            Stage::Build => "build",
            Stage::Select => "select",
            Stage::Combine => "combine",
            Stage::Report => "report",
        };
        write!(f, "{}", s)
    }
}

/// Standard event names used in logging.
pub mod event_names {
    pub const RUN_STARTED: &str = "run.started";
    pub const RUN_FINISHED: &str = "run.finished";

    pub const CONFIG_LOADED: &str = "config.loaded";
    pub const CONFIG_ERROR: &str = "config.error";

    pub const CLASSIFIER_BUILT: &str = "build.classifier_ready";

    pub const QUERY_CLASSIFIED: &str = "combine.query_classified";
    pub const QUERY_UNDECIDED: &str = "combine.query_undecided";

    pub const INTERNAL_ERROR: &str = "internal_error";
}
