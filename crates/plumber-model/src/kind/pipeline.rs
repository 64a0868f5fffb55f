use std::fmt;

use serde::{Deserialize, Serialize};

/// How a pipeline run was triggered.
///
/// Serialized as a plain string. Values outside the known set are kept verbatim
/// in [`PipelineKind::Other`]; deciding what to do with them is up to the consumer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PipelineKind {
    /// Runs on unmerged pull requests.
    Presubmit,
    /// Runs on each new commit of a branch.
    Postsubmit,
    /// Runs on a time basis, unrelated to source changes.
    Periodic,
    /// Tests several unmerged pull requests together.
    Batch,
    /// Any other tag, preserved as written.
    Other(String),
}

impl PipelineKind {
    pub fn as_str(&self) -> &str {
        match self {
            PipelineKind::Presubmit => "presubmit",
            PipelineKind::Postsubmit => "postsubmit",
            PipelineKind::Periodic => "periodic",
            PipelineKind::Batch => "batch",
            PipelineKind::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, PipelineKind::Other(_))
    }

    /// Whether runs of this kind are expected to carry pull requests in their refs.
    pub fn has_pull_context(&self) -> bool {
        matches!(self, PipelineKind::Presubmit | PipelineKind::Batch)
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for PipelineKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "presubmit" => PipelineKind::Presubmit,
            "postsubmit" => PipelineKind::Postsubmit,
            "periodic" => PipelineKind::Periodic,
            "batch" => PipelineKind::Batch,
            _ => PipelineKind::Other(s),
        }
    }
}

impl From<&str> for PipelineKind {
    fn from(s: &str) -> Self {
        PipelineKind::from(s.to_string())
    }
}

impl From<PipelineKind> for String {
    fn from(k: PipelineKind) -> Self {
        match k {
            PipelineKind::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

#[cfg(feature = "schema")]
impl schemars::JsonSchema for PipelineKind {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "PipelineKind".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "examples": ["presubmit", "postsubmit", "periodic", "batch"]
        })
    }
}
