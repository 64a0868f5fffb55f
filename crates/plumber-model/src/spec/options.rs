use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::{
    decoration::{DecorationConfig, DecorationValidator, Permissive},
    error::ModelResult,
    kind::PipelineKind,
    source::Refs,
};

/// One trigger request: which job to run, where, and against what code.
///
/// Fields cover:
/// - trigger type and target (`kind`, `namespace`, `job`)
/// - code under test (`refs`)
/// - status reporting (`context`, `rerun_command`)
/// - concurrency and pod policy (`max_concurrency`, `decoration_config`)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PipelineOptionsSpec {
    /// How the run was triggered.
    #[serde(rename = "type", default, skip_serializing_if = "kind_is_unset")]
    pub kind: Option<PipelineKind>,
    /// Namespace in which pods and other resources are created.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    /// Name of the job definition.
    ///
    /// Uniqueness is owned by the orchestrator that resolves the name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub job: String,
    /// Code under test, resolved at trigger time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refs: Option<Refs>,
    /// Status context name used when reporting back to the code host.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub context: String,
    /// Comment a user writes on a pull request to trigger this job again.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rerun_command: String,
    /// Upper bound of parallel runs of this job; `0` means unbounded.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub max_concurrency: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoration_config: Option<DecorationConfig>,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

/// An empty tag is written like an absent one.
fn kind_is_unset(kind: &Option<PipelineKind>) -> bool {
    kind.as_ref().is_none_or(|k| k.as_str().is_empty())
}

impl PipelineOptionsSpec {
    /// Validate the nested decoration config with the permissive default.
    pub fn validate(&self) -> ModelResult<()> {
        self.validate_with(&Permissive)
    }

    /// Validate the nested decoration config, if any, with `validator`.
    pub fn validate_with<V>(&self, validator: &V) -> ModelResult<()>
    where
        V: DecorationValidator + ?Sized,
    {
        match &self.decoration_config {
            Some(cfg) => cfg.validate_with(validator),
            None => Ok(()),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_concurrency == 0
    }

    /// Pull requests under test; empty for runs without pull context.
    pub fn pulls(&self) -> &[crate::Pull] {
        self.refs.as_ref().map(|r| r.pulls.as_slice()).unwrap_or_default()
    }
}
