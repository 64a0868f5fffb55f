use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::{
    domain::{ObjectMeta, TypeMeta},
    spec::PipelineOptionsSpec,
};

/// Stored form of a trigger request: type header, object metadata and spec.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PipelineOptions {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    #[serde(default, skip_serializing_if = "ObjectMeta::is_empty")]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: PipelineOptionsSpec,
}

impl PipelineOptions {
    pub fn new(name: impl Into<String>, spec: PipelineOptionsSpec) -> Self {
        Self {
            type_meta: TypeMeta::default(),
            metadata: ObjectMeta::named(name),
            spec,
        }
    }

    /// Namespace pods are created in: `spec.namespace`, else `metadata.namespace`.
    pub fn effective_namespace(&self) -> &str {
        if self.spec.namespace.is_empty() {
            &self.metadata.namespace
        } else {
            &self.spec.namespace
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PipelineOptionsList {
    #[serde(default, alias = "Items")]
    pub items: Vec<PipelineOptions>,
}
