//! Schema of pipeline trigger requests.
//!
//! Records here are plain values: built once from a wire payload or a
//! declarative file, then read by the orchestrator, the pod lifecycle manager
//! and the checkout utility. Nothing in this crate performs I/O.

mod domain;
pub use domain::{Duration, ObjectMeta, SecretName, TypeMeta};

mod error;
pub use error::{ModelError, ModelResult};

mod kind;
pub use kind::PipelineKind;

mod source;
pub use source::{Pull, Refs};

mod decoration;
pub use decoration::{DecorationConfig, DecorationValidator, GraceWithinTimeout, Permissive};

mod spec;
pub use spec::PipelineOptionsSpec;

mod api;
pub use api::{PipelineOptions, PipelineOptionsList};

pub mod document;
pub use document::DocumentFormat;
