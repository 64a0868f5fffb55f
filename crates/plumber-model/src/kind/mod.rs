mod pipeline;
pub use pipeline::PipelineKind;
