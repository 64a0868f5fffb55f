mod options;
pub use options::PipelineOptionsSpec;
