mod pipeline_options;
pub use pipeline_options::{PipelineOptions, PipelineOptionsList};
