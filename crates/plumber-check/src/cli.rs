use std::path::PathBuf;

use clap::Parser;

use plumber_model::{DecorationValidator, DocumentFormat, GraceWithinTimeout, Permissive};
use plumber_observe::{LoggerFormat, LoggerLevel};

/// Check pipeline-options documents and print their canonical form.
#[derive(Debug, Parser)]
#[command(name = "plumber-check", version, about, long_about = None)]
pub struct Args {
    /// Documents to check (JSON or YAML).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Force the input format instead of guessing from the extension.
    #[arg(short, long)]
    pub format: Option<DocumentFormat>,

    /// Reject decoration configs whose grace period is not shorter than the timeout.
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Print each accepted document as canonical JSON on stdout.
    #[arg(short, long, default_value_t = false)]
    pub canonical: bool,

    #[arg(long, env = "PLUMBER_LOG", default_value = "info")]
    pub log_level: LoggerLevel,

    #[arg(long, default_value = "text")]
    pub log_format: LoggerFormat,
}

impl Args {
    pub fn validator(&self) -> Box<dyn DecorationValidator> {
        if self.strict {
            Box::new(GraceWithinTimeout)
        } else {
            Box::new(Permissive)
        }
    }
}
