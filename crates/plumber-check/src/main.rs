use clap::Parser;
use tracing::{error, info};

use plumber_observe::{LoggerConfig, init_logger};

mod check;
mod cli;

use check::{Outcome, check_file};
use cli::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let cfg = LoggerConfig {
        format: args.log_format,
        level: args.log_level.clone(),
        ..Default::default()
    };
    init_logger(&cfg)?;

    let validator = args.validator();
    let mut failed = 0usize;
    for path in &args.files {
        match check_file(path, args.format, validator.as_ref()) {
            Ok(Outcome { options, canonical }) => {
                info!(
                    file = %path.display(),
                    job = %options.spec.job,
                    kind = options.spec.kind.as_ref().map(|k| k.as_str()).unwrap_or(""),
                    "document is valid"
                );
                if args.canonical {
                    println!("{canonical}");
                }
            }
            Err(e) => {
                failed += 1;
                error!(file = %path.display(), error = %format_args!("{e:#}"), "document rejected");
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} documents rejected", args.files.len());
    }
    Ok(())
}
