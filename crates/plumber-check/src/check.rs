use std::{fs, path::Path};

use anyhow::Context;
use tracing::debug;

use plumber_model::{DecorationValidator, DocumentFormat, PipelineOptions, document};

/// An accepted document and its canonical JSON form.
#[derive(Debug)]
pub struct Outcome {
    pub options: PipelineOptions,
    pub canonical: String,
}

/// Read, decode and validate one pipeline-options document.
pub fn check_file(
    path: &Path,
    format: Option<DocumentFormat>,
    validator: &dyn DecorationValidator,
) -> anyhow::Result<Outcome> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let format = format.unwrap_or_else(|| DocumentFormat::from_path(path));
    debug!(file = %path.display(), %format, "decoding");

    let options: PipelineOptions = format.decode(&raw)?;
    options.spec.validate_with(validator)?;

    let canonical = document::to_json(&options)?;
    Ok(Outcome { options, canonical })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use plumber_model::{Duration, GraceWithinTimeout, ModelError, Permissive};

    use super::*;

    fn write_tmp(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn accepts_json_and_canonicalizes_durations() {
        let f = write_tmp(
            ".json",
            r#"{"spec":{"type":"periodic","job":"nightly","decoration_config":{"timeout":3600000000000}}}"#,
        );
        let out = check_file(f.path(), None, &Permissive).unwrap();
        assert_eq!(out.options.spec.job, "nightly");
        let timeout = out.options.spec.decoration_config.as_ref().unwrap().timeout;
        assert_eq!(timeout, Some(Duration::from_hours(1)));
        assert!(out.canonical.contains(r#""timeout":"1h0m0s""#), "{}", out.canonical);
    }

    #[test]
    fn accepts_yaml_by_extension() {
        let f = write_tmp(".yaml", "spec:\n  type: batch\n  job: merge\n");
        let out = check_file(f.path(), None, &Permissive).unwrap();
        assert_eq!(out.options.spec.job, "merge");
    }

    #[test]
    fn forced_format_overrides_extension() {
        let f = write_tmp(".txt", r#"{"spec":{"job":"x"}}"#);
        assert!(check_file(f.path(), Some(DocumentFormat::Json), &Permissive).is_ok());
    }

    #[test]
    fn strict_validator_rejects_inverted_timing() {
        let f = write_tmp(
            ".yaml",
            "spec:\n  decoration_config:\n    timeout: 10s\n    grace_period: 1m\n",
        );
        assert!(check_file(f.path(), None, &Permissive).is_ok());

        let err = check_file(f.path(), None, &GraceWithinTimeout).unwrap_err();
        assert!(matches!(err.downcast_ref::<ModelError>(), Some(ModelError::Invalid(_))));
    }

    #[test]
    fn malformed_duration_is_reported() {
        let f = write_tmp(".json", r#"{"spec":{"decoration_config":{"timeout":"not-a-duration"}}}"#);
        let err = check_file(f.path(), None, &Permissive).unwrap_err();
        assert!(err.to_string().contains("not-a-duration"), "{err:#}");
    }

    #[test]
    fn missing_file_has_context() {
        let err = check_file(Path::new("/nonexistent/opts.json"), None, &Permissive).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/opts.json"), "{err}");

        // The logged form carries the OS cause after the context.
        let io = err.root_cause().to_string();
        let logged = format!("{err:#}");
        assert!(logged.starts_with("reading /nonexistent/opts.json: "), "{logged}");
        assert!(logged.ends_with(&io), "{logged}");
    }
}
