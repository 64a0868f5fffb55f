use crate::{
    decoration::DecorationConfig,
    error::{ModelError, ModelResult},
};

/// Check applied to a [`DecorationConfig`] before it is handed to consumers.
///
/// Validators are pure: they never touch I/O and never modify the record.
pub trait DecorationValidator {
    fn validate(&self, cfg: &DecorationConfig) -> ModelResult<()>;
}

/// Accepts every record.
///
/// This is what [`DecorationConfig::validate`] runs. Secret names, fingerprints
/// and duration bounds are left to the consumers reading those fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct Permissive;

impl DecorationValidator for Permissive {
    fn validate(&self, _cfg: &DecorationConfig) -> ModelResult<()> {
        Ok(())
    }
}

/// Opt-in check of the interrupt timing.
///
/// - `timeout`, when set, must be positive.
/// - `grace_period`, when set, must not be negative.
/// - with both set, `grace_period` must be shorter than `timeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GraceWithinTimeout;

impl DecorationValidator for GraceWithinTimeout {
    fn validate(&self, cfg: &DecorationConfig) -> ModelResult<()> {
        if let Some(timeout) = cfg.timeout
            && (timeout.is_negative() || timeout.is_zero())
        {
            return Err(ModelError::Invalid(format!("timeout must be positive, got {timeout}")));
        }
        if let Some(grace) = cfg.grace_period
            && grace.is_negative()
        {
            return Err(ModelError::Invalid(format!(
                "grace_period must not be negative, got {grace}"
            )));
        }
        if let (Some(timeout), Some(grace)) = (cfg.timeout, cfg.grace_period)
            && grace >= timeout
        {
            return Err(ModelError::Invalid(format!(
                "grace_period {grace} must be shorter than timeout {timeout}"
            )));
        }
        Ok(())
    }
}

impl<F> DecorationValidator for F
where
    F: Fn(&DecorationConfig) -> ModelResult<()>,
{
    fn validate(&self, cfg: &DecorationConfig) -> ModelResult<()> {
        self(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Duration;

    fn cfg(timeout: Option<Duration>, grace: Option<Duration>) -> DecorationConfig {
        DecorationConfig {
            timeout,
            grace_period: grace,
            ..Default::default()
        }
    }

    #[test]
    fn permissive_accepts_everything() {
        let bad = cfg(Some(Duration::from_secs(-5)), Some(Duration::from_hours(1)));
        assert!(bad.validate_with(&Permissive).is_ok());
    }

    #[test]
    fn grace_within_timeout_accepts_sane_values() {
        let v = GraceWithinTimeout;
        assert!(cfg(None, None).validate_with(&v).is_ok());
        assert!(cfg(Some(Duration::from_hours(2)), None).validate_with(&v).is_ok());
        assert!(cfg(None, Some(Duration::from_secs(15))).validate_with(&v).is_ok());
        assert!(
            cfg(Some(Duration::from_hours(2)), Some(Duration::from_secs(15)))
                .validate_with(&v)
                .is_ok()
        );
    }

    #[test]
    fn grace_within_timeout_rejects_inverted_timing() {
        let v = GraceWithinTimeout;
        let err = cfg(Some(Duration::from_secs(10)), Some(Duration::from_secs(10)))
            .validate_with(&v)
            .unwrap_err();
        assert!(matches!(err, ModelError::Invalid(_)));
        assert!(err.to_string().contains("grace_period 10s"), "{err}");
    }

    #[test]
    fn grace_within_timeout_rejects_non_positive_values() {
        let v = GraceWithinTimeout;
        assert!(cfg(Some(Duration::ZERO), None).validate_with(&v).is_err());
        assert!(cfg(Some(Duration::from_secs(-1)), None).validate_with(&v).is_err());
        assert!(cfg(None, Some(Duration::from_secs(-1))).validate_with(&v).is_err());

        let err = cfg(Some(Duration::from_secs(10)), Some(Duration::from_secs(-1)))
            .validate_with(&v)
            .unwrap_err();
        assert!(err.to_string().contains("must not be negative"), "{err}");
    }

    #[test]
    fn closures_and_trait_objects_are_validators() {
        let no_ssh = |c: &DecorationConfig| {
            if c.ssh_key_secrets.is_empty() {
                Ok(())
            } else {
                Err(ModelError::Invalid("ssh keys are not allowed".into()))
            }
        };
        let with_keys = DecorationConfig {
            ssh_key_secrets: vec!["key".into()],
            ..Default::default()
        };
        assert!(with_keys.validate_with(&no_ssh).is_err());

        let dynamic: &dyn DecorationValidator = &GraceWithinTimeout;
        assert!(with_keys.validate_with(dynamic).is_ok());
    }
}
