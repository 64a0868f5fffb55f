use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::{
    decoration::{DecorationValidator, Permissive},
    domain::{Duration, SecretName},
    error::ModelResult,
};

/// Pod-level execution policy applied when a run's pod is decorated.
///
/// The record only carries values. Enforcing timeouts, mounting secrets and
/// cloning are done by the pod lifecycle manager and the checkout utility.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DecorationConfig {
    /// How long the job may run before it is interrupted. `None` means the consumer default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
    /// Delay between the interrupt and the forced kill of an aborted job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grace_period: Option<Duration>,
    /// Secret holding credentials for uploading logs and artifacts.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gcs_credentials_secret: SecretName,
    /// Secrets holding SSH keys used while cloning, in mount order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ssh_key_secrets: Vec<SecretName>,
    /// Known SSH host fingerprints, as printed by `ssh-keyscan`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ssh_host_fingerprints: Vec<String>,
    /// `None` inherits the consumer default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_cloning: Option<bool>,
    /// Secret holding a git `http.cookiefile` used while cloning.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cookiefile_secret: SecretName,
}

impl DecorationConfig {
    /// Report whether the record is usable.
    ///
    /// Uses the [`Permissive`] validator, which accepts every record; secret
    /// names, fingerprints and durations are checked by the consumers that use
    /// them. Stricter checks go through [`DecorationConfig::validate_with`].
    pub fn validate(&self) -> ModelResult<()> {
        self.validate_with(&Permissive)
    }

    pub fn validate_with<V>(&self, validator: &V) -> ModelResult<()>
    where
        V: DecorationValidator + ?Sized,
    {
        validator.validate(self)
    }

    /// Build a new record taking every unset field from `defaults`.
    ///
    /// Lists count as unset when empty, strings when empty.
    pub fn with_defaults(&self, defaults: &DecorationConfig) -> DecorationConfig {
        fn pick<T: Clone>(own: &T, def: &T, unset: impl Fn(&T) -> bool) -> T {
            if unset(own) { def.clone() } else { own.clone() }
        }

        DecorationConfig {
            timeout: self.timeout.or(defaults.timeout),
            grace_period: self.grace_period.or(defaults.grace_period),
            gcs_credentials_secret: pick(
                &self.gcs_credentials_secret,
                &defaults.gcs_credentials_secret,
                String::is_empty,
            ),
            ssh_key_secrets: pick(&self.ssh_key_secrets, &defaults.ssh_key_secrets, Vec::is_empty),
            ssh_host_fingerprints: pick(
                &self.ssh_host_fingerprints,
                &defaults.ssh_host_fingerprints,
                Vec::is_empty,
            ),
            skip_cloning: self.skip_cloning.or(defaults.skip_cloning),
            cookiefile_secret: pick(
                &self.cookiefile_secret,
                &defaults.cookiefile_secret,
                String::is_empty,
            ),
        }
    }

    pub fn timeout_or(&self, default: Duration) -> Duration {
        self.timeout.unwrap_or(default)
    }

    pub fn grace_period_or(&self, default: Duration) -> Duration {
        self.grace_period.unwrap_or(default)
    }

    pub fn skip_cloning_or(&self, default: bool) -> bool {
        self.skip_cloning.unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_validates() {
        let cfg: DecorationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, DecorationConfig::default());
        assert!(cfg.validate().is_ok());
        assert_eq!(serde_json::to_string(&cfg).unwrap(), "{}");
    }

    #[test]
    fn permissive_default_accepts_odd_values() {
        let cfg = DecorationConfig {
            timeout: Some(Duration::from_secs(-1)),
            grace_period: Some(Duration::from_hours(5)),
            ssh_host_fingerprints: vec!["not a fingerprint".into()],
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn durations_accept_both_encodings() {
        let json = r#"{"timeout": 7200000000000, "grace_period": "15s"}"#;
        let cfg: DecorationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.timeout, Some(Duration::from_hours(2)));
        assert_eq!(cfg.grace_period, Some(Duration::from_secs(15)));

        let out = serde_json::to_string(&cfg).unwrap();
        assert_eq!(out, r#"{"timeout":"2h0m0s","grace_period":"15s"}"#);
    }

    #[test]
    fn malformed_timeout_fails_the_record() {
        let err = serde_json::from_str::<DecorationConfig>(r#"{"timeout":"soon"}"#).unwrap_err();
        assert!(err.to_string().contains("soon"), "{err}");
    }

    #[test]
    fn full_record_wire_names() {
        let json = r#"{
            "timeout": "1h",
            "grace_period": "30s",
            "gcs_credentials_secret": "gcs-creds",
            "ssh_key_secrets": ["key-a", "key-b"],
            "ssh_host_fingerprints": ["github.com ssh-rsa AAAA"],
            "skip_cloning": false,
            "cookiefile_secret": "cookies"
        }"#;
        let cfg: DecorationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.gcs_credentials_secret, "gcs-creds");
        assert_eq!(cfg.ssh_key_secrets, vec!["key-a", "key-b"]);
        assert_eq!(cfg.ssh_host_fingerprints.len(), 1);
        assert_eq!(cfg.skip_cloning, Some(false));
        assert_eq!(cfg.cookiefile_secret, "cookies");

        let out = serde_json::to_value(&cfg).unwrap();
        assert_eq!(out["skip_cloning"], serde_json::json!(false));
        assert_eq!(out["timeout"], serde_json::json!("1h0m0s"));
    }

    #[test]
    fn with_defaults_fills_only_unset_fields() {
        let defaults = DecorationConfig {
            timeout: Some(Duration::from_hours(2)),
            grace_period: Some(Duration::from_secs(15)),
            gcs_credentials_secret: "default-gcs".into(),
            ssh_key_secrets: vec!["default-key".into()],
            skip_cloning: Some(true),
            ..Default::default()
        };
        let own = DecorationConfig {
            timeout: Some(Duration::from_mins(10)),
            ssh_key_secrets: vec!["own-key".into()],
            skip_cloning: Some(false),
            ..Default::default()
        };

        let merged = own.with_defaults(&defaults);
        assert_eq!(merged.timeout, Some(Duration::from_mins(10)));
        assert_eq!(merged.grace_period, Some(Duration::from_secs(15)));
        assert_eq!(merged.gcs_credentials_secret, "default-gcs");
        assert_eq!(merged.ssh_key_secrets, vec!["own-key"]);
        assert_eq!(merged.skip_cloning, Some(false));
        assert!(merged.cookiefile_secret.is_empty());

        assert_eq!(own.grace_period, None);
    }

    #[test]
    fn fallback_accessors() {
        let cfg = DecorationConfig::default();
        assert_eq!(cfg.timeout_or(Duration::from_hours(2)), Duration::from_hours(2));
        assert_eq!(cfg.grace_period_or(Duration::ZERO), Duration::ZERO);
        assert!(cfg.skip_cloning_or(true));

        let cfg = DecorationConfig {
            skip_cloning: Some(false),
            ..Default::default()
        };
        assert!(!cfg.skip_cloning_or(true));
    }
}
