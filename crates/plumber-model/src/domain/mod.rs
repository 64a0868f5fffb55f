mod duration;
pub use duration::Duration;

mod meta;
pub use meta::{ObjectMeta, TypeMeta};

/// Name of a secret holding credentials mounted into decorated pods.
pub type SecretName = String;
